// ABOUTME: Trainer route handlers for availability and schedules
// ABOUTME: Validates weekly availability windows and serves combined session/class schedules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::DayOfWeek;
use crate::scheduling::TimeRange;
use crate::server::ServerResources;

/// Request body for declaring a weekly availability window
#[derive(Debug, Deserialize)]
struct AvailabilityRequest {
    day_of_week: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

/// Trainer routes
pub struct TrainerRoutes;

impl TrainerRoutes {
    /// Create all trainer routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/trainers/:trainer_id/availability",
                post(Self::handle_add_availability),
            )
            .route(
                "/trainers/:trainer_id/schedule",
                get(Self::handle_schedule),
            )
            .with_state(resources)
    }

    /// Handle adding a weekly availability window
    async fn handle_add_availability(
        State(resources): State<Arc<ServerResources>>,
        Path(trainer_id): Path<i64>,
        Json(request): Json<AvailabilityRequest>,
    ) -> Result<Response, AppError> {
        let day = DayOfWeek::parse(&request.day_of_week).ok_or_else(|| {
            AppError::invalid_input(format!("Invalid day of week: {}", request.day_of_week))
        })?;
        let range = TimeRange::new(request.start_time, request.end_time)?;

        let availability_id = resources
            .database
            .availability()
            .add_availability(trainer_id, day, range)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "availability_id": availability_id,
                "trainer_id": trainer_id,
                "day_of_week": day.as_str(),
                "status": "ACTIVE",
            })),
        )
            .into_response())
    }

    /// Handle fetching a trainer's combined schedule
    async fn handle_schedule(
        State(resources): State<Arc<ServerResources>>,
        Path(trainer_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let schedule = resources.database.sessions().trainer_schedule(trainer_id).await?;
        Ok((StatusCode::OK, Json(schedule)).into_response())
    }
}
