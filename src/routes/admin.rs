// ABOUTME: Admin route handlers for class creation and room reassignment
// ABOUTME: Both operations run the room occupancy conflict checks before committing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;

use crate::database::NewGroupClass;
use crate::errors::AppError;
use crate::models::{BookingRef, DayOfWeek};
use crate::scheduling::TimeRange;
use crate::server::ServerResources;

/// Request body for creating a recurring group class
#[derive(Debug, Deserialize)]
struct ClassRequest {
    class_name: String,
    day_of_week: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    capacity: i64,
    room_id: i64,
    trainer_id: i64,
}

/// Request body for moving a booking into a different room
#[derive(Debug, Deserialize)]
struct RoomBookingRequest {
    #[serde(flatten)]
    booking: BookingRef,
    new_room_id: i64,
}

/// Admin routes
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/admin/:admin_id/classes", post(Self::handle_create_class))
            .route(
                "/admin/:admin_id/room-booking",
                put(Self::handle_reassign_room),
            )
            .with_state(resources)
    }

    /// Handle creating a recurring group class
    async fn handle_create_class(
        State(resources): State<Arc<ServerResources>>,
        Path(admin_id): Path<i64>,
        Json(request): Json<ClassRequest>,
    ) -> Result<Response, AppError> {
        let day = DayOfWeek::parse(&request.day_of_week).ok_or_else(|| {
            AppError::invalid_input(format!("Invalid day of week: {}", request.day_of_week))
        })?;
        let class = NewGroupClass {
            class_name: request.class_name,
            day,
            range: TimeRange::new(request.start_time, request.end_time)?,
            capacity: request.capacity,
            room_id: request.room_id,
            trainer_id: request.trainer_id,
        };
        let class_id = resources.database.classes().create_class(admin_id, &class).await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "class_id": class_id,
                "class_name": class.class_name,
                "day_of_week": day.as_str(),
                "capacity": class.capacity,
            })),
        )
            .into_response())
    }

    /// Handle moving a booking into a different room
    async fn handle_reassign_room(
        State(resources): State<Arc<ServerResources>>,
        Path(admin_id): Path<i64>,
        Json(request): Json<RoomBookingRequest>,
    ) -> Result<Response, AppError> {
        let reassignment = resources
            .database
            .room_assignments()
            .reassign_room(admin_id, request.booking, request.new_room_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "admin_id": admin_id,
                "booking": reassignment.booking,
                "new_room_id": reassignment.new_room_id,
                "new_room_name": reassignment.new_room_name,
                "message": "Room reassigned successfully",
            })),
        )
            .into_response())
    }
}
