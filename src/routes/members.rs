// ABOUTME: Member route handlers for registration, profile, and bookings
// ABOUTME: Covers health metrics, fitness goals, class registration, and PT session scheduling
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
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;

use crate::database::{
    MemberProfileUpdate, NewFitnessGoal, NewHealthMetric, NewMemberRegistration, NewSession,
};
use crate::errors::AppError;
use crate::scheduling::TimeRange;
use crate::server::ServerResources;

/// Request body for scheduling a personal training session
#[derive(Debug, Deserialize)]
struct SessionRequest {
    trainer_id: i64,
    room_id: i64,
    session_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

/// Request body for registering for a group class
#[derive(Debug, Deserialize)]
struct ClassRegistrationRequest {
    class_id: i64,
}

/// Member routes
pub struct MemberRoutes;

impl MemberRoutes {
    /// Create all member routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/members/register", post(Self::handle_register))
            .route("/members/:member_id", put(Self::handle_update_profile))
            .route(
                "/members/:member_id/health-metrics",
                post(Self::handle_log_metric).get(Self::handle_list_metrics),
            )
            .route(
                "/members/:member_id/fitness-goals",
                post(Self::handle_create_goal).get(Self::handle_list_goals),
            )
            .route(
                "/members/:member_id/class-registrations",
                post(Self::handle_register_for_class),
            )
            .route(
                "/members/:member_id/pt-sessions",
                post(Self::handle_schedule_session),
            )
            .with_state(resources)
    }

    /// Handle member registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(registration): Json<NewMemberRegistration>,
    ) -> Result<Response, AppError> {
        let member_id = resources
            .database
            .users()
            .register_member(&registration)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "member_id": member_id,
                "message": "Member registered successfully",
            })),
        )
            .into_response())
    }

    /// Handle member profile update
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(patch): Json<MemberProfileUpdate>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .users()
            .update_member_profile(member_id, &patch)
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "member_id": member_id,
                "message": "Profile updated successfully",
            })),
        )
            .into_response())
    }

    /// Handle logging a health metric entry
    async fn handle_log_metric(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(metric): Json<NewHealthMetric>,
    ) -> Result<Response, AppError> {
        let (metric_id, recorded_at) = resources
            .database
            .health_metrics()
            .log_metric(member_id, &metric)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "metric_id": metric_id,
                "member_id": member_id,
                "recorded_at": recorded_at.to_rfc3339(),
            })),
        )
            .into_response())
    }

    /// Handle listing a member's health metric history
    async fn handle_list_metrics(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let metrics = resources
            .database
            .health_metrics()
            .metrics_for_member(member_id)
            .await?;
        Ok((StatusCode::OK, Json(metrics)).into_response())
    }

    /// Handle creating a fitness goal
    async fn handle_create_goal(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(goal): Json<NewFitnessGoal>,
    ) -> Result<Response, AppError> {
        let goal_id = resources
            .database
            .goals()
            .create_goal(member_id, &goal)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "goal_id": goal_id,
                "member_id": member_id,
                "status": "Active",
            })),
        )
            .into_response())
    }

    /// Handle listing a member's fitness goals
    async fn handle_list_goals(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let goals = resources
            .database
            .goals()
            .goals_for_member(member_id)
            .await?;
        Ok((StatusCode::OK, Json(goals)).into_response())
    }

    /// Handle registering a member for a group class
    ///
    /// Capacity and duplicate checks happen inside the manager; a full class
    /// surfaces as 409 `capacity_exceeded`.
    async fn handle_register_for_class(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(request): Json<ClassRegistrationRequest>,
    ) -> Result<Response, AppError> {
        let registration_id = resources
            .database
            .classes()
            .register_for_class(member_id, request.class_id)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "registration_id": registration_id,
                "member_id": member_id,
                "class_id": request.class_id,
                "message": "Registered for class successfully",
            })),
        )
            .into_response())
    }

    /// Handle scheduling a personal training session
    async fn handle_schedule_session(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(request): Json<SessionRequest>,
    ) -> Result<Response, AppError> {
        let session = NewSession {
            member_id,
            trainer_id: request.trainer_id,
            room_id: request.room_id,
            session_date: request.session_date,
            range: TimeRange::new(request.start_time, request.end_time)?,
        };
        let session_id = resources.database.sessions().schedule_session(&session).await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "session_id": session_id,
                "member_id": member_id,
                "trainer_id": request.trainer_id,
                "room_id": request.room_id,
                "status": "SCHEDULED",
            })),
        )
            .into_response())
    }
}
