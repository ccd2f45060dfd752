// ABOUTME: Health check route handlers for operational visibility
// ABOUTME: Reports service status and database connectivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::server::ServerResources;

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle health check request
    ///
    /// Reports degraded rather than failing the request when the database
    /// probe errors, so load balancers always get a parseable body.
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let database_ok = sqlx::query("SELECT 1")
            .fetch_one(resources.database.pool())
            .await
            .is_ok();

        let status = if database_ok { "healthy" } else { "degraded" };
        let code = if database_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        let body = json!({
            "status": status,
            "service": "fitclub-server",
            "version": env!("CARGO_PKG_VERSION"),
            "database": if database_ok { "connected" } else { "unreachable" },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (code, Json(body)).into_response()
    }
}
