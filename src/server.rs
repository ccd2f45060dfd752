// ABOUTME: HTTP server assembly for the FitClub REST API
// ABOUTME: Shared resource container, router construction, and Axum serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! HTTP server setup and lifecycle

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{info, Level};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::routes::{AdminRoutes, HealthRoutes, MemberRoutes, TrainerRoutes};

/// Shared resources injected into every route handler
pub struct ServerResources {
    /// Database connection pool and domain managers
    pub database: Database,
    /// Runtime configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the database and configuration for handler state
    #[must_use]
    pub const fn new(database: Database, config: ServerConfig) -> Self {
        Self { database, config }
    }
}

/// The FitClub HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete router with all route modules and middleware
    #[must_use]
    pub fn router(resources: &Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .merge(MemberRoutes::routes(Arc::clone(resources)))
            .merge(TrainerRoutes::routes(Arc::clone(resources)))
            .merge(AdminRoutes::routes(Arc::clone(resources)))
    }

    /// Run the HTTP server until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the serve loop fails
    pub async fn run(&self) -> AppResult<()> {
        let app = Self::router(&self.resources).layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );
        let app = app.layer(CorsLayer::permissive());

        let host = &self.resources.config.host;
        let port = self.resources.config.http_port;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], port)));
        info!("HTTP server listening on http://{}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

        Ok(())
    }
}

/// Resolve when Ctrl-C is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {e}");
        return;
    }
    info!("Shutdown signal received, draining connections");
}
