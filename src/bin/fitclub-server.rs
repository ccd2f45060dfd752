// ABOUTME: FitClub REST API server binary
// ABOUTME: Loads configuration, connects the database, and runs the Axum server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! # FitClub Server Binary
//!
//! Starts the club management REST API with database migrations applied on
//! boot.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use fitclub_server::config::ServerConfig;
use fitclub_server::database::Database;
use fitclub_server::errors::AppResult;
use fitclub_server::logging::{self, LogFormat};
use fitclub_server::server::{HttpServer, ServerResources};

#[derive(Parser)]
#[command(name = "fitclub-server")]
#[command(about = "FitClub - health and fitness club management API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    logging::init(config.log_level, LogFormat::from_env())?;
    info!("Starting FitClub server: {}", config.summary());

    let database = Database::new(&config.database_url).await?;
    let resources = Arc::new(ServerResources::new(database, config));

    HttpServer::new(resources).run().await
}
