// ABOUTME: Main library entry point for the FitClub management platform
// ABOUTME: Provides a REST API for members, trainers, classes, and booking conflict checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

#![deny(unsafe_code)]

//! # FitClub Server
//!
//! A health and fitness club management API. The core of the system is an
//! interval conflict and capacity engine: trainer availability windows,
//! personal training sessions, and recurring group classes all share one
//! half-open interval overlap rule, and class registration is guarded by an
//! atomic capacity gate.
//!
//! ## Features
//!
//! - **Member management**: registration, profile updates, health metrics,
//!   and fitness goals
//! - **Trainer scheduling**: weekly availability windows with overlap
//!   rejection, plus combined session/class schedules
//! - **Booking conflict checks**: PT sessions are validated against trainer
//!   availability, trainer double-booking, and room double-booking
//! - **Group classes**: capacity-gated registration and admin-driven room
//!   reassignment for both sessions and classes
//!
//! ## Quick Start
//!
//! 1. Run `seed-demo-data` to populate a development database
//! 2. Start the API with `fitclub-server`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitclub_server::config::ServerConfig;
//! use fitclub_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitClub server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Database connection pool and domain operation managers
pub mod database;

/// Unified error handling with structured codes and HTTP mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Common data models for club entities
pub mod models;

/// HTTP route definitions organized by domain
pub mod routes;

/// Half-open interval overlap and containment primitives
pub mod scheduling;

/// HTTP server assembly and lifecycle
pub mod server;
