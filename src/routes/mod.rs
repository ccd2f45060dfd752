// ABOUTME: Route module organization for FitClub HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers delegating to managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! Route module for the FitClub server
//!
//! Routes are organized by domain. Each module contains only route
//! definitions and thin handler functions that delegate to the database
//! managers.

/// Admin routes: class creation and room reassignment
pub mod admin;
/// Health check and system status routes
pub mod health;
/// Member routes: registration, profile, metrics, goals, bookings
pub mod members;
/// Trainer routes: availability and schedules
pub mod trainers;

pub use admin::AdminRoutes;
pub use health::HealthRoutes;
pub use members::MemberRoutes;
pub use trainers::TrainerRoutes;
