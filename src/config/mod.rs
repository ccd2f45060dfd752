// ABOUTME: Configuration module organization for the FitClub server
// ABOUTME: Environment-driven runtime settings with typed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

/// Environment variable based server configuration
pub mod environment;

pub use environment::{LogLevel, ServerConfig};
