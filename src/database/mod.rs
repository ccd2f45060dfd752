// ABOUTME: Core database management with embedded migrations for SQLite
// ABOUTME: Connection pool setup plus shared row decoding helpers for domain managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

/// Trainer availability windows and overlap validation
pub mod availability;
/// Group classes, registrations, and the class capacity gate
pub mod classes;
/// Fitness goal storage
pub mod goals;
/// Health metric storage
pub mod health_metrics;
/// Admin room reassignment for sessions and classes
pub mod room_assignments;
/// Room storage and lookup
pub mod rooms;
/// Personal training sessions and trainer schedules
pub mod sessions;
/// User, member, trainer, and admin account management
pub mod users;

pub use availability::AvailabilityManager;
pub use classes::{ClassesManager, NewGroupClass};
pub use goals::{GoalsManager, NewFitnessGoal};
pub use health_metrics::{HealthMetricsManager, NewHealthMetric};
pub use room_assignments::{RoomAssignmentsManager, RoomReassignment};
pub use rooms::{NewRoom, RoomsManager};
pub use sessions::{NewSession, SessionsManager, TrainerSchedule};
pub use users::{MemberProfileUpdate, NewMemberRegistration, UsersManager};

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

/// Database connection pool for the FitClub store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL is invalid or malformed
    /// - Database connection fails
    /// - `SQLite` file creation fails
    /// - Migration process fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails or the connection is lost
    /// during migration
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");

        // Migrations are embedded at compile time from ./migrations so they
        // are available regardless of working directory
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Account management operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Room operations
    #[must_use]
    pub fn rooms(&self) -> RoomsManager {
        RoomsManager::new(self.pool.clone())
    }

    /// Trainer availability operations
    #[must_use]
    pub fn availability(&self) -> AvailabilityManager {
        AvailabilityManager::new(self.pool.clone())
    }

    /// PT session operations
    #[must_use]
    pub fn sessions(&self) -> SessionsManager {
        SessionsManager::new(self.pool.clone())
    }

    /// Group class and registration operations
    #[must_use]
    pub fn classes(&self) -> ClassesManager {
        ClassesManager::new(self.pool.clone())
    }

    /// Room reassignment operations
    #[must_use]
    pub fn room_assignments(&self) -> RoomAssignmentsManager {
        RoomAssignmentsManager::new(self.pool.clone())
    }

    /// Health metric operations
    #[must_use]
    pub fn health_metrics(&self) -> HealthMetricsManager {
        HealthMetricsManager::new(self.pool.clone())
    }

    /// Fitness goal operations
    #[must_use]
    pub fn goals(&self) -> GoalsManager {
        GoalsManager::new(self.pool.clone())
    }
}

/// Canonical TEXT encoding for wall-clock times
pub(crate) fn encode_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Canonical TEXT encoding for calendar dates
pub(crate) fn encode_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Decode a wall-clock time stored as TEXT
pub(crate) fn decode_time(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| AppError::database(format!("Malformed time value '{raw}': {e}")))
}

/// Decode a calendar date stored as TEXT
pub(crate) fn decode_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::database(format!("Malformed date value '{raw}': {e}")))
}

/// Decode a UTC timestamp stored as RFC 3339 TEXT
///
/// Rows inserted by SQLite defaults use `datetime('now')`, so that format is
/// accepted as a fallback.
pub(crate) fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|naive| naive.and_utc())
        })
        .map_err(|e| AppError::database(format!("Malformed timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_encoding_round_trip() {
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(encode_time(time), "09:30:00");
        assert_eq!(decode_time("09:30:00").unwrap(), time);
        assert_eq!(decode_time("09:30").unwrap(), time);
        assert!(decode_time("quarter past nine").is_err());
    }

    #[test]
    fn test_date_encoding_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(encode_date(date), "2025-06-02");
        assert_eq!(decode_date("2025-06-02").unwrap(), date);
        assert!(decode_date("02/06/2025").is_err());
    }

    #[test]
    fn test_timestamp_fallback_format() {
        assert!(decode_timestamp("2025-06-02T09:30:00+00:00").is_ok());
        assert!(decode_timestamp("2025-06-02 09:30:00").is_ok());
        assert!(decode_timestamp("not a timestamp").is_err());
    }
}
