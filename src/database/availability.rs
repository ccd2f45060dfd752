// ABOUTME: Trainer availability window storage and overlap validation
// ABOUTME: Rejects overlapping windows per trainer per day using the conflict engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use sqlx::{Row, SqliteConnection, SqlitePool};

use super::users::trainer_exists;
use super::{decode_time, encode_time};
use crate::errors::{AppError, AppResult};
use crate::models::{AvailabilityStatus, AvailabilityWindow, DayOfWeek};
use crate::scheduling::{first_overlap, TimeRange};

/// Trainer availability database operations manager
pub struct AvailabilityManager {
    pool: SqlitePool,
}

impl AvailabilityManager {
    /// Create a new availability manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Declare a recurring weekly availability window for a trainer
    ///
    /// The candidate range is compared against every ACTIVE window the
    /// trainer already has on the same day; any overlap rejects the request.
    /// Windows on other days never conflict. Returns the new window's id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `start >= end` (validation)
    /// - The trainer does not exist (not found)
    /// - The candidate overlaps an existing ACTIVE window (conflict)
    /// - Database operation fails
    pub async fn add_availability(
        &self,
        trainer_id: i64,
        day: DayOfWeek,
        range: TimeRange,
    ) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !trainer_exists(&mut tx, trainer_id).await? {
            return Err(AppError::not_found(format!("Trainer with id {trainer_id}")));
        }

        let existing = active_windows(&mut tx, trainer_id, day).await?;
        if let Some(conflict) = first_overlap(
            &range,
            existing.iter().map(|w| {
                (
                    w,
                    TimeRange {
                        start: w.start_time,
                        end: w.end_time,
                    },
                )
            }),
        ) {
            return Err(AppError::schedule_conflict(format!(
                "Overlaps with existing availability: {} {}-{}",
                conflict.day_of_week.as_str(),
                encode_time(conflict.start_time),
                encode_time(conflict.end_time),
            )));
        }

        let result = sqlx::query(
            r"
            INSERT INTO trainer_availability (trainer_id, day_of_week, start_time, end_time, status)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(trainer_id)
        .bind(day.as_str())
        .bind(encode_time(range.start))
        .bind(encode_time(range.end))
        .bind(AvailabilityStatus::Active.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create availability: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit availability: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List a trainer's ACTIVE windows for one day
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn active_windows_for(
        &self,
        trainer_id: i64,
        day: DayOfWeek,
    ) -> AppResult<Vec<AvailabilityWindow>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        active_windows(&mut conn, trainer_id, day).await
    }
}

/// Load a trainer's ACTIVE windows for one day on the caller's connection
pub(crate) async fn active_windows(
    conn: &mut SqliteConnection,
    trainer_id: i64,
    day: DayOfWeek,
) -> AppResult<Vec<AvailabilityWindow>> {
    let rows = sqlx::query(
        r"
        SELECT availability_id, trainer_id, day_of_week, start_time, end_time, status
        FROM trainer_availability
        WHERE trainer_id = $1 AND day_of_week = $2 AND status = $3
        ORDER BY start_time
        ",
    )
    .bind(trainer_id)
    .bind(day.as_str())
    .bind(AvailabilityStatus::Active.as_str())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list availability: {e}")))?;

    rows.into_iter()
        .map(|r| {
            Ok(AvailabilityWindow {
                availability_id: r.get("availability_id"),
                trainer_id: r.get("trainer_id"),
                day_of_week: DayOfWeek::parse(&r.get::<String, _>("day_of_week"))
                    .ok_or_else(|| AppError::database("Malformed day_of_week value"))?,
                start_time: decode_time(&r.get::<String, _>("start_time"))?,
                end_time: decode_time(&r.get::<String, _>("end_time"))?,
                status: AvailabilityStatus::parse(&r.get::<String, _>("status")),
            })
        })
        .collect()
}
