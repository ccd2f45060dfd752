// ABOUTME: Health metric database operations
// ABOUTME: Per-member measurement logging and history retrieval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{Row, SqlitePool};

use super::users::member_exists;
use super::decode_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::HealthMetric;

/// Fields for one health metric entry
#[derive(Debug, Clone, Deserialize)]
pub struct NewHealthMetric {
    /// Weight in pounds
    pub weight: f64,
    /// Resting heart rate in bpm
    pub heart_rate: i64,
    /// Height in inches
    pub height: f64,
    /// Blood pressure, e.g. "120/80"
    pub blood_pressure: String,
    /// Body fat percentage
    pub body_fat_percentage: f64,
}

/// Health metric database operations manager
pub struct HealthMetricsManager {
    pool: SqlitePool,
}

impl HealthMetricsManager {
    /// Create a new health metrics manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Log a health metric entry for a member
    ///
    /// Returns the new metric's id and recorded timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the member does not exist or the insert fails
    pub async fn log_metric(
        &self,
        member_id: i64,
        metric: &NewHealthMetric,
    ) -> AppResult<(i64, DateTime<Utc>)> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        if !member_exists(&mut conn, member_id).await? {
            return Err(AppError::not_found(format!("Member with id {member_id}")));
        }

        let recorded_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO health_metric
                (member_id, weight, body_fat_percentage, heart_rate, blood_pressure, height, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(member_id)
        .bind(metric.weight)
        .bind(metric.body_fat_percentage)
        .bind(metric.heart_rate)
        .bind(&metric.blood_pressure)
        .bind(metric.height)
        .bind(recorded_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create health metric: {e}")))?;

        Ok((result.last_insert_rowid(), recorded_at))
    }

    /// List a member's metric history, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn metrics_for_member(&self, member_id: i64) -> AppResult<Vec<HealthMetric>> {
        let rows = sqlx::query(
            r"
            SELECT metric_id, member_id, weight, body_fat_percentage, heart_rate,
                   blood_pressure, height, recorded_at
            FROM health_metric
            WHERE member_id = $1
            ORDER BY recorded_at DESC
            ",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health metrics: {e}")))?;

        rows.into_iter()
            .map(|r| {
                Ok(HealthMetric {
                    metric_id: r.get("metric_id"),
                    member_id: r.get("member_id"),
                    weight: r.get("weight"),
                    body_fat_percentage: r.get("body_fat_percentage"),
                    heart_rate: r.get("heart_rate"),
                    blood_pressure: r.get("blood_pressure"),
                    height: r.get("height"),
                    recorded_at: decode_timestamp(&r.get::<String, _>("recorded_at"))?,
                })
            })
            .collect()
    }
}
