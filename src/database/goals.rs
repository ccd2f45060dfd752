// ABOUTME: Fitness goal database operations
// ABOUTME: Goal creation and per-member goal listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{Row, SqlitePool};

use super::users::member_exists;
use super::{decode_date, decode_timestamp, encode_date};
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessGoal, GoalStatus, GoalType};

/// Fields for creating a fitness goal
#[derive(Debug, Clone, Deserialize)]
pub struct NewFitnessGoal {
    /// Goal category
    pub goal_type: GoalType,
    /// Free-form target, e.g. "lose 10 lbs"
    pub target_value: String,
    /// Optional deadline
    pub deadline: Option<NaiveDate>,
}

/// Fitness goal database operations manager
pub struct GoalsManager {
    pool: SqlitePool,
}

impl GoalsManager {
    /// Create a new goals manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a fitness goal for a member, starting in the Active state
    ///
    /// # Errors
    ///
    /// Returns an error if the member does not exist, the target value is
    /// empty, or the insert fails
    pub async fn create_goal(&self, member_id: i64, goal: &NewFitnessGoal) -> AppResult<i64> {
        if goal.target_value.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Goal target value must not be empty",
            ));
        }

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        if !member_exists(&mut conn, member_id).await? {
            return Err(AppError::not_found(format!("Member with id {member_id}")));
        }

        let result = sqlx::query(
            r"
            INSERT INTO fitness_goal (member_id, goal_type, target_value, deadline, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(member_id)
        .bind(goal.goal_type.as_str())
        .bind(&goal.target_value)
        .bind(goal.deadline.map(encode_date))
        .bind(GoalStatus::Active.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create fitness goal: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List a member's goals, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn goals_for_member(&self, member_id: i64) -> AppResult<Vec<FitnessGoal>> {
        let rows = sqlx::query(
            r"
            SELECT goal_id, member_id, goal_type, target_value, deadline, status, created_at
            FROM fitness_goal
            WHERE member_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list fitness goals: {e}")))?;

        rows.into_iter()
            .map(|r| {
                Ok(FitnessGoal {
                    goal_id: r.get("goal_id"),
                    member_id: r.get("member_id"),
                    goal_type: GoalType::parse(&r.get::<String, _>("goal_type")),
                    target_value: r.get("target_value"),
                    deadline: r
                        .get::<Option<String>, _>("deadline")
                        .map(|d| decode_date(&d))
                        .transpose()?,
                    status: GoalStatus::parse(&r.get::<String, _>("status")),
                    created_at: decode_timestamp(&r.get::<String, _>("created_at"))?,
                })
            })
            .collect()
    }
}
