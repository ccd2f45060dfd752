// ABOUTME: Group class creation and class registration database operations
// ABOUTME: Room placement conflict check at creation plus the in-transaction capacity gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::users::{admin_exists, member_exists, trainer_exists};
use super::rooms::room_exists;
use super::{decode_time, encode_time};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceStatus, DayOfWeek, GroupClass};
use crate::scheduling::{first_overlap, TimeRange};

/// Fields required to create a group class
#[derive(Debug, Clone)]
pub struct NewGroupClass {
    /// Class name
    pub class_name: String,
    /// Day of week the class recurs on
    pub day: DayOfWeek,
    /// Half-open class interval
    pub range: TimeRange,
    /// Maximum number of counted registrations
    pub capacity: i64,
    /// Assigned room
    pub room_id: i64,
    /// Assigned trainer
    pub trainer_id: i64,
}

/// Group class database operations manager
pub struct ClassesManager {
    pool: SqlitePool,
}

impl ClassesManager {
    /// Create a new classes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a group class on behalf of an admin
    ///
    /// The room placement is validated at creation time: the class interval
    /// must not overlap any other class already in the room on the same day.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Capacity is below 1 (validation)
    /// - Admin, trainer, or room does not exist (not found)
    /// - Another class in the room overlaps on the same day (conflict)
    /// - Database operation fails
    pub async fn create_class(&self, admin_id: i64, class: &NewGroupClass) -> AppResult<i64> {
        if class.capacity < 1 {
            return Err(AppError::invalid_input("Capacity must be at least 1"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !admin_exists(&mut tx, admin_id).await? {
            return Err(AppError::not_found(format!("Admin with id {admin_id}")));
        }
        if !trainer_exists(&mut tx, class.trainer_id).await? {
            return Err(AppError::not_found(format!(
                "Trainer with id {}",
                class.trainer_id
            )));
        }
        if !room_exists(&mut tx, class.room_id).await? {
            return Err(AppError::not_found(format!(
                "Room with id {}",
                class.room_id
            )));
        }

        let neighbours = classes_in_room_on_day(&mut tx, class.room_id, class.day, None).await?;
        if let Some(conflict) = first_overlap(
            &class.range,
            neighbours.iter().map(|c| (c, c.time_range())),
        ) {
            return Err(AppError::schedule_conflict(format!(
                "Room conflict: '{}' runs {} {}-{} in this room",
                conflict.class_name,
                conflict.day.as_str(),
                encode_time(conflict.start_time),
                encode_time(conflict.end_time),
            )));
        }

        let result = sqlx::query(
            r"
            INSERT INTO group_class
                (class_name, day, start_time, end_time, capacity, room_id, trainer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&class.class_name)
        .bind(class.day.as_str())
        .bind(encode_time(class.range.start))
        .bind(encode_time(class.range.end))
        .bind(class.capacity)
        .bind(class.room_id)
        .bind(class.trainer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create class: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit class: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Register a member for a group class, enforcing the capacity invariant
    ///
    /// The capacity gate is a single conditional insert: the row is only
    /// written while the REGISTERED+ATTENDED count is strictly below the
    /// class capacity. The count and the insert are one statement, so two
    /// racing registrations can never both slip past a full class, and no
    /// surrounding transaction is needed. The duplicate guard is additionally
    /// backed by the UNIQUE (member_id, class_id) constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Member or class does not exist (not found)
    /// - The member is already registered for the class (conflict)
    /// - The class is at capacity (capacity exceeded)
    /// - Database operation fails
    pub async fn register_for_class(&self, member_id: i64, class_id: i64) -> AppResult<i64> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        if !member_exists(&mut conn, member_id).await? {
            return Err(AppError::not_found(format!("Member with id {member_id}")));
        }
        let Some(class) = fetch_class(&mut conn, class_id).await? else {
            return Err(AppError::not_found(format!("Class with id {class_id}")));
        };

        let duplicate = sqlx::query(
            "SELECT registration_id FROM class_registration WHERE member_id = $1 AND class_id = $2",
        )
        .bind(member_id)
        .bind(class_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check registration: {e}")))?;
        if duplicate.is_some() {
            return Err(AppError::already_exists(
                "Already registered for this class",
            ));
        }

        let result = sqlx::query(
            r"
            INSERT INTO class_registration (class_id, member_id, registration_date, attended_status)
            SELECT $1, $2, $3, $4
            WHERE (
                SELECT COUNT(*) FROM class_registration
                WHERE class_id = $1 AND attended_status IN ($4, $5)
            ) < $6
            ",
        )
        .bind(class_id)
        .bind(member_id)
        .bind(Utc::now().to_rfc3339())
        .bind(AttendanceStatus::Registered.as_str())
        .bind(AttendanceStatus::Attended.as_str())
        .bind(class.capacity)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|dbe| dbe.is_unique_violation()) {
                AppError::already_exists("Already registered for this class")
            } else {
                AppError::database(format!("Failed to create registration: {e}"))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::capacity_exceeded(format!(
                "Class '{}' is at capacity ({})",
                class.class_name, class.capacity
            )));
        }

        Ok(result.last_insert_rowid())
    }

    /// Get a class by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_class(&self, class_id: i64) -> AppResult<Option<GroupClass>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        fetch_class(&mut conn, class_id).await
    }

    /// Count REGISTERED+ATTENDED registrations for a class
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn counted_registrations(&self, class_id: i64) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS n FROM class_registration
            WHERE class_id = $1 AND attended_status IN ($2, $3)
            ",
        )
        .bind(class_id)
        .bind(AttendanceStatus::Registered.as_str())
        .bind(AttendanceStatus::Attended.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count registrations: {e}")))?;
        Ok(row.get("n"))
    }

    /// Count all classes (used for idempotent seeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_classes(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM group_class")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count classes: {e}")))?;
        Ok(row.get("n"))
    }
}

impl GroupClass {
    /// The class's half-open time range
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Load one class on the caller's connection
pub(crate) async fn fetch_class(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> AppResult<Option<GroupClass>> {
    let row = sqlx::query(
        r"
        SELECT class_id, class_name, day, start_time, end_time, capacity, room_id, trainer_id
        FROM group_class WHERE class_id = $1
        ",
    )
    .bind(class_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get class: {e}")))?;

    row.map(decode_class_row).transpose()
}

/// Load the classes in a room on one day on the caller's connection,
/// optionally excluding one class (used when that class itself is moving)
pub(crate) async fn classes_in_room_on_day(
    conn: &mut SqliteConnection,
    room_id: i64,
    day: DayOfWeek,
    exclude_class: Option<i64>,
) -> AppResult<Vec<GroupClass>> {
    let rows = sqlx::query(
        r"
        SELECT class_id, class_name, day, start_time, end_time, capacity, room_id, trainer_id
        FROM group_class
        WHERE room_id = $1 AND day = $2 AND ($3 IS NULL OR class_id != $3)
        ORDER BY start_time
        ",
    )
    .bind(room_id)
    .bind(day.as_str())
    .bind(exclude_class)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list room classes: {e}")))?;

    rows.into_iter().map(decode_class_row).collect()
}

fn decode_class_row(r: sqlx::sqlite::SqliteRow) -> AppResult<GroupClass> {
    Ok(GroupClass {
        class_id: r.get("class_id"),
        class_name: r.get("class_name"),
        day: DayOfWeek::parse(&r.get::<String, _>("day"))
            .ok_or_else(|| AppError::database("Malformed day value"))?,
        start_time: decode_time(&r.get::<String, _>("start_time"))?,
        end_time: decode_time(&r.get::<String, _>("end_time"))?,
        capacity: r.get("capacity"),
        room_id: r.get("room_id"),
        trainer_id: r.get("trainer_id"),
    })
}
