// ABOUTME: Personal training session scheduling and trainer schedule queries
// ABOUTME: Applies availability coverage plus trainer and room overlap checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::availability::active_windows;
use super::users::{member_exists, trainer_exists};
use super::rooms::room_exists;
use super::{decode_date, decode_time, encode_date, encode_time};
use crate::errors::{AppError, AppResult};
use crate::models::{DayOfWeek, PersonalTrainingSession, SessionStatus};
use crate::scheduling::{covered_by_any, first_overlap, TimeRange};

/// Fields required to schedule a PT session
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Member taking the session
    pub member_id: i64,
    /// Trainer delivering the session
    pub trainer_id: i64,
    /// Room the session takes place in
    pub room_id: i64,
    /// Calendar date of the session
    pub session_date: NaiveDate,
    /// Proposed half-open time range
    pub range: TimeRange,
}

/// One PT session entry in a trainer's schedule, with display names joined in
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledSessionEntry {
    /// Session id
    pub session_id: i64,
    /// Member's full name
    pub member_name: String,
    /// Session date
    pub date: NaiveDate,
    /// Start time
    pub start_time: String,
    /// End time
    pub end_time: String,
    /// Room display name
    pub room: String,
    /// Session status
    pub status: SessionStatus,
}

/// One group class entry in a trainer's schedule
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledClassEntry {
    /// Class id
    pub class_id: i64,
    /// Class name
    pub class_name: String,
    /// Recurrence day
    pub day: DayOfWeek,
    /// Start time
    pub start_time: String,
    /// End time
    pub end_time: String,
    /// Room display name
    pub room: String,
    /// Class capacity
    pub capacity: i64,
}

/// A trainer's full schedule: upcoming PT sessions plus recurring classes
#[derive(Debug, Clone, Serialize)]
pub struct TrainerSchedule {
    /// Trainer id the schedule belongs to
    pub trainer_id: i64,
    /// SCHEDULED personal training sessions
    pub personal_training_sessions: Vec<ScheduledSessionEntry>,
    /// Recurring group classes taught by the trainer
    pub group_classes: Vec<ScheduledClassEntry>,
}

/// PT session database operations manager
pub struct SessionsManager {
    pool: SqlitePool,
}

impl SessionsManager {
    /// Create a new sessions manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Schedule a personal training session
    ///
    /// Check order matters for error fidelity: availability coverage first,
    /// then trainer double-booking, then room double-booking. Any failing
    /// check short-circuits the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `start >= end` (validation, enforced by the caller-built `TimeRange`)
    /// - Member, trainer, or room does not exist (not found)
    /// - No single ACTIVE availability window fully contains the range
    /// - The trainer has an overlapping SCHEDULED session on the date
    /// - The room hosts an overlapping SCHEDULED session on the date
    /// - Database operation fails
    pub async fn schedule_session(&self, session: &NewSession) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !member_exists(&mut tx, session.member_id).await? {
            return Err(AppError::not_found(format!(
                "Member with id {}",
                session.member_id
            )));
        }
        if !trainer_exists(&mut tx, session.trainer_id).await? {
            return Err(AppError::not_found(format!(
                "Trainer with id {}",
                session.trainer_id
            )));
        }
        if !room_exists(&mut tx, session.room_id).await? {
            return Err(AppError::not_found(format!(
                "Room with id {}",
                session.room_id
            )));
        }

        // Availability windows are recurring weekly, so coverage is checked
        // against the day-of-week derived from the concrete session date
        let day = DayOfWeek::from(session.session_date);
        let windows = active_windows(&mut tx, session.trainer_id, day).await?;
        let window_ranges = windows.iter().map(|w| TimeRange {
            start: w.start_time,
            end: w.end_time,
        });
        if !covered_by_any(&session.range, window_ranges) {
            return Err(AppError::schedule_conflict(format!(
                "Trainer is not available on {} from {} to {}",
                day.as_str(),
                encode_time(session.range.start),
                encode_time(session.range.end),
            )));
        }

        let trainer_sessions =
            scheduled_sessions_for_trainer(&mut tx, session.trainer_id, session.session_date)
                .await?;
        if let Some(conflict) = first_overlap(
            &session.range,
            trainer_sessions.iter().map(|s| (s, s.time_range())),
        ) {
            return Err(AppError::schedule_conflict(format!(
                "Trainer already has a session from {} to {} on {}",
                encode_time(conflict.start_time),
                encode_time(conflict.end_time),
                encode_date(conflict.session_date),
            )));
        }

        let room_sessions =
            scheduled_sessions_for_room(&mut tx, session.room_id, session.session_date, None)
                .await?;
        if let Some(conflict) = first_overlap(
            &session.range,
            room_sessions.iter().map(|s| (s, s.time_range())),
        ) {
            return Err(AppError::schedule_conflict(format!(
                "Room already hosts a session from {} to {} on {}",
                encode_time(conflict.start_time),
                encode_time(conflict.end_time),
                encode_date(conflict.session_date),
            )));
        }

        let result = sqlx::query(
            r"
            INSERT INTO personal_training_session
                (trainer_id, member_id, room_id, session_date, start_time, end_time, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(session.trainer_id)
        .bind(session.member_id)
        .bind(session.room_id)
        .bind(encode_date(session.session_date))
        .bind(encode_time(session.range.start))
        .bind(encode_time(session.range.end))
        .bind(SessionStatus::Scheduled.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit session: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Get a session by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_session(&self, session_id: i64) -> AppResult<Option<PersonalTrainingSession>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        fetch_session(&mut conn, session_id).await
    }

    /// Build a trainer's schedule: SCHEDULED PT sessions with member and room
    /// names joined in, plus the trainer's recurring group classes
    ///
    /// # Errors
    ///
    /// Returns an error if the trainer does not exist or a query fails
    pub async fn trainer_schedule(&self, trainer_id: i64) -> AppResult<TrainerSchedule> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        if !trainer_exists(&mut conn, trainer_id).await? {
            return Err(AppError::not_found(format!("Trainer with id {trainer_id}")));
        }

        let session_rows = sqlx::query(
            r"
            SELECT s.session_id, s.session_date, s.start_time, s.end_time, s.status,
                   u.first_name, u.last_name, r.room_name
            FROM personal_training_session s
            JOIN member m ON s.member_id = m.user_id
            JOIN users u ON m.user_id = u.user_id
            JOIN room r ON s.room_id = r.room_id
            WHERE s.trainer_id = $1 AND s.status = $2
            ORDER BY s.session_date, s.start_time
            ",
        )
        .bind(trainer_id)
        .bind(SessionStatus::Scheduled.as_str())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to list trainer sessions: {e}")))?;

        let personal_training_sessions = session_rows
            .into_iter()
            .map(|r| {
                Ok(ScheduledSessionEntry {
                    session_id: r.get("session_id"),
                    member_name: format!(
                        "{} {}",
                        r.get::<String, _>("first_name"),
                        r.get::<String, _>("last_name")
                    ),
                    date: decode_date(&r.get::<String, _>("session_date"))?,
                    start_time: r.get("start_time"),
                    end_time: r.get("end_time"),
                    room: r.get("room_name"),
                    status: SessionStatus::parse(&r.get::<String, _>("status")),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let class_rows = sqlx::query(
            r"
            SELECT c.class_id, c.class_name, c.day, c.start_time, c.end_time, c.capacity,
                   r.room_name
            FROM group_class c
            JOIN room r ON c.room_id = r.room_id
            WHERE c.trainer_id = $1
            ORDER BY c.day, c.start_time
            ",
        )
        .bind(trainer_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to list trainer classes: {e}")))?;

        let group_classes = class_rows
            .into_iter()
            .map(|r| {
                Ok(ScheduledClassEntry {
                    class_id: r.get("class_id"),
                    class_name: r.get("class_name"),
                    day: DayOfWeek::parse(&r.get::<String, _>("day"))
                        .ok_or_else(|| AppError::database("Malformed day value"))?,
                    start_time: r.get("start_time"),
                    end_time: r.get("end_time"),
                    room: r.get("room_name"),
                    capacity: r.get("capacity"),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(TrainerSchedule {
            trainer_id,
            personal_training_sessions,
            group_classes,
        })
    }
}

impl PersonalTrainingSession {
    /// The session's half-open time range
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Load one session on the caller's connection
pub(crate) async fn fetch_session(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> AppResult<Option<PersonalTrainingSession>> {
    let row = sqlx::query(
        r"
        SELECT session_id, trainer_id, member_id, room_id, session_date, start_time, end_time, status
        FROM personal_training_session WHERE session_id = $1
        ",
    )
    .bind(session_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get session: {e}")))?;

    row.map(decode_session_row).transpose()
}

/// Load a trainer's SCHEDULED sessions for one date on the caller's connection
pub(crate) async fn scheduled_sessions_for_trainer(
    conn: &mut SqliteConnection,
    trainer_id: i64,
    date: NaiveDate,
) -> AppResult<Vec<PersonalTrainingSession>> {
    let rows = sqlx::query(
        r"
        SELECT session_id, trainer_id, member_id, room_id, session_date, start_time, end_time, status
        FROM personal_training_session
        WHERE trainer_id = $1 AND session_date = $2 AND status = $3
        ORDER BY start_time
        ",
    )
    .bind(trainer_id)
    .bind(encode_date(date))
    .bind(SessionStatus::Scheduled.as_str())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list trainer sessions: {e}")))?;

    rows.into_iter().map(decode_session_row).collect()
}

/// Load a room's SCHEDULED sessions for one date on the caller's connection,
/// optionally excluding one session (used when that session itself is moving)
pub(crate) async fn scheduled_sessions_for_room(
    conn: &mut SqliteConnection,
    room_id: i64,
    date: NaiveDate,
    exclude_session: Option<i64>,
) -> AppResult<Vec<PersonalTrainingSession>> {
    let rows = sqlx::query(
        r"
        SELECT session_id, trainer_id, member_id, room_id, session_date, start_time, end_time, status
        FROM personal_training_session
        WHERE room_id = $1 AND session_date = $2 AND status = $3
          AND ($4 IS NULL OR session_id != $4)
        ORDER BY start_time
        ",
    )
    .bind(room_id)
    .bind(encode_date(date))
    .bind(SessionStatus::Scheduled.as_str())
    .bind(exclude_session)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list room sessions: {e}")))?;

    rows.into_iter().map(decode_session_row).collect()
}

fn decode_session_row(r: sqlx::sqlite::SqliteRow) -> AppResult<PersonalTrainingSession> {
    Ok(PersonalTrainingSession {
        session_id: r.get("session_id"),
        trainer_id: r.get("trainer_id"),
        member_id: r.get("member_id"),
        room_id: r.get("room_id"),
        session_date: decode_date(&r.get::<String, _>("session_date"))?,
        start_time: decode_time(&r.get::<String, _>("start_time"))?,
        end_time: decode_time(&r.get::<String, _>("end_time"))?,
        status: SessionStatus::parse(&r.get::<String, _>("status")),
    })
}
