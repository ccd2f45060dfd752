// ABOUTME: Admin room reassignment for PT sessions and group classes
// ABOUTME: Re-runs the room overlap check against the target room before moving a booking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use serde::Serialize;
use sqlx::SqlitePool;

use super::classes::{classes_in_room_on_day, fetch_class};
use super::rooms::fetch_room;
use super::sessions::{fetch_session, scheduled_sessions_for_room};
use super::users::admin_exists;
use super::encode_time;
use crate::errors::{AppError, AppResult};
use crate::models::BookingRef;
use crate::scheduling::first_overlap;

/// Result of a successful room reassignment
#[derive(Debug, Clone, Serialize)]
pub struct RoomReassignment {
    /// The moved booking
    pub booking: BookingRef,
    /// Id of the room the booking now occupies
    pub new_room_id: i64,
    /// Display name of the new room
    pub new_room_name: String,
}

/// Room reassignment database operations manager
pub struct RoomAssignmentsManager {
    pool: SqlitePool,
}

impl RoomAssignmentsManager {
    /// Create a new room assignments manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Move a booking into a new room, rejecting overlapping occupancy
    ///
    /// PT sessions are compared against other SCHEDULED sessions in the new
    /// room on the same calendar date; group classes against other classes in
    /// the new room on the same day-of-week. The booking being moved is
    /// excluded from its own conflict set. On success the room reference is
    /// updated in place, with no history retained.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The acting admin, the new room, or the target booking does not exist
    /// - The new room hosts an overlapping booking (conflict)
    /// - Database operation fails
    pub async fn reassign_room(
        &self,
        admin_id: i64,
        booking: BookingRef,
        new_room_id: i64,
    ) -> AppResult<RoomReassignment> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !admin_exists(&mut tx, admin_id).await? {
            return Err(AppError::not_found(format!("Admin with id {admin_id}")));
        }

        let Some(new_room) = fetch_room(&mut tx, new_room_id).await? else {
            return Err(AppError::not_found(format!("Room with id {new_room_id}")));
        };

        match booking {
            BookingRef::PtSession(session_id) => {
                let Some(session) = fetch_session(&mut tx, session_id).await? else {
                    return Err(AppError::not_found(format!(
                        "PT session with id {session_id}"
                    )));
                };

                let occupants = scheduled_sessions_for_room(
                    &mut tx,
                    new_room_id,
                    session.session_date,
                    Some(session_id),
                )
                .await?;
                if let Some(conflict) = first_overlap(
                    &session.time_range(),
                    occupants.iter().map(|s| (s, s.time_range())),
                ) {
                    return Err(AppError::schedule_conflict(format!(
                        "Room conflict: another PT session runs {}-{} at this time",
                        encode_time(conflict.start_time),
                        encode_time(conflict.end_time),
                    )));
                }

                sqlx::query(
                    "UPDATE personal_training_session SET room_id = $2 WHERE session_id = $1",
                )
                .bind(session_id)
                .bind(new_room_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update session room: {e}")))?;
            }
            BookingRef::GroupClass(class_id) => {
                let Some(class) = fetch_class(&mut tx, class_id).await? else {
                    return Err(AppError::not_found(format!(
                        "Group class with id {class_id}"
                    )));
                };

                let occupants =
                    classes_in_room_on_day(&mut tx, new_room_id, class.day, Some(class_id))
                        .await?;
                if let Some(conflict) = first_overlap(
                    &class.time_range(),
                    occupants.iter().map(|c| (c, c.time_range())),
                ) {
                    return Err(AppError::schedule_conflict(format!(
                        "Room conflict: '{}' runs on {} at this time",
                        conflict.class_name,
                        conflict.day.as_str(),
                    )));
                }

                sqlx::query("UPDATE group_class SET room_id = $2 WHERE class_id = $1")
                    .bind(class_id)
                    .bind(new_room_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to update class room: {e}")))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit reassignment: {e}")))?;

        Ok(RoomReassignment {
            booking,
            new_room_id,
            new_room_name: new_room.room_name,
        })
    }
}
