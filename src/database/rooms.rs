// ABOUTME: Room storage and lookup database operations
// ABOUTME: Room creation for seeding plus existence checks used by booking paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::{Room, RoomStatus, RoomType};

/// Fields required to create a room
#[derive(Debug, Clone)]
pub struct NewRoom {
    /// Display name
    pub room_name: String,
    /// Room category
    pub room_type: RoomType,
    /// Unique room number
    pub room_number: String,
    /// Maximum occupancy
    pub capacity: i64,
    /// Operational status
    pub status: RoomStatus,
    /// Floor the room is on
    pub floor: i64,
}

/// Room database operations manager
pub struct RoomsManager {
    pool: SqlitePool,
}

impl RoomsManager {
    /// Create a new rooms manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a room, returning its id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including duplicate room number)
    pub async fn create_room(&self, room: &NewRoom) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO room (room_name, room_type, room_number, capacity, status, floor)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&room.room_name)
        .bind(room.room_type.as_str())
        .bind(&room.room_number)
        .bind(room.capacity)
        .bind(room.status.as_str())
        .bind(room.floor)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create room: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Get a room by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_room(&self, room_id: i64) -> AppResult<Option<Room>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        fetch_room(&mut conn, room_id).await
    }

    /// Count all rooms (used for idempotent seeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_rooms(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM room")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count rooms: {e}")))?;
        Ok(row.get("n"))
    }
}

/// Load a room on the caller's connection so the read participates in the
/// caller's transaction
pub(crate) async fn fetch_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> AppResult<Option<Room>> {
    let row = sqlx::query(
        r"
        SELECT room_id, room_name, room_type, room_number, capacity, status, floor
        FROM room WHERE room_id = $1
        ",
    )
    .bind(room_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get room: {e}")))?;

    Ok(row.map(|r| Room {
        room_id: r.get("room_id"),
        room_name: r.get("room_name"),
        room_type: RoomType::parse(&r.get::<String, _>("room_type")),
        room_number: r.get("room_number"),
        capacity: r.get("capacity"),
        status: RoomStatus::parse(&r.get::<String, _>("status")),
        floor: r.get("floor"),
    }))
}

/// Whether a room exists, on the caller's connection
pub(crate) async fn room_exists(conn: &mut SqliteConnection, room_id: i64) -> AppResult<bool> {
    let row = sqlx::query("SELECT room_id FROM room WHERE room_id = $1")
        .bind(room_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check room existence: {e}")))?;
    Ok(row.is_some())
}
