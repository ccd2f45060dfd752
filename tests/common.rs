// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database setup and entity creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems
#![allow(missing_docs, clippy::unwrap_used)]
#![allow(dead_code)]

//! Shared test utilities for `fitclub_server`
//!
//! Each test gets its own migrated database backed by a temp directory, so
//! tests can run in parallel and pool connections all see the same schema.

use chrono::NaiveTime;
use tempfile::TempDir;

use fitclub_server::database::{Database, NewRoom};
use fitclub_server::models::{MembershipStatus, RoomStatus, RoomType};
use fitclub_server::scheduling::TimeRange;

/// A migrated test database; dropping the holder deletes the files
pub struct TestDb {
    pub database: Database,
    _dir: TempDir,
}

/// Create a fresh file-backed database with migrations applied
pub async fn setup_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let url = format!("sqlite:{}", path.display());
    let database = Database::new(&url).await.unwrap();
    TestDb {
        database,
        _dir: dir,
    }
}

/// Create a user with a member role, returning the user id
pub async fn create_member(db: &Database, email: &str) -> i64 {
    let users = db.users();
    let user_id = users
        .create_user("Test", "Member", email, "hashed_pw", Some("555-0000"))
        .await
        .unwrap();
    users
        .add_member_role(user_id, None, MembershipStatus::Active)
        .await
        .unwrap();
    user_id
}

/// Create a user with a trainer role, returning the user id
pub async fn create_trainer(db: &Database, email: &str) -> i64 {
    let users = db.users();
    let user_id = users
        .create_user("Test", "Trainer", email, "hashed_pw", None)
        .await
        .unwrap();
    users
        .add_trainer_role(user_id, Some("Strength"), None)
        .await
        .unwrap();
    user_id
}

/// Create a user with an admin role, returning the user id
pub async fn create_admin(db: &Database, email: &str) -> i64 {
    let users = db.users();
    let user_id = users
        .create_user("Test", "Admin", email, "hashed_pw", None)
        .await
        .unwrap();
    users.add_admin_role(user_id, Some("Manager")).await.unwrap();
    user_id
}

/// Create a room, returning the room id
pub async fn create_room(db: &Database, name: &str, number: &str) -> i64 {
    db.rooms()
        .create_room(&NewRoom {
            room_name: name.to_owned(),
            room_type: RoomType::Studio,
            room_number: number.to_owned(),
            capacity: 25,
            status: RoomStatus::Available,
            floor: 1,
        })
        .await
        .unwrap()
}

/// Whole-hour time range shorthand
pub fn hours(start: u32, end: u32) -> TimeRange {
    TimeRange::new(
        NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
    )
    .unwrap()
}

/// Minute-resolution time range shorthand
pub fn minutes(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(
        NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
    )
    .unwrap()
}
