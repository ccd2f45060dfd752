// ABOUTME: Integration tests for trainer availability windows
// ABOUTME: Covers overlap rejection, touching windows, and cross-day independence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_trainer, hours, minutes, setup_db};
use fitclub_server::errors::ErrorCode;
use fitclub_server::models::DayOfWeek;

#[tokio::test]
async fn add_availability_persists_active_window() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;

    let availability = db.database.availability();
    availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();

    let windows = availability
        .active_windows_for(trainer_id, DayOfWeek::Monday)
        .await
        .unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].trainer_id, trainer_id);
    assert_eq!(windows[0].day_of_week, DayOfWeek::Monday);
}

#[tokio::test]
async fn overlapping_window_same_day_is_rejected() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;

    let availability = db.database.availability();
    availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();

    let err = availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(11, 14))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);

    // Contained window is also an overlap
    let err = availability
        .add_availability(trainer_id, DayOfWeek::Monday, minutes((9, 30), (10, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn touching_windows_do_not_conflict() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;

    let availability = db.database.availability();
    availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();
    // [8,12) and [12,16) share only the boundary instant
    availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(12, 16))
        .await
        .unwrap();

    let windows = availability
        .active_windows_for(trainer_id, DayOfWeek::Monday)
        .await
        .unwrap();
    assert_eq!(windows.len(), 2);
}

#[tokio::test]
async fn same_hours_on_other_day_do_not_conflict() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;

    let availability = db.database.availability();
    availability
        .add_availability(trainer_id, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();
    availability
        .add_availability(trainer_id, DayOfWeek::Tuesday, hours(8, 12))
        .await
        .unwrap();
}

#[tokio::test]
async fn other_trainers_windows_are_independent() {
    let db = setup_db().await;
    let first = create_trainer(&db.database, "first@example.com").await;
    let second = create_trainer(&db.database, "second@example.com").await;

    let availability = db.database.availability();
    availability
        .add_availability(first, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();
    availability
        .add_availability(second, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_trainer_is_not_found() {
    let db = setup_db().await;

    let err = db
        .database
        .availability()
        .add_availability(9999, DayOfWeek::Monday, hours(8, 12))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
