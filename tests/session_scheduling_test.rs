// ABOUTME: Integration tests for PT session scheduling
// ABOUTME: Covers availability coverage, trainer and room double-booking, and adjacency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use chrono::NaiveDate;
use common::{create_member, create_room, create_trainer, hours, minutes, setup_db};
use fitclub_server::database::{Database, NewSession};
use fitclub_server::errors::ErrorCode;
use fitclub_server::models::{DayOfWeek, SessionStatus};
use fitclub_server::scheduling::TimeRange;

/// A Monday. Sessions land inside the trainer's Monday availability.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

struct Fixture {
    member_id: i64,
    trainer_id: i64,
    room_id: i64,
}

/// Member, trainer with Monday 8-17 availability, and one room
async fn fixture(db: &Database) -> Fixture {
    let member_id = create_member(db, "member@example.com").await;
    let trainer_id = create_trainer(db, "trainer@example.com").await;
    let room_id = create_room(db, "Studio A", "101").await;
    db.availability()
        .add_availability(trainer_id, DayOfWeek::Monday, hours(8, 17))
        .await
        .unwrap();
    Fixture {
        member_id,
        trainer_id,
        room_id,
    }
}

fn session(fx: &Fixture, range: TimeRange) -> NewSession {
    NewSession {
        member_id: fx.member_id,
        trainer_id: fx.trainer_id,
        room_id: fx.room_id,
        session_date: monday(),
        range,
    }
}

#[tokio::test]
async fn covered_session_is_scheduled() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    let sessions = db.database.sessions();
    let session_id = sessions.schedule_session(&session(&fx, hours(10, 11))).await.unwrap();

    let stored = sessions.get_session(session_id).await.unwrap().unwrap();
    assert_eq!(stored.trainer_id, fx.trainer_id);
    assert_eq!(stored.session_date, monday());
    assert_eq!(stored.status, SessionStatus::Scheduled);
}

#[tokio::test]
async fn session_outside_availability_is_rejected() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    // 18-19 falls outside the 8-17 window
    let err = db
        .database
        .sessions()
        .schedule_session(&session(&fx, hours(18, 19)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn session_straddling_window_edge_is_rejected() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    // Starts inside the window but runs past its end: partial coverage is
    // not coverage
    let err = db
        .database
        .sessions()
        .schedule_session(&session(&fx, minutes((16, 30), (17, 30))))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn session_on_uncovered_day_is_rejected() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    let tuesday = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
    let mut proposal = session(&fx, hours(10, 11));
    proposal.session_date = tuesday;

    let err = db
        .database
        .sessions()
        .schedule_session(&proposal)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn trainer_double_booking_is_rejected() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;
    let other_room = create_room(&db.database, "Studio B", "102").await;

    let sessions = db.database.sessions();
    sessions.schedule_session(&session(&fx, hours(10, 11))).await.unwrap();

    // Same trainer, same time, different room
    let mut proposal = session(&fx, minutes((10, 30), (11, 30)));
    proposal.room_id = other_room;
    let err = sessions.schedule_session(&proposal).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn room_double_booking_is_rejected() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;
    let other_trainer = create_trainer(&db.database, "other@example.com").await;
    db.database
        .availability()
        .add_availability(other_trainer, DayOfWeek::Monday, hours(8, 17))
        .await
        .unwrap();

    let sessions = db.database.sessions();
    sessions.schedule_session(&session(&fx, hours(10, 11))).await.unwrap();

    // Different trainer, same room, overlapping time
    let mut proposal = session(&fx, minutes((10, 30), (11, 30)));
    proposal.trainer_id = other_trainer;
    let err = sessions.schedule_session(&proposal).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleConflict);
}

#[tokio::test]
async fn back_to_back_sessions_are_allowed() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    let sessions = db.database.sessions();
    sessions.schedule_session(&session(&fx, hours(10, 11))).await.unwrap();
    // [10,11) then [11,12): boundary instant belongs to the later session only
    sessions.schedule_session(&session(&fx, hours(11, 12))).await.unwrap();
}

#[tokio::test]
async fn missing_participants_are_not_found() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;
    let sessions = db.database.sessions();

    let mut proposal = session(&fx, hours(10, 11));
    proposal.member_id = 9999;
    let err = sessions.schedule_session(&proposal).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let mut proposal = session(&fx, hours(10, 11));
    proposal.trainer_id = 9999;
    let err = sessions.schedule_session(&proposal).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let mut proposal = session(&fx, hours(10, 11));
    proposal.room_id = 9999;
    let err = sessions.schedule_session(&proposal).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn inverted_time_range_is_invalid() {
    let start = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let end = chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap();
    let err = TimeRange::new(start, end).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // Zero-length ranges are invalid too
    let err = TimeRange::new(start, start).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn trainer_schedule_lists_scheduled_sessions() {
    let db = setup_db().await;
    let fx = fixture(&db.database).await;

    let sessions = db.database.sessions();
    sessions.schedule_session(&session(&fx, hours(10, 11))).await.unwrap();
    sessions.schedule_session(&session(&fx, hours(14, 15))).await.unwrap();

    let schedule = sessions.trainer_schedule(fx.trainer_id).await.unwrap();
    assert_eq!(schedule.trainer_id, fx.trainer_id);
    assert_eq!(schedule.personal_training_sessions.len(), 2);
    assert!(schedule.group_classes.is_empty());
    assert_eq!(
        schedule.personal_training_sessions[0].member_name,
        "Test Member"
    );
}
