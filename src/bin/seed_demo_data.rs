// ABOUTME: Demo data seeder for FitClub development and testing
// ABOUTME: Populates users, roles, rooms, classes, availability, metrics, and goals idempotently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! # Demo Data Seeder
//!
//! Populates the database with a small, realistic club: three members, one
//! trainer, one admin, three rooms, two recurring classes, the trainer's
//! weekly availability, and sample health metrics and goals. Each section is
//! skipped when its table already has rows, so re-running is safe.
//!
//! ## Usage
//!
//! ```bash
//! # Seed with the default database URL
//! cargo run --bin seed-demo-data
//!
//! # Override database URL
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/fitclub.db
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use clap::Parser;
use thiserror::Error;
use tracing::info;

use fitclub_server::config::environment::DEFAULT_DATABASE_URL;
use fitclub_server::database::{
    Database, NewFitnessGoal, NewGroupClass, NewHealthMetric, NewRoom, NewSession,
};
use fitclub_server::errors::AppError;
use fitclub_server::models::{
    DayOfWeek, GoalType, MembershipStatus, RoomStatus, RoomType,
};
use fitclub_server::scheduling::TimeRange;

/// CLI-specific error type for the seed binary
#[derive(Error, Debug)]
enum SeedError {
    #[error("Application error: {0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Validation(String),
}

type SeedResult<T> = Result<T, SeedError>;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "FitClub Demo Data Seeder",
    long_about = "Populate the database with a small demo club for development"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> SeedResult<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(level).init();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

    info!("Seeding demo data into {database_url}");
    let db = Database::new(&database_url).await?;

    seed_accounts(&db).await?;
    seed_rooms(&db).await?;
    seed_classes(&db).await?;
    seed_availability(&db).await?;
    seed_goals_and_metrics(&db).await?;
    seed_bookings(&db).await?;

    info!("Demo data seeding complete");
    Ok(())
}

/// Five users: three members, one trainer, one admin
async fn seed_accounts(db: &Database) -> SeedResult<()> {
    let users = db.users();

    let existing = users.count_users().await?;
    if existing > 0 {
        info!("Skipping account creation, {existing} users already exist");
        return Ok(());
    }

    let people: [(&str, &str, &str, &str); 5] = [
        ("John", "Doe", "john@example.com", "555-0101"),
        ("Jane", "Smith", "jane@example.com", "555-0102"),
        ("Mike", "Johnson", "mike@example.com", "555-0103"),
        ("Sarah", "Williams", "sarah@example.com", "555-0104"),
        ("Admin", "User", "admin@example.com", "555-0105"),
    ];

    let mut user_ids = Vec::with_capacity(people.len());
    for (i, (first, last, email, phone)) in people.iter().enumerate() {
        let user_id = users
            .create_user(
                first,
                last,
                email,
                &format!("hashed_password_{}", i + 1),
                Some(phone),
            )
            .await?;
        user_ids.push(user_id);
    }

    let birthdays = [
        NaiveDate::from_ymd_opt(1990, 5, 15),
        NaiveDate::from_ymd_opt(1985, 8, 22),
        NaiveDate::from_ymd_opt(1992, 3, 10),
    ];
    let statuses = [
        MembershipStatus::Active,
        MembershipStatus::Active,
        MembershipStatus::Suspended,
    ];
    for ((user_id, dob), status) in user_ids.iter().take(3).zip(birthdays).zip(statuses) {
        users.add_member_role(*user_id, dob, status).await?;
    }

    users
        .add_trainer_role(
            user_ids[3],
            Some("Yoga and Pilates"),
            Some("Certified Yoga Instructor"),
        )
        .await?;
    users.add_admin_role(user_ids[4], Some("Manager")).await?;

    info!("Created {} users (3 members, 1 trainer, 1 admin)", user_ids.len());
    Ok(())
}

/// Three rooms across one floor
async fn seed_rooms(db: &Database) -> SeedResult<()> {
    let rooms = db.rooms();

    let existing = rooms.count_rooms().await?;
    if existing > 0 {
        info!("Skipping room creation, {existing} rooms already exist");
        return Ok(());
    }

    let demo_rooms = [
        NewRoom {
            room_name: "Yoga Studio".to_owned(),
            room_type: RoomType::Studio,
            room_number: "101".to_owned(),
            capacity: 20,
            status: RoomStatus::Available,
            floor: 1,
        },
        NewRoom {
            room_name: "Weight Room".to_owned(),
            room_type: RoomType::Weights,
            room_number: "103".to_owned(),
            capacity: 30,
            status: RoomStatus::Available,
            floor: 1,
        },
        NewRoom {
            room_name: "Cardio Room".to_owned(),
            room_type: RoomType::Cardio,
            room_number: "102".to_owned(),
            capacity: 25,
            status: RoomStatus::Maintenance,
            floor: 1,
        },
    ];

    for room in &demo_rooms {
        rooms.create_room(room).await?;
    }

    info!("Created {} rooms", demo_rooms.len());
    Ok(())
}

/// Two recurring classes taught by the demo trainer
async fn seed_classes(db: &Database) -> SeedResult<()> {
    let classes = db.classes();

    let existing = classes.count_classes().await?;
    if existing > 0 {
        info!("Skipping class creation, {existing} classes already exist");
        return Ok(());
    }

    let admin_id = 5;
    let demo_classes = [
        NewGroupClass {
            class_name: "Morning Yoga".to_owned(),
            day: DayOfWeek::Monday,
            range: time_range(9, 10)?,
            capacity: 15,
            room_id: 1,
            trainer_id: 4,
        },
        NewGroupClass {
            class_name: "Evening Strength".to_owned(),
            day: DayOfWeek::Wednesday,
            range: time_range(18, 19)?,
            capacity: 20,
            room_id: 2,
            trainer_id: 4,
        },
    ];

    for class in &demo_classes {
        classes.create_class(admin_id, class).await?;
    }

    info!("Created {} group classes", demo_classes.len());
    Ok(())
}

/// Weekly availability for the demo trainer: Monday and Wednesday, 8 to 17
async fn seed_availability(db: &Database) -> SeedResult<()> {
    let availability = db.availability();
    let trainer_id = 4;

    let monday = availability
        .active_windows_for(trainer_id, DayOfWeek::Monday)
        .await?;
    if !monday.is_empty() {
        info!("Skipping availability creation, windows already exist");
        return Ok(());
    }

    for day in [DayOfWeek::Monday, DayOfWeek::Wednesday] {
        availability
            .add_availability(trainer_id, day, time_range(8, 17)?)
            .await?;
    }

    info!("Created trainer availability for Monday and Wednesday");
    Ok(())
}

/// Sample fitness goals and health metrics for the first two members
async fn seed_goals_and_metrics(db: &Database) -> SeedResult<()> {
    let goals = db.goals();
    let metrics = db.health_metrics();
    let today = Utc::now().date_naive();

    if !goals.goals_for_member(1).await?.is_empty() {
        info!("Skipping goal and metric creation, goals already exist");
        return Ok(());
    }

    goals
        .create_goal(
            1,
            &NewFitnessGoal {
                goal_type: GoalType::WeightLoss,
                target_value: "Lose 10 lbs".to_owned(),
                deadline: Some(today + Duration::days(90)),
            },
        )
        .await?;
    goals
        .create_goal(
            2,
            &NewFitnessGoal {
                goal_type: GoalType::MuscleGain,
                target_value: "Gain 5 lbs muscle".to_owned(),
                deadline: Some(today + Duration::days(120)),
            },
        )
        .await?;

    metrics
        .log_metric(
            1,
            &NewHealthMetric {
                weight: 180.5,
                heart_rate: 72,
                height: 70.0,
                blood_pressure: "120/80".to_owned(),
                body_fat_percentage: 22.5,
            },
        )
        .await?;
    metrics
        .log_metric(
            2,
            &NewHealthMetric {
                weight: 165.0,
                heart_rate: 68,
                height: 68.0,
                blood_pressure: "118/75".to_owned(),
                body_fat_percentage: 18.3,
            },
        )
        .await?;

    info!("Created 2 fitness goals and 2 health metrics");
    Ok(())
}

/// One PT session on the next Monday plus two class registrations
async fn seed_bookings(db: &Database) -> SeedResult<()> {
    let sessions = db.sessions();
    let classes = db.classes();

    if classes.counted_registrations(1).await? > 0 {
        info!("Skipping booking creation, registrations already exist");
        return Ok(());
    }

    classes.register_for_class(1, 1).await?;
    classes.register_for_class(2, 1).await?;

    // Lands inside the trainer's Monday 8-17 window
    let session = NewSession {
        member_id: 1,
        trainer_id: 4,
        room_id: 1,
        session_date: next_monday(),
        range: time_range(10, 11)?,
    };
    sessions.schedule_session(&session).await?;

    info!("Created 2 class registrations and 1 PT session");
    Ok(())
}

/// Whole-hour time range helper
fn time_range(start_hour: u32, end_hour: u32) -> SeedResult<TimeRange> {
    let start = NaiveTime::from_hms_opt(start_hour, 0, 0)
        .ok_or_else(|| SeedError::Validation(format!("Invalid hour: {start_hour}")))?;
    let end = NaiveTime::from_hms_opt(end_hour, 0, 0)
        .ok_or_else(|| SeedError::Validation(format!("Invalid hour: {end_hour}")))?;
    Ok(TimeRange::new(start, end)?)
}

/// The next Monday strictly after today
fn next_monday() -> NaiveDate {
    let today = Utc::now().date_naive();
    let days_ahead = (7 - today.weekday().days_since(Weekday::Mon)) % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    today + Duration::days(i64::from(days_ahead))
}
