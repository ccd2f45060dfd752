// ABOUTME: Domain data models for the FitClub management API
// ABOUTME: Users, members, trainers, rooms, classes, sessions, and their status enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! Domain data models
//!
//! These types mirror the persisted entity tables one-to-one. Status enums
//! carry their canonical database string representation via `as_str`/`parse`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Day of the week for recurring schedules (availability windows, group classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl DayOfWeek {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }

    /// Parse from a request or database string (case-insensitive)
    ///
    /// Returns `None` for unrecognized day names so callers can surface a
    /// validation error with the offending input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MONDAY" => Some(Self::Monday),
            "TUESDAY" => Some(Self::Tuesday),
            "WEDNESDAY" => Some(Self::Wednesday),
            "THURSDAY" => Some(Self::Thursday),
            "FRIDAY" => Some(Self::Friday),
            "SATURDAY" => Some(Self::Saturday),
            "SUNDAY" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// All days, in calendar order
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

/// Deriving the day-of-week from a calendar date is total: every valid date
/// maps onto exactly one enum variant, so no invalid-day error path exists.
impl From<NaiveDate> for DayOfWeek {
    fn from(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// Membership in good standing
    Active,
    /// Temporarily suspended
    Suspended,
    /// Cancelled by the member
    Cancelled,
    /// Signed up but not yet activated
    Pending,
    /// Lapsed membership
    Expired,
}

impl MembershipStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Cancelled => "Cancelled",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Suspended" => Self::Suspended,
            "Cancelled" => Self::Cancelled,
            "Pending" => Self::Pending,
            "Expired" => Self::Expired,
            _ => Self::Active,
        }
    }
}

/// PT session lifecycle status
///
/// Sessions are created `Scheduled`; the remaining variants are set by
/// operator action. No transition logic exists beyond the enum itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Booked and upcoming
    Scheduled,
    /// Took place
    Completed,
    /// Cancelled before the start time
    Canceled,
    /// Member did not show up
    NoShow,
}

impl SessionStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::NoShow => "NO_SHOW",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "COMPLETED" => Self::Completed,
            "CANCELED" => Self::Canceled,
            "NO_SHOW" => Self::NoShow,
            _ => Self::Scheduled,
        }
    }
}

/// Availability window status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    /// Window is bookable
    Active,
    /// Window is retired and ignored by conflict checks
    Inactive,
}

impl AvailabilityStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "INACTIVE" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

/// Class registration attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Registered and counted against class capacity
    Registered,
    /// Attended the class, still counted against capacity
    Attended,
    /// Registered but did not attend
    Missed,
    /// Registration cancelled, freed from the capacity count
    Cancelled,
}

impl AttendanceStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "Registered",
            Self::Attended => "Attended",
            Self::Missed => "Missed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Attended" => Self::Attended,
            "Missed" => Self::Missed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Registered,
        }
    }
}

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    /// Cardio equipment floor
    Cardio,
    /// Free weights and machines
    Weights,
    /// Group class studio
    Studio,
    /// Swimming pool
    Pool,
    /// Sauna
    Sauna,
}

impl RoomType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cardio => "Cardio",
            Self::Weights => "Weights",
            Self::Studio => "Studio",
            Self::Pool => "Pool",
            Self::Sauna => "Sauna",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Cardio" => Self::Cardio,
            "Weights" => Self::Weights,
            "Pool" => Self::Pool,
            "Sauna" => Self::Sauna,
            _ => Self::Studio,
        }
    }
}

/// Room operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Open for booking
    Available,
    /// Currently in use
    Occupied,
    /// Closed for maintenance
    Maintenance,
    /// Permanently or seasonally closed
    Closed,
}

impl RoomStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
            Self::Closed => "Closed",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Occupied" => Self::Occupied,
            "Maintenance" => Self::Maintenance,
            "Closed" => Self::Closed,
            _ => Self::Available,
        }
    }
}

/// Fitness goal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    /// Reduce body weight
    WeightLoss,
    /// Build muscle mass
    MuscleGain,
    /// Improve cardiovascular endurance
    Endurance,
    /// Improve flexibility
    Flexibility,
    /// General conditioning
    GeneralFitness,
}

impl GoalType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "WeightLoss",
            Self::MuscleGain => "MuscleGain",
            Self::Endurance => "Endurance",
            Self::Flexibility => "Flexibility",
            Self::GeneralFitness => "GeneralFitness",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "WeightLoss" => Self::WeightLoss,
            "MuscleGain" => Self::MuscleGain,
            "Endurance" => Self::Endurance,
            "Flexibility" => Self::Flexibility,
            _ => Self::GeneralFitness,
        }
    }
}

/// Fitness goal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Being pursued
    Active,
    /// Achieved
    Completed,
    /// Given up
    Abandoned,
}

impl GoalStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Completed" => Self::Completed,
            "Abandoned" => Self::Abandoned,
            _ => Self::Active,
        }
    }
}

/// A booking whose room assignment can be changed by an admin
///
/// Tagged union replacing a stringly-typed discriminator: dispatch is by
/// pattern matching, so an invalid booking type is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "booking_type", content = "booking_id", rename_all = "snake_case")]
pub enum BookingRef {
    /// A personal training session, by session id
    PtSession(i64),
    /// A group class, by class id
    GroupClass(i64),
}

/// Account row shared by members, trainers, and admins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Surrogate id
    pub user_id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Unique email address
    pub email: String,
    /// Opaque password hash placeholder (real hashing is out of scope)
    pub password_hash: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Member role row, keyed by the owning user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Owning user id
    pub user_id: i64,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Membership lifecycle status
    pub membership_status: MembershipStatus,
}

/// Trainer role row, keyed by the owning user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    /// Owning user id
    pub user_id: i64,
    /// Training specialty
    pub specialty: Option<String>,
    /// Professional certification
    pub certification: Option<String>,
}

/// Admin role row, keyed by the owning user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    /// Owning user id
    pub user_id: i64,
    /// Administrative role label
    pub admin_role: Option<String>,
}

/// A bookable room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Surrogate id
    pub room_id: i64,
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

/// A recurring weekly group class occupying one room/day/time interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupClass {
    /// Surrogate id
    pub class_id: i64,
    /// Class name
    pub class_name: String,
    /// Day of week the class recurs on
    pub day: DayOfWeek,
    /// Start of the class interval
    pub start_time: NaiveTime,
    /// End of the class interval (exclusive)
    pub end_time: NaiveTime,
    /// Maximum number of counted registrations
    pub capacity: i64,
    /// Assigned room
    pub room_id: i64,
    /// Assigned trainer
    pub trainer_id: i64,
}

/// A member's registration in a group class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRegistration {
    /// Surrogate id
    pub registration_id: i64,
    /// Registered class
    pub class_id: i64,
    /// Registered member
    pub member_id: i64,
    /// When the registration was made
    pub registration_date: DateTime<Utc>,
    /// Attendance status
    pub attended_status: AttendanceStatus,
}

/// A one-off personal training session anchored to a calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalTrainingSession {
    /// Surrogate id
    pub session_id: i64,
    /// Trainer delivering the session
    pub trainer_id: i64,
    /// Member taking the session
    pub member_id: i64,
    /// Room the session takes place in
    pub room_id: i64,
    /// Calendar date of the session
    pub session_date: NaiveDate,
    /// Start of the session interval
    pub start_time: NaiveTime,
    /// End of the session interval (exclusive)
    pub end_time: NaiveTime,
    /// Session lifecycle status
    pub status: SessionStatus,
}

/// A trainer's recurring weekly availability window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Surrogate id
    pub availability_id: i64,
    /// Owning trainer
    pub trainer_id: i64,
    /// Day of week the window recurs on
    pub day_of_week: DayOfWeek,
    /// Start of the window
    pub start_time: NaiveTime,
    /// End of the window (exclusive)
    pub end_time: NaiveTime,
    /// Whether the window is bookable
    pub status: AvailabilityStatus,
}

/// A point-in-time health measurement for a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    /// Surrogate id
    pub metric_id: i64,
    /// Measured member
    pub member_id: i64,
    /// Weight in pounds
    pub weight: f64,
    /// Body fat percentage
    pub body_fat_percentage: f64,
    /// Resting heart rate in bpm
    pub heart_rate: i64,
    /// Blood pressure, e.g. "120/80"
    pub blood_pressure: String,
    /// Height in inches
    pub height: f64,
    /// When the measurement was recorded
    pub recorded_at: DateTime<Utc>,
}

/// A member's fitness goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessGoal {
    /// Surrogate id
    pub goal_id: i64,
    /// Owning member
    pub member_id: i64,
    /// Goal category
    pub goal_type: GoalType,
    /// Free-form target, e.g. "lose 10 lbs"
    pub target_value: String,
    /// Optional deadline
    pub deadline: Option<NaiveDate>,
    /// Goal lifecycle status
    pub status: GoalStatus,
    /// When the goal was set
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_parse_case_insensitive() {
        assert_eq!(DayOfWeek::parse("monday"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::parse("SATURDAY"), Some(DayOfWeek::Saturday));
        assert_eq!(DayOfWeek::parse("Wednesday"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::parse("Funday"), None);
    }

    #[test]
    fn test_day_of_week_from_date() {
        // 2025-06-02 is a Monday
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(DayOfWeek::from(date), DayOfWeek::Monday);
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        assert_eq!(DayOfWeek::from(sunday), DayOfWeek::Sunday);
    }

    #[test]
    fn test_status_round_trips() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Completed,
            SessionStatus::Canceled,
            SessionStatus::NoShow,
        ] {
            assert_eq!(SessionStatus::parse(status.as_str()), status);
        }
        for status in [
            AttendanceStatus::Registered,
            AttendanceStatus::Attended,
            AttendanceStatus::Missed,
            AttendanceStatus::Cancelled,
        ] {
            assert_eq!(AttendanceStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_booking_ref_serialization() {
        let json = serde_json::to_value(BookingRef::PtSession(7)).unwrap();
        assert_eq!(json["booking_type"], "pt_session");
        assert_eq!(json["booking_id"], 7);

        let parsed: BookingRef = serde_json::from_value(serde_json::json!({
            "booking_type": "group_class",
            "booking_id": 3
        }))
        .unwrap();
        assert_eq!(parsed, BookingRef::GroupClass(3));
    }
}
