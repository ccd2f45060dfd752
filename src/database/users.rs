// ABOUTME: Account management database operations
// ABOUTME: Member registration, profile updates, and role existence checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{decode_date, decode_timestamp, encode_date};
use crate::errors::{AppError, AppResult};
use crate::models::{Member, MembershipStatus, User};

/// Fields required to register a new member
#[derive(Debug, Clone, Deserialize)]
pub struct NewMemberRegistration {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Unique email address
    pub email: String,
    /// Raw password; stored behind an opaque placeholder hash
    pub password: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Date of birth
    pub date_of_birth: NaiveDate,
}

/// Optional per-field member profile update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberProfileUpdate {
    /// New given name
    pub first_name: Option<String>,
    /// New family name
    pub last_name: Option<String>,
    /// New email address (checked for uniqueness)
    pub email: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New date of birth
    pub date_of_birth: Option<NaiveDate>,
}

/// Account database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new member: one user row plus one member role row
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already registered
    /// - Database operation fails
    pub async fn register_member(&self, registration: &NewMemberRegistration) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let existing = sqlx::query("SELECT user_id FROM users WHERE email = $1")
            .bind(&registration.email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to check email: {e}")))?;
        if existing.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        let user_id = insert_user(
            &mut tx,
            &registration.first_name,
            &registration.last_name,
            &registration.email,
            // Real hashing is out of scope; only the original's placeholder
            // scheme is preserved
            &format!("hashed_{}", registration.password),
            registration.phone.as_deref(),
        )
        .await?;

        sqlx::query(
            r"
            INSERT INTO member (user_id, date_of_birth, membership_status)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(encode_date(registration.date_of_birth))
        .bind(MembershipStatus::Active.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create member: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit registration: {e}")))?;

        Ok(user_id)
    }

    /// Update a member's personal details
    ///
    /// Only fields present in the patch are touched. Changing the email
    /// re-checks uniqueness against every other account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The member does not exist
    /// - The new email is already in use by another account
    /// - Database operation fails
    pub async fn update_member_profile(
        &self,
        member_id: i64,
        patch: &MemberProfileUpdate,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !member_exists(&mut tx, member_id).await? {
            return Err(AppError::not_found(format!("Member with id {member_id}")));
        }

        if let Some(first_name) = &patch.first_name {
            sqlx::query("UPDATE users SET first_name = $2 WHERE user_id = $1")
                .bind(member_id)
                .bind(first_name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update first name: {e}")))?;
        }
        if let Some(last_name) = &patch.last_name {
            sqlx::query("UPDATE users SET last_name = $2 WHERE user_id = $1")
                .bind(member_id)
                .bind(last_name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update last name: {e}")))?;
        }
        if let Some(email) = &patch.email {
            let taken = sqlx::query("SELECT user_id FROM users WHERE email = $1 AND user_id != $2")
                .bind(email)
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to check email: {e}")))?;
            if taken.is_some() {
                return Err(AppError::already_exists("Email already in use"));
            }
            sqlx::query("UPDATE users SET email = $2 WHERE user_id = $1")
                .bind(member_id)
                .bind(email)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update email: {e}")))?;
        }
        if let Some(phone) = &patch.phone {
            sqlx::query("UPDATE users SET phone = $2 WHERE user_id = $1")
                .bind(member_id)
                .bind(phone)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update phone: {e}")))?;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            sqlx::query("UPDATE member SET date_of_birth = $2 WHERE user_id = $1")
                .bind(member_id)
                .bind(encode_date(date_of_birth))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update date of birth: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit profile update: {e}")))?;

        Ok(())
    }

    /// Get a user row by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT user_id, first_name, last_name, email, password_hash, phone, created_at
            FROM users WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| {
            Ok(User {
                user_id: r.get("user_id"),
                first_name: r.get("first_name"),
                last_name: r.get("last_name"),
                email: r.get("email"),
                password_hash: r.get("password_hash"),
                phone: r.get("phone"),
                created_at: decode_timestamp(&r.get::<String, _>("created_at"))?,
            })
        })
        .transpose()
    }

    /// Get a member role row by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_member(&self, member_id: i64) -> AppResult<Option<Member>> {
        let row = sqlx::query(
            "SELECT user_id, date_of_birth, membership_status FROM member WHERE user_id = $1",
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get member: {e}")))?;

        row.map(|r| {
            Ok(Member {
                user_id: r.get("user_id"),
                date_of_birth: r
                    .get::<Option<String>, _>("date_of_birth")
                    .map(|raw| decode_date(&raw))
                    .transpose()?,
                membership_status: MembershipStatus::parse(
                    &r.get::<String, _>("membership_status"),
                ),
            })
        })
        .transpose()
    }

    /// Count all user accounts (used for idempotent seeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_users(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))?;
        Ok(row.get("n"))
    }

    /// Create a bare user account, returning its id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including duplicate email)
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
    ) -> AppResult<i64> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        insert_user(&mut conn, first_name, last_name, email, password_hash, phone).await
    }

    /// Attach a member role to an existing user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_member_role(
        &self,
        user_id: i64,
        date_of_birth: Option<NaiveDate>,
        status: MembershipStatus,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO member (user_id, date_of_birth, membership_status) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(date_of_birth.map(encode_date))
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create member role: {e}")))?;
        Ok(())
    }

    /// Attach a trainer role to an existing user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_trainer_role(
        &self,
        user_id: i64,
        specialty: Option<&str>,
        certification: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO trainer (user_id, specialty, certification) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(specialty)
            .bind(certification)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create trainer role: {e}")))?;
        Ok(())
    }

    /// Attach an admin role to an existing user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_admin_role(&self, user_id: i64, admin_role: Option<&str>) -> AppResult<()> {
        sqlx::query("INSERT INTO admin (user_id, admin_role) VALUES ($1, $2)")
            .bind(user_id)
            .bind(admin_role)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create admin role: {e}")))?;
        Ok(())
    }
}

async fn insert_user(
    conn: &mut SqliteConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
    phone: Option<&str>,
) -> AppResult<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO users (first_name, last_name, email, password_hash, phone, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .bind(Utc::now().to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

    Ok(result.last_insert_rowid())
}

/// Whether a member role row exists, checked on the caller's connection so it
/// participates in the caller's transaction
pub(crate) async fn member_exists(conn: &mut SqliteConnection, member_id: i64) -> AppResult<bool> {
    role_exists(conn, "member", member_id).await
}

/// Whether a trainer role row exists, on the caller's connection
pub(crate) async fn trainer_exists(conn: &mut SqliteConnection, trainer_id: i64) -> AppResult<bool> {
    role_exists(conn, "trainer", trainer_id).await
}

/// Whether an admin role row exists, on the caller's connection
pub(crate) async fn admin_exists(conn: &mut SqliteConnection, admin_id: i64) -> AppResult<bool> {
    role_exists(conn, "admin", admin_id).await
}

async fn role_exists(conn: &mut SqliteConnection, table: &str, user_id: i64) -> AppResult<bool> {
    // Table name comes from the three fixed callers above, never from input
    let query = format!("SELECT user_id FROM {table} WHERE user_id = $1");
    let row = sqlx::query(&query)
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check {table} existence: {e}")))?;
    Ok(row.is_some())
}
