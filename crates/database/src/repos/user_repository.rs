//! User repository for database operations.

use crate::entities::{CreateUserRequest, UpdateProfileRequest, UserRecord, UserRole};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str =
    "id, username, name, email, image, role, is_blocked, is_active, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by ID, whether or not the record is still active
    pub async fn find_by_id(&self, id: &str) -> UserResult<Option<UserRecord>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| map_user_row(&row)).transpose()
    }

    /// Find an active user by username
    pub async fn find_by_username(&self, username: &str) -> UserResult<Option<UserRecord>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? AND is_active = 1");
        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| map_user_row(&row)).transpose()
    }

    /// Find an active user by email
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<UserRecord>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? AND is_active = 1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| map_user_row(&row)).transpose()
    }

    /// List one window of active players ordered by username
    pub async fn list_active_players(&self, offset: u64, limit: u32) -> UserResult<Vec<UserRecord>> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 AND role = ? ORDER BY username ASC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&query)
            .bind(UserRole::Player.as_str())
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_user_row).collect()
    }

    /// Count active players
    pub async fn count_active_players(&self) -> UserResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active = 1 AND role = ?")
                .bind(UserRole::Player.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Create new player record
    pub async fn create(&self, request: &CreateUserRequest) -> UserResult<UserRecord> {
        let now = Utc::now().to_rfc3339();
        let id = cuid2::cuid();

        sqlx::query(
            "INSERT INTO users (id, username, name, email, image, role, is_blocked, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, NULL, ?, false, true, ?, ?)"
        )
        .bind(&id)
        .bind(&request.username)
        .bind(&request.name)
        .bind(&request.email)
        .bind(UserRole::Player.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&id).await?.ok_or_else(|| {
            UserError::DatabaseError("Failed to retrieve created user".to_string())
        })
    }

    /// Update profile fields of an active user
    pub async fn update_profile(&self, id: &str, request: &UpdateProfileRequest) -> UserResult<UserRecord> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET username = COALESCE(?, username), image = COALESCE(?, image), updated_at = ? WHERE id = ? AND is_active = 1"
        )
        .bind(&request.username)
        .bind(&request.image)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        self.find_by_id(id).await?.ok_or(UserError::UserNotFound)
    }

    /// Block or unblock an active user
    pub async fn set_blocked(&self, id: &str, blocked: bool) -> UserResult<UserRecord> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET is_blocked = ?, updated_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(blocked)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        self.find_by_id(id).await?.ok_or(UserError::UserNotFound)
    }

    /// Soft delete: the row stays, `is_active` is cleared
    pub async fn soft_delete(&self, id: &str) -> UserResult<()> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET is_active = false, updated_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        Ok(())
    }
}

fn map_user_row(row: &SqliteRow) -> UserResult<UserRecord> {
    let role: String = row.try_get("role")?;

    Ok(UserRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        image: row.try_get("image")?,
        role: UserRole::from(role.as_str()),
        is_blocked: row.try_get("is_blocked")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
