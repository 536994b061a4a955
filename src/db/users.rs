//! Users repository: the identity store behind login and the auth context.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::StoreError;
use super::sqlite_helpers::now_iso8601;

/// Minimum username length, counted in characters.
const MIN_USERNAME_CHARS: usize = 3;

/// A stored user account. The password hash never leaves the store and
/// service layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
    pub password_hash: String,
    pub created_at: String,
}

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub favorite_genre: String,
    pub password_hash: String,
}

pub struct UsersRepository {
    pool: SqlitePool,
}

type UserRow = (String, String, String, String, String);

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user account. Usernames shorter than three characters or
    /// already taken are rejected with [StoreError::Validation].
    pub async fn create(&self, user: CreateUser) -> Result<UserRecord, StoreError> {
        if user.username.chars().count() < MIN_USERNAME_CHARS {
            return Err(StoreError::Validation(format!(
                "username must be at least {} characters long",
                MIN_USERNAME_CHARS
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, favorite_genre, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.username)
        .bind(&user.favorite_genre)
        .bind(&user.password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await;

        // The UNIQUE index is the only uniqueness check.
        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::Validation(format!(
                    "username '{}' is already taken",
                    user.username
                )));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(UserRecord {
            id,
            username: user.username,
            favorite_genre: user.favorite_genre,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    /// Look up a user by exact username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, favorite_genre, password_hash, created_at
            FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }

    /// Look up a user by id. Used when resolving a verified token to its
    /// current account.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, favorite_genre, password_hash, created_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }
}

fn row_to_user(row: UserRow) -> UserRecord {
    UserRecord {
        id: row.0,
        username: row.1,
        favorite_genre: row.2,
        password_hash: row.3,
        created_at: row.4,
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
