//! Authors repository.
//!
//! Author name is a natural key: `get_or_create` does a conditional insert
//! against the unique name index, so concurrent calls for the same new name
//! converge on a single record instead of racing a read-then-write.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::StoreError;
use super::sqlite_helpers::now_iso8601;

/// A stored author.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    /// Birth year, if recorded.
    pub born: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of author records.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Look up an author by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, StoreError> {
        let record = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at, updated_at FROM authors WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Look up an author by id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<AuthorRecord>, StoreError> {
        let record = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at, updated_at FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// All authors, oldest first.
    pub async fn list(&self) -> Result<Vec<AuthorRecord>, StoreError> {
        let records = sqlx::query_as::<_, AuthorRecord>(
            "SELECT id, name, born, created_at, updated_at FROM authors ORDER BY created_at, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Insert the author if the name is new, then return the record for the
    /// name either way. Single conditional insert against the unique index,
    /// no separate existence check.
    pub async fn get_or_create(&self, name: &str) -> Result<AuthorRecord, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO authors (id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_name(name)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Set an author's birth year. Returns the updated record, or None when
    /// no author has that id.
    pub async fn set_born(&self, id: &str, born: i32) -> Result<Option<AuthorRecord>, StoreError> {
        let result = sqlx::query("UPDATE authors SET born = ?, updated_at = ? WHERE id = ?")
            .bind(born)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
