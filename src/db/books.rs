//! Books repository.
//!
//! Genres live in a JSON array TEXT column and the genre filter matches
//! through `json_each`, so containment checks are exact and case-sensitive
//! with no partial matching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::StoreError;
use super::authors::AuthorRecord;
use super::sqlite_helpers::{json_array_contains_sql, json_to_vec, now_iso8601, vec_to_json};

/// Minimum title length, counted in characters.
const MIN_TITLE_CHARS: usize = 2;

/// A stored book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    /// Publication year.
    pub published: i32,
    pub author_id: String,
    pub genres: Vec<String>,
    pub created_at: String,
}

/// A book row joined with its author.
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: BookRecord,
    pub author: AuthorRecord,
}

/// Listing filter. Both fields optional; set fields AND-combine.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub author_id: Option<String>,
    pub genre: Option<String>,
}

/// Input for creating a book.
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub published: i32,
    pub author_id: String,
    pub genres: Vec<String>,
}

pub struct BookRepository {
    pool: SqlitePool,
}

// Book columns followed by the joined author columns.
type BookAuthorRow = (
    String,
    String,
    i32,
    String,
    String,
    String,
    String,
    String,
    Option<i32>,
    String,
    String,
);

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of book records.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a book. Titles shorter than two characters are rejected with
    /// [StoreError::Validation].
    pub async fn create(&self, book: CreateBook) -> Result<BookRecord, StoreError> {
        if book.title.chars().count() < MIN_TITLE_CHARS {
            return Err(StoreError::Validation(format!(
                "title must be at least {} characters long",
                MIN_TITLE_CHARS
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO books (id, title, published, author_id, genres, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&book.title)
        .bind(book.published)
        .bind(&book.author_id)
        .bind(vec_to_json(&book.genres))
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(BookRecord {
            id,
            title: book.title,
            published: book.published,
            author_id: book.author_id,
            genres: book.genres,
            created_at: now,
        })
    }

    /// Books matching the filter, each joined with its author, oldest
    /// first. A genre filter matches only exact string equality against
    /// the stored genre list.
    pub async fn find(&self, filter: BookFilter) -> Result<Vec<BookWithAuthor>, StoreError> {
        let mut sql = String::from(
            r#"
            SELECT b.id, b.title, b.published, b.author_id, b.genres, b.created_at,
                   a.id, a.name, a.born, a.created_at, a.updated_at
            FROM books b
            JOIN authors a ON a.id = b.author_id
            "#,
        );

        let mut clauses: Vec<String> = Vec::new();
        if filter.author_id.is_some() {
            clauses.push("b.author_id = ?".to_string());
        }
        if filter.genre.is_some() {
            clauses.push(json_array_contains_sql("b.genres"));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY b.created_at, b.title");

        let mut query = sqlx::query_as::<_, BookAuthorRow>(&sql);
        if let Some(author_id) = filter.author_id {
            query = query.bind(author_id);
        }
        if let Some(genre) = filter.genre {
            query = query.bind(genre);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_book_with_author).collect())
    }

    /// Count of books referencing one author.
    pub async fn count_by_author(&self, author_id: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Book counts for every author with at least one book, from a single
    /// grouped query. Authors absent from the map have zero books.
    pub async fn counts_by_author(&self) -> Result<HashMap<String, i64>, StoreError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT author_id, COUNT(*) FROM books GROUP BY author_id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}

fn row_to_book_with_author(row: BookAuthorRow) -> BookWithAuthor {
    BookWithAuthor {
        book: BookRecord {
            id: row.0,
            title: row.1,
            published: row.2,
            author_id: row.3,
            genres: json_to_vec(&row.4),
            created_at: row.5,
        },
        author: AuthorRecord {
            id: row.6,
            name: row.7,
            born: row.8,
            created_at: row.9,
            updated_at: row.10,
        },
    }
}
