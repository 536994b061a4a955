//! Database connection and repositories.

pub mod authors;
pub mod books;
pub mod sqlite_helpers;
pub mod users;

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use authors::{AuthorRecord, AuthorRepository};
pub use books::{BookFilter, BookRecord, BookRepository, BookWithAuthor, CreateBook};
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Errors surfaced by the store layer. Validation failures carry a
/// user-facing message; everything else stays a database error so callers
/// never have to inspect sqlx shapes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the SQLite database at `url` (creating the file and any missing
    /// parent directory) and wrap it in a pool. Accepts `sqlite:` URLs, bare
    /// paths, and `sqlite::memory:`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        // create_if_missing creates the file, not the directory.
        let file = url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
        if file != ":memory:" {
            if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn default_max_connections() -> u32 {
        DEFAULT_MAX_CONNECTIONS
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Get an authors repository
    pub fn authors(&self) -> AuthorRepository {
        AuthorRepository::new(self.pool.clone())
    }

    /// Get a books repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
