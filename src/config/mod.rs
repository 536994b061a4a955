//! Application configuration management

use std::env;

use anyhow::{Context, Result};

use crate::db::Database;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database path or URL
    /// Use DATABASE_PATH, or DATABASE_URL with a sqlite: prefix
    pub database_url: String,

    /// Maximum connections in the SQLite pool
    pub database_max_connections: u32,

    /// JWT signing secret for login tokens. Required: tokens have no
    /// expiry, so a guessable secret would be permanent.
    pub jwt_secret: String,

    /// Deployment-wide signup credential. `createUser` takes no password,
    /// so every account is provisioned with a hash of this value and
    /// `login` verifies against it.
    pub signup_password: String,

    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/biblio.db".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(Database::default_max_connections),

            // Secrets have no fallback; startup fails if they are unset.
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,

            signup_password: env::var("SIGNUP_PASSWORD")
                .context("SIGNUP_PASSWORD is required")?,

            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}
