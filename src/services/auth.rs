//! Authentication service: password hashing, token issue and verification,
//! and per-request current-user resolution.
//!
//! Tokens are HS256 JWTs carrying `{username, id}` and nothing else. They
//! have no expiry claim and there is no revocation list, so verification
//! checks only the signature and claim shape.

use bcrypt::{hash, verify};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{CreateUser, Database, StoreError, UserRecord};

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username at issue time (informational; the id is authoritative).
    pub username: String,
    /// User record id.
    pub id: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or unverifiable bearer token. Aborts the request instead
    /// of degrading to an anonymous context.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Unknown username or wrong password. One variant for both, so the
    /// response cannot be used to probe for accounts.
    #[error("wrong credentials")]
    WrongCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Hashing or signing failure; not caused by the caller.
    #[error("auth internal error: {0}")]
    Internal(String),
}

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for login tokens.
    pub jwt_secret: String,
    /// Deployment-wide signup credential. `createUser` takes no password;
    /// every account is provisioned with a hash of this value.
    pub signup_password: String,
    /// Bcrypt cost factor.
    pub bcrypt_cost: u32,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Hash a password with bcrypt.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(format!("failed to hash password: {}", e)))
    }

    /// Verify a password against a stored bcrypt hash.
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        verify(password, password_hash)
            .map_err(|e| AuthError::Internal(format!("failed to verify password: {}", e)))
    }

    /// Issue a signed token for the user. No expiry claim: the token stays
    /// valid until the signing secret changes.
    pub fn issue_token(&self, user: &UserRecord) -> Result<String, AuthError> {
        let claims = TokenClaims {
            username: user.username.clone(),
            id: user.id.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Verify a token's signature and decode its claims.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issued tokens carry no exp claim; only the signature is checked.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Create a user account. The account is provisioned with a fresh hash
    /// of the configured signup credential; store validation failures
    /// (short or taken username) pass through.
    pub async fn create_user(
        &self,
        username: &str,
        favorite_genre: &str,
    ) -> Result<UserRecord, AuthError> {
        let password_hash = self.hash_password(&self.config.signup_password)?;

        let user = self
            .db
            .users()
            .create(CreateUser {
                username: username.to_string(),
                favorite_genre: favorite_genre.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Authenticate a username/password pair and issue a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self.db.users().find_by_username(username).await?;

        let Some(user) = user else {
            tracing::warn!(username = %username, "login rejected");
            return Err(AuthError::WrongCredentials);
        };

        if !self.verify_password(password, &user.password_hash)? {
            tracing::warn!(username = %username, "login rejected");
            return Err(AuthError::WrongCredentials);
        }

        tracing::info!(user_id = %user.id, username = %user.username, "login succeeded");
        self.issue_token(&user)
    }

    /// Build the per-request auth identity from an optional Authorization
    /// header value.
    ///
    /// - no header, or a non-bearer scheme: anonymous (`Ok(None)`);
    /// - bearer token that fails verification: [AuthError::InvalidToken],
    ///   which the caller turns into a request-level rejection;
    /// - verified token whose user no longer exists: anonymous (`Ok(None)`).
    pub async fn resolve_bearer(
        &self,
        header: Option<&str>,
    ) -> Result<Option<UserRecord>, AuthError> {
        let Some(header) = header else {
            return Ok(None);
        };
        let Some(token) = strip_bearer(header) else {
            return Ok(None);
        };

        let claims = self.verify_token(token)?;

        let user = self.db.users().find_by_id(&claims.id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %claims.id, "token verified but user no longer exists");
        }
        Ok(user)
    }
}

/// Strip a case-insensitive `"Bearer "` prefix, returning the raw token.
fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_at_checked(7)?;
    scheme.eq_ignore_ascii_case("bearer ").then_some(token)
}
