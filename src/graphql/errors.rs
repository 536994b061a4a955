//! GraphQL error construction.
//!
//! Every failure leaving the resolvers carries a machine-readable `code`
//! extension: `UNAUTHENTICATED` for gated mutations without a current
//! user, `INVALID_INPUT` for rejected arguments (with the offending
//! values echoed under `invalidArgs`), and `INVALID_TOKEN` for bearer
//! tokens that fail verification. Engine failures are logged and answered
//! with a generic message so storage internals never reach the wire.

use async_graphql::{Error, ErrorExtensions, Pos, Response, Value};

use crate::db::StoreError;
use crate::services::AuthError;

pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INVALID_TOKEN: &str = "INVALID_TOKEN";

/// Gated-mutation failure: no current user in the request context.
pub fn unauthenticated() -> Error {
    Error::new("not authenticated").extend_with(|_, e| e.set("code", UNAUTHENTICATED))
}

/// Rejected-input failure, echoing the offending arguments.
pub fn invalid_input(message: impl Into<String>, invalid_args: Value) -> Error {
    Error::new(message).extend_with(|_, e| {
        e.set("code", INVALID_INPUT);
        e.set("invalidArgs", invalid_args);
    })
}

/// Convert mutation arguments to an extension value for the invalidArgs
/// echo. Best effort: an unconvertible payload drops the echo rather than
/// failing the error path itself.
pub fn args_value(args: serde_json::Value) -> Value {
    Value::from_json(args).unwrap_or(Value::Null)
}

/// Engine-level failure: logged in full, answered with a generic message.
pub fn internal(err: impl std::fmt::Display) -> Error {
    tracing::error!(error = %err, "internal failure");
    Error::new("internal error")
}

/// Map a store failure: validation problems become INVALID_INPUT, engine
/// failures a generic error.
pub fn from_store(err: StoreError, invalid_args: Value) -> Error {
    match err {
        StoreError::Validation(message) => invalid_input(message, invalid_args),
        StoreError::Database(e) => internal(e),
    }
}

/// Map an auth-service failure onto the wire codes.
pub fn from_auth(err: AuthError, invalid_args: Value) -> Error {
    match err {
        AuthError::WrongCredentials => invalid_input("wrong credentials", invalid_args),
        AuthError::InvalidToken(_) => {
            Error::new(err.to_string()).extend_with(|_, e| e.set("code", INVALID_TOKEN))
        }
        AuthError::Store(store) => from_store(store, invalid_args),
        AuthError::Internal(message) => internal(message),
    }
}

/// Response for a request whose auth context could not be built: the whole
/// call is answered with a single request-level error and no resolver runs.
pub fn request_rejected(err: &AuthError) -> Response {
    let error = match err {
        AuthError::InvalidToken(_) => {
            Error::new(err.to_string()).extend_with(|_, e| e.set("code", INVALID_TOKEN))
        }
        other => {
            tracing::error!(error = %other, "auth context construction failed");
            Error::new("internal error")
        }
    };

    Response::from_errors(vec![error.into_server_error(Pos { line: 0, column: 0 })])
}
