//! GraphQL authentication context.
//!
//! The HTTP layer resolves the bearer token to a user record before
//! execution and attaches a [CurrentUser] to the request data; resolvers
//! read it back through [AuthExt].

use async_graphql::{Context, Result};

use crate::db::UserRecord;
use crate::graphql::errors;

/// The authenticated user for one request, resolved from a verified
/// bearer token. Absent from the request data when the call is anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Extension trait to read the auth context in resolvers.
pub trait AuthExt {
    /// The current user, or an UNAUTHENTICATED error. For gated mutations.
    fn current_user(&self) -> Result<&UserRecord>;

    /// The current user if present. For anonymous-tolerant operations.
    fn try_current_user(&self) -> Option<&UserRecord>;
}

impl AuthExt for Context<'_> {
    fn current_user(&self) -> Result<&UserRecord> {
        self.data_opt::<CurrentUser>()
            .map(|u| &u.0)
            .ok_or_else(errors::unauthenticated)
    }

    fn try_current_user(&self) -> Option<&UserRecord> {
        self.data_opt::<CurrentUser>().map(|u| &u.0)
    }
}
