//! User queries.

use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The current authenticated user, or null for anonymous callers.
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.try_current_user().cloned().map(user_to_graphql)
    }
}
