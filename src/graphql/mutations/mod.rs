//! GraphQL mutation resolvers, one struct per domain, merged into
//! MutationRoot.

pub mod catalog;
pub mod user;

pub use catalog::CatalogMutations;
pub use user::UserMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};
    pub(crate) use serde_json::json;

    pub(crate) use crate::db::{CreateBook, Database};
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::errors;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
}
