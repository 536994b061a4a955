//! GraphQL query resolvers, one struct per domain, merged into QueryRoot.

pub mod catalog;
pub mod user;

pub use catalog::CatalogQueries;
pub use user::UserQueries;

pub(crate) mod prelude {
    pub(crate) use std::collections::HashMap;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::{BookFilter, Database};
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::errors;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
