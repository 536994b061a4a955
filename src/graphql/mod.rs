//! GraphQL API for the library catalog
//!
//! Queries, mutations, and the per-request auth context. Resolvers are
//! grouped one struct per domain and merged into the root objects.

pub mod auth;
pub mod errors;
pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthExt, CurrentUser};
pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema};
