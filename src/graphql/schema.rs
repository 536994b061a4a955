//! GraphQL schema definition with queries and mutations
//!
//! The single API surface of the catalog service. `addBook` and
//! `editAuthor` require authentication; everything else is public.

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::mutations::{CatalogMutations, UserMutations};
use super::queries::{CatalogQueries, UserQueries};

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(CatalogQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(CatalogMutations, UserMutations);

/// Build the GraphQL schema with all resolvers and shared state.
pub fn build_schema(db: Database, auth: AuthService) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .extension(Tracing)
    .data(db)
    .data(auth)
    .finish()
}
