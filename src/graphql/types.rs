//! GraphQL type definitions
//!
//! These mirror the catalog records but carry API-facing shapes:
//! `Author.bookCount` is materialized by the resolvers from a grouped
//! count, and `User` never exposes the password hash.

use async_graphql::{ID, SimpleObject};
use serde::{Deserialize, Serialize};

/// A catalog author.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Author {
    pub id: ID,
    pub name: String,
    /// Birth year, if recorded.
    pub born: Option<i32>,
    /// Number of catalog books referencing this author.
    pub book_count: i32,
}

/// A catalog book with its author resolved inline.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Book {
    pub id: ID,
    pub title: String,
    /// Publication year.
    pub published: i32,
    pub author: Author,
    pub genres: Vec<String>,
}

/// A registered user.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub favorite_genre: String,
}

/// Wrapper for the bearer token returned by `login`.
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
}
