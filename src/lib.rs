//! biblio: a GraphQL backend for a small library catalog.
//!
//! Stores authors, books, and user accounts in SQLite, serves filtered
//! book listings and per-author book counts, and gates catalog writes
//! behind bearer-token authentication.

pub mod app;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;
