//! Persistence layer for the catalog.
//!
//! Defines the [`BookRepository`] contract and its SQLite implementation.
//! Higher layers depend on the trait so tests can substitute an in-memory
//! double without touching SQL.

pub mod book_repo;

pub use book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
