//! Core domain logic for Shelfmark.
//! This crate is the single source of truth for catalog business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, flush_logs, init_logging, logging_status};
pub use model::book::{Book, BookId};
pub use model::isbn::{is_valid_isbn, normalize_isbn};
pub use model::validate::{validate_for_delete, validate_for_write, Violation};
pub use repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::{CatalogError, CatalogResult, CatalogService, Outcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
