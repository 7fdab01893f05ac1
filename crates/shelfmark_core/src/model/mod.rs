//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define the canonical `Book` record used by every layer.
//! - Keep checksum and business-rule validation pure and storage-free.
//!
//! # Invariants
//! - Records are identified by a storage-assigned `BookId`.
//! - Validation never performs I/O and never panics.

pub mod book;
pub mod isbn;
pub mod validate;
