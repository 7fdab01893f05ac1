//! Use-case layer for the catalog.
//!
//! Services own business validation and the operation result envelope;
//! front-ends render [`Outcome`] messages and [`CatalogError`] values
//! without inspecting storage details.

pub mod catalog;

pub use catalog::{CatalogError, CatalogResult, CatalogService, Outcome};
