//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record shared by every layer.
//! - Provide small presentation/stock helpers used by list and detail views.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards; `0` marks a
//!   record that has not been persisted yet.
//! - Optional fields are `None` when the operator did not supply them;
//!   `quantity = 0` is a real stock level, not an absence marker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned catalog identifier (SQLite rowid).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Canonical record for one catalog entry.
///
/// The shape deliberately admits invalid states (blank title, negative
/// quantity) so that write validation can report every problem at once
/// instead of the constructors rejecting input piecemeal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// `0` until storage assigns an id on create.
    pub id: BookId,
    /// Required. Blank (after trimming) fails write validation.
    pub title: String,
    /// Required. Blank (after trimming) fails write validation.
    pub author: String,
    /// Required and unique across the catalog; must pass the ISBN-10 or
    /// ISBN-13 checksum. Blank means "not provided yet".
    pub isbn: String,
    /// Required by validation; bounded to [1450, current year].
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    /// Must be non-negative when present.
    pub price: Option<f64>,
    /// Copies on the shelf. Never negative once validated.
    pub quantity: i64,
    /// Must not lie in the future when present.
    pub acquired_on: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Book {
    /// Creates an unpersisted record from the four core fields.
    ///
    /// Every optional attribute starts as `None` and `quantity` as 0, the
    /// same defaults the interactive entry form uses.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        publication_year: i32,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            publication_year: Some(publication_year),
            publisher: None,
            price: None,
            quantity: 0,
            acquired_on: None,
            description: None,
            category: None,
        }
    }

    /// Returns whether at least one copy is on the shelf.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Years elapsed since publication, clamped to zero.
    ///
    /// Returns 0 when the publication year is unset or in the future.
    pub fn age_in_years(&self, current_year: i32) -> i32 {
        self.publication_year
            .map_or(0, |year| (current_year - year).max(0))
    }

    /// One-line rendering for list output.
    pub fn summary(&self) -> String {
        format!(
            "id {}: {} by {} (isbn {})",
            self.id, self.title, self.author, self.isbn
        )
    }
}

impl Display for Book {
    /// Multi-line detail block used by the menu's detail view.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "id:               {}", self.id)?;
        writeln!(f, "title:            {}", self.title)?;
        writeln!(f, "author:           {}", self.author)?;
        writeln!(f, "isbn:             {}", self.isbn)?;
        writeln!(f, "publication year: {}", display_opt(self.publication_year))?;
        writeln!(f, "publisher:        {}", display_opt_str(&self.publisher))?;
        writeln!(
            f,
            "price:            {}",
            match self.price {
                Some(price) => format!("{price:.2}"),
                None => NOT_RECORDED.to_string(),
            }
        )?;
        writeln!(f, "quantity:         {}", self.quantity)?;
        writeln!(
            f,
            "acquired on:      {}",
            match self.acquired_on {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => NOT_RECORDED.to_string(),
            }
        )?;
        writeln!(f, "category:         {}", display_opt_str(&self.category))?;
        write!(f, "description:      {}", display_opt_str(&self.description))
    }
}

const NOT_RECORDED: &str = "not recorded";

fn display_opt(value: Option<i32>) -> String {
    value.map_or_else(|| NOT_RECORDED.to_string(), |v| v.to_string())
}

fn display_opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_RECORDED)
}
