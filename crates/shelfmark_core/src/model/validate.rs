//! Write/delete validation rules for catalog records.
//!
//! # Responsibility
//! - Gate every create/update with the full business-rule set.
//! - Report all violations of a record at once, in rule order.
//!
//! # Invariants
//! - Rules are evaluated independently; no rule short-circuits another.
//! - Rules are pure: "today" is a parameter, never read from a clock here.
//! - A blank ISBN reports only `IsbnRequired`; the checksum is not run
//!   against empty input.

use crate::model::book::Book;
use crate::model::isbn::is_valid_isbn;
use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Formatter};

/// Earliest accepted publication year (movable-type printing era).
pub const MIN_PUBLICATION_YEAR: i32 = 1450;

/// One business-rule violation, renderable as an operator-facing message.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    TitleRequired,
    AuthorRequired,
    IsbnRequired,
    /// The ISBN was supplied but fails both checksum forms.
    IsbnChecksum { isbn: String },
    PublicationYearRequired,
    PublicationYearOutOfRange { year: i32, max: i32 },
    NegativePrice { price: f64 },
    NegativeQuantity { quantity: i64 },
    AcquisitionDateInFuture { date: NaiveDate },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::AuthorRequired => write!(f, "author is required"),
            Self::IsbnRequired => write!(f, "isbn is required"),
            Self::IsbnChecksum { isbn } => {
                write!(f, "isbn `{isbn}` is not a valid ISBN-10 or ISBN-13")
            }
            Self::PublicationYearRequired => write!(f, "publication year is required"),
            Self::PublicationYearOutOfRange { year, max } => write!(
                f,
                "publication year {year} must lie between {MIN_PUBLICATION_YEAR} and {max}"
            ),
            Self::NegativePrice { price } => {
                write!(f, "price {price} must not be negative")
            }
            Self::NegativeQuantity { quantity } => {
                write!(f, "quantity {quantity} must not be negative")
            }
            Self::AcquisitionDateInFuture { date } => {
                write!(f, "acquisition date {date} must not lie in the future")
            }
        }
    }
}

/// Checks every write rule against `book` and collects all violations.
///
/// `today` anchors the publication-year ceiling and the acquisition-date
/// rule. Returns `Ok(())` only when no rule is violated; the `Err` list is
/// never empty and follows rule order.
pub fn validate_for_write(book: &Book, today: NaiveDate) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    if book.title.trim().is_empty() {
        violations.push(Violation::TitleRequired);
    }

    if book.author.trim().is_empty() {
        violations.push(Violation::AuthorRequired);
    }

    if book.isbn.trim().is_empty() {
        violations.push(Violation::IsbnRequired);
    } else if !is_valid_isbn(&book.isbn) {
        violations.push(Violation::IsbnChecksum {
            isbn: book.isbn.clone(),
        });
    }

    let current_year = today.year();
    match book.publication_year {
        None => violations.push(Violation::PublicationYearRequired),
        Some(year) if !(MIN_PUBLICATION_YEAR..=current_year).contains(&year) => {
            violations.push(Violation::PublicationYearOutOfRange {
                year,
                max: current_year,
            });
        }
        Some(_) => {}
    }

    if let Some(price) = book.price {
        if price < 0.0 {
            violations.push(Violation::NegativePrice { price });
        }
    }

    if book.quantity < 0 {
        violations.push(Violation::NegativeQuantity {
            quantity: book.quantity,
        });
    }

    if let Some(date) = book.acquired_on {
        if date > today {
            violations.push(Violation::AcquisitionDateInFuture { date });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Checks whether `book` may be removed from the catalog.
///
/// No rule currently blocks a delete; the hook exists so that rules like
/// "a borrowed copy cannot be removed" slot in here once the catalog
/// tracks loans.
pub fn validate_for_delete(_book: &Book) -> Result<(), Vec<Violation>> {
    Ok(())
}
