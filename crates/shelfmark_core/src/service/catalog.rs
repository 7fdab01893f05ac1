//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide the create/read/update/delete/search API for catalog records.
//! - Run business-rule validation before every mutation.
//! - Wrap every successful call in an [`Outcome`] carrying a human-readable
//!   message alongside the value.
//!
//! # Invariants
//! - No mutation reaches the repository while validation reports violations.
//! - Duplicate ISBNs are refused before the insert or update is attempted;
//!   the unique index remains as a backstop for races.
//! - Storage failures surface as [`CatalogError::Storage`] with a generic
//!   message; the underlying detail goes to the log, not the caller.

use crate::model::book::{Book, BookId};
use crate::model::validate::{validate_for_delete, validate_for_write, Violation};
use crate::repo::{BookRepository, RepoError};
use chrono::{Local, NaiveDate};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Successful operation envelope: the value plus a display-ready message.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn new(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
        }
    }
}

pub type CatalogResult<T> = Result<Outcome<T>, CatalogError>;

/// Failure outcome of a catalog operation.
#[derive(Debug)]
pub enum CatalogError {
    /// The caller passed an argument the operation cannot work with.
    InvalidArgument(String),
    /// The record breaks one or more business rules.
    ValidationFailed(Vec<Violation>),
    /// The addressed record does not exist.
    NotFound(String),
    /// Another record already carries this ISBN.
    DuplicateKey { isbn: String },
    /// The repository accepted the call but reported no effect.
    PersistenceFailure(String),
    /// The repository itself failed; detail is in the log.
    Storage(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::ValidationFailed(violations) => {
                let joined = violations
                    .iter()
                    .map(|violation| violation.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "validation failed: {joined}")
            }
            Self::NotFound(message) => write!(f, "{message}"),
            Self::DuplicateKey { isbn } => {
                write!(f, "a book with isbn `{isbn}` already exists")
            }
            Self::PersistenceFailure(message) => write!(f, "{message}"),
            Self::Storage(_) => write!(f, "catalog storage failed; details have been logged"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

/// Catalog service facade over repository implementations.
///
/// The clock is injectable so date-sensitive rules (acquisition date,
/// publication year) stay deterministic under test.
pub struct CatalogService<R: BookRepository> {
    repo: R,
    today: fn() -> NaiveDate,
}

impl<R: BookRepository> CatalogService<R> {
    /// Creates a service on the local calendar date.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, local_today)
    }

    /// Creates a service with an explicit date source.
    pub fn with_clock(repo: R, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }

    /// Validates and inserts one record, returning the assigned id.
    ///
    /// The id field of `book` is ignored; storage assigns the next one.
    pub fn create_book(&self, book: &Book) -> CatalogResult<BookId> {
        const OP: &str = "create";
        debug!("event=catalog_create module=service status=start");

        if let Err(violations) = validate_for_write(book, (self.today)()) {
            return Err(validation_failed(OP, violations));
        }
        self.check_isbn_free(OP, &book.isbn, None)?;

        let id = self
            .repo
            .add(book)
            .map_err(|err| storage_error(OP, err))?;

        info!("event=catalog_create module=service status=ok id={id}");
        Ok(Outcome::new(id, format!("book created with id {id}")))
    }

    /// Fetches one record by id.
    pub fn get_book_by_id(&self, id: BookId) -> CatalogResult<Book> {
        const OP: &str = "get_by_id";
        debug!("event=catalog_get_by_id module=service status=start id={id}");

        if id <= 0 {
            return Err(invalid_argument(OP, "book id must be positive"));
        }

        let book = self
            .repo
            .get_by_id(id)
            .map_err(|err| storage_error(OP, err))?
            .ok_or_else(|| not_found(OP, format!("no book with id {id}")))?;

        info!("event=catalog_get_by_id module=service status=ok id={id}");
        Ok(Outcome::new(book, "book found"))
    }

    /// Fetches one record by exact ISBN.
    pub fn get_book_by_isbn(&self, isbn: &str) -> CatalogResult<Book> {
        const OP: &str = "get_by_isbn";
        debug!("event=catalog_get_by_isbn module=service status=start");

        if isbn.trim().is_empty() {
            return Err(invalid_argument(OP, "isbn must not be blank"));
        }

        let book = self
            .repo
            .get_by_isbn(isbn)
            .map_err(|err| storage_error(OP, err))?
            .ok_or_else(|| not_found(OP, format!("no book with isbn `{isbn}`")))?;

        info!(
            "event=catalog_get_by_isbn module=service status=ok id={}",
            book.id
        );
        Ok(Outcome::new(book, "book found"))
    }

    /// Lists the whole catalog, ordered by title.
    pub fn list_all_books(&self) -> CatalogResult<Vec<Book>> {
        const OP: &str = "list_all";
        debug!("event=catalog_list_all module=service status=start");

        let books = self
            .repo
            .get_all()
            .map_err(|err| storage_error(OP, err))?;

        info!(
            "event=catalog_list_all module=service status=ok count={}",
            books.len()
        );
        let message = if books.is_empty() {
            "no books in the catalog".to_string()
        } else {
            format!("{} in the catalog", count_noun(books.len()))
        };
        Ok(Outcome::new(books, message))
    }

    /// Lists records whose author contains `author`, case-insensitively.
    pub fn find_by_author(&self, author: &str) -> CatalogResult<Vec<Book>> {
        const OP: &str = "find_by_author";
        debug!("event=catalog_find_by_author module=service status=start");

        if author.trim().is_empty() {
            return Err(invalid_argument(OP, "author must not be blank"));
        }

        let books = self
            .repo
            .get_by_author(author)
            .map_err(|err| storage_error(OP, err))?;

        info!(
            "event=catalog_find_by_author module=service status=ok count={}",
            books.len()
        );
        let message = if books.is_empty() {
            format!("no books found for author `{author}`")
        } else {
            format!("found {} by `{author}`", count_noun(books.len()))
        };
        Ok(Outcome::new(books, message))
    }

    /// Lists records whose title, author, ISBN or category contains `term`.
    ///
    /// A blank term is not an error; it lists the whole catalog.
    pub fn search_books(&self, term: &str) -> CatalogResult<Vec<Book>> {
        const OP: &str = "search";
        debug!("event=catalog_search module=service status=start");

        if term.trim().is_empty() {
            return self.list_all_books();
        }

        let books = self
            .repo
            .search(term)
            .map_err(|err| storage_error(OP, err))?;

        info!(
            "event=catalog_search module=service status=ok count={}",
            books.len()
        );
        let message = if books.is_empty() {
            format!("no books matched `{term}`")
        } else {
            format!("found {} matching `{term}`", count_noun(books.len()))
        };
        Ok(Outcome::new(books, message))
    }

    /// Validates and rewrites one existing record in full.
    pub fn update_book(&self, book: &Book) -> CatalogResult<()> {
        const OP: &str = "update";
        debug!(
            "event=catalog_update module=service status=start id={}",
            book.id
        );

        if book.id <= 0 {
            return Err(invalid_argument(OP, "book id must be positive"));
        }
        if let Err(violations) = validate_for_write(book, (self.today)()) {
            return Err(validation_failed(OP, violations));
        }
        self.require_existing(OP, book.id)?;
        self.check_isbn_free(OP, &book.isbn, Some(book.id))?;

        let changed = self
            .repo
            .update(book)
            .map_err(|err| storage_error(OP, err))?;
        if !changed {
            return Err(persistence_failure(
                OP,
                format!("update for book id {} affected no rows", book.id),
            ));
        }

        info!("event=catalog_update module=service status=ok id={}", book.id);
        Ok(Outcome::new((), "book updated"))
    }

    /// Removes one record by id.
    pub fn delete_book(&self, id: BookId) -> CatalogResult<()> {
        const OP: &str = "delete";
        debug!("event=catalog_delete module=service status=start id={id}");

        if id <= 0 {
            return Err(invalid_argument(OP, "book id must be positive"));
        }
        let book = self.require_existing(OP, id)?;
        if let Err(violations) = validate_for_delete(&book) {
            return Err(validation_failed(OP, violations));
        }

        let removed = self
            .repo
            .delete(id)
            .map_err(|err| storage_error(OP, err))?;
        if !removed {
            return Err(persistence_failure(
                OP,
                format!("delete for book id {id} affected no rows"),
            ));
        }

        info!("event=catalog_delete module=service status=ok id={id}");
        Ok(Outcome::new((), "book deleted"))
    }

    fn require_existing(&self, op: &str, id: BookId) -> Result<Book, CatalogError> {
        self.repo
            .get_by_id(id)
            .map_err(|err| storage_error(op, err))?
            .ok_or_else(|| not_found(op, format!("no book with id {id}")))
    }

    /// Refuses the mutation when another record already holds `isbn`.
    /// Blank ISBNs never conflict; `own_id` exempts the record itself on
    /// update.
    fn check_isbn_free(
        &self,
        op: &str,
        isbn: &str,
        own_id: Option<BookId>,
    ) -> Result<(), CatalogError> {
        if isbn.trim().is_empty() {
            return Ok(());
        }
        let holder = self
            .repo
            .get_by_isbn(isbn)
            .map_err(|err| storage_error(op, err))?;
        match holder {
            Some(existing) if Some(existing.id) != own_id => {
                warn!(
                    "event=catalog_{op} module=service status=error error_code=duplicate_isbn held_by={}",
                    existing.id
                );
                Err(CatalogError::DuplicateKey {
                    isbn: isbn.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn count_noun(count: usize) -> String {
    if count == 1 {
        "1 book".to_string()
    } else {
        format!("{count} books")
    }
}

fn invalid_argument(op: &str, message: &str) -> CatalogError {
    warn!("event=catalog_{op} module=service status=error error_code=invalid_argument");
    CatalogError::InvalidArgument(message.to_string())
}

fn validation_failed(op: &str, violations: Vec<Violation>) -> CatalogError {
    warn!(
        "event=catalog_{op} module=service status=error error_code=validation violations={}",
        violations.len()
    );
    CatalogError::ValidationFailed(violations)
}

fn not_found(op: &str, message: String) -> CatalogError {
    warn!("event=catalog_{op} module=service status=error error_code=not_found");
    CatalogError::NotFound(message)
}

fn persistence_failure(op: &str, message: String) -> CatalogError {
    error!("event=catalog_{op} module=service status=error error_code=no_rows_affected");
    CatalogError::PersistenceFailure(message)
}

fn storage_error(op: &str, err: RepoError) -> CatalogError {
    match err {
        RepoError::DuplicateIsbn { isbn } => {
            warn!("event=catalog_{op} module=service status=error error_code=duplicate_isbn");
            CatalogError::DuplicateKey { isbn }
        }
        other => {
            error!(
                "event=catalog_{op} module=service status=error error_code=storage error={other}"
            );
            CatalogError::Storage(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::count_noun;

    #[test]
    fn count_noun_handles_singular_and_plural() {
        assert_eq!(count_noun(0), "0 books");
        assert_eq!(count_noun(1), "1 book");
        assert_eq!(count_noun(2), "2 books");
    }
}
