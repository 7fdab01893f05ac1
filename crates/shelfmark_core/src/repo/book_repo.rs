//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the catalog's persistence API over the `books` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Business-rule validation happens above this layer; the repository only
//!   enforces structural integrity (schema readiness, unique ISBN, well-formed
//!   persisted values).
//! - Read paths reject invalid persisted state instead of masking it.
//! - List-shaped results are ordered by title (id as tiebreak).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Rows};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKS_TABLE: &str = "books";
const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    isbn,
    publication_year,
    publisher,
    price,
    quantity,
    acquired_on,
    description,
    category
FROM books";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "title",
    "author",
    "isbn",
    "publication_year",
    "publisher",
    "price",
    "quantity",
    "acquired_on",
    "description",
    "category",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for catalog storage operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The unique ISBN constraint rejected a write.
    DuplicateIsbn { isbn: String },
    /// A persisted row holds a value the domain model cannot accept.
    InvalidData(String),
    /// The connection was not bootstrapped through `db::open_db`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateIsbn { isbn } => {
                write!(f, "a book with isbn `{isbn}` already exists")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not ready: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract consumed by the catalog service.
///
/// Substring matches (`get_by_author`, `search`) are case-insensitive and
/// treat the term literally, wildcards included.
pub trait BookRepository {
    /// Every record, ordered by title.
    fn get_all(&self) -> RepoResult<Vec<Book>>;
    /// One record by id, `None` when absent.
    fn get_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// One record by exact ISBN, `None` when absent.
    fn get_by_isbn(&self, isbn: &str) -> RepoResult<Option<Book>>;
    /// Records whose author contains `author`, ordered by title.
    fn get_by_author(&self, author: &str) -> RepoResult<Vec<Book>>;
    /// Records whose title, author, ISBN or category contains `term`,
    /// ordered by title.
    fn search(&self, term: &str) -> RepoResult<Vec<Book>>;
    /// Inserts a record and returns the newly assigned id.
    fn add(&self, book: &Book) -> RepoResult<BookId>;
    /// Rewrites the full record; `true` iff a row was changed.
    fn update(&self, book: &Book) -> RepoResult<bool>;
    /// Removes a record; `true` iff a row was removed.
    fn delete(&self, id: BookId) -> RepoResult<bool>;
}

/// SQLite-backed catalog repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository after verifying the connection is migrated
    /// and the `books` table has the full expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, BOOKS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(BOOKS_TABLE));
        }
        if let Some(column) = first_missing_column(conn)? {
            return Err(RepoError::MissingRequiredColumn {
                table: BOOKS_TABLE,
                column,
            });
        }

        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY title, id;"))?;
        let rows = stmt.query([])?;
        collect_books(rows)
    }

    fn get_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_book_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_by_isbn(&self, isbn: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE isbn = ?1;"))?;
        let mut rows = stmt.query(params![isbn])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_book_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_by_author(&self, author: &str) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE author LIKE ?1 ESCAPE '\\' ORDER BY title, id;"
        ))?;
        let rows = stmt.query(params![like_pattern(author)])?;
        collect_books(rows)
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE title LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
                OR isbn LIKE ?1 ESCAPE '\\'
                OR category LIKE ?1 ESCAPE '\\'
             ORDER BY title, id;"
        ))?;
        let rows = stmt.query(params![like_pattern(term)])?;
        collect_books(rows)
    }

    fn add(&self, book: &Book) -> RepoResult<BookId> {
        self.conn
            .execute(
                "INSERT INTO books (
                    title,
                    author,
                    isbn,
                    publication_year,
                    publisher,
                    price,
                    quantity,
                    acquired_on,
                    description,
                    category
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    book.title.as_str(),
                    book.author.as_str(),
                    isbn_to_db(&book.isbn),
                    book.publication_year,
                    book.publisher.as_deref(),
                    book.price,
                    book.quantity,
                    date_to_db(book.acquired_on),
                    book.description.as_deref(),
                    book.category.as_deref(),
                ],
            )
            .map_err(|err| map_isbn_conflict(err, &book.isbn))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, book: &Book) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE books
                 SET
                    title = ?1,
                    author = ?2,
                    isbn = ?3,
                    publication_year = ?4,
                    publisher = ?5,
                    price = ?6,
                    quantity = ?7,
                    acquired_on = ?8,
                    description = ?9,
                    category = ?10
                 WHERE id = ?11;",
                params![
                    book.title.as_str(),
                    book.author.as_str(),
                    isbn_to_db(&book.isbn),
                    book.publication_year,
                    book.publisher.as_deref(),
                    book.price,
                    book.quantity,
                    date_to_db(book.acquired_on),
                    book.description.as_deref(),
                    book.category.as_deref(),
                    book.id,
                ],
            )
            .map_err(|err| map_isbn_conflict(err, &book.isbn))?;

        Ok(changed > 0)
    }

    fn delete(&self, id: BookId) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", params![id])?;
        Ok(removed > 0)
    }
}

fn collect_books(mut rows: Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let acquired_on = match row.get::<_, Option<String>>("acquired_on")? {
        Some(text) => Some(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!("invalid date `{text}` in books.acquired_on"))
        })?),
        None => None,
    };

    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        // A NULL column is a record whose ISBN was never provided; write
        // validation flags it on the next mutation.
        isbn: row.get::<_, Option<String>>("isbn")?.unwrap_or_default(),
        publication_year: row.get("publication_year")?,
        publisher: row.get("publisher")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
        acquired_on,
        description: row.get("description")?,
        category: row.get("category")?,
    })
}

/// Blank ISBNs are stored as SQL NULL so they never collide on the unique
/// index; anything else is stored exactly as entered.
fn isbn_to_db(isbn: &str) -> Option<&str> {
    if isbn.trim().is_empty() {
        None
    } else {
        Some(isbn)
    }
}

fn date_to_db(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Escapes `%`, `_` and the escape character itself, then wraps the term in
/// wildcards for a contains-match. Pairs with `ESCAPE '\'` in the queries.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn map_isbn_conflict(err: rusqlite::Error, isbn: &str) -> RepoError {
    if is_unique_isbn_violation(&err) {
        return RepoError::DuplicateIsbn {
            isbn: isbn.to_string(),
        };
    }
    RepoError::Db(DbError::Sqlite(err))
}

fn is_unique_isbn_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("books.isbn")
        }
        _ => false,
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        params![table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn first_missing_column(conn: &Connection) -> RepoResult<Option<&'static str>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query(params![BOOKS_TABLE])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }

    Ok(REQUIRED_COLUMNS
        .iter()
        .find(|required| !present.iter().any(|name| name == *required))
        .copied())
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards_and_backslash() {
        assert_eq!(like_pattern("plain"), "%plain%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
