//! Interactive text menu over the catalog service.
//!
//! # Responsibility
//! - Render the numbered menu and dispatch each choice to one service call.
//! - Collect form input line by line; blank optional fields stay unset.
//! - Print every validation violation, not just the first.
//!
//! # Invariants
//! - The menu never talks to storage directly; everything goes through
//!   `CatalogService`.
//! - End of input (Ctrl-D) anywhere exits the loop cleanly.

use chrono::NaiveDate;
use shelfmark_core::{Book, BookId, BookRepository, CatalogError, CatalogService, Outcome};
use std::io::{self, Write};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Runs the menu loop until the operator quits or input ends.
pub fn run<R: BookRepository>(service: &CatalogService<R>) {
    loop {
        print_menu();
        let Some(choice) = read_line("choice> ") else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => add_book(service),
            "2" => list_all(service),
            "3" => find_by_id(service),
            "4" => find_by_isbn(service),
            "5" => list_by_author(service),
            "6" => search(service),
            "7" => update_book(service),
            "8" => delete_book(service),
            "0" => break,
            "" => Some(()),
            other => {
                println!("unknown option `{other}`; pick 0-8");
                Some(())
            }
        };

        if outcome.is_none() {
            break;
        }
        println!();
    }
}

fn print_menu() {
    println!();
    println!("==== shelfmark catalog ====");
    println!(" 1) add a book");
    println!(" 2) list all books");
    println!(" 3) find a book by id");
    println!(" 4) find a book by isbn");
    println!(" 5) list books by author");
    println!(" 6) search the catalog");
    println!(" 7) update a book");
    println!(" 8) delete a book");
    println!(" 0) quit");
}

fn add_book<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    println!("enter the new book; optional fields may stay blank.");
    let title = read_line("title: ")?;
    let author = read_line("author: ")?;
    let isbn = read_line("isbn: ")?;
    let publication_year = prompt_optional_number::<i32>("publication year: ")?;
    let publisher = prompt_optional_text("publisher: ")?;
    let price = prompt_optional_number::<f64>("price: ")?;
    let quantity = prompt_optional_number::<i64>("quantity [0]: ")?.unwrap_or(0);
    let acquired_on = prompt_optional_date("acquired on (YYYY-MM-DD): ")?;
    let category = prompt_optional_text("category: ")?;
    let description = prompt_optional_text("description: ")?;

    let book = Book {
        id: 0,
        title,
        author,
        isbn,
        publication_year,
        publisher,
        price,
        quantity,
        acquired_on,
        description,
        category,
    };

    match service.create_book(&book) {
        Ok(outcome) => println!("{}", outcome.message),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn list_all<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    match service.list_all_books() {
        Ok(outcome) => render_books(&outcome),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn find_by_id<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let id = match prompt_optional_number::<BookId>("book id: ")? {
        Some(id) => id,
        None => return Some(()),
    };

    match service.get_book_by_id(id) {
        Ok(outcome) => {
            println!("{}", outcome.message);
            println!("{}", outcome.value);
        }
        Err(err) => render_error(&err),
    }
    Some(())
}

fn find_by_isbn<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let isbn = read_line("isbn: ")?;

    match service.get_book_by_isbn(&isbn) {
        Ok(outcome) => {
            println!("{}", outcome.message);
            println!("{}", outcome.value);
        }
        Err(err) => render_error(&err),
    }
    Some(())
}

fn list_by_author<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let author = read_line("author: ")?;

    match service.find_by_author(&author) {
        Ok(outcome) => render_books(&outcome),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn search<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let term = read_line("search term (blank lists everything): ")?;

    match service.search_books(&term) {
        Ok(outcome) => render_books(&outcome),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn update_book<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let id = match prompt_optional_number::<BookId>("book id to update: ")? {
        Some(id) => id,
        None => return Some(()),
    };

    let current = match service.get_book_by_id(id) {
        Ok(outcome) => outcome.value,
        Err(err) => {
            render_error(&err);
            return Some(());
        }
    };

    println!("current record:");
    println!("{current}");
    println!("press enter to keep a value.");

    let mut book = current.clone();
    book.title = keep_or_replace("title", &current.title)?;
    book.author = keep_or_replace("author", &current.author)?;
    book.isbn = keep_or_replace("isbn", &current.isbn)?;
    if let Some(year) = prompt_optional_number::<i32>("publication year: ")? {
        book.publication_year = Some(year);
    }
    if let Some(publisher) = prompt_optional_text("publisher: ")? {
        book.publisher = Some(publisher);
    }
    if let Some(price) = prompt_optional_number::<f64>("price: ")? {
        book.price = Some(price);
    }
    if let Some(quantity) = prompt_optional_number::<i64>("quantity: ")? {
        book.quantity = quantity;
    }
    if let Some(date) = prompt_optional_date("acquired on (YYYY-MM-DD): ")? {
        book.acquired_on = Some(date);
    }
    if let Some(category) = prompt_optional_text("category: ")? {
        book.category = Some(category);
    }
    if let Some(description) = prompt_optional_text("description: ")? {
        book.description = Some(description);
    }

    match service.update_book(&book) {
        Ok(outcome) => println!("{}", outcome.message),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn delete_book<R: BookRepository>(service: &CatalogService<R>) -> Option<()> {
    let id = match prompt_optional_number::<BookId>("book id to delete: ")? {
        Some(id) => id,
        None => return Some(()),
    };

    let book = match service.get_book_by_id(id) {
        Ok(outcome) => outcome.value,
        Err(err) => {
            render_error(&err);
            return Some(());
        }
    };

    let answer = read_line(&format!("delete `{}`? [y/N]: ", book.summary()))?;
    if !answer.eq_ignore_ascii_case("y") {
        println!("kept.");
        return Some(());
    }

    match service.delete_book(id) {
        Ok(outcome) => println!("{}", outcome.message),
        Err(err) => render_error(&err),
    }
    Some(())
}

fn render_books(outcome: &Outcome<Vec<Book>>) {
    println!("{}", outcome.message);
    for book in &outcome.value {
        println!("  {}", book.summary());
    }
}

fn render_error(err: &CatalogError) {
    match err {
        CatalogError::ValidationFailed(violations) => {
            println!("the record was not accepted:");
            for violation in violations {
                println!("  - {violation}");
            }
        }
        other => println!("error: {other}"),
    }
}

/// Reads one trimmed line; `None` when input is exhausted or unreadable.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut buffer = String::new();
    match io::stdin().read_line(&mut buffer) {
        Ok(0) => None,
        Ok(_) => Some(buffer.trim().to_string()),
        Err(_) => None,
    }
}

/// Re-prompts until the line parses or stays blank. Blank means "no value".
fn prompt_optional_number<T: FromStr>(label: &str) -> Option<Option<T>> {
    loop {
        let line = read_line(label)?;
        if line.is_empty() {
            return Some(None);
        }
        match line.parse::<T>() {
            Ok(value) => return Some(Some(value)),
            Err(_) => println!("please enter a number or leave blank."),
        }
    }
}

fn prompt_optional_text(label: &str) -> Option<Option<String>> {
    let line = read_line(label)?;
    if line.is_empty() {
        Some(None)
    } else {
        Some(Some(line))
    }
}

fn prompt_optional_date(label: &str) -> Option<Option<NaiveDate>> {
    loop {
        let line = read_line(label)?;
        if line.is_empty() {
            return Some(None);
        }
        match NaiveDate::parse_from_str(&line, DATE_FORMAT) {
            Ok(date) => return Some(Some(date)),
            Err(_) => println!("please use the YYYY-MM-DD format or leave blank."),
        }
    }
}

fn keep_or_replace(label: &str, current: &str) -> Option<String> {
    let line = read_line(&format!("{label} [{current}]: "))?;
    if line.is_empty() {
        Some(current.to_string())
    } else {
        Some(line)
    }
}
