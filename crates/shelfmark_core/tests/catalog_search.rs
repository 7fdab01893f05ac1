use chrono::NaiveDate;
use rusqlite::Connection;
use shelfmark_core::{open_db_in_memory, Book, CatalogService, SqliteBookRepository};

#[test]
fn blank_search_term_lists_the_whole_catalog() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    for term in ["", "   ", "\t"] {
        let outcome = service.search_books(term).unwrap();
        assert_eq!(outcome.value.len(), 3, "term {term:?}");
        assert_eq!(outcome.message, "3 books in the catalog");
    }
}

#[test]
fn search_matches_each_indexed_column() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let by_title = service.search_books("dune").unwrap();
    let titles: Vec<&str> = by_title
        .value
        .iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dune", "Hunters of Dune"]);
    assert_eq!(by_title.message, "found 2 books matching `dune`");

    let by_author = service.search_books("tolkien").unwrap();
    assert_eq!(by_author.value.len(), 1);
    assert_eq!(by_author.value[0].title, "The Hobbit");

    let by_isbn = service.search_books("0306406152").unwrap();
    assert_eq!(by_isbn.value.len(), 1);
    assert_eq!(by_isbn.value[0].title, "Hunters of Dune");

    let by_category = service.search_books("fantasy").unwrap();
    assert_eq!(by_category.value.len(), 1);
    assert_eq!(by_category.value[0].title, "The Hobbit");
}

#[test]
fn search_without_matches_reports_the_term() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service.search_books("poetry").unwrap();
    assert!(outcome.value.is_empty());
    assert_eq!(outcome.message, "no books matched `poetry`");
}

#[test]
fn author_listing_matches_substrings_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service.find_by_author("HERBERT").unwrap();
    let titles: Vec<&str> = outcome
        .value
        .iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dune", "Hunters of Dune"]);
    assert_eq!(outcome.message, "found 2 books by `HERBERT`");

    let single = service.find_by_author("tolkien").unwrap();
    assert_eq!(single.value.len(), 1);
    assert_eq!(single.message, "found 1 book by `tolkien`");
}

#[test]
fn author_listing_without_matches_reports_the_author() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service.find_by_author("nobody").unwrap();
    assert!(outcome.value.is_empty());
    assert_eq!(outcome.message, "no books found for author `nobody`");
}

fn seeded_service(conn: &Connection) -> CatalogService<SqliteBookRepository<'_>> {
    let repo = SqliteBookRepository::try_new(conn).unwrap();
    let service = CatalogService::with_clock(repo, fixed_today);

    let mut dune = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    dune.category = Some("science fiction".to_string());
    service.create_book(&dune).unwrap();

    let mut hobbit = Book::new("The Hobbit", "J. R. R. Tolkien", "9780261103344", 1937);
    hobbit.category = Some("fantasy".to_string());
    service.create_book(&hobbit).unwrap();

    let hunters = Book::new("Hunters of Dune", "Brian Herbert", "0306406152", 2006);
    service.create_book(&hunters).unwrap();

    service
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}
