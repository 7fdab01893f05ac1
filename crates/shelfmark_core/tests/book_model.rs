use chrono::NaiveDate;
use shelfmark_core::Book;

#[test]
fn book_new_sets_defaults() {
    let book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);

    assert_eq!(book.id, 0);
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.isbn, "9780441013593");
    assert_eq!(book.publication_year, Some(1965));
    assert_eq!(book.publisher, None);
    assert_eq!(book.price, None);
    assert_eq!(book.quantity, 0);
    assert_eq!(book.acquired_on, None);
    assert_eq!(book.description, None);
    assert_eq!(book.category, None);
}

#[test]
fn stock_check_depends_on_quantity() {
    let mut book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    assert!(!book.is_in_stock());

    book.quantity = 3;
    assert!(book.is_in_stock());

    book.quantity = -1;
    assert!(!book.is_in_stock());
}

#[test]
fn age_in_years_clamps_to_zero() {
    let book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    assert_eq!(book.age_in_years(2025), 60);
    assert_eq!(book.age_in_years(1965), 0);
    assert_eq!(book.age_in_years(1900), 0);

    let mut unknown = book.clone();
    unknown.publication_year = None;
    assert_eq!(unknown.age_in_years(2025), 0);
}

#[test]
fn summary_is_a_single_line() {
    let mut book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    book.id = 7;

    let summary = book.summary();
    assert_eq!(summary, "id 7: Dune by Frank Herbert (isbn 9780441013593)");
    assert!(!summary.contains('\n'));
}

#[test]
fn detail_view_marks_unset_fields_as_not_recorded() {
    let mut book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    book.id = 7;

    let detail = book.to_string();
    assert!(detail.contains("title:            Dune"));
    assert!(detail.contains("publisher:        not recorded"));
    assert!(detail.contains("price:            not recorded"));
    assert!(detail.contains("acquired on:      not recorded"));
    assert!(detail.contains("category:         not recorded"));
    assert!(detail.contains("description:      not recorded"));
}

#[test]
fn detail_view_formats_price_and_date() {
    let mut book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    book.price = Some(12.5);
    book.acquired_on = NaiveDate::from_ymd_opt(2024, 3, 15);

    let detail = book.to_string();
    assert!(detail.contains("price:            12.50"));
    assert!(detail.contains("acquired on:      2024-03-15"));
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let mut book = Book::new("Dune", "Frank Herbert", "9780441013593", 1965);
    book.id = 7;
    book.publisher = Some("Chilton Books".to_string());
    book.price = Some(4.95);
    book.quantity = 2;
    book.acquired_on = NaiveDate::from_ymd_opt(2024, 3, 15);
    book.category = Some("science fiction".to_string());

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "Dune");
    assert_eq!(json["author"], "Frank Herbert");
    assert_eq!(json["isbn"], "9780441013593");
    assert_eq!(json["publication_year"], 1965);
    assert_eq!(json["publisher"], "Chilton Books");
    assert_eq!(json["price"], 4.95);
    assert_eq!(json["quantity"], 2);
    assert_eq!(json["acquired_on"], "2024-03-15");
    assert_eq!(json["category"], "science fiction");
    assert_eq!(json["description"], serde_json::Value::Null);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}
