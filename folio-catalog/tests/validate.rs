use folio_catalog::{BookEntry, NewBook, validate_entry, validate_entry_at};

const YEAR: i32 = 2024;

fn entry() -> BookEntry {
    BookEntry {
        book: NewBook {
            title: "Dune".to_string(),
            publisher: "Chilton Books".to_string(),
            year: 1965,
            page_count: 412,
            genres: vec!["science fiction".to_string()],
        },
        authors: vec!["FRANK HERBERT".to_string()],
    }
}

#[test]
fn valid_entry_passes() {
    assert!(validate_entry_at(&entry(), YEAR).is_ok());
    assert!(validate_entry(&entry()).is_ok());
}

#[test]
fn empty_title_is_rejected() {
    let mut e = entry();
    e.book.title.clear();
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.get("title"), Some("title field must be provided"));
}

#[test]
fn oversized_title_and_publisher() {
    let mut e = entry();
    e.book.title = "x".repeat(301);
    e.book.publisher = "y".repeat(301);
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert!(err.get("title").is_some());
    assert!(err.get("publisher").is_some());
}

#[test]
fn year_bounds() {
    let mut e = entry();
    e.book.year = YEAR + 1;
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.get("year"), Some("year field must not be set in the future"));

    e.book.year = 1899;
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.get("year"), Some("year field must not be set before 1900"));

    e.book.year = YEAR;
    assert!(validate_entry_at(&e, YEAR).is_ok());
}

#[test]
fn missing_year_reports_first_message_only() {
    let mut e = entry();
    e.book.year = 0;
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.get("year"), Some("year field must be provided"));
}

#[test]
fn page_count_bounds() {
    let mut e = entry();
    e.book.page_count = 10_001;
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("page_count").is_some());
    e.book.page_count = -3;
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("page_count").is_some());
    e.book.page_count = 10_000;
    assert!(validate_entry_at(&e, YEAR).is_ok());
}

#[test]
fn genre_count_bounds() {
    let mut e = entry();
    e.book.genres.clear();
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("genres").is_some());
    e.book.genres = (0..6).map(|i| format!("g{i}")).collect();
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("genres").is_some());
}

#[test]
fn author_checks_wait_for_book_fields() {
    let mut e = entry();
    e.book.title.clear();
    e.authors.clear();
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn author_list_size() {
    let mut e = entry();
    e.authors.clear();
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(
        err.get("authors"),
        Some("authors field must contain at least 1 authors")
    );

    e.authors = (0..6).map(|i| format!("AUTHOR {i}")).collect();
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("authors").is_some());
}

#[test]
fn author_items() {
    let mut e = entry();
    e.authors.push(String::new());
    let err = validate_entry_at(&e, YEAR).unwrap_err();
    assert_eq!(err.get("author_items"), Some("author_items field must be provided"));

    let mut e = entry();
    e.authors.push("n".repeat(101));
    assert!(validate_entry_at(&e, YEAR).unwrap_err().get("author_items").is_some());
}

#[test]
fn display_lists_every_field() {
    let mut e = entry();
    e.book.title.clear();
    e.book.publisher.clear();
    let msg = validate_entry_at(&e, YEAR).unwrap_err().to_string();
    assert!(msg.contains("publisher: publisher field must be provided"));
    assert!(msg.contains("title: title field must be provided"));
}
