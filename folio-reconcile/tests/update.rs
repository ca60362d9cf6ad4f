use folio_catalog::KeyedName;
use folio_catalog::types::*;
use folio_db::*;
use folio_reconcile::*;

fn entry(title: &str, authors: &[&str]) -> BookEntry {
    BookEntry {
        book: NewBook {
            title: title.to_string(),
            publisher: "Gollancz".to_string(),
            year: 1990,
            page_count: 288,
            genres: vec!["fantasy".to_string(), "comedy".to_string()],
        },
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

fn authors_patch(authors: &[&str]) -> BookPatch {
    BookPatch {
        book: BookFieldsPatch::default(),
        authors: Some(authors.iter().map(|a| a.to_string()).collect()),
    }
}

fn count(conn: &Connection, name: &str) -> Option<i32> {
    get_author_by_hash(conn, &KeyedName::new(name).hash)
        .unwrap()
        .map(|a| a.books_authored)
}

fn links_for(conn: &Connection, book_hash: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM book_author_link WHERE book_hash = ?1",
        [book_hash],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn removing_an_author_decrements_only_that_author() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A", "B"])).unwrap();

    let updated = r.update(created.book.id, &authors_patch(&["A"])).unwrap();
    assert_eq!(updated.book.version, 2);
    assert_eq!(updated.authors.len(), 1);
    assert_eq!(updated.authors[0].name, "A");
    assert_eq!(count(&conn, "A"), Some(1));
    assert_eq!(count(&conn, "B"), Some(0));
    assert_eq!(links_for(&conn, &updated.book.hash), 1);
    assert!(count_drift(&conn).unwrap().is_empty());
}

#[test]
fn swapping_authors_credits_and_releases() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A", "B"])).unwrap();

    let updated = r.update(created.book.id, &authors_patch(&["c", "a"])).unwrap();
    assert_eq!(
        updated.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["C", "A"]
    );
    assert_eq!(count(&conn, "A"), Some(1));
    assert_eq!(count(&conn, "B"), Some(0));
    assert_eq!(count(&conn, "C"), Some(1));
    assert!(count_drift(&conn).unwrap().is_empty());
}

#[test]
fn fields_only_patch_keeps_authors() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A", "B"])).unwrap();

    let patch = BookPatch {
        book: BookFieldsPatch {
            page_count: Some(400),
            ..Default::default()
        },
        authors: None,
    };
    let updated = r.update(created.book.id, &patch).unwrap();
    assert_eq!(updated.book.page_count, 400);
    assert_eq!(updated.book.publisher, "Gollancz");
    assert_eq!(updated.authors.len(), 2);
    assert_eq!(count(&conn, "A"), Some(1));
    assert_eq!(count(&conn, "B"), Some(1));
}

#[test]
fn title_change_rehashes_and_keeps_links() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A"])).unwrap();

    let patch = BookPatch {
        book: BookFieldsPatch {
            title: Some("Good Omens: The Nice and Accurate Prophecies".to_string()),
            ..Default::default()
        },
        authors: None,
    };
    let updated = r.update(created.book.id, &patch).unwrap();

    assert_eq!(updated.book.id, created.book.id);
    assert_ne!(updated.book.hash, created.book.hash);
    assert_eq!(links_for(&conn, &created.book.hash), 0);
    assert_eq!(links_for(&conn, &updated.book.hash), 1);
    assert_eq!(count(&conn, "A"), Some(1));
}

#[test]
fn stale_pre_image_is_an_edit_conflict() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A", "B"])).unwrap();

    let first = r.read_pre_image(created.book.id).unwrap();
    let second = r.read_pre_image(created.book.id).unwrap();

    r.apply_update(&first, &authors_patch(&["A"])).unwrap();
    let err = r.apply_update(&second, &authors_patch(&["A", "C"])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EditConflict);
    assert!(err.is_retryable());
    assert_eq!(count(&conn, "C"), None);
    assert_eq!(r.fetch_book(created.book.id).unwrap().book.version, 2);
    assert!(count_drift(&conn).unwrap().is_empty());
}

#[test]
fn update_of_missing_book_is_not_found() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let err = r.update(12, &authors_patch(&["A"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn invalid_patch_is_rejected_before_writing() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Good Omens", &["A"])).unwrap();

    let err = r.update(created.book.id, &authors_patch(&[])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(r.fetch_book(created.book.id).unwrap().book.version, 1);
}

#[test]
fn renaming_onto_another_title_is_duplicate() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    r.create(&entry("Mort", &["A"])).unwrap();
    let created = r.create(&entry("Good Omens", &["B"])).unwrap();

    let patch = BookPatch {
        book: BookFieldsPatch {
            title: Some("Mort".to_string()),
            ..Default::default()
        },
        authors: Some(vec!["C".to_string()]),
    };
    let err = r.update(created.book.id, &patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateTitle);
    assert_eq!(count(&conn, "B"), Some(1));
    assert_eq!(count(&conn, "C"), None);
}
