use folio_catalog::KeyedName;
use folio_catalog::types::*;
use folio_db::*;
use folio_reconcile::*;

fn entry(title: &str, authors: &[&str]) -> BookEntry {
    BookEntry {
        book: NewBook {
            title: title.to_string(),
            publisher: "Gollancz".to_string(),
            year: 1987,
            page_count: 250,
            genres: vec!["fantasy".to_string()],
        },
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

fn count(conn: &Connection, name: &str) -> Option<i32> {
    get_author_by_hash(conn, &KeyedName::new(name).hash)
        .unwrap()
        .map(|a| a.books_authored)
}

fn reject_link_inserts(conn: &Connection) {
    conn.execute_batch(
        "CREATE TEMP TRIGGER reject_links BEFORE INSERT ON book_author_link
         BEGIN SELECT RAISE(ABORT, 'link insert rejected'); END;",
    )
    .unwrap();
}

#[test]
fn failed_link_rewrite_undoes_the_whole_update() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    let created = r.create(&entry("Mort", &["A", "B"])).unwrap();

    reject_link_inserts(&conn);
    let patch = BookPatch {
        book: BookFieldsPatch {
            title: Some("Reaper Man".to_string()),
            ..Default::default()
        },
        authors: Some(vec!["A".to_string(), "C".to_string()]),
    };
    let err = r.update(created.book.id, &patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(conn.is_autocommit());

    conn.execute_batch("DROP TRIGGER reject_links").unwrap();
    let after = r.fetch_book(created.book.id).unwrap();
    assert_eq!(after, created);
    assert_eq!(count(&conn, "B"), Some(1));
    assert_eq!(count(&conn, "C"), None);
    assert!(count_drift(&conn).unwrap().is_empty());
}

#[test]
fn failed_create_leaves_no_book_or_credit() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    reject_link_inserts(&conn);

    let err = r.create(&entry("Mort", &["A"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(get_book_by_hash(&conn, &folio_catalog::content_key("Mort")).unwrap().is_none());
    assert_eq!(count(&conn, "A"), None);
}

#[test]
fn store_failure_message_hides_details() {
    let conn = open_memory().unwrap();
    let r = Reconciler::new(&conn);
    reject_link_inserts(&conn);

    let err = r.create(&entry("Mort", &["A"])).unwrap_err();
    assert!(err.to_string().contains("link insert rejected"));
    assert!(!err.public_message().contains("link insert rejected"));
}
