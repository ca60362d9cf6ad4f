//! Read queries for the catalog database.
//!
//! Provides book and author lookups, link resolution, row counts, and the
//! reference-count audit.

use folio_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::operations::{BOOK_COLUMNS, OperationError, row_to_book};

fn row_to_author(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        hash: row.get(2)?,
        books_authored: row.get(3)?,
    })
}

// ── Book Lookups ────────────────────────────────────────────────────────────

/// Find a book by its numeric id.
pub fn get_book(conn: &Connection, id: i64) -> Result<Option<Book>, OperationError> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_book)
        .optional()
        .map_err(Into::into)
}

/// Find a book by its title hash.
pub fn get_book_by_hash(conn: &Connection, hash: &str) -> Result<Option<Book>, OperationError> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_hash = ?1");
    conn.query_row(&sql, params![hash], row_to_book)
        .optional()
        .map_err(Into::into)
}

/// Authors credited on a book, in the order they were linked.
pub fn authors_for_book(conn: &Connection, book_hash: &str) -> Result<Vec<Author>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.author_hash, a.books_authored
         FROM book_author_link l
         JOIN authors a ON a.author_hash = l.author_hash
         WHERE l.book_hash = ?1
         ORDER BY l.rowid",
    )?;
    let rows = stmt.query_map(params![book_hash], row_to_author)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every author hash linked to the book with the given id.
///
/// Returns an empty list both for an unknown id and for a book without
/// links; callers that care must check the book row separately.
pub fn linked_author_hashes(conn: &Connection, book_id: i64) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT l.author_hash
         FROM books b
         JOIN book_author_link l ON l.book_hash = b.book_hash
         WHERE b.id = ?1
         ORDER BY l.rowid",
    )?;
    let rows = stmt.query_map(params![book_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A book with its authors, or `None` if the id is unknown.
pub fn get_entry(conn: &Connection, id: i64) -> Result<Option<CatalogEntry>, OperationError> {
    let Some(book) = get_book(conn, id)? else {
        return Ok(None);
    };
    let authors = authors_for_book(conn, &book.hash)?;
    Ok(Some(CatalogEntry { book, authors }))
}

// ── Author Lookups ──────────────────────────────────────────────────────────

/// Find an author by numeric id.
pub fn get_author(conn: &Connection, id: i64) -> Result<Option<Author>, OperationError> {
    conn.query_row(
        "SELECT id, name, author_hash, books_authored FROM authors WHERE id = ?1",
        params![id],
        row_to_author,
    )
    .optional()
    .map_err(Into::into)
}

/// Find an author by name hash.
pub fn get_author_by_hash(conn: &Connection, hash: &str) -> Result<Option<Author>, OperationError> {
    conn.query_row(
        "SELECT id, name, author_hash, books_authored FROM authors WHERE author_hash = ?1",
        params![hash],
        row_to_author,
    )
    .optional()
    .map_err(Into::into)
}

/// Books linked to an author hash, ordered by title.
pub fn books_for_author(conn: &Connection, author_hash: &str) -> Result<Vec<Book>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.book_hash, b.title, b.publisher, b.year, b.page_count, b.genres, b.version
         FROM book_author_link l
         JOIN books b ON b.book_hash = l.book_hash
         WHERE l.author_hash = ?1
         ORDER BY b.title",
    )?;
    let rows = stmt.query_map(params![author_hash], row_to_book)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// An author with their books, or `None` if the id is unknown.
pub fn get_author_entry(conn: &Connection, id: i64) -> Result<Option<AuthorEntry>, OperationError> {
    let Some(author) = get_author(conn, id)? else {
        return Ok(None);
    };
    let books = books_for_author(conn, &author.hash)?;
    Ok(Some(AuthorEntry { author, books }))
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for the three catalog tables.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?)
    };

    Ok(CatalogStats {
        books: count("books")?,
        authors: count("authors")?,
        links: count("book_author_link")?,
    })
}

/// Authors whose stored `books_authored` differs from the number of distinct
/// books linked to them. Empty for every committed state.
pub fn count_drift(conn: &Connection) -> Result<Vec<CountDrift>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.author_hash, a.name, a.books_authored, COUNT(DISTINCT l.book_hash) AS linked
         FROM authors a
         LEFT JOIN book_author_link l ON l.author_hash = a.author_hash
         GROUP BY a.id
         HAVING a.books_authored != linked
         ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CountDrift {
            author_hash: row.get(0)?,
            name: row.get(1)?,
            books_authored: row.get(2)?,
            linked_books: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
