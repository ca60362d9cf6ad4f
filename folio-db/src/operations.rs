//! Write operations on book and link rows.

use folio_catalog::types::*;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Edit conflict: {entity_type} '{id}' changed or vanished")]
    EditConflict { entity_type: String, id: String },
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl OperationError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn edit_conflict(entity_type: &str, id: impl ToString) -> Self {
        Self::EditConflict {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    fn sqlite_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => Some(e.code),
            _ => None,
        }
    }

    /// The statement was cut short by an interrupt (an expired deadline).
    pub fn is_interrupted(&self) -> bool {
        self.sqlite_code() == Some(ErrorCode::OperationInterrupted)
    }

    /// The database stayed locked by another writer past the busy timeout.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.sqlite_code(),
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }

    /// A UNIQUE constraint on `table.column` rejected the write.
    pub fn is_unique_violation(&self, column: &str) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(e, Some(msg))) => {
                e.code == ErrorCode::ConstraintViolation
                    && msg.starts_with("UNIQUE constraint failed")
                    && msg.contains(column)
            }
            _ => false,
        }
    }
}

// ── Book Operations ─────────────────────────────────────────────────────────

pub(crate) const BOOK_COLUMNS: &str =
    "id, book_hash, title, publisher, year, page_count, genres, version";

/// Map a row selected with [`BOOK_COLUMNS`] into a `Book`.
pub(crate) fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    let genres_json: String = row.get(6)?;
    let genres = serde_json::from_str(&genres_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(Book {
        id: row.get(0)?,
        hash: row.get(1)?,
        title: row.get(2)?,
        publisher: row.get(3)?,
        year: row.get(4)?,
        page_count: row.get(5)?,
        genres,
        version: row.get(7)?,
    })
}

/// Insert a new book row under `hash`. The stored version starts at 1.
pub fn insert_book(conn: &Connection, hash: &str, book: &NewBook) -> Result<Book, OperationError> {
    let genres = serde_json::to_string(&book.genres)?;
    let sql = format!(
        "INSERT INTO books (book_hash, title, publisher, year, page_count, genres)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING {BOOK_COLUMNS}"
    );
    let inserted = conn.query_row(
        &sql,
        params![
            hash,
            book.title,
            book.publisher,
            book.year,
            book.page_count,
            genres,
        ],
        row_to_book,
    )?;
    Ok(inserted)
}

/// Overwrite a book's fields and bump its version.
///
/// The write only lands if the row still carries `expected_version`; a
/// missing row or a newer version means another writer got there first and
/// is reported as an edit conflict.
pub fn update_book(
    conn: &Connection,
    id: i64,
    expected_version: i32,
    hash: &str,
    book: &NewBook,
) -> Result<Book, OperationError> {
    let genres = serde_json::to_string(&book.genres)?;
    let sql = format!(
        "UPDATE books
         SET book_hash = ?3, title = ?4, publisher = ?5, year = ?6, page_count = ?7,
             genres = ?8, version = version + 1
         WHERE id = ?1 AND version = ?2
         RETURNING {BOOK_COLUMNS}"
    );
    let result = conn.query_row(
        &sql,
        params![
            id,
            expected_version,
            hash,
            book.title,
            book.publisher,
            book.year,
            book.page_count,
            genres,
        ],
        row_to_book,
    );
    match result {
        Ok(b) => Ok(b),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(OperationError::edit_conflict("book", id)),
        Err(e) => Err(e.into()),
    }
}

/// Delete a book row by id.
pub fn delete_book(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::not_found("book", id));
    }
    Ok(())
}

// ── Link Operations ─────────────────────────────────────────────────────────

/// Remove every link row for a book. Returns the number removed.
pub fn delete_links_for_book(conn: &Connection, book_hash: &str) -> Result<usize, OperationError> {
    let removed = conn.execute(
        "DELETE FROM book_author_link WHERE book_hash = ?1",
        params![book_hash],
    )?;
    Ok(removed)
}

/// Link a book to each author hash. Pairs that already exist are skipped.
///
/// Returns the number of rows actually inserted.
pub fn insert_links(
    conn: &Connection,
    book_hash: &str,
    author_hashes: &[String],
) -> Result<usize, OperationError> {
    let mut stmt = conn.prepare(
        "INSERT INTO book_author_link (book_hash, author_hash) VALUES (?1, ?2)
         ON CONFLICT(book_hash, author_hash) DO NOTHING",
    )?;
    let mut inserted = 0;
    for author_hash in author_hashes {
        inserted += stmt.execute(params![book_hash, author_hash])?;
    }
    Ok(inserted)
}
