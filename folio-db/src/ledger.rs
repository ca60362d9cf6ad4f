//! Reference counts on author rows.
//!
//! `books_authored` is only ever moved by single conditional writes, never
//! read-then-written, so two transactions crediting the same author are
//! serialized by the database rather than racing in the application.

use folio_catalog::keys::KeyedName;
use folio_catalog::types::Author;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

/// Credit each author with one more book.
///
/// An unseen author hash is inserted with a count of 1; an existing one is
/// incremented in the same statement. Returns the resulting author rows in
/// input order.
pub fn upsert_and_increment(
    conn: &Connection,
    authors: &[KeyedName],
) -> Result<Vec<Author>, OperationError> {
    let mut stmt = conn.prepare(
        "INSERT INTO authors (author_hash, name, books_authored) VALUES (?1, ?2, 1)
         ON CONFLICT(author_hash) DO UPDATE SET books_authored = books_authored + 1
         RETURNING id, name, author_hash, books_authored",
    )?;

    let mut rows = Vec::with_capacity(authors.len());
    for author in authors {
        let row = stmt.query_row(params![author.hash, author.name], |row| {
            Ok(Author {
                id: row.get(0)?,
                name: row.get(1)?,
                hash: row.get(2)?,
                books_authored: row.get(3)?,
            })
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Take one book away from each author hash.
///
/// Every hash must name an existing author with a positive count. Anything
/// else means the row moved underneath the caller, which is reported as an
/// edit conflict so the surrounding transaction rolls back.
pub fn conditional_decrement(
    conn: &Connection,
    author_hashes: &[String],
) -> Result<(), OperationError> {
    let mut stmt = conn.prepare(
        "UPDATE authors SET books_authored = books_authored - 1
         WHERE author_hash = ?1 AND books_authored > 0",
    )?;
    for hash in author_hashes {
        if stmt.execute(params![hash])? == 0 {
            return Err(OperationError::edit_conflict("author", hash));
        }
    }
    Ok(())
}
