//! Delete protocol: release every linked author, then remove links and book.

use folio_catalog::types::{Author, Book};
use folio_db::{
    conditional_decrement, delete_book, delete_links_for_book, get_author_by_hash, get_book,
    linked_author_hashes,
};

use crate::error::ReconcileError;
use crate::reconciler::Reconciler;

/// A removed book and its former authors with their reduced counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedBook {
    pub book: Book,
    pub released_authors: Vec<Author>,
}

impl Reconciler<'_> {
    /// Delete a book by id, taking one book away from each of its authors.
    pub fn delete(&self, id: i64) -> Result<DeletedBook, ReconcileError> {
        let deleted = self.write(|conn| {
            let book = get_book(conn, id)?.ok_or_else(|| ReconcileError::not_found("book", id))?;

            let author_hashes = linked_author_hashes(conn, id)?;
            conditional_decrement(conn, &author_hashes)?;
            log::debug!("Released {} author(s) from book {}", author_hashes.len(), id);

            let unlinked = delete_links_for_book(conn, &book.hash)?;
            log::debug!("Removed {} link(s) for book {}", unlinked, id);
            delete_book(conn, id)?;

            let mut released_authors = Vec::with_capacity(author_hashes.len());
            for hash in &author_hashes {
                if let Some(author) = get_author_by_hash(conn, hash)? {
                    released_authors.push(author);
                }
            }
            Ok(DeletedBook {
                book,
                released_authors,
            })
        })?;

        log::info!("Deleted book {} '{}'", deleted.book.id, deleted.book.title);
        Ok(deleted)
    }
}
