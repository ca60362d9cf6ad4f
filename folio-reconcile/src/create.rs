//! Create protocol: credit the authors, insert the book, link them.

use folio_catalog::types::{BookEntry, CatalogEntry};
use folio_catalog::{content_key, key_names, validate_entry};
use folio_db::{insert_book, insert_links, upsert_and_increment};

use crate::error::ReconcileError;
use crate::reconciler::Reconciler;

impl Reconciler<'_> {
    /// Insert a new book and credit each of its authors.
    ///
    /// Author names are normalized and collapsed so a name listed twice is
    /// credited once. Returns the stored book and its authors with their
    /// updated counts.
    pub fn create(&self, entry: &BookEntry) -> Result<CatalogEntry, ReconcileError> {
        validate_entry(entry)?;

        let book_hash = content_key(&entry.book.title);
        let authors = key_names(&entry.authors);
        let author_hashes: Vec<String> = authors.iter().map(|a| a.hash.clone()).collect();

        let created = self.write(|conn| {
            let credited = upsert_and_increment(conn, &authors)?;
            log::debug!("Credited {} author(s) for '{}'", credited.len(), entry.book.title);

            let book = insert_book(conn, &book_hash, &entry.book)
                .map_err(|e| ReconcileError::from_book_write(e, &entry.book.title))?;
            log::debug!("Inserted book {} ({})", book.id, book.hash);

            let linked = insert_links(conn, &book.hash, &author_hashes)?;
            log::debug!("Linked {} author(s) to book {}", linked, book.id);

            Ok(CatalogEntry {
                book,
                authors: credited,
            })
        })?;

        log::info!(
            "Created book {} '{}' with {} author(s)",
            created.book.id,
            created.book.title,
            created.authors.len()
        );
        Ok(created)
    }
}
