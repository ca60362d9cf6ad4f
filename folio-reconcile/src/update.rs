//! Update protocol: read the current state, diff the author lists, adjust
//! counts for added and dropped authors, then rewrite the book and its links.

use folio_catalog::types::{Author, Book, BookPatch, CatalogEntry};
use folio_catalog::{content_key, diff_names, key_names, validate_entry};
use folio_db::{
    authors_for_book, conditional_decrement, delete_links_for_book, get_entry, insert_links,
    update_book, upsert_and_increment,
};

use crate::error::ReconcileError;
use crate::reconciler::Reconciler;

/// A book and its authors as they stood before an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreImage {
    pub book: Book,
    pub authors: Vec<Author>,
}

impl PreImage {
    pub fn author_names(&self) -> Vec<String> {
        self.authors.iter().map(|a| a.name.clone()).collect()
    }
}

impl Reconciler<'_> {
    /// Read the current state of a book under the read deadline.
    pub fn read_pre_image(&self, id: i64) -> Result<PreImage, ReconcileError> {
        self.read(|conn| {
            let entry = get_entry(conn, id)?.ok_or_else(|| ReconcileError::not_found("book", id))?;
            Ok(PreImage {
                book: entry.book,
                authors: entry.authors,
            })
        })
    }

    /// Apply `patch` on top of `pre` in one write transaction.
    ///
    /// Fails with `EditConflict` if the book moved past `pre.book.version`
    /// or a dropped author's count is no longer there to take.
    pub fn apply_update(
        &self,
        pre: &PreImage,
        patch: &BookPatch,
    ) -> Result<CatalogEntry, ReconcileError> {
        let old_names = pre.author_names();
        let merged = patch.merge_over(&pre.book, &old_names);
        validate_entry(&merged)?;

        let book_hash = content_key(&merged.book.title);
        let new_authors = key_names(&merged.authors);
        let new_names: Vec<String> = new_authors.iter().map(|a| a.name.clone()).collect();
        let diff = diff_names(&old_names, &new_names);

        let added: Vec<_> = new_authors
            .iter()
            .filter(|a| diff.exclusive_new.contains(&a.name))
            .cloned()
            .collect();
        let dropped: Vec<String> = pre
            .authors
            .iter()
            .filter(|a| diff.exclusive_old.contains(&a.name))
            .map(|a| a.hash.clone())
            .collect();
        let author_hashes: Vec<String> = new_authors.iter().map(|a| a.hash.clone()).collect();

        log::debug!(
            "Book {}: {} common, {} added, {} dropped author(s)",
            pre.book.id,
            diff.common.len(),
            added.len(),
            dropped.len()
        );

        let updated = self.write(|conn| {
            upsert_and_increment(conn, &added)?;
            conditional_decrement(conn, &dropped)?;

            let book = update_book(conn, pre.book.id, pre.book.version, &book_hash, &merged.book)
                .map_err(|e| ReconcileError::from_book_write(e, &merged.book.title))?;
            log::debug!("Book {} now at version {}", book.id, book.version);

            delete_links_for_book(conn, &book.hash)?;
            insert_links(conn, &book.hash, &author_hashes)?;

            let authors = authors_for_book(conn, &book.hash)?;
            Ok(CatalogEntry { book, authors })
        })?;

        log::info!(
            "Updated book {} '{}' to version {}",
            updated.book.id,
            updated.book.title,
            updated.book.version
        );
        Ok(updated)
    }

    /// Read the pre-image and apply `patch` to it.
    pub fn update(&self, id: i64, patch: &BookPatch) -> Result<CatalogEntry, ReconcileError> {
        let pre = self.read_pre_image(id)?;
        self.apply_update(&pre, patch)
    }
}
