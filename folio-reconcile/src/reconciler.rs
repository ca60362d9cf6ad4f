//! The reconciler: entry point for every catalog mutation and lookup.

use folio_catalog::types::{AuthorEntry, CatalogEntry};
use folio_db::{Connection, get_author_entry, get_entry};

use crate::boundary::{PhaseDeadlines, run_read, run_write};
use crate::error::ReconcileError;

/// Drives the create, update and delete protocols against one connection.
///
/// Holds no cached catalog state; every call re-reads what it needs. Use one
/// `Reconciler` (and one connection) per worker thread.
pub struct Reconciler<'c> {
    conn: &'c Connection,
    deadlines: PhaseDeadlines,
}

impl<'c> Reconciler<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self::with_deadlines(conn, PhaseDeadlines::default())
    }

    pub fn with_deadlines(conn: &'c Connection, deadlines: PhaseDeadlines) -> Self {
        Self { conn, deadlines }
    }

    pub fn deadlines(&self) -> PhaseDeadlines {
        self.deadlines
    }

    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, ReconcileError>,
    ) -> Result<T, ReconcileError> {
        run_read(self.conn, self.deadlines.read, f)
    }

    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, ReconcileError>,
    ) -> Result<T, ReconcileError> {
        run_write(self.conn, self.deadlines.write, f)
    }

    /// A book with its authors in credit order.
    pub fn fetch_book(&self, id: i64) -> Result<CatalogEntry, ReconcileError> {
        self.read(|conn| get_entry(conn, id)?.ok_or_else(|| ReconcileError::not_found("book", id)))
    }

    /// An author with every book credited to them.
    pub fn fetch_author(&self, id: i64) -> Result<AuthorEntry, ReconcileError> {
        self.read(|conn| {
            get_author_entry(conn, id)?.ok_or_else(|| ReconcileError::not_found("author", id))
        })
    }
}
