use std::path::{Path, PathBuf};

use folio_catalog::types::{BookEntry, BookPatch};
use folio_reconcile::{PhaseDeadlines, Reconciler};

use crate::CliError;

use super::{open_catalog, print_envelope, read_json_input};

pub(crate) fn run_book_add(
    db_path: &Path,
    deadlines: PhaseDeadlines,
    file: Option<PathBuf>,
) -> Result<(), CliError> {
    let entry: BookEntry = read_json_input(file.as_ref())?;
    let conn = open_catalog(db_path)?;
    let created = Reconciler::with_deadlines(&conn, deadlines).create(&entry)?;
    print_envelope("entry created!", &created)
}

pub(crate) fn run_book_show(
    db_path: &Path,
    deadlines: PhaseDeadlines,
    id: i64,
) -> Result<(), CliError> {
    let conn = open_catalog(db_path)?;
    let entry = Reconciler::with_deadlines(&conn, deadlines).fetch_book(id)?;
    print_envelope("entry found", &entry)
}

pub(crate) fn run_book_update(
    db_path: &Path,
    deadlines: PhaseDeadlines,
    id: i64,
    file: Option<PathBuf>,
) -> Result<(), CliError> {
    let patch: BookPatch = read_json_input(file.as_ref())?;
    let conn = open_catalog(db_path)?;
    let updated = Reconciler::with_deadlines(&conn, deadlines).update(id, &patch)?;
    print_envelope("successfully updated", &updated)
}

pub(crate) fn run_book_delete(
    db_path: &Path,
    deadlines: PhaseDeadlines,
    id: i64,
) -> Result<(), CliError> {
    let conn = open_catalog(db_path)?;
    let deleted = Reconciler::with_deadlines(&conn, deadlines).delete(id)?;
    for author in &deleted.released_authors {
        log::debug!("{} now has {} book(s)", author.name, author.books_authored);
    }
    print_envelope("entry deleted successfully", &deleted.book)
}
