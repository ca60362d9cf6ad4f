use std::path::Path;

use folio_reconcile::{PhaseDeadlines, Reconciler};

use crate::CliError;

use super::{open_catalog, print_envelope};

pub(crate) fn run_author_show(
    db_path: &Path,
    deadlines: PhaseDeadlines,
    id: i64,
) -> Result<(), CliError> {
    let conn = open_catalog(db_path)?;
    let entry = Reconciler::with_deadlines(&conn, deadlines).fetch_author(id)?;
    print_envelope("found entry!", &entry)
}
