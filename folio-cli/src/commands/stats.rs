use std::path::Path;

use owo_colors::OwoColorize;

use crate::CliError;
use crate::logging::LOG_STREAM;

use super::open_catalog;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'folio book add' to create one.");
        return Ok(());
    }

    let conn = open_catalog(db_path)?;
    let stats = folio_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(LOG_STREAM, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Books:    {:>8}", stats.books);
    log::info!("  Authors:  {:>8}", stats.authors);
    log::info!("  Links:    {:>8}", stats.links);

    Ok(())
}

/// Compare every author's stored count with their links. Drift is an error.
pub(crate) fn run_audit(db_path: &Path) -> Result<(), CliError> {
    let conn = open_catalog(db_path)?;
    let drift = folio_db::count_drift(&conn)
        .map_err(|e| CliError::database(format!("Failed to audit book counts: {}", e)))?;

    if drift.is_empty() {
        log::info!(
            "{}",
            "All author book counts match their links".if_supports_color(LOG_STREAM, |t| t.green()),
        );
        return Ok(());
    }

    log::warn!(
        "{}",
        "Book count drift detected".if_supports_color(LOG_STREAM, |t| t.red()),
    );
    for d in &drift {
        log::warn!(
            "  {:<32} stored {:>5}  linked {:>5}  ({})",
            d.name,
            d.books_authored,
            d.linked_books,
            d.author_hash.if_supports_color(LOG_STREAM, |t| t.dimmed()),
        );
    }
    Err(CliError::Drift(drift.len()))
}
