use std::path::Path;

use owo_colors::OwoColorize;

use crate::logging::LOG_STREAM;
use crate::settings::{DbPathSource, Settings, settings_path};

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(settings: &Settings, db_path: &Path, db_source: DbPathSource) {
    let path = settings_path();

    log::info!(
        "{}",
        "Folio Configuration".if_supports_color(LOG_STREAM, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(LOG_STREAM, |t| t.cyan()),
            "(exists)".if_supports_color(LOG_STREAM, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(LOG_STREAM, |t| t.cyan()),
            "(not found)".if_supports_color(LOG_STREAM, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    log::info!(
        "  Database:       {} {}",
        db_path.display(),
        format!("({db_source})").if_supports_color(LOG_STREAM, |t| t.dimmed()),
    );
    log::info!("  Read deadline:  {} ms", settings.deadlines.read_ms);
    log::info!("  Write deadline: {} ms", settings.deadlines.write_ms);
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
