pub(crate) mod author;
pub(crate) mod book;
pub(crate) mod config;
pub(crate) mod stats;

use std::io::Read;
use std::path::{Path, PathBuf};

use folio_db::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CliError;
use crate::error::describe_json_error;

/// Open (creating if needed) the catalog database at `db_path`.
pub(crate) fn open_catalog(db_path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Opening catalog database at {}", db_path.display());
    folio_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Decode a JSON document from `file`, or from stdin when no file is given.
pub(crate) fn read_json_input<T: DeserializeOwned>(file: Option<&PathBuf>) -> Result<T, CliError> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };
    serde_json::from_str(&body).map_err(|e| CliError::bad_input(describe_json_error(&e)))
}

/// Print `{"message": ..., "entry": ...}` to stdout.
pub(crate) fn print_envelope<T: Serialize>(message: &str, entry: &T) -> Result<(), CliError> {
    let envelope = serde_json::json!({ "message": message, "entry": entry });
    let text = serde_json::to_string_pretty(&envelope)
        .map_err(|e| CliError::bad_input(format!("failed to encode response: {e}")))?;
    println!("{text}");
    Ok(())
}
