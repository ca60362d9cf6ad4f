use folio_reconcile::{ErrorKind, ReconcileError};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Input that is not a well-formed entry or patch
    #[error("{0}")]
    BadInput(String),

    /// A reconciliation protocol failed
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Stored counts disagree with the link table
    #[error("{0} author(s) have a book count that does not match their links")]
    Drift(usize),
}

impl CliError {
    pub(crate) fn bad_input(msg: impl Into<String>) -> Self {
        Self::BadInput(msg.into())
    }

    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The `{"error": ...}` body shown to the user.
    ///
    /// Validation failures carry the field map; store and database failures
    /// only a generic message, with details going to the log.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Reconcile(ReconcileError::Validation(errors)) => json!({ "error": errors.0 }),
            Self::Reconcile(e) => {
                if matches!(e.kind(), ErrorKind::Store | ErrorKind::Timeout) {
                    log::error!("{e}");
                }
                json!({ "error": e.public_message() })
            }
            Self::Database(_) => {
                log::error!("{self}");
                json!({
                    "error": "the server encountered a problem and could not process your request"
                })
            }
            other => json!({ "error": other.to_string() }),
        }
    }
}

/// Describe a JSON decode failure the way a client would want to hear it.
pub(crate) fn describe_json_error(e: &serde_json::Error) -> String {
    use serde_json::error::Category;
    match e.classify() {
        Category::Eof if e.line() == 1 && e.column() == 0 => "body must not be empty".to_string(),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {} column {})",
            e.line(),
            e.column()
        ),
        Category::Data => format!("body contains incorrect JSON: {e}"),
        Category::Io => format!("failed to read body: {e}"),
    }
}
