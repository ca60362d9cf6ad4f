//! Errors surfaced by the reconciliation protocols.

use folio_catalog::ValidationErrors;
use folio_db::OperationError;
use thiserror::Error;

use crate::boundary::Phase;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Not found: {entity} with id '{id}'")]
    NotFound { entity: String, id: String },
    #[error("Edit conflict: {entity} '{id}' changed or vanished")]
    EditConflict { entity: String, id: String },
    #[error("Duplicate title: a book titled '{title}' already exists")]
    DuplicateTitle { title: String },
    #[error("Timeout: {phase} phase exceeded its deadline")]
    Timeout { phase: Phase },
    #[error("Store failure: {0}")]
    Store(OperationError),
}

/// Coarse classification of a [`ReconcileError`], for callers that map
/// outcomes to a response or an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    EditConflict,
    DuplicateTitle,
    Timeout,
    Store,
}

impl From<OperationError> for ReconcileError {
    fn from(e: OperationError) -> Self {
        match e {
            OperationError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            OperationError::EditConflict { entity_type, id } => Self::EditConflict {
                entity: entity_type,
                id,
            },
            other => Self::Store(other),
        }
    }
}

impl From<rusqlite::Error> for ReconcileError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store(OperationError::Sqlite(e))
    }
}

impl ReconcileError {
    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Map a failed book-row write, reporting a clash on the title key as
    /// `DuplicateTitle`.
    pub(crate) fn from_book_write(e: OperationError, title: &str) -> Self {
        if e.is_unique_violation("books.book_hash") {
            Self::DuplicateTitle {
                title: title.to_string(),
            }
        } else {
            e.into()
        }
    }

    /// Rewrite a store failure caused by an expired deadline or a lock held
    /// past the busy timeout as a `Timeout` for `phase`.
    pub(crate) fn in_phase(self, phase: Phase) -> Self {
        match self {
            Self::Store(ref e) if e.is_interrupted() || e.is_busy() => Self::Timeout { phase },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::EditConflict { .. } => ErrorKind::EditConflict,
            Self::DuplicateTitle { .. } => ErrorKind::DuplicateTitle,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// Whether resubmitting the same request against a fresh pre-image may
    /// succeed. Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EditConflict { .. } | Self::Timeout { .. })
    }

    /// Text safe to show an end user. Store details are never included.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::NotFound { .. } => "the requested resource could not be found".to_string(),
            Self::EditConflict { .. } => {
                "unable to update the record due to an edit conflict, please try again".to_string()
            }
            Self::DuplicateTitle { title } => {
                format!("a book with the title '{title}' already exists")
            }
            Self::Timeout { .. } | Self::Store(_) => {
                "the server encountered a problem and could not process your request".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_errors_map_to_taxonomy() {
        let e: ReconcileError = OperationError::NotFound {
            entity_type: "book".into(),
            id: "7".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::NotFound);

        let e: ReconcileError = OperationError::EditConflict {
            entity_type: "author".into(),
            id: "abc".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::EditConflict);
        assert!(e.is_retryable());
    }

    #[test]
    fn store_failures_hide_details() {
        let e: ReconcileError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(e.kind(), ErrorKind::Store);
        assert!(!e.is_retryable());
        assert!(!e.public_message().contains("Invalid"));
    }

    #[test]
    fn interrupt_becomes_timeout() {
        let failure = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_INTERRUPT),
            None,
        );
        let e = ReconcileError::from(failure).in_phase(Phase::Write);
        assert!(matches!(e, ReconcileError::Timeout { phase: Phase::Write }));
        assert!(e.is_retryable());
    }
}
