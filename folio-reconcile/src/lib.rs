//! Reconciliation of books, authors and their links.
//!
//! Every mutation runs as one SQLite transaction that keeps an author's
//! `books_authored` equal to the number of books linked to them. Failures
//! roll the whole transaction back; nothing is retried here.

pub mod boundary;
mod create;
mod delete;
pub mod error;
mod reconciler;
mod update;

pub use boundary::{DeadlineGuard, Phase, PhaseDeadlines, WriteTransaction, run_read, run_write};
pub use delete::DeletedBook;
pub use error::{ErrorKind, ReconcileError};
pub use reconciler::Reconciler;
pub use update::PreImage;
