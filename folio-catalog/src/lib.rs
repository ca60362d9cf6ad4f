//! Book catalog data model, content addressing, author-list diffing and
//! entry validation.
//!
//! This crate has no database dependency. `folio-db` persists these types and
//! `folio-reconcile` drives them through the create/update/delete protocols.

pub mod diff;
pub mod keys;
pub mod types;
pub mod validate;

pub use diff::{NameDiff, diff_names};
pub use keys::{KeyedName, content_key, key_names, normalize_author_name};
pub use types::*;
pub use validate::{ValidationErrors, Validator, validate_entry, validate_entry_at};
