//! Field-level validation of candidate entries.
//!
//! Checks run in stages: book fields first, then the size of the author list,
//! then each author name. A later stage only runs when every earlier one
//! passed, so a response never mixes book and author complaints.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use thiserror::Error;

use crate::types::BookEntry;

pub const MAX_TITLE_BYTES: usize = 300;
pub const MAX_PUBLISHER_BYTES: usize = 300;
pub const MIN_YEAR: i32 = 1900;
pub const MIN_PAGE_COUNT: i32 = 1;
pub const MAX_PAGE_COUNT: i32 = 10_000;
pub const MIN_GENRES: usize = 1;
pub const MAX_GENRES: usize = 5;
pub const MIN_AUTHORS: usize = 1;
pub const MAX_AUTHORS: usize = 5;
pub const MAX_AUTHOR_NAME_BYTES: usize = 100;

/// Field name → first failure message for that field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub BTreeMap<String, String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Accumulates field errors. Only the first message per field is kept.
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn must_be_provided(field: &str) -> String {
    format!("{field} field must be provided")
}

/// Validate an entry against the current calendar year.
pub fn validate_entry(entry: &BookEntry) -> Result<(), ValidationErrors> {
    validate_entry_at(entry, chrono::Local::now().year())
}

/// Validate an entry, treating `current_year` as the latest allowed year.
pub fn validate_entry_at(entry: &BookEntry, current_year: i32) -> Result<(), ValidationErrors> {
    let mut v = Validator::new();
    let book = &entry.book;

    let field = "title";
    v.check(!book.title.is_empty(), field, must_be_provided(field));
    v.check(
        book.title.len() <= MAX_TITLE_BYTES,
        field,
        format!("{field} field must have a length no longer than {MAX_TITLE_BYTES} bytes"),
    );

    let field = "publisher";
    v.check(!book.publisher.is_empty(), field, must_be_provided(field));
    v.check(
        book.publisher.len() <= MAX_PUBLISHER_BYTES,
        field,
        format!("{field} field must have less than {MAX_PUBLISHER_BYTES} bytes"),
    );

    let field = "year";
    v.check(book.year != 0, field, must_be_provided(field));
    v.check(
        book.year <= current_year,
        field,
        format!("{field} field must not be set in the future"),
    );
    v.check(
        book.year >= MIN_YEAR,
        field,
        format!("{field} field must not be set before {MIN_YEAR}"),
    );

    let field = "page_count";
    v.check(book.page_count != 0, field, must_be_provided(field));
    v.check(
        book.page_count <= MAX_PAGE_COUNT,
        field,
        format!("{field} field must not be more than {MAX_PAGE_COUNT} pages"),
    );
    v.check(
        book.page_count >= MIN_PAGE_COUNT,
        field,
        format!("{field} field must have at least {MIN_PAGE_COUNT} pages"),
    );

    let field = "genres";
    v.check(
        book.genres.len() <= MAX_GENRES,
        field,
        format!("{field} field must not contain more than {MAX_GENRES} genres"),
    );
    v.check(
        book.genres.len() >= MIN_GENRES,
        field,
        format!("{field} field must contain at least {MIN_GENRES} genres"),
    );

    if !v.valid() {
        return v.finish();
    }

    let field = "authors";
    v.check(
        entry.authors.len() <= MAX_AUTHORS,
        field,
        format!("{field} field must not contain more than {MAX_AUTHORS} authors"),
    );
    v.check(
        entry.authors.len() >= MIN_AUTHORS,
        field,
        format!("{field} field must contain at least {MIN_AUTHORS} authors"),
    );

    if !v.valid() {
        return v.finish();
    }

    let field = "author_items";
    for name in &entry.authors {
        v.check(!name.is_empty(), field, must_be_provided(field));
        v.check(
            name.len() <= MAX_AUTHOR_NAME_BYTES,
            field,
            format!("{field} field must have less than {MAX_AUTHOR_NAME_BYTES} bytes in length"),
        );
        if !v.valid() {
            break;
        }
    }

    v.finish()
}
