//! Data model types for the book catalog.
//!
//! Books and authors are joined many-to-many through link rows keyed by
//! content hashes. The numeric `id` is the stable identity used to address a
//! book; the hash is derived from the title and changes with it.

use serde::{Deserialize, Serialize};

// ── Input ───────────────────────────────────────────────────────────────────

/// Scalar book fields as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub publisher: String,
    pub year: i32,
    pub page_count: i32,
    pub genres: Vec<String>,
}

/// A complete candidate entry: book fields plus the credited author names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub book: NewBook,
    pub authors: Vec<String>,
}

/// Partial book fields for an update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFieldsPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub page_count: Option<i32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

/// A client-supplied update. `authors: None` keeps the current author list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub book: BookFieldsPatch,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

impl BookPatch {
    /// Fill every absent field from the stored book and its author names.
    pub fn merge_over(&self, current: &Book, current_authors: &[String]) -> BookEntry {
        let fields = &self.book;
        BookEntry {
            book: NewBook {
                title: fields.title.clone().unwrap_or_else(|| current.title.clone()),
                publisher: fields
                    .publisher
                    .clone()
                    .unwrap_or_else(|| current.publisher.clone()),
                year: fields.year.unwrap_or(current.year),
                page_count: fields.page_count.unwrap_or(current.page_count),
                genres: fields
                    .genres
                    .clone()
                    .unwrap_or_else(|| current.genres.clone()),
            },
            authors: self
                .authors
                .clone()
                .unwrap_or_else(|| current_authors.to_vec()),
        }
    }
}

// ── Persisted rows ──────────────────────────────────────────────────────────

/// A stored book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    /// Content hash of the title; the key link rows refer to.
    pub hash: String,
    pub title: String,
    pub publisher: String,
    pub year: i32,
    pub page_count: i32,
    pub genres: Vec<String>,
    /// Bumped on every successful update; used for conflict detection.
    pub version: i32,
}

/// A stored author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    /// Content hash of the normalized name.
    pub hash: String,
    /// Number of distinct books currently linked to this author.
    pub books_authored: i32,
}

// ── Read models ─────────────────────────────────────────────────────────────

/// A book together with its credited authors, in credit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub book: Book,
    pub authors: Vec<Author>,
}

impl CatalogEntry {
    /// Author names in credit order.
    pub fn author_names(&self) -> Vec<String> {
        self.authors.iter().map(|a| a.name.clone()).collect()
    }
}

/// An author together with every book linked to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub author: Author,
    pub books: Vec<Book>,
}

/// Row counts across the catalog tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub books: i64,
    pub authors: i64,
    pub links: i64,
}

/// An author whose stored count disagrees with the link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDrift {
    pub author_hash: String,
    pub name: String,
    pub books_authored: i32,
    pub linked_books: i32,
}
