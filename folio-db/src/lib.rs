//! SQLite persistence layer for the book catalog.
//!
//! Provides schema creation, the author reference-count ledger, book and
//! link row operations, and read queries backed by SQLite (via rusqlite with
//! the bundled feature).

pub mod ledger;
pub mod operations;
pub mod queries;
pub mod schema;

pub use ledger::{conditional_decrement, upsert_and_increment};
pub use operations::{
    OperationError, delete_book, delete_links_for_book, insert_book, insert_links, update_book,
};
pub use queries::{
    authors_for_book, books_for_author, catalog_stats, count_drift, get_author,
    get_author_by_hash, get_author_entry, get_book, get_book_by_hash, get_entry,
    linked_author_hashes,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
