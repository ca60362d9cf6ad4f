//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Keep a book catalog with per-author book counts", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (overrides FOLIO_DB and settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create, show, update or delete books
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Look up authors
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Show row counts for the catalog
    Stats,

    /// Check every author's book count against the link table
    Audit,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum BookAction {
    /// Add a book from a JSON entry ({"book": {...}, "authors": [...]})
    Add {
        /// Read the entry from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show a book and its authors
    Show {
        /// Numeric book id
        id: i64,
    },

    /// Apply a JSON patch to a book; omitted fields keep their value
    Update {
        /// Numeric book id
        id: i64,

        /// Read the patch from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a book and release its authors
    Delete {
        /// Numeric book id
        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum AuthorAction {
    /// Show an author and the books credited to them
    Show {
        /// Numeric author id
        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each came from
    Show,

    /// Print the settings file path
    Path,
}
