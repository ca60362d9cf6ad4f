//! Content-derived keys for titles and author names.
//!
//! A key is the lowercase hex SHA-1 of the text. Author names are normalized
//! first so spelling the same name in a different ASCII case resolves to the
//! same author row.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Length of a key in hex characters (160-bit digest).
pub const KEY_LEN: usize = 40;

/// Hash `text` into its content key.
pub fn content_key(text: &str) -> String {
    format!("{:x}", Sha1::digest(text.as_bytes()))
}

/// Upper-case ASCII letters; every other byte is kept as-is.
pub fn normalize_author_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// A normalized author name paired with its content key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedName {
    pub name: String,
    pub hash: String,
}

impl KeyedName {
    pub fn new(raw: &str) -> Self {
        let name = normalize_author_name(raw);
        let hash = content_key(&name);
        Self { name, hash }
    }
}

/// Normalize and key a list of author names.
///
/// Names that normalize to the same key are collapsed to their first
/// occurrence, so the result never credits one author twice.
pub fn key_names<S: AsRef<str>>(names: &[S]) -> Vec<KeyedName> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|n| KeyedName::new(n.as_ref()))
        .filter(|k| seen.insert(k.hash.clone()))
        .collect()
}
