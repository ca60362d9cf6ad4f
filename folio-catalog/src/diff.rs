//! Old/new author list comparison.
//!
//! An update only adjusts reference counts for authors that were added or
//! dropped; authors present on both sides keep their count.

use std::collections::HashSet;

/// The three disjoint classes produced by [`diff_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDiff {
    /// Present in both lists.
    pub common: Vec<String>,
    /// Present only in the old list.
    pub exclusive_old: Vec<String>,
    /// Present only in the new list.
    pub exclusive_new: Vec<String>,
}

impl NameDiff {
    /// True when no author was added or dropped.
    pub fn is_unchanged(&self) -> bool {
        self.exclusive_old.is_empty() && self.exclusive_new.is_empty()
    }
}

/// Classify names as common, exclusive to `old`, or exclusive to `new`.
///
/// Duplicates within either list are classified once. Each output keeps the
/// order in which its names first appear.
pub fn diff_names<S: AsRef<str>>(old: &[S], new: &[S]) -> NameDiff {
    let mut present: HashSet<&str> = old.iter().map(|s| s.as_ref()).collect();
    let mut seen_new: HashSet<&str> = HashSet::with_capacity(new.len());
    let mut diff = NameDiff::default();

    for name in new {
        let name: &str = name.as_ref();
        if !seen_new.insert(name) {
            continue;
        }
        if present.remove(name) {
            diff.common.push(name.to_string());
        } else {
            diff.exclusive_new.push(name.to_string());
        }
    }

    // Whatever was never matched belongs to the old list only.
    for name in old {
        let name: &str = name.as_ref();
        if present.remove(name) {
            diff.exclusive_old.push(name.to_string());
        }
    }

    diff
}
