// src/pipeline/diff.rs

//! Diff calculation between catalog versions.
//!
//! After an import replaces the store, the diff tells the caller which
//! sites appeared, changed, or disappeared relative to the previous store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::SiteRecord;

/// Site ids grouped by kind of change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDiff {
    /// In the new catalog only, in new-catalog order
    pub added: Vec<String>,
    /// In both, with any field changed, in new-catalog order
    pub updated: Vec<String>,
    /// In the previous catalog only, in previous-catalog order
    pub removed: Vec<String>,
}

impl CatalogDiff {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty() || !self.removed.is_empty()
    }

    /// Get the total number of changes.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }
}

/// Calculate the diff between previous and current catalogs.
///
/// Ids are assumed unique on each side, which holds for seed data and
/// for ingested batches.
pub fn calculate_diff(previous: &[SiteRecord], current: &[SiteRecord]) -> CatalogDiff {
    let prev_map: HashMap<&str, &SiteRecord> =
        previous.iter().map(|s| (s.id.as_str(), s)).collect();
    let curr_map: HashMap<&str, &SiteRecord> =
        current.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut diff = CatalogDiff::default();

    for site in current {
        match prev_map.get(site.id.as_str()) {
            None => diff.added.push(site.id.clone()),
            Some(prev) if *prev != site => diff.updated.push(site.id.clone()),
            Some(_) => {}
        }
    }

    diff.removed = previous
        .iter()
        .filter(|s| !curr_map.contains_key(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();

    diff
}
