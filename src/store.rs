// src/store.rs

//! In-memory record store holding the active catalog.

use crate::models::SiteRecord;

/// Ordered collection of site records, replaced wholesale.
///
/// The store never validates: imported batches are validated by the
/// ingestion pipeline and seed records are trusted.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<SiteRecord>,
    generation: u64,
}

impl RecordStore {
    pub fn new(records: Vec<SiteRecord>) -> Self {
        Self {
            records,
            generation: 0,
        }
    }

    /// Substitute the entire collection and return the previous one.
    pub fn replace(&mut self, records: Vec<SiteRecord>) -> Vec<SiteRecord> {
        self.generation += 1;
        std::mem::replace(&mut self.records, records)
    }

    pub fn current(&self) -> &[SiteRecord] {
        &self.records
    }

    /// Incremented on every `replace`; derived views computed at an older
    /// generation are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SiteRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
