//! Storage abstractions for the catalog snapshot.
//!
//! The active catalog lives in memory. After a successful import the CLI
//! writes it to a snapshot so the next run starts from the same data
//! instead of the seed.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! └── catalog.json          # Last imported catalog
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::SiteRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a snapshot write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of sites written
    pub count: usize,
    /// Where the snapshot was written
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Persisted form of the active catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total site count
    pub count: usize,
    /// The sites, in store order
    pub sites: Vec<SiteRecord>,
}

impl Snapshot {
    pub fn new(sites: Vec<SiteRecord>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: sites.len(),
            sites,
        }
    }
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Replace the stored snapshot with `sites`.
    async fn write_snapshot(&self, sites: &[SiteRecord]) -> Result<WriteMetadata>;

    /// Load the stored snapshot, if any.
    async fn load_snapshot(&self) -> Result<Option<Snapshot>>;

    /// Delete the stored snapshot. Returns whether one existed.
    async fn remove_snapshot(&self) -> Result<bool>;
}
