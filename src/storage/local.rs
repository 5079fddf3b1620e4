//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── catalog.json          # Snapshot of the active catalog
//! ```
//!
//! Writes go to a temporary file first and are renamed into place, so a
//! crash never leaves a half-written snapshot behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::SiteRecord;
use crate::storage::{CatalogStorage, Snapshot, WriteMetadata};

const DEFAULT_SNAPSHOT_KEY: &str = "catalog.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    snapshot_key: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }

    /// Use a different snapshot file name.
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn write_snapshot(&self, sites: &[SiteRecord]) -> Result<WriteMetadata> {
        let snapshot = Snapshot::new(sites.to_vec());
        self.write_json(&self.snapshot_key, &snapshot).await?;

        let location = self.path(&self.snapshot_key).display().to_string();
        log::info!("Snapshot: {} sites written to {}", snapshot.count, location);

        Ok(WriteMetadata {
            count: snapshot.count,
            location,
            timestamp: Utc::now(),
        })
    }

    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        let snapshot: Option<Snapshot> = self.read_json(&self.snapshot_key).await?;
        if snapshot.is_none() {
            log::debug!("No snapshot found at {}", self.path(&self.snapshot_key).display());
        }
        Ok(snapshot)
    }

    async fn remove_snapshot(&self) -> Result<bool> {
        match tokio::fs::remove_file(self.path(&self.snapshot_key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
