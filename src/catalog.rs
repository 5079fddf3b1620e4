// src/catalog.rs

//! The catalog application object.
//!
//! Wires the record store, the shareable view state and the query engine
//! together. The presentation layer reads [`Catalog::visible`], drives the
//! setters on [`Catalog::share_mut`], and hands selected files to
//! [`Catalog::import_file`].

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::SiteRecord;
use crate::pipeline::{CatalogDiff, DroppedRow, calculate_diff, ingest};
use crate::query;
use crate::share::ShareState;
use crate::store::RecordStore;

/// Summary of a successful import.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Records now in the store
    pub accepted: usize,
    /// Rows skipped for bad coordinates
    pub dropped: Vec<DroppedRow>,
    /// Ids collapsed by last-row-wins
    pub duplicate_ids: Vec<String>,
    /// Ids whose region/prefecture pair is outside the taxonomy
    pub orphan_ids: Vec<String>,
    /// Change relative to the replaced catalog
    pub diff: CatalogDiff,
}

/// Record store plus view state.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    store: RecordStore,
    share: ShareState,
}

impl Catalog {
    /// Start from pre-validated seed records and the fragment present at
    /// startup. Malformed fragment values are returned as warnings.
    pub fn new(seed: Vec<SiteRecord>, fragment: &str) -> (Self, Vec<AppError>) {
        let (share, warnings) = ShareState::from_fragment(fragment);
        let catalog = Self {
            store: RecordStore::new(seed),
            share,
        };
        (catalog, warnings)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn share(&self) -> &ShareState {
        &self.share
    }

    pub fn share_mut(&mut self) -> &mut ShareState {
        &mut self.share
    }

    /// The derived view for the current parameters.
    pub fn visible(&self) -> Vec<&SiteRecord> {
        query::visible(self.store.current(), self.share.params())
    }

    /// Parse `raw` and, when at least one row is valid, replace the store.
    ///
    /// On error the store is untouched. [`AppError::NoValidRows`] is
    /// recoverable: callers usually treat it as "no change".
    pub fn import(&mut self, raw: &str) -> Result<IngestReport> {
        let ingested = ingest(raw)?;
        let diff = calculate_diff(self.store.current(), &ingested.records);
        let accepted = ingested.records.len();
        self.store.replace(ingested.records);

        log::info!(
            "Catalog replaced: {} sites ({} added, {} updated, {} removed)",
            accepted,
            diff.added.len(),
            diff.updated.len(),
            diff.removed.len()
        );

        Ok(IngestReport {
            accepted,
            dropped: ingested.dropped,
            duplicate_ids: ingested.duplicate_ids,
            orphan_ids: ingested.orphan_ids,
            diff,
        })
    }

    /// Read a UTF-8 file and import it.
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<IngestReport> {
        let path = path.as_ref();
        log::debug!("Reading {}", path.display());
        let bytes = tokio::fs::read(path).await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            AppError::validation(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;
        self.import(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Seed};
    use tempfile::TempDir;

    fn seeded() -> Catalog {
        Catalog::new(Seed::default().into_sites(), "").0
    }

    fn visible_ids(catalog: &Catalog) -> Vec<String> {
        catalog.visible().iter().map(|r| r.id.clone()).collect()
    }

    const TWO_ROWS: &str = "id,name_ja,name_en,name_zh,prefecture,region,lat,lng,url,gojoin_url\n\
        osaka,大阪城,Osaka Castle,大阪城,大阪,近畿,34.6873,135.5262,https://www.osakacastle.net/,\n\
        nagoya,名古屋城,Nagoya Castle,名古屋城,愛知,東海,35.1856,136.8997,https://www.nagoyajo.city.nagoya.jp/,\n";

    #[test]
    fn test_startup_from_fragment() {
        let (catalog, warnings) =
            Catalog::new(Seed::default().into_sites(), "#lang=en&region=%E8%BF%91%E7%95%BF");
        assert!(warnings.is_empty());
        assert_eq!(catalog.share().language(), Language::En);
        assert_eq!(visible_ids(&catalog), ["himeji"]);
    }

    #[test]
    fn test_startup_with_malformed_fragment() {
        let (catalog, warnings) = Catalog::new(Seed::default().into_sites(), "#lang=tlh&q=");
        assert_eq!(warnings.len(), 1);
        assert_eq!(catalog.share().language(), Language::Ja);
        assert_eq!(catalog.visible().len(), 5);
    }

    #[test]
    fn test_import_replaces_store_in_file_order() {
        let mut catalog = seeded();
        assert_eq!(catalog.store().len(), 5);

        let report = catalog.import(TWO_ROWS).unwrap();
        assert_eq!(report.accepted, 2);
        let ids: Vec<_> = catalog.store().current().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["osaka", "nagoya"]);
        assert_eq!(report.diff.added, ["osaka", "nagoya"]);
        assert_eq!(report.diff.removed.len(), 5);
        assert_eq!(catalog.store().generation(), 1);
    }

    #[test]
    fn test_no_valid_rows_leaves_store_unchanged() {
        let mut catalog = seeded();
        let before = catalog.store().current().to_vec();

        let err = catalog.import("id,lat,lng\nx,notanumber,10").unwrap_err();
        assert!(matches!(err, AppError::NoValidRows { .. }));
        assert!(err.is_recoverable());
        assert_eq!(catalog.store().current(), &before[..]);
        assert_eq!(catalog.store().generation(), 0);
    }

    #[test]
    fn test_empty_input_leaves_store_unchanged() {
        let mut catalog = seeded();
        assert!(matches!(catalog.import("\n \n"), Err(AppError::EmptyInput)));
        assert_eq!(catalog.store().len(), 5);
    }

    #[test]
    fn test_import_is_idempotent_for_visible_set() {
        let mut once = seeded();
        once.share_mut().set_query("castle");
        once.import(TWO_ROWS).unwrap();

        let mut twice = once.clone();
        let report = twice.import(TWO_ROWS).unwrap();

        assert!(!report.diff.has_changes());
        assert_eq!(visible_ids(&once), visible_ids(&twice));
    }

    #[test]
    fn test_view_recomputes_after_replace() {
        let mut catalog = seeded();
        catalog.share_mut().set_region(Some("近畿")).unwrap();
        assert_eq!(visible_ids(&catalog), ["himeji"]);

        catalog.import(TWO_ROWS).unwrap();
        assert_eq!(visible_ids(&catalog), ["osaka"]);
    }

    #[tokio::test]
    async fn test_import_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("castles.csv");
        tokio::fs::write(&path, TWO_ROWS).await.unwrap();

        let mut catalog = seeded();
        let report = catalog.import_file(&path).await.unwrap();
        assert_eq!(report.accepted, 2);
    }

    #[tokio::test]
    async fn test_import_file_rejects_non_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("castles.csv");
        tokio::fs::write(&path, [0xff, 0xfe, 0x00]).await.unwrap();

        let mut catalog = seeded();
        assert!(matches!(
            catalog.import_file(&path).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(catalog.store().len(), 5);
    }
}
