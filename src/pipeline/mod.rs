//! Ingestion pipeline entry points.
//!
//! - `ingest`: Parse CSV text into validated site records
//! - `calculate_diff`: Compare two catalog versions

pub mod diff;
pub mod ingest;

pub use diff::{CatalogDiff, calculate_diff};
pub use ingest::{DropReason, DroppedRow, Ingested, ingest};
