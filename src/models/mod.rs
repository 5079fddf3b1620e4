// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains the data structures shared by ingestion, querying
//! and link sharing, organized by their primary purpose.

mod config;
mod language;
pub mod region;
mod seed;
mod site;

// Re-export all public types
pub use config::{CatalogConfig, Config, LoggingConfig, ShareConfig};
pub use language::Language;
pub use region::Region;
pub use seed::Seed;
pub use site::{Names, SiteRecord};
