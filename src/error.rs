// src/error.rs

//! Unified error handling for the catalog engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Ingested text had no non-blank lines
    #[error("Input contains no data")]
    EmptyInput,

    /// Every row was dropped for unparseable coordinates
    #[error("No valid rows: {dropped} row(s) dropped for missing or non-numeric coordinates")]
    NoValidRows { dropped: usize },

    /// A fragment value does not belong to its parameter's domain
    #[error("Malformed fragment value for '{key}': {value:?}")]
    MalformedFragment { key: String, value: String },

    /// Language code outside the supported set
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Region name outside the taxonomy
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Prefecture name outside the taxonomy
    #[error("Unknown prefecture: {0}")]
    UnknownPrefecture(String),

    /// Prefecture does not belong to the selected region
    #[error("Prefecture {prefecture} is not part of region {region}")]
    PrefectureOutsideRegion { prefecture: String, region: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a malformed fragment error for one key.
    pub fn malformed(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::MalformedFragment {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Whether the condition is absorbed with "no change" rather than failing the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoValidRows { .. } | Self::MalformedFragment { .. }
        )
    }
}
