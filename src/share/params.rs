//! View parameters controlling the derived view.

use crate::models::{Language, Region};

/// The user-controlled filter and display settings.
///
/// Fields are only mutated through [`ShareState`](super::ShareState) so the
/// shareable fragment never drifts from the in-memory values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub(crate) language: Language,
    pub(crate) query: String,
    pub(crate) region: Option<&'static Region>,
    pub(crate) prefecture: Option<&'static str>,
}

impl ViewParams {
    pub fn language(&self) -> Language {
        self.language
    }

    /// Free-text search; empty means no text filter.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn region(&self) -> Option<&'static Region> {
        self.region
    }

    pub fn prefecture(&self) -> Option<&'static str> {
        self.prefecture
    }
}
