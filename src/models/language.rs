//! Supported display languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A display language. Ordering of [`Language::ALL`] is the fixed order used
/// when joining per-language names for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese (primary language)
    #[default]
    Ja,
    /// English
    En,
    /// Simplified Chinese
    Zh,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ja, Language::En, Language::Zh];

    /// Short code used in fragments and CSV column suffixes.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Name of the language written in itself, for a language switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Ja => "日本語",
            Language::En => "English",
            Language::Zh => "中文",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s.trim())
            .ok_or_else(|| AppError::UnknownLanguage(s.to_string()))
    }
}
