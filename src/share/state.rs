// src/share/state.rs

//! Write-through owner of the view parameters.

use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Language, Region, region};
use crate::share::ViewParams;
use crate::share::fragment::{self, Decoded};

/// Owns the view parameters and keeps the shareable fragment in step.
///
/// Every successful setter re-encodes the complete parameter set before it
/// returns; there is no separate apply step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareState {
    params: ViewParams,
    fragment: String,
}

impl Default for ShareState {
    fn default() -> Self {
        Self::with_params(ViewParams::default())
    }
}

impl ShareState {
    fn with_params(params: ViewParams) -> Self {
        let fragment = fragment::encode(&params);
        Self { params, fragment }
    }

    /// Restore state at startup. Malformed values fall back to defaults and
    /// are returned alongside the state; the stored fragment is canonical.
    pub fn from_fragment(fragment: &str) -> (Self, Vec<AppError>) {
        let Decoded { params, warnings } = fragment::decode(fragment);
        (Self::with_params(params), warnings)
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    /// Current fragment, without the leading `#`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// `base` with its fragment replaced by the current state.
    pub fn share_link(&self, base: &Url) -> Url {
        let mut link = base.clone();
        link.set_fragment(Some(&self.fragment));
        link
    }

    pub fn language(&self) -> Language {
        self.params.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.params.language = language;
        self.sync();
    }

    pub fn query(&self) -> &str {
        &self.params.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.params.query = query.into();
        self.sync();
    }

    pub fn region(&self) -> Option<&'static Region> {
        self.params.region
    }

    /// Select a region by name, or clear it with `None`.
    ///
    /// A selected prefecture outside the new region is cleared.
    pub fn set_region(&mut self, name: Option<&str>) -> Result<()> {
        let region = match name {
            Some(name) => {
                Some(Region::find(name).ok_or_else(|| AppError::UnknownRegion(name.to_string()))?)
            }
            None => None,
        };

        if let (Some(region), Some(prefecture)) = (region, self.params.prefecture) {
            if !region.contains(prefecture) {
                log::debug!("Clearing prefecture {} outside region {}", prefecture, region);
                self.params.prefecture = None;
            }
        }
        self.params.region = region;
        self.sync();
        Ok(())
    }

    pub fn prefecture(&self) -> Option<&'static str> {
        self.params.prefecture
    }

    /// Select a prefecture by name, or clear it with `None`.
    ///
    /// Rejects names outside the taxonomy and prefectures outside the
    /// selected region; state is unchanged on error.
    pub fn set_prefecture(&mut self, name: Option<&str>) -> Result<()> {
        let prefecture = match name {
            Some(name) => {
                let prefecture = region::find_prefecture(name)
                    .ok_or_else(|| AppError::UnknownPrefecture(name.to_string()))?;
                if let Some(region) = self.params.region {
                    if !region.contains(prefecture) {
                        return Err(AppError::PrefectureOutsideRegion {
                            prefecture: prefecture.to_string(),
                            region: region.name().to_string(),
                        });
                    }
                }
                Some(prefecture)
            }
            None => None,
        };
        self.params.prefecture = prefecture;
        self.sync();
        Ok(())
    }

    fn sync(&mut self) {
        self.fragment = fragment::encode(&self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ShareState::default();
        assert_eq!(state.language(), Language::Ja);
        assert_eq!(state.query(), "");
        assert!(state.region().is_none());
        assert!(state.prefecture().is_none());
        assert_eq!(state.fragment(), "lang=ja");
    }

    #[test]
    fn test_setters_write_through() {
        let mut state = ShareState::default();
        state.set_language(Language::En);
        assert_eq!(state.fragment(), "lang=en");
        state.set_query("castle");
        assert_eq!(state.fragment(), "lang=en&q=castle");
        state.set_query("");
        assert_eq!(state.fragment(), "lang=en");
    }

    #[test]
    fn test_set_region_clears_foreign_prefecture() {
        let mut state = ShareState::default();
        state.set_prefecture(Some("長野")).unwrap();
        state.set_region(Some("関東")).unwrap();
        assert_eq!(state.region().unwrap().name(), "関東");
        assert_eq!(state.prefecture(), None);
        assert!(!state.fragment().contains("pref="));
    }

    #[test]
    fn test_set_region_keeps_member_prefecture() {
        let mut state = ShareState::default();
        state.set_prefecture(Some("長野")).unwrap();
        state.set_region(Some("甲信越")).unwrap();
        assert_eq!(state.prefecture(), Some("長野"));

        state.set_region(None).unwrap();
        assert!(state.region().is_none());
        assert_eq!(state.prefecture(), Some("長野"));
    }

    #[test]
    fn test_unknown_region_rejected_without_change() {
        let mut state = ShareState::default();
        state.set_region(Some("近畿")).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.set_region(Some("Narnia")),
            Err(AppError::UnknownRegion(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_prefecture_outside_region_rejected() {
        let mut state = ShareState::default();
        state.set_region(Some("近畿")).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.set_prefecture(Some("東京")),
            Err(AppError::PrefectureOutsideRegion { .. })
        ));
        assert!(matches!(
            state.set_prefecture(Some("Tokyo")),
            Err(AppError::UnknownPrefecture(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_from_fragment_canonicalizes() {
        let (state, warnings) = ShareState::from_fragment("#q=himeji&lang=xx&extra=1");
        assert_eq!(warnings.len(), 1);
        assert_eq!(state.language(), Language::Ja);
        assert_eq!(state.fragment(), "lang=ja&q=himeji");
    }

    #[test]
    fn test_share_link() {
        let mut state = ShareState::default();
        state.set_language(Language::Zh);
        state.set_region(Some("東海")).unwrap();
        let base = Url::parse("https://example.com/map?x=1#old").unwrap();
        let link = state.share_link(&base);
        assert_eq!(
            link.as_str(),
            "https://example.com/map?x=1#lang=zh&region=%E6%9D%B1%E6%B5%B7"
        );
        let (restored, warnings) = ShareState::from_fragment(link.fragment().unwrap());
        assert!(warnings.is_empty());
        assert_eq!(restored, state);
    }
}
