// src/query.rs

//! Derivation of the visible subset of the catalog.

use crate::models::SiteRecord;
use crate::share::ViewParams;

/// Records matching every active filter, in store order.
///
/// - region and prefecture must equal the selected values when set
/// - a non-empty query must appear, case-insensitively, in the record's
///   names joined across all languages, whatever the display language
pub fn visible<'a>(records: &'a [SiteRecord], params: &ViewParams) -> Vec<&'a SiteRecord> {
    let needle = params.query().to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, params, &needle))
        .collect()
}

fn matches(record: &SiteRecord, params: &ViewParams, needle: &str) -> bool {
    if let Some(region) = params.region() {
        if record.region != region.name() {
            return false;
        }
    }
    if let Some(prefecture) = params.prefecture() {
        if record.prefecture != prefecture {
            return false;
        }
    }
    needle.is_empty() || record.name.search_text().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Names, Seed};
    use crate::share::ShareState;

    fn record(id: &str, region: &str, prefecture: &str, names: Names) -> SiteRecord {
        SiteRecord {
            id: id.to_string(),
            name: names,
            prefecture: prefecture.to_string(),
            region: region.to_string(),
            latitude: 35.0,
            longitude: 135.0,
            url: String::new(),
            gojoin_url: String::new(),
        }
    }

    fn castles() -> Vec<SiteRecord> {
        vec![
            record("A", "関東", "東京", Names::new("", "Tokyo Castle", "")),
            record("B", "近畿", "大阪", Names::new("", "Osaka Castle", "")),
        ]
    }

    fn ids(view: &[&SiteRecord]) -> Vec<String> {
        view.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_filter_examples() {
        let records = castles();
        let mut state = ShareState::default();

        state.set_query("castle");
        assert_eq!(ids(&visible(&records, state.params())), ["A", "B"]);

        state.set_query("");
        state.set_region(Some("近畿")).unwrap();
        assert_eq!(ids(&visible(&records, state.params())), ["B"]);

        state.set_region(Some("関東")).unwrap();
        state.set_query("osaka");
        assert!(visible(&records, state.params()).is_empty());
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let records = Seed::default().into_sites();
        let view = visible(&records, &ViewParams::default());
        assert_eq!(view.len(), records.len());
        assert!(view.iter().zip(&records).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_query_matches_any_language() {
        let records = Seed::default().into_sites();
        let mut state = ShareState::default();
        state.set_language(Language::En);

        state.set_query("姫路");
        assert_eq!(ids(&visible(&records, state.params())), ["himeji"]);

        state.set_query("姬路");
        assert_eq!(ids(&visible(&records, state.params())), ["himeji"]);

        state.set_query("HIROSAKI");
        assert_eq!(ids(&visible(&records, state.params())), ["hirosaki"]);
    }

    #[test]
    fn test_query_spans_joined_names() {
        let records = Seed::default().into_sites();
        let mut state = ShareState::default();
        state.set_query("城 matsumoto");
        assert_eq!(ids(&visible(&records, state.params())), ["matsumoto"]);
    }

    #[test]
    fn test_prefecture_filter() {
        let records = Seed::default().into_sites();
        let mut state = ShareState::default();
        state.set_prefecture(Some("静岡")).unwrap();
        assert_eq!(ids(&visible(&records, state.params())), ["hamamatsu"]);

        state.set_prefecture(Some("東京")).unwrap();
        assert!(visible(&records, state.params()).is_empty());
    }
}
