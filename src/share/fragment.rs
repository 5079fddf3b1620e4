// src/share/fragment.rs

//! Encoding of view parameters as a URL fragment.
//!
//! The fragment is query-string shaped (`lang=en&q=castle&region=...`).
//! Keys are written in a fixed order, but decoding does not depend on order.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::error::AppError;
use crate::models::{Language, Region, region};
use crate::share::ViewParams;

pub const KEY_LANGUAGE: &str = "lang";
pub const KEY_QUERY: &str = "q";
pub const KEY_REGION: &str = "region";
pub const KEY_PREFECTURE: &str = "pref";

/// Result of decoding a fragment: usable parameters plus any values that
/// were replaced by their defaults.
#[derive(Debug, Default)]
pub struct Decoded {
    pub params: ViewParams,
    pub warnings: Vec<AppError>,
}

/// Serialize parameters. Empty query and unselected region/prefecture are
/// omitted; the language is always written.
pub fn encode(params: &ViewParams) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    out.append_pair(KEY_LANGUAGE, params.language.code());
    if !params.query.is_empty() {
        out.append_pair(KEY_QUERY, &params.query);
    }
    if let Some(region) = params.region {
        out.append_pair(KEY_REGION, region.name());
    }
    if let Some(prefecture) = params.prefecture {
        out.append_pair(KEY_PREFECTURE, prefecture);
    }
    out.finish()
}

/// Parse a fragment, with or without its leading `#`.
///
/// Never fails: a missing or empty key takes its default, and a value
/// outside its domain takes its default and is reported as a
/// [`AppError::MalformedFragment`] warning. Only the first occurrence of a
/// key counts; unknown keys are ignored.
pub fn decode(fragment: &str) -> Decoded {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    let body = body.strip_prefix('?').unwrap_or(body);

    let mut lang: Option<Cow<'_, str>> = None;
    let mut query: Option<Cow<'_, str>> = None;
    let mut region_name: Option<Cow<'_, str>> = None;
    let mut prefecture_name: Option<Cow<'_, str>> = None;

    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        let slot = match key.as_ref() {
            KEY_LANGUAGE => &mut lang,
            KEY_QUERY => &mut query,
            KEY_REGION => &mut region_name,
            KEY_PREFECTURE => &mut prefecture_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let mut decoded = Decoded::default();
    let params = &mut decoded.params;
    let warnings = &mut decoded.warnings;

    if let Some(code) = lang.filter(|v| !v.is_empty()) {
        match code.parse::<Language>() {
            Ok(language) => params.language = language,
            Err(_) => warnings.push(AppError::malformed(KEY_LANGUAGE, code)),
        }
    }

    if let Some(text) = query {
        params.query = text.into_owned();
    }

    if let Some(name) = region_name.filter(|v| !v.is_empty()) {
        match Region::find(&name) {
            Some(region) => params.region = Some(region),
            None => warnings.push(AppError::malformed(KEY_REGION, name)),
        }
    }

    if let Some(name) = prefecture_name.filter(|v| !v.is_empty()) {
        match region::find_prefecture(&name) {
            Some(prefecture) if params.region.is_none_or(|r| r.contains(prefecture)) => {
                params.prefecture = Some(prefecture);
            }
            _ => warnings.push(AppError::malformed(KEY_PREFECTURE, name)),
        }
    }

    for warning in &decoded.warnings {
        log::warn!("{}. Using default.", warning);
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lang: Language, query: &str, region: Option<&str>, pref: Option<&str>) -> ViewParams {
        ViewParams {
            language: lang,
            query: query.to_string(),
            region: region.and_then(Region::find),
            prefecture: pref.and_then(region::find_prefecture),
        }
    }

    #[test]
    fn test_encode_defaults_is_minimal() {
        assert_eq!(encode(&ViewParams::default()), "lang=ja");
    }

    #[test]
    fn test_encode_percent_encodes_values() {
        let p = params(Language::En, "osaka castle", Some("近畿"), Some("大阪"));
        assert_eq!(
            encode(&p),
            "lang=en&q=osaka+castle&region=%E8%BF%91%E7%95%BF&pref=%E5%A4%A7%E9%98%AA"
        );
    }

    #[test]
    fn test_decode_empty_or_missing() {
        for fragment in ["", "#", "#?", "?"] {
            let decoded = decode(fragment);
            assert_eq!(decoded.params, ViewParams::default());
            assert!(decoded.warnings.is_empty());
        }
    }

    #[test]
    fn test_decode_order_independent() {
        let decoded = decode("#pref=%E9%95%B7%E9%87%8E&q=matsu&lang=zh&region=%E7%94%B2%E4%BF%A1%E8%B6%8A");
        assert_eq!(
            decoded.params,
            params(Language::Zh, "matsu", Some("甲信越"), Some("長野"))
        );
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn test_decode_unescaped_unicode() {
        let decoded = decode("region=関東&pref=東京");
        assert_eq!(decoded.params.region().unwrap().name(), "関東");
        assert_eq!(decoded.params.prefecture(), Some("東京"));
    }

    #[test]
    fn test_decode_malformed_values_fall_back() {
        let decoded = decode("lang=fr&q=x&region=Atlantis&pref=Gotham");
        assert_eq!(decoded.params, params(Language::Ja, "x", None, None));
        assert_eq!(decoded.warnings.len(), 3);
        assert!(decoded.warnings.iter().all(AppError::is_recoverable));
    }

    #[test]
    fn test_decode_drops_prefecture_outside_region() {
        let decoded = decode("region=関東&pref=長野");
        assert_eq!(decoded.params.region().unwrap().name(), "関東");
        assert_eq!(decoded.params.prefecture(), None);
        assert!(matches!(
            &decoded.warnings[..],
            [AppError::MalformedFragment { key, .. }] if key == "pref"
        ));
    }

    #[test]
    fn test_decode_first_occurrence_wins_and_unknown_keys_ignored() {
        let decoded = decode("lang=en&lang=zh&utm_source=qr&q=a&q=b");
        assert_eq!(decoded.params.language(), Language::En);
        assert_eq!(decoded.params.query(), "a");
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn test_round_trip_reachable_states() {
        let queries = ["", "castle", "a+b&c=d", "  spaced  ", "%41", "姫路"];
        for lang in Language::ALL {
            for query in queries {
                for region in std::iter::once(None).chain(Region::all().iter().map(Some)) {
                    let prefectures: Vec<Option<&'static str>> = std::iter::once(None)
                        .chain(
                            region
                                .map(|r| r.prefectures().to_vec())
                                .unwrap_or_else(|| region::all_prefectures().collect())
                                .into_iter()
                                .map(Some),
                        )
                        .collect();
                    for prefecture in prefectures {
                        let original = ViewParams {
                            language: lang,
                            query: query.to_string(),
                            region,
                            prefecture,
                        };
                        let decoded = decode(&encode(&original));
                        assert_eq!(decoded.params, original);
                        assert!(decoded.warnings.is_empty());
                    }
                }
            }
        }
    }
}
