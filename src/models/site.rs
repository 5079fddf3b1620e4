//! Site record data structure.

use serde::{Deserialize, Serialize};

use crate::models::Language;
use crate::models::region;

/// Display names of a site, one per supported language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Names {
    #[serde(rename = "name_ja", default)]
    pub ja: String,

    #[serde(rename = "name_en", default)]
    pub en: String,

    #[serde(rename = "name_zh", default)]
    pub zh: String,
}

impl Names {
    pub fn new(ja: impl Into<String>, en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            ja: ja.into(),
            en: en.into(),
            zh: zh.into(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Ja => &self.ja,
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    /// All names joined by a space in [`Language::ALL`] order.
    pub fn search_text(&self) -> String {
        Language::ALL
            .iter()
            .map(|lang| self.get(*lang))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A castle offering a gojoin stamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteRecord {
    /// Unique key within the active store
    pub id: String,

    /// Per-language display names
    #[serde(flatten)]
    pub name: Names,

    /// Prefecture name (e.g., "長野")
    #[serde(default)]
    pub prefecture: String,

    /// Region name (e.g., "甲信越")
    #[serde(default)]
    pub region: String,

    #[serde(rename = "lat")]
    pub latitude: f64,

    #[serde(rename = "lng")]
    pub longitude: f64,

    /// Official site of the castle
    #[serde(default)]
    pub url: String,

    /// Page describing the gojoin stamp
    #[serde(default)]
    pub gojoin_url: String,
}

impl SiteRecord {
    /// Name in the requested language, falling back to the first non-empty name.
    pub fn display_name(&self, lang: Language) -> &str {
        let preferred = self.name.get(lang);
        if !preferred.is_empty() {
            return preferred;
        }
        Language::ALL
            .iter()
            .map(|l| self.name.get(*l))
            .find(|n| !n.is_empty())
            .unwrap_or(self.id.as_str())
    }

    /// Whether the declared prefecture belongs to the declared region.
    pub fn is_in_taxonomy(&self) -> bool {
        region::is_consistent(&self.region, &self.prefecture)
    }

    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{name}`, `{prefecture}`, `{region}`
    /// - `{lat}`, `{lng}`, `{url}`, `{gojoin_url}`
    pub fn format(&self, template: &str, lang: Language) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{name}", self.display_name(lang))
            .replace("{prefecture}", &self.prefecture)
            .replace("{region}", &self.region)
            .replace("{lat}", &self.latitude.to_string())
            .replace("{lng}", &self.longitude.to_string())
            .replace("{url}", &self.url)
            .replace("{gojoin_url}", &self.gojoin_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_site() -> SiteRecord {
        SiteRecord {
            id: "matsumoto".to_string(),
            name: Names::new("松本城", "Matsumoto Castle", "松本城"),
            prefecture: "長野".to_string(),
            region: "甲信越".to_string(),
            latitude: 36.2381,
            longitude: 137.968,
            url: "https://www.matsumoto-castle.jp/".to_string(),
            gojoin_url: "https://www.matsumoto-castle.jp/topics/8063.html".to_string(),
        }
    }

    #[test]
    fn test_search_text_order() {
        let site = sample_site();
        assert_eq!(site.name.search_text(), "松本城 Matsumoto Castle 松本城");
    }

    #[test]
    fn test_display_name_fallback() {
        let mut site = sample_site();
        assert_eq!(site.display_name(Language::En), "Matsumoto Castle");
        site.name.en.clear();
        assert_eq!(site.display_name(Language::En), "松本城");
        site.name = Names::default();
        assert_eq!(site.display_name(Language::Zh), "matsumoto");
    }

    #[test]
    fn test_format() {
        let site = sample_site();
        let result = site.format("{name} ({prefecture} / {region})", Language::En);
        assert_eq!(result, "Matsumoto Castle (長野 / 甲信越)");
    }

    #[test]
    fn test_taxonomy_check() {
        let mut site = sample_site();
        assert!(site.is_in_taxonomy());
        site.region = "関東".to_string();
        assert!(!site.is_in_taxonomy());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample_site()).unwrap();
        assert_eq!(json["name_en"], "Matsumoto Castle");
        assert_eq!(json["lat"], 36.2381);
        assert!(json.get("latitude").is_none());
    }
}
