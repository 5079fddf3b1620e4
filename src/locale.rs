// src/locale.rs

//! User-facing strings for each display language.

use crate::models::Language;

/// Interface strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search: &'static str,
    pub region: &'static str,
    pub prefecture: &'static str,
    pub all: &'static str,
    pub data: &'static str,
    pub import_csv: &'static str,
    pub share_link: &'static str,
    pub language: &'static str,
    pub stamp_available: &'static str,
    pub more_info: &'static str,
    pub filter: &'static str,
    pub no_results: &'static str,
}

static JA: Messages = Messages {
    title: "御城印マップ",
    subtitle: "御城印がもらえるお城を地図で検索",
    search: "検索",
    region: "地方",
    prefecture: "都道府県",
    all: "すべて",
    data: "データ",
    import_csv: "CSV読み込み",
    share_link: "共有リンク",
    language: "言語",
    stamp_available: "御城印あり",
    more_info: "詳細",
    filter: "絞り込み",
    no_results: "該当するお城はありません",
};

static EN: Messages = Messages {
    title: "Gojoin Castle Map",
    subtitle: "Find castles offering Gojoin (castle stamps)",
    search: "Search",
    region: "Region",
    prefecture: "Prefecture",
    all: "All",
    data: "Data",
    import_csv: "Import CSV",
    share_link: "Share link",
    language: "Language",
    stamp_available: "Gojoin available",
    more_info: "Details",
    filter: "Filter",
    no_results: "No castles match",
};

static ZH: Messages = Messages {
    title: "御城印地图",
    subtitle: "在地图上查找可领取御城印的城堡",
    search: "搜索",
    region: "地区",
    prefecture: "都道府县",
    all: "全部",
    data: "数据",
    import_csv: "导入CSV",
    share_link: "分享链接",
    language: "语言",
    stamp_available: "可领取御城印",
    more_info: "详情",
    filter: "筛选",
    no_results: "没有符合条件的城堡",
};

/// Strings for a language.
pub fn messages(lang: Language) -> &'static Messages {
    match lang {
        Language::Ja => &JA,
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_strings() {
        for lang in Language::ALL {
            let m = messages(lang);
            assert!(!m.title.is_empty());
            assert!(!m.no_results.is_empty());
        }
        assert_eq!(messages(Language::En).title, "Gojoin Castle Map");
    }
}
