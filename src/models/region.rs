//! Region and prefecture taxonomy.

use std::fmt;

/// A region of Japan and the prefectures it groups.
#[derive(Debug, PartialEq, Eq)]
pub struct Region {
    name: &'static str,
    prefectures: &'static [&'static str],
}

static REGIONS: [Region; 9] = [
    Region {
        name: "北海道・東北",
        prefectures: &["北海道", "青森", "岩手", "宮城", "秋田", "山形", "福島"],
    },
    Region {
        name: "関東",
        prefectures: &["東京", "神奈川", "千葉", "埼玉", "茨城", "栃木", "群馬"],
    },
    Region {
        name: "甲信越",
        prefectures: &["山梨", "長野", "新潟"],
    },
    Region {
        name: "北陸",
        prefectures: &["富山", "石川", "福井"],
    },
    Region {
        name: "東海",
        prefectures: &["静岡", "愛知", "岐阜", "三重"],
    },
    Region {
        name: "近畿",
        prefectures: &["京都", "滋賀", "大阪", "兵庫", "奈良", "和歌山"],
    },
    Region {
        name: "中国",
        prefectures: &["鳥取", "島根", "岡山", "広島", "山口"],
    },
    Region {
        name: "四国",
        prefectures: &["香川", "徳島", "愛媛", "高知"],
    },
    Region {
        name: "九州・沖縄",
        prefectures: &["福岡", "佐賀", "長崎", "熊本", "大分", "宮崎", "鹿児島", "沖縄"],
    },
];

impl Region {
    /// All regions, in display order.
    pub fn all() -> &'static [Region] {
        &REGIONS
    }

    /// Look up a region by its exact name.
    pub fn find(name: &str) -> Option<&'static Region> {
        REGIONS.iter().find(|r| r.name == name)
    }

    /// Region a prefecture belongs to.
    pub fn of_prefecture(prefecture: &str) -> Option<&'static Region> {
        REGIONS.iter().find(|r| r.contains(prefecture))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn prefectures(&self) -> &'static [&'static str] {
        self.prefectures
    }

    pub fn contains(&self, prefecture: &str) -> bool {
        self.prefectures.contains(&prefecture)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Canonical static name of a known prefecture.
pub fn find_prefecture(name: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .flat_map(|r| r.prefectures.iter().copied())
        .find(|p| *p == name)
}

/// Every prefecture across all regions, in display order.
pub fn all_prefectures() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().flat_map(|r| r.prefectures.iter().copied())
}

/// Whether a region/prefecture pair is valid under the taxonomy.
pub fn is_consistent(region: &str, prefecture: &str) -> bool {
    Region::find(region).is_some_and(|r| r.contains(prefecture))
}
