//! Seed dataset used until the first successful import.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Names, SiteRecord};

/// Root seed data structure: the initial ordered catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pre-validated sites, in display order
    pub sites: Vec<SiteRecord>,
}

impl Seed {
    /// Load seed data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load seed data or return the built-in castles if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Seed load failed from {:?}: {}. Using built-in seed.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate that seed data is usable as an initial store.
    pub fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            return Err(AppError::validation("No sites defined in seed data"));
        }

        let mut seen = HashSet::new();
        for site in &self.sites {
            if !seen.insert(site.id.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate site id in seed data: {}",
                    site.id
                )));
            }
            if !site.latitude.is_finite() || !site.longitude.is_finite() {
                return Err(AppError::validation(format!(
                    "Site {} has non-finite coordinates",
                    site.id
                )));
            }
        }
        Ok(())
    }

    pub fn into_sites(self) -> Vec<SiteRecord> {
        self.sites
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            sites: vec![
                site(
                    "matsumoto",
                    Names::new("松本城", "Matsumoto Castle", "松本城"),
                    ("長野", "甲信越"),
                    (36.2381, 137.9680),
                    "https://www.matsumoto-castle.jp/",
                    "https://www.matsumoto-castle.jp/topics/8063.html",
                ),
                site(
                    "kumamoto",
                    Names::new("熊本城", "Kumamoto Castle", "熊本城"),
                    ("熊本", "九州・沖縄"),
                    (32.8067, 130.7056),
                    "https://castle.kumamoto-guide.jp/",
                    "https://kumamoto-icb.or.jp/%E7%86%8A%E6%9C%AC%E5%9F%8E%E3%80%8C%E5%BE%A1%E5%9F%8E%E5%8D%B0%E3%80%8D%E3%81%AE%E3%81%94%E7%B4%B9%E4%BB%8B/",
                ),
                site(
                    "hirosaki",
                    Names::new("弘前城", "Hirosaki Castle", "弘前城"),
                    ("青森", "北海道・東北"),
                    (40.6081, 140.4612),
                    "https://www.hirosakipark.jp/",
                    "https://www.hirosakipark.jp/sakura/cherryblossomfestival/souvenir/goshuin/",
                ),
                site(
                    "himeji",
                    Names::new("姫路城", "Himeji Castle", "姬路城"),
                    ("兵庫", "近畿"),
                    (34.8394, 134.6939),
                    "https://www.city.himeji.lg.jp/castle/",
                    "https://www.himeji-kanko.jp/event/1612/",
                ),
                site(
                    "hamamatsu",
                    Names::new("浜松城", "Hamamatsu Castle", "滨松城"),
                    ("静岡", "東海"),
                    (34.7179, 137.7238),
                    "https://hamamatsu-jyo.jp/",
                    "https://shizuoka.hellonavi.jp/gojyoin",
                ),
            ],
        }
    }
}

fn site(
    id: &str,
    name: Names,
    (prefecture, region): (&str, &str),
    (latitude, longitude): (f64, f64),
    url: &str,
    gojoin_url: &str,
) -> SiteRecord {
    SiteRecord {
        id: id.to_string(),
        name,
        prefecture: prefecture.to_string(),
        region: region.to_string(),
        latitude,
        longitude,
        url: url.to_string(),
        gojoin_url: gojoin_url.to_string(),
    }
}
