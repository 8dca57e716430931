use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playlist source URLs, fetched sequentially in declaration order
    pub sources: Vec<String>,
    pub output: OutputConfig,
    pub categories: CategoriesConfig,
    pub liveness: LivenessConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the merged playlist is written; overwritten on every run
    pub path: PathBuf,
}

/// How a normalized category is matched against the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherMode {
    /// First mapping key that occurs as a case-insensitive substring wins
    Substring,
    /// Closest mapping key by string similarity above `fuzzy_threshold` wins
    Fuzzy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    pub matcher: MatcherMode,
    /// Minimum similarity for a fuzzy match to apply
    pub fuzzy_threshold: f64,
    /// Ordered substitution table; declaration order decides match precedence
    pub mapping: Vec<CategoryMapping>,
    /// Channels whose normalized category contains any of these terms are dropped
    pub deny: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Maximum number of in-flight stream probes
    pub concurrency: usize,
    /// Per-probe timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-source download timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![
                "https://raw.githubusercontent.com/GitLatte/patr0n/refs/heads/site/lists/iptvsevenler.m3u".to_string(),
                "https://raw.githubusercontent.com/keyiflerolsun/IPTV_YenirMi/refs/heads/main/Kanallar/KekikAkademi.m3u".to_string(),
                "https://tinyurl.com/TVCANLI".to_string(),
            ],
            output: OutputConfig {
                path: PathBuf::from("filtered_playlist.m3u"),
            },
            categories: CategoriesConfig {
                matcher: MatcherMode::Substring,
                fuzzy_threshold: 0.7,
                mapping: vec![
                    CategoryMapping {
                        from: "Sport".to_string(),
                        to: "Sports".to_string(),
                    },
                    CategoryMapping {
                        from: "Movie".to_string(),
                        to: "Movies".to_string(),
                    },
                    CategoryMapping {
                        from: "News".to_string(),
                        to: "News & Politics".to_string(),
                    },
                ],
                deny: vec![
                    "Adult".to_string(),
                    "XXX".to_string(),
                    "Erotic".to_string(),
                ],
            },
            liveness: LivenessConfig {
                concurrency: 10,
                timeout_secs: 5,
            },
            fetch: FetchConfig { timeout_secs: 10 },
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing the defaults there first if the
    /// file does not exist yet
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let config: Self = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, contents)?;
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        for source in &self.sources {
            url::Url::parse(source).map_err(|e| {
                AppError::configuration(format!("invalid source URL '{source}': {e}"))
            })?;
        }

        if self.liveness.concurrency == 0 {
            return Err(AppError::configuration(
                "liveness.concurrency must be at least 1",
            ));
        }

        let threshold = self.categories.fuzzy_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(AppError::configuration(format!(
                "categories.fuzzy_threshold must be in (0.0, 1.0], got {threshold}"
            )));
        }

        Ok(())
    }
}
