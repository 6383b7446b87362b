//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ro_source::{DEFAULT_TIMEOUT, DEFAULT_TTL, DEFAULT_URL, DayPlan, SUMMER_BREEZE_2025, SourceError};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Running-order page to fetch.
    pub source_url: String,
    /// Nominal day of each table on the page, by position (`dd.mm.yyyy`).
    pub table_days: Vec<String>,
    /// Freshness window of the built schedule.
    pub cache_ttl_secs: u64,
    /// HTTP request timeout.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_URL.to_string(),
            table_days: SUMMER_BREEZE_2025.iter().map(ToString::to_string).collect(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RO_*)
        figment = figment.merge(Env::prefixed("RO_"));

        figment.extract()
    }

    pub fn day_plan(&self) -> Result<DayPlan, SourceError> {
        DayPlan::from_labels(self.table_days.as_slice())
    }

    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Returns the platform-specific config directory for ro.
///
/// On Linux: `~/.config/ro`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ro"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_matches_2025_page() {
        let config = Config::default();
        assert_eq!(config.source_url, DEFAULT_URL);
        assert_eq!(config.table_days.len(), 17);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.day_plan().unwrap(), DayPlan::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
source_url = "https://example.org/running-order/"
table_days = ["20.08.2026", "21.08.2026"]
cache_ttl_secs = 60
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.source_url, "https://example.org/running-order/");
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.day_plan().unwrap().len(), 2);
    }

    #[test]
    fn invalid_day_label_is_reported() {
        let config = Config {
            table_days: vec!["2026-08-20".to_string()],
            ..Config::default()
        };
        assert!(config.day_plan().is_err());
    }

    #[test]
    fn dirs_config_path_ends_with_ro() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ro");
    }
}
