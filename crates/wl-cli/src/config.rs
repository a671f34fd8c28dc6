//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// `employee` and `day` are display context only; the engine never sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name shown in the header.
    pub employee: String,

    /// Day shown in the header.
    pub day: NaiveDate,

    /// Width of the timeline bar in characters.
    pub timeline_width: usize,

    /// Start with the demo day instead of an empty one.
    pub start_with_sample: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            employee: "Vít Geisselreiter".to_string(),
            day: Local::now().date_naive(),
            timeline_width: 72,
            start_with_sample: true,
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

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // WL_EMPLOYEE, WL_DAY, WL_TIMELINE_WIDTH, WL_START_WITH_SAMPLE
        figment = figment.merge(Env::prefixed("WL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for wl.
///
/// On Linux: `~/.config/wl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}
