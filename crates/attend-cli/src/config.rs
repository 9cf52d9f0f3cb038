//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// The configured address of the record store.
    pub store_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("store_path", &self.store_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            store_path: data_dir.join("attend.db"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Layering, lowest precedence first: built-in defaults, the
    /// platform config file, the `--config` file, `ATTEND_`-prefixed
    /// environment variables.
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

        figment = figment.merge(Env::prefixed("ATTEND_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for attend.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attend"))
}

/// Returns the platform-specific data directory for attend.
///
/// On Linux: `~/.local/share/attend`
fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("attend"))
}
