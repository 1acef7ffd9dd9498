//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `tiles.json`, `checks.json`, `items.json` and `events.json`.
    pub metadata_dir: PathBuf,

    /// Number of most recent attempts in the rolling average.
    pub rolling_window: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("metadata_dir", &self.metadata_dir)
            .field("rolling_window", &self.rolling_window)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            metadata_dir: data_dir.join("metadata"),
            rolling_window: 5,
        }
    }
}

impl Config {
    /// Resolves the configuration from, lowest precedence first: built-in
    /// defaults, `<config_dir>/rt/config.toml`, the file given with
    /// `--config`, then `RT_METADATA_DIR` / `RT_ROLLING_WINDOW`.
    ///
    /// Missing files are skipped; a present but malformed one is an error.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let user_file = dirs_config_path().map(|dir| dir.join("config.toml"));

        let figment = [user_file.as_deref(), config_path]
            .into_iter()
            .flatten()
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed("RT_"));

        let config: Self = figment.extract()?;
        if config.rolling_window == 0 {
            tracing::warn!("rolling_window is 0, rolling averages will be empty");
        }
        Ok(config)
    }
}

/// Returns the platform-specific config directory for rt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rt"))
}

/// Returns the platform-specific data directory for rt.
///
/// On Linux: `~/.local/share/rt`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_rt() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "rt");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_metadata() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.metadata_dir, data_dir.join("metadata"));
        assert_eq!(config.rolling_window, 5);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "metadata_dir = \"/srv/rt/meta\"\nrolling_window = 3\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.metadata_dir, PathBuf::from("/srv/rt/meta"));
        assert_eq!(config.rolling_window, 3);
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "rolling_window = \"five\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
