use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::aggregate::DEFAULT_TOP_N;

/// Env var naming an optional JSON config file.
pub const CONFIG_ENV: &str = "NUKE_EXPLORER_CONFIG";
/// Env var overriding the dataset path.
pub const DATA_ENV: &str = "NUKE_EXPLORER_DATA";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so an empty `{}` is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset opened at startup.
    pub dataset_path: PathBuf,
    /// Length of the "top test years" ranking.
    pub top_n: usize,
    /// Country preselected in the country pickers, when the data has it.
    pub default_country: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_path: PathBuf::from("nuclear_explosions.csv"),
            top_n: DEFAULT_TOP_N,
            default_country: "USA".to_string(),
        }
    }
}

impl Config {
    /// Read the config file named by [`CONFIG_ENV`] (if set), then apply
    /// the [`DATA_ENV`] override.
    pub fn from_env() -> Result<Self> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Config::from_file(Path::new(&path))?,
            None => Config::default(),
        };
        Ok(config.with_data_override(std::env::var_os(DATA_ENV).map(PathBuf::from)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Config::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_data_override(mut self, dataset_path: Option<PathBuf>) -> Self {
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = Config::from_json(r#"{"top_n": 10, "default_country": "USSR"}"#).unwrap();
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.default_country, "USSR");
        assert_eq!(cfg.dataset_path, PathBuf::from("nuclear_explosions.csv"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_json(r#"{"dataset": "x.csv"}"#).is_err());
    }

    #[test]
    fn data_override_wins() {
        let cfg = Config::default().with_data_override(Some(PathBuf::from("other.parquet")));
        assert_eq!(cfg.dataset_path, PathBuf::from("other.parquet"));
        assert_eq!(
            Config::default().with_data_override(None).dataset_path,
            PathBuf::from("nuclear_explosions.csv")
        );
    }

    #[test]
    fn missing_config_file_has_context() {
        let err = Config::from_file(Path::new("/no/such/explorer.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
