use crate::error::{NormalizerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct NormalizerConfig {
    /// Pins the season year used for season-best selection. When absent the
    /// CLI falls back to the wall-clock year; the library never reads the
    /// clock itself.
    pub current_year: Option<i32>,
    /// Extra event-label markers treated as mark events (higher is better),
    /// on top of the built-in discipline lexicon.
    #[serde(default)]
    pub extra_mark_events: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Loads a TOML config file, falling back to defaults when the file does
    /// not exist so the CLI works with zero setup.
    pub fn load_from(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            NormalizerError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from("does-not-exist.toml").unwrap();
        assert!(config.normalizer.current_year.is_none());
        assert!(config.normalizer.extra_mark_events.is_empty());
    }

    #[test]
    fn test_loads_normalizer_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[normalizer]\ncurrent_year = 2024\nextra_mark_events = [\"decathlon\"]"
        )
        .unwrap();

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.normalizer.current_year, Some(2024));
        assert_eq!(config.normalizer.extra_mark_events, vec!["decathlon"]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[normalizer\ncurrent_year = ").unwrap();

        assert!(Config::load_from(path.to_str().unwrap()).is_err());
    }
}
