//! Optional `snake.toml` loader.
//!
//! Every key has a default, so a missing file or a partial file is fine.
//! A file that fails to parse or validate is reported and ignored.

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "snake.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub speed: SpeedConfig,
    pub storage: StorageConfig,
}

/// Play field size in pixels. Both sides must be multiples of `cell_size`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

/// Tick intervals in milliseconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    pub base_ms: u32,
    pub min_ms: u32,
    pub step_ms: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub high_score_key: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig { width: 500, height: 500, cell_size: 25 }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        SpeedConfig { base_ms: 200, min_ms: 50, step_ms: 10 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: "snake_save.json".into(),
            high_score_key: "hiscore".into(),
        }
    }
}

impl FieldConfig {
    pub fn cols(&self) -> i32 { self.width / self.cell_size }
    pub fn rows(&self) -> i32 { self.height / self.cell_size }
}

impl SpeedConfig {
    /// Tick interval for a given score: shrinks by `step_ms` per point, floored at `min_ms`.
    pub fn interval_for(&self, score: u32) -> u32 {
        self.base_ms
            .saturating_sub(score.saturating_mul(self.step_ms))
            .max(self.min_ms)
    }
}

impl GameConfig {
    /// Load `snake.toml` from the working directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return GameConfig::default();
        }
        match Self::read(path) {
            Ok(cfg) => {
                info!("loaded {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("{}: {e}; using default settings", path.display());
                GameConfig::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.field;
        if f.cell_size <= 0 {
            return Err(ConfigError::Invalid(format!("cell_size must be positive, got {}", f.cell_size)));
        }
        if f.width < f.cell_size || f.width % f.cell_size != 0 {
            return Err(ConfigError::Invalid(format!(
                "width {} is not a positive multiple of cell_size {}",
                f.width, f.cell_size
            )));
        }
        if f.height < f.cell_size || f.height % f.cell_size != 0 {
            return Err(ConfigError::Invalid(format!(
                "height {} is not a positive multiple of cell_size {}",
                f.height, f.cell_size
            )));
        }
        if self.speed.min_ms > self.speed.base_ms {
            return Err(ConfigError::Invalid(format!(
                "min_ms {} exceeds base_ms {}",
                self.speed.min_ms, self.speed.base_ms
            )));
        }
        if self.storage.high_score_key.is_empty() {
            return Err(ConfigError::Invalid("high_score_key is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::parse("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.field.cols(), 20);
        assert_eq!(cfg.field.rows(), 20);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::parse(
            "[field]\nwidth = 600\n\n[storage]\npath = \"elsewhere.json\"\n",
        )
        .unwrap();
        assert_eq!(cfg.field.width, 600);
        assert_eq!(cfg.field.height, 500);
        assert_eq!(cfg.field.cell_size, 25);
        assert_eq!(cfg.storage.path, "elsewhere.json");
        assert_eq!(cfg.storage.high_score_key, "hiscore");
        assert_eq!(cfg.speed, SpeedConfig::default());
    }

    #[test]
    fn misaligned_field_is_rejected() {
        let err = GameConfig::parse("[field]\nwidth = 510\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn min_above_base_is_rejected() {
        let err = GameConfig::parse("[speed]\nbase_ms = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = GameConfig::parse("[field\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("snake_rounded_no_such_config.toml");
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
    }

    #[test]
    fn interval_shrinks_and_floors() {
        let speed = SpeedConfig::default();
        assert_eq!(speed.interval_for(0), 200);
        assert_eq!(speed.interval_for(1), 190);
        assert_eq!(speed.interval_for(15), 50);
        assert_eq!(speed.interval_for(16), 50);
        assert_eq!(speed.interval_for(u32::MAX), 50);

        let mut last = speed.interval_for(0);
        for score in 1..40 {
            let next = speed.interval_for(score);
            assert!(next <= last);
            assert!(next >= 50);
            last = next;
        }
    }
}
