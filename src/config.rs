use std::path::Path;
use anyhow::{Context, Result};
use serde::Deserialize;
use crate::constants::*;

/// Timing and presentation knobs. Every field defaults to the built-in
/// constant, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub autoplay_interval_ms: u64,
    pub double_tap_window_ms: u64,
    pub scroll_duration_ms: u64,
    pub settle_delay_ms: u64,
    pub dodge_range_px: f32,
    pub music_volume: f32,
    pub ken_burns_seconds: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            scroll_duration_ms: SCROLL_DURATION_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            dodge_range_px: DODGE_RANGE_PX,
            music_volume: MUSIC_VOLUME,
            ken_burns_seconds: KEN_BURNS_DURATION,
        }
    }
}

impl PlayerConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PlayerConfig = serde_yaml::from_str(contents)?;
        if !(0.0..=1.0).contains(&config.music_volume) {
            anyhow::bail!("music_volume must be between 0 and 1, got {}", config.music_volume);
        }
        if config.autoplay_interval_ms == 0 {
            anyhow::bail!("autoplay_interval_ms must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = PlayerConfig::from_yaml("autoplay_interval_ms: 3000\nmusic_volume: 0.2\n").unwrap();
        assert_eq!(config.autoplay_interval_ms, 3000);
        assert_eq!(config.music_volume, 0.2);
        assert_eq!(config.double_tap_window_ms, 300);
        assert_eq!(config.scroll_duration_ms, 1000);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(PlayerConfig::from_yaml("  \n").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(PlayerConfig::from_yaml("music_volume: 3.0").is_err());
        assert!(PlayerConfig::from_yaml("autoplay_interval_ms: 0").is_err());
        assert!(PlayerConfig::from_yaml("autoplay_interval_ms: soon").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms: 250").unwrap();
        let config = PlayerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.settle_delay_ms, 250);

        let missing = file.path().with_extension("missing");
        assert!(PlayerConfig::load_from(&missing).is_err());
    }
}
