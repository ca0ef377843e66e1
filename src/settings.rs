//! Rendering settings, persisted as JSON

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SAMPLE_RATE;

/// Output and lookup settings
///
/// Missing fields in a settings file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Samples per channel pulled from a playable sound at a time
    pub chunk_size: usize,
    /// Gain applied to rendered sounds (0.0 - 1.0)
    pub master_volume: f32,

    // === Assets ===
    /// Level directory whose `colors/` subdirectory holds named colors
    pub level_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            chunk_size: 1024,
            master_volume: 1.0,
            level_dir: None,
        }
    }
}

impl Settings {
    /// Master volume limited to the valid range
    pub fn effective_volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0)
    }

    /// Chunk size, never zero
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(err) => log::warn!("Ignoring malformed settings {}: {err}", path.display()),
            },
            Err(err) => log::warn!("Could not read settings {}: {err}", path.display()),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "sample_rate": 22050 }"#).unwrap();
        assert_eq!(settings.sample_rate, 22_050);
        assert_eq!(settings.chunk_size, Settings::default().chunk_size);
        assert_eq!(settings.level_dir, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            sample_rate: 48_000,
            chunk_size: 256,
            master_volume: 0.5,
            level_dir: Some(PathBuf::from("levels/one")),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_or_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("missing.json")), Settings::default());

        let malformed = dir.path().join("malformed.json");
        std::fs::write(&malformed, "not json").unwrap();
        assert_eq!(Settings::load(&malformed), Settings::default());
    }

    #[test]
    fn test_effective_values() {
        let settings = Settings {
            master_volume: 3.0,
            chunk_size: 0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 1.0);
        assert_eq!(settings.effective_chunk_size(), 1);
    }
}
