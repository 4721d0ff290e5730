//! Configuration management
//!
//! Frame rate, preset names, and the marker palette are injected through
//! this struct rather than read from ambient globals, so individual runs
//! (and tests) can vary them.

use crate::core::models::enums::MarkerColor;
use crate::core::models::results::CoreResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preset names the guide generator assumes unless told otherwise
pub const DEFAULT_COLOR_PRESET: &str = "PunchyContrast";
pub const DEFAULT_VIGNETTE_PRESET: &str = "VignetteMedium";

/// Marker application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Fixed timeline frame rate; the media itself is never probed
    pub frame_rate: i64,
    /// Timeline the markers land on
    pub timeline_name: String,
    /// Color grade preset advertised in marker notes
    pub color_preset: String,
    /// Vignette preset advertised in marker notes
    pub vignette_preset: String,
    /// Intensity scale palette, index 0 holding intensity 1
    pub palette: Vec<MarkerColor>,
    /// External bridge command for reaching the editing host
    pub bridge_cmd: Option<String>,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            timeline_name: "T1".to_string(),
            color_preset: DEFAULT_COLOR_PRESET.to_string(),
            vignette_preset: DEFAULT_VIGNETTE_PRESET.to_string(),
            palette: vec![
                MarkerColor::Green,
                MarkerColor::Cyan,
                MarkerColor::Yellow,
                MarkerColor::Orange,
                MarkerColor::Red,
            ],
            bridge_cmd: None,
        }
    }
}

impl ApplyConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&contents)?;
            Ok(config)
        } else {
            // Return default if file doesn't exist
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Marker color for an intensity; anything outside the palette is blue
    pub fn color_for_intensity(&self, intensity: i64) -> MarkerColor {
        if intensity < 1 {
            return MarkerColor::Blue;
        }
        self.palette
            .get((intensity - 1) as usize)
            .copied()
            .unwrap_or(MarkerColor::Blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ApplyConfig::default();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.timeline_name, "T1");
        assert_eq!(config.color_preset, "PunchyContrast");
        assert_eq!(config.vignette_preset, "VignetteMedium");
        assert_eq!(config.palette.len(), 5);
        assert!(config.bridge_cmd.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = ApplyConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: ApplyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.frame_rate, deserialized.frame_rate);
        assert_eq!(config.palette, deserialized.palette);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apply.json");

        let mut config = ApplyConfig::default();
        config.frame_rate = 24;
        config.color_preset = "FilmLook".to_string();
        config.save(&path).unwrap();

        let loaded = ApplyConfig::load(&path).unwrap();
        assert_eq!(loaded.frame_rate, 24);
        assert_eq!(loaded.color_preset, "FilmLook");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = ApplyConfig::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(loaded.frame_rate, 30);
    }

    #[test]
    fn test_color_for_intensity() {
        let config = ApplyConfig::default();
        assert_eq!(config.color_for_intensity(1), MarkerColor::Green);
        assert_eq!(config.color_for_intensity(2), MarkerColor::Cyan);
        assert_eq!(config.color_for_intensity(3), MarkerColor::Yellow);
        assert_eq!(config.color_for_intensity(4), MarkerColor::Orange);
        assert_eq!(config.color_for_intensity(5), MarkerColor::Red);
        assert_eq!(config.color_for_intensity(0), MarkerColor::Blue);
        assert_eq!(config.color_for_intensity(6), MarkerColor::Blue);
        assert_eq!(config.color_for_intensity(-2), MarkerColor::Blue);
    }
}
