//! Game configuration
//!
//! Read once at startup. Browser builds accept a JSON override in
//! LocalStorage; native builds use the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{GLYPH_HEIGHT, GLYPH_WIDTH, TARGET_FPS};
use crate::sim::BoundaryPolicy;

/// Where the glyph sheet lives and how it is divided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// File path (native) or URL relative to the page (web)
    pub path: String,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            path: "assets/pixfont.png".to_string(),
            cell_width: GLYPH_WIDTH as u32,
            cell_height: GLYPH_HEIGHT as u32,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What happens when the ship or an asteroid reaches an edge
    pub boundary: BoundaryPolicy,
    /// Simulation frames per second
    pub target_fps: u32,
    /// Fixed RNG seed; `None` derives one from the clock
    pub seed: Option<u64>,
    pub font: FontSettings,
    /// Length of the native headless session
    pub headless_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            target_fps: TARGET_FPS,
            seed: None,
            font: FontSettings::default(),
            headless_frames: 600,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "spacegame_settings";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.target_fps == 0 {
            log::warn!("target_fps of 0 ignored, using {}", TARGET_FPS);
            settings.target_fps = TARGET_FPS;
        }
        Ok(settings)
    }

    /// Parse an optional override, falling back to defaults when it is absent
    /// or malformed
    pub fn from_override(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings override");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Seed to use for a new session
    pub fn resolve_seed(&self, clock_ms: f64) -> u64 {
        self.seed.unwrap_or(clock_ms as u64)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        Self::from_override(json.as_deref())
    }

    /// Native builds have no settings store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings store for key {}", Self::STORAGE_KEY);
        Self::from_override(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.boundary, BoundaryPolicy::Wrap);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.font.path, "assets/pixfont.png");
        assert_eq!((settings.font.cell_width, settings.font.cell_height), (12, 16));
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"boundary": "bounce", "seed": 7}"#).unwrap();
        assert_eq!(settings.boundary, BoundaryPolicy::Bounce);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.font, FontSettings::default());
    }

    #[test]
    fn test_nested_font_override() {
        let settings = Settings::from_json(r#"{"font": {"cell_width": 8}}"#).unwrap();
        assert_eq!(settings.font.cell_width, 8);
        assert_eq!(settings.font.cell_height, 16);
    }

    #[test]
    fn test_zero_fps_replaced() {
        let settings = Settings::from_json(r#"{"target_fps": 0}"#).unwrap();
        assert_eq!(settings.target_fps, 60);
    }

    #[test]
    fn test_invalid_override_falls_back() {
        assert_eq!(Settings::from_override(Some("{nope")), Settings::default());
        assert_eq!(
            Settings::from_override(Some(r#"{"boundary": "sideways"}"#)),
            Settings::default()
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: Some(42),
            boundary: BoundaryPolicy::Bounce,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_resolve_seed() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_seed(1500.7), 1500);
        settings.seed = Some(3);
        assert_eq!(settings.resolve_seed(1500.7), 3);
    }
}
