//! Game settings and tuning
//!
//! Persisted separately from the (ephemeral) session in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Presentation style; also picks the animation strategy the session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderStyle {
    /// Vector-drawn climber with eased arms
    #[default]
    Vector,
    /// Sprite-sheet climber with frame-queue animation
    Sprite,
}

impl RenderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Vector => "Vector",
            RenderStyle::Sprite => "Sprite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vector" | "vec" => Some(RenderStyle::Vector),
            "sprite" | "sprites" => Some(RenderStyle::Sprite),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Render/animation style
    pub style: RenderStyle,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Turn timing ===
    /// Countdown per turn (ms)
    pub max_time_ms: f64,
    /// Pixels between holds
    pub hold_spacing: f32,
    /// Time to scroll one hold (ms)
    pub scroll_duration_ms: f64,

    // === Animation ===
    /// Arm easing window (ms)
    pub arm_damping_ms: f64,
    /// Sprite playback rate (fps)
    pub frame_rate: f64,
    /// Frames per sprite row
    pub frames_per_row: u32,

    /// Start sessions in daylight
    pub start_in_day: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: RenderStyle::Vector,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            max_time_ms: MAX_TIME_MS,
            hold_spacing: HOLD_SPACING,
            scroll_duration_ms: SCROLL_DURATION_MS,

            arm_damping_ms: ARM_DAMPING_MS,
            frame_rate: FRAME_RATE,
            frames_per_row: DEFAULT_FRAMES_PER_ROW,

            start_in_day: true,
        }
    }
}

impl Settings {
    /// Default settings for a style
    pub fn from_style(style: RenderStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON settings document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width as f64),
            ("viewport_height", self.viewport_height as f64),
            ("max_time_ms", self.max_time_ms),
            ("hold_spacing", self.hold_spacing as f64),
            ("scroll_duration_ms", self.scroll_duration_ms),
            ("arm_damping_ms", self.arm_damping_ms),
            ("frame_rate", self.frame_rate),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::TooLarge {
                field: "frame_rate",
                value: self.frame_rate,
                max: MAX_FRAME_RATE,
            });
        }
        if self.frames_per_row == 0 {
            return Err(ConfigError::NoFrames);
        }
        Ok(())
    }

    /// Resize the viewport (canvas size is only known at startup)
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Holds kept on the wall for this viewport
    pub fn hold_queue_len(&self) -> usize {
        crate::hold_queue_len(self.viewport_height, self.hold_spacing)
    }

    /// Duration of one sprite frame (ms)
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }

    /// Scroll speed (px/ms)
    pub fn scroll_speed(&self) -> f64 {
        self.hold_spacing as f64 / self.scroll_duration_ms
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "wall_climber_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.max_time_ms, 3000.0);
        assert_eq!(s.hold_spacing, 120.0);
        assert_eq!(s.scroll_duration_ms, 400.0);
        assert!((s.scroll_speed() - 0.3).abs() < 1e-12);
        assert!((s.frame_duration_ms() - 1000.0 / 24.0).abs() < 1e-12);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "style": "Sprite", "viewport_height": 600.0 }"#).unwrap();
        assert_eq!(s.style, RenderStyle::Sprite);
        assert_eq!(s.hold_queue_len(), 7);
        assert_eq!(s.max_time_ms, MAX_TIME_MS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            Settings::from_json(r#"{ "max_time_ms": 0.0 }"#),
            Err(ConfigError::NonPositive {
                field: "max_time_ms",
                value: 0.0
            })
        );
        assert_eq!(
            Settings::from_json(r#"{ "frames_per_row": 0 }"#),
            Err(ConfigError::NoFrames)
        );
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_runaway_frame_rate() {
        assert_eq!(
            Settings::from_json(r#"{ "style": "Sprite", "frame_rate": 1e12 }"#),
            Err(ConfigError::TooLarge {
                field: "frame_rate",
                value: 1e12,
                max: MAX_FRAME_RATE
            })
        );
        assert!(Settings::from_json(r#"{ "frame_rate": 1000.0 }"#).is_ok());
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!(RenderStyle::from_str("SPRITE"), Some(RenderStyle::Sprite));
        assert_eq!(RenderStyle::from_str("vec"), Some(RenderStyle::Vector));
        assert_eq!(RenderStyle::from_str("pixel"), None);
        assert_eq!(RenderStyle::Sprite.as_str(), "Sprite");
    }
}
