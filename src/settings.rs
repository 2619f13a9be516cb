//! Game settings and tuning
//!
//! Read from JSON (a file on native, LocalStorage on the web). Only tuning is
//! stored; the score itself always starts from zero.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl SessionQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionQuality::Low => "Low",
            SessionQuality::Medium => "Medium",
            SessionQuality::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(SessionQuality::Low),
            "medium" | "med" => Some(SessionQuality::Medium),
            "high" => Some(SessionQuality::High),
            _ => None,
        }
    }

    /// Physics substeps per simulation tick
    pub fn substeps(&self) -> u32 {
        match self {
            SessionQuality::Low => 1,
            SessionQuality::Medium => 2,
            SessionQuality::High => 4,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics quality preset
    pub quality: SessionQuality,

    // === Throw ===
    /// Impulse magnitude applied to each ball
    pub throw_power: f32,
    /// Ball radius (m)
    pub ball_radius: f32,
    /// Ball mass (kg)
    pub ball_mass: f32,

    // === Surfaces ===
    /// Wall rectangle color (RGBA)
    pub surface_color: [f32; 4],
    /// Wall rectangle opacity (0.0 - 1.0)
    pub surface_opacity: f32,

    // === HUD ===
    /// Show the host's fps/timing overlay
    pub show_statistics: bool,

    // === Assets ===
    pub hoop_asset: String,
    pub backboard_texture: String,
    pub ball_texture: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: SessionQuality::Medium,

            throw_power: THROW_POWER,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,

            surface_color: [0.0, 0.0, 1.0, 1.0],
            surface_opacity: SURFACE_OPACITY,

            show_statistics: true,

            hoop_asset: "art.scnassets/Hoop.scn".to_string(),
            backboard_texture: "art.scnassets/backboard.jpg".to_string(),
            ball_texture: "basketball".to_string(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: SessionQuality) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp values the physics can't use back to defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            self.ball_radius = defaults.ball_radius;
        }
        if !(self.ball_mass.is_finite() && self.ball_mass > 0.0) {
            self.ball_mass = defaults.ball_mass;
        }
        if !(self.throw_power.is_finite() && self.throw_power > 0.0) {
            self.throw_power = defaults.throw_power;
        }
        self.surface_opacity = self.surface_opacity.clamp(0.0, 1.0);
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "ar_hoops_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
