use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CINE_INTERVAL_MS, DEFAULT_WINDOW_CENTER, DEFAULT_WINDOW_WIDTH, FIT_MARGIN, MIN_WINDOW_WIDTH,
    WHEEL_ZOOM_STEP, ZOOM_STEP,
};
use crate::error::{MedviewError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Multiplier of the zoom in/out actions.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Multiplier of one Ctrl+wheel notch.
    #[serde(default = "default_wheel_zoom_step")]
    pub wheel_zoom_step: f64,
    /// Fraction of the view filled by fit-to-view.
    #[serde(default = "default_fit_margin")]
    pub fit_margin: f64,
    #[serde(default = "default_cine_interval_ms")]
    pub cine_interval_ms: u64,
    /// Sample the intensity under the cursor on every move.
    #[serde(default = "default_show_intensity")]
    pub show_intensity: bool,
    #[serde(default)]
    pub window: WindowLevel,
    #[serde(default = "default_presets")]
    pub presets: Vec<WindowPreset>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            fit_margin: FIT_MARGIN,
            cine_interval_ms: CINE_INTERVAL_MS,
            show_intensity: true,
            window: WindowLevel::default(),
            presets: default_presets(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Look up a window/level preset by name, ignoring case.
    pub fn preset(&self, name: &str) -> Result<WindowLevel> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .map(WindowPreset::window)
            .ok_or_else(|| MedviewError::UnknownPreset(name.to_string()))
    }
}

/// Display contrast pair handed to the decoding service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowLevel {
    pub width: f64,
    pub center: f64,
}

impl Default for WindowLevel {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            center: DEFAULT_WINDOW_CENTER,
        }
    }
}

impl WindowLevel {
    pub fn new(width: f64, center: f64) -> Self {
        Self { width, center }
    }

    /// The same pair with the width raised to at least [`MIN_WINDOW_WIDTH`].
    /// A width that is not finite becomes the minimum.
    pub fn clamped(self) -> Self {
        let width = if self.width.is_finite() {
            self.width.max(MIN_WINDOW_WIDTH)
        } else {
            MIN_WINDOW_WIDTH
        };
        Self { width, ..self }
    }
}

impl std::fmt::Display for WindowLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W: {} L: {}", self.width, self.center)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowPreset {
    pub name: String,
    pub width: f64,
    pub center: f64,
}

impl WindowPreset {
    fn new(name: &str, width: f64, center: f64) -> Self {
        Self {
            name: name.to_string(),
            width,
            center,
        }
    }

    pub fn window(&self) -> WindowLevel {
        WindowLevel::new(self.width, self.center)
    }
}

fn default_zoom_step() -> f64 {
    ZOOM_STEP
}

fn default_wheel_zoom_step() -> f64 {
    WHEEL_ZOOM_STEP
}

fn default_fit_margin() -> f64 {
    FIT_MARGIN
}

fn default_cine_interval_ms() -> u64 {
    CINE_INTERVAL_MS
}

fn default_show_intensity() -> bool {
    true
}

fn default_presets() -> Vec<WindowPreset> {
    vec![
        WindowPreset::new("Abdomen", 400.0, 40.0),
        WindowPreset::new("Lung", 1500.0, -600.0),
        WindowPreset::new("Brain", 80.0, 40.0),
        WindowPreset::new("Bone", 2000.0, 300.0),
        WindowPreset::new("Mediastinum", 350.0, 50.0),
        WindowPreset::new("Liver", 150.0, 30.0),
    ]
}
