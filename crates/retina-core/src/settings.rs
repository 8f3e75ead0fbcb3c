use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// User-tunable defaults, read once at startup.
///
/// Stored as JSON in `<config dir>/retina/settings.json`. Every field is
/// optional in the file; missing ones keep their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Factor applied to both axes of every loaded image.
    pub load_scale: f32,
    /// Side of the Gaussian kernel used by "Apply Filter". Must be odd.
    pub blur_kernel_size: u32,
    /// RGB color used to outline contours.
    pub contour_color: [u8; 3],
    /// Side of each square image surface, in logical pixels.
    pub canvas_size: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            load_scale: 0.3,
            blur_kernel_size: 15,
            contour_color: [0, 255, 0],
            canvas_size: 400.0,
            window_width: 1200.0,
            window_height: 720.0,
        }
    }
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("retina").join("settings.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse settings: {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from the config directory, or defaults if the file is
    /// absent or unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                info!(?path, "settings loaded");
                settings
            }
            Err(err) => {
                warn!(?path, %err, "ignoring settings file");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.load_scale > 0.0 && self.load_scale <= 1.0,
            "load_scale must be in (0, 1], got {}",
            self.load_scale
        );
        anyhow::ensure!(
            self.blur_kernel_size % 2 == 1,
            "blur_kernel_size must be odd, got {}",
            self.blur_kernel_size
        );
        for (name, value) in [
            ("canvas_size", self.canvas_size),
            ("window_width", self.window_width),
            ("window_height", self.window_height),
        ] {
            anyhow::ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be positive, got {value}"
            );
        }
        Ok(())
    }
}
