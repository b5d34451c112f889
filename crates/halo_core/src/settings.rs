//! Render settings.
//!
//! Everything the renderer needs besides the scene itself: image size,
//! sampling, bounce limit and the camera. Settings load from JSON with every
//! field defaulted, so a config file only has to name what it changes.

use std::path::Path;

use halo_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Camera placement and lens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter; 0 gives a pinhole camera with no defocus blur
    pub aperture: f32,
    /// Distance to the plane of perfect focus (defaults to |look_from - look_to|)
    pub focus_distance: Option<f32>,
    pub look_from: Vec3,
    pub look_to: Vec3,
    pub look_up: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            vfov: 45.0,
            aperture: 0.0,
            focus_distance: None,
            look_from: Vec3::ZERO,
            look_to: Vec3::new(0.0, 0.0, -1.0),
            look_up: Vec3::Y,
        }
    }
}

impl CameraSettings {
    /// The focus distance actually used for rendering.
    pub fn effective_focus_distance(&self) -> f32 {
        self.focus_distance
            .unwrap_or_else(|| (self.look_from - self.look_to).length())
    }
}

/// Complete render configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Bounce limit before a path contributes black
    pub max_depth: u32,
    /// Base seed for the per-tile random streams
    pub seed: u64,
    /// Worker thread count (None = one per core)
    pub threads: Option<usize>,
    pub camera: CameraSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            threads: None,
            camera: CameraSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Load and validate settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Image aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Reject settings the camera or sampler cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples per pixel must be at least 1");
        }
        if self.max_depth == 0 {
            return invalid("max depth must be at least 1");
        }
        if self.threads == Some(0) {
            return invalid("thread count must be at least 1");
        }

        let camera = &self.camera;
        if !Interval::new(0.0, 180.0).surrounds(camera.vfov) {
            return invalid(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                camera.vfov
            ));
        }
        if !camera.aperture.is_finite() || camera.aperture < 0.0 {
            return invalid(format!(
                "aperture must be non-negative, got {}",
                camera.aperture
            ));
        }
        let focus = camera.effective_focus_distance();
        if !focus.is_finite() || focus <= 0.0 {
            return invalid(format!("focus distance must be positive, got {}", focus));
        }

        let view = camera.look_to - camera.look_from;
        if view.length_squared() == 0.0 {
            return invalid("look_from and look_to must differ");
        }
        if camera.look_up.cross(view).length_squared() < 1e-12 {
            return invalid("look_up must not be parallel to the view direction");
        }
        Ok(())
    }
}

fn invalid<T>(message: impl Into<String>) -> ConfigResult<T> {
    Err(ConfigError::Invalid(message.into()))
}
