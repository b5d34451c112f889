//! Halo Core - renderer-agnostic scene description and render settings.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `SphereDescription`, `MaterialDescription`
//! - **Render settings**: image size, sampling and camera configuration
//! - **Built-in scenes**: the small test scene and the random sphere field
//!
//! # Example
//!
//! ```ignore
//! use halo_core::{load_scene, RenderSettings};
//!
//! let settings = RenderSettings::from_file("render.json")?;
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres at {}x{}",
//!     scene.spheres.len(),
//!     settings.width,
//!     settings.height);
//! ```

pub mod builtin;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use builtin::{basic_scene, demo_scene, demo_settings};
pub use scene::{
    load_scene, load_scene_from_str, MaterialDescription, SceneDescription, SceneError,
    SceneResult, SphereDescription,
};
pub use settings::{CameraSettings, ConfigError, ConfigResult, RenderSettings};
