//! Scene description types.
//!
//! A scene is an ordered list of spheres, each owning its material. The
//! description is plain data: it can be built in code or loaded from JSON,
//! and the renderer turns it into intersectable geometry.

use std::path::Path;

use halo_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} has degenerate radius {radius}")]
    DegenerateSphere { index: usize, radius: f32 },

    #[error("Sphere {index} has an invalid material: {reason}")]
    InvalidMaterial { index: usize, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Surface material, one of the three supported scattering models.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Diffuse surface.
    Lambertian { albedo: Vec3 },

    /// Mirror-like surface; `fuzz` in [0, 1] blurs the reflection.
    Metal {
        albedo: Vec3,
        #[serde(default)]
        fuzz: f32,
    },

    /// Clear refractive surface such as glass (1.5) or water (1.33).
    Dielectric { refractive_index: f32 },
}

impl MaterialDescription {
    fn validate(&self) -> Result<(), String> {
        match *self {
            MaterialDescription::Lambertian { albedo } => check_color(albedo),
            MaterialDescription::Metal { albedo, fuzz } => {
                check_color(albedo)?;
                if !fuzz.is_finite() {
                    return Err(format!("fuzz must be finite, got {}", fuzz));
                }
                Ok(())
            }
            MaterialDescription::Dielectric { refractive_index } => {
                if !refractive_index.is_finite() || refractive_index <= 0.0 {
                    return Err(format!(
                        "refractive index must be positive, got {}",
                        refractive_index
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_color(albedo: Vec3) -> Result<(), String> {
    if albedo.is_finite() {
        Ok(())
    } else {
        Err(format!("albedo must be finite, got {}", albedo))
    }
}

/// A sphere in the scene.
///
/// A negative radius is allowed and turns the sphere inside out: its normals
/// point toward the center. Nested inside a regular sphere of the same
/// dielectric it forms a hollow glass shell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialDescription,
}

impl SphereDescription {
    /// Create a new sphere description.
    pub fn new(center: Vec3, radius: f32, material: MaterialDescription) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// The complete scene: an ordered list of spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spheres: Vec::new(),
        }
    }

    /// Append a sphere.
    pub fn push(&mut self, sphere: SphereDescription) {
        self.spheres.push(sphere);
    }

    /// Number of spheres in the scene.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True if the scene contains no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Check every sphere for a usable radius and material.
    ///
    /// A zero radius would divide by zero when computing hit normals, so it
    /// is rejected here rather than in the intersection code.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if sphere.radius == 0.0 || !sphere.radius.is_finite() || !sphere.center.is_finite() {
                return Err(SceneError::DegenerateSphere {
                    index,
                    radius: sphere.radius,
                });
            }
            sphere
                .material
                .validate()
                .map_err(|reason| SceneError::InvalidMaterial { index, reason })?;
        }
        Ok(())
    }
}

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;
    log::info!(
        "Loaded scene '{}' from {} ({} spheres)",
        scene.name,
        path.display(),
        scene.len()
    );
    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}
