//! Material trait for surface scattering.

use std::sync::Arc;

use halo_core::MaterialDescription;
use halo_math::{Interval, Vec3};
use rand::RngCore;

use crate::sampling::{gen_f32, random_in_unit_sphere};
use crate::{hittable::HitRecord, Ray};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a scatter event that did not absorb the ray.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the incoming light that survives the bounce
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. All randomness comes from `rng`.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

impl<M: Material + ?Sized> Material for Box<M> {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        (**self).scatter(ray_in, rec, rng)
    }
}

impl<M: Material + ?Sized> Material for Arc<M> {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        (**self).scatter(ray_in, rec, rng)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // The sample lies strictly inside the unit sphere, so the sum with a
        // unit normal is never zero.
        let scatter_direction = rec.normal + random_in_unit_sphere(rng);

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        let clamped = Interval::UNIT.clamp(fuzz);
        if !Interval::UNIT.contains(fuzz) {
            log::warn!("Metal fuzz {} clamped to {}", fuzz, clamped);
        }
        Self {
            albedo,
            fuzz: clamped,
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut reflected = reflect(ray_in.direction().normalize(), rec.normal);
        if self.fuzz > 0.0 {
            reflected += self.fuzz * random_in_unit_sphere(rng);
        }

        // A fuzzed reflection that points into the surface is absorbed
        if reflected.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, reflected),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn refractive_index(&self) -> f32 {
        self.ior
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let unit_direction = ray_in.direction().normalize();

        // Leaving the medium when travelling along the normal
        let exiting = unit_direction.dot(rec.normal) > 0.0;
        let (outward_normal, ni_over_nt) = if exiting {
            (-rec.normal, self.ior)
        } else {
            (rec.normal, 1.0 / self.ior)
        };

        let direction = match refract(unit_direction, outward_normal, ni_over_nt) {
            Some(refracted) => {
                // Schlick wants the angle measured on the outside of the surface
                let cosine = if exiting {
                    -refracted.dot(outward_normal)
                } else {
                    -unit_direction.dot(outward_normal)
                };
                if gen_f32(rng) < schlick(cosine, self.ior) {
                    reflect(unit_direction, rec.normal)
                } else {
                    refracted
                }
            }
            // Total internal reflection
            None => reflect(unit_direction, rec.normal),
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

impl From<&MaterialDescription> for Box<dyn Material> {
    fn from(desc: &MaterialDescription) -> Self {
        match *desc {
            MaterialDescription::Lambertian { albedo } => Box::new(Lambertian::new(albedo)),
            MaterialDescription::Metal { albedo, fuzz } => Box::new(Metal::new(albedo, fuzz)),
            MaterialDescription::Dielectric { refractive_index } => {
                Box::new(Dielectric::new(refractive_index))
            }
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with Snell's law.
///
/// `n` must face the incoming side. Returns `None` on total internal
/// reflection. The result is unit length.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for Fresnel reflectance.
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((ior - 1.0) / (ior + 1.0)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
