//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray, RenderError, RenderResult,
};
use halo_math::{Interval, Vec3};

/// A sphere primitive.
///
/// The radius may be negative. That keeps the same surface but flips the
/// normal to point inward, which is how the inner wall of a hollow glass
/// shell is modelled.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere. A zero or non-finite radius is rejected.
    pub fn new(center: Vec3, radius: f32, material: M) -> RenderResult<Self> {
        if radius == 0.0 || !radius.is_finite() {
            return Err(RenderError::DegenerateSphere(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &M {
        &self.material
    }
}

impl<M: Material> Hittable for Sphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // a*t^2 + 2*b*t + c = 0
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        // Renormalize: for distant rays the f32 root puts p slightly off the
        // surface. Dividing by the signed radius keeps the inward flip.
        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: ((p - self.center) / self.radius).normalize(),
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn grey() -> Lambertian {
        Lambertian::new(Vec3::new(0.5, 0.5, 0.5))
    }

    fn interval() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, interval()).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey()).unwrap();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, interval()).is_none());
    }

    #[test]
    fn test_tangent_ray_misses() {
        // Grazes the sphere exactly: discriminant is zero
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, interval()).is_none());
    }

    #[test]
    fn test_far_root_used_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let rec = sphere.hit(&ray, interval()).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        let rec = sphere.hit(&ray, interval()).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.p - ray.at(rec.t)).length() < 1e-6);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let center = Vec3::new(-1.0, 0.0, -1.0);
        let outer = Sphere::new(center, 0.45, grey()).unwrap();
        let inner = Sphere::new(center, -0.45, grey()).unwrap();
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));

        let a = outer.hit(&ray, interval()).unwrap();
        let b = inner.hit(&ray, interval()).unwrap();
        assert!((a.t - b.t).abs() < 1e-6);
        assert!((a.normal + b.normal).length() < 1e-6);

        // Normal sign follows radius sign, length stays 1 regardless of scale
        assert!(b.normal.dot(b.p - center) < 0.0);
        assert!((b.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normal_unit_and_oriented_for_many_rays() {
        let center = Vec3::new(0.3, -0.2, -5.0);
        for radius in [2.5_f32, -2.5, 0.5, -0.5, 40.0] {
            let sphere = Sphere::new(center, radius, grey()).unwrap();
            for i in 0..20 {
                let offset = Vec3::new(i as f32 * 0.05 - 0.5, 0.1, 0.0) * radius.abs();
                let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), center + offset - Vec3::new(0.0, 0.0, 100.0));
                if let Some(rec) = sphere.hit(&ray, interval()) {
                    assert!((rec.normal.length() - 1.0).abs() < 1e-5);
                    assert_eq!(
                        rec.normal.dot(rec.p - center).signum(),
                        radius.signum()
                    );
                }
            }
        }
    }

    #[test]
    fn test_small_sphere_seen_from_afar_has_unit_normal() {
        let center = Vec3::new(0.0, 0.0, -5.0);
        let origin = Vec3::new(0.0, 0.0, 100.0);
        for radius in [0.5_f32, -0.5] {
            let sphere = Sphere::new(center, radius, grey()).unwrap();
            for i in 0..50 {
                let target = center + Vec3::new(i as f32 * 0.009 - 0.22, 0.13, 0.0);
                let ray = Ray::new(origin, target - origin);
                let rec = sphere.hit(&ray, interval()).unwrap();
                assert!((rec.normal.length() - 1.0).abs() < 1e-5);
                assert!(rec.normal.dot(rec.p - center) * radius > 0.0);
            }
        }
    }

    #[test]
    fn test_zero_radius_rejected() {
        assert!(matches!(
            Sphere::new(Vec3::ZERO, 0.0, grey()),
            Err(RenderError::DegenerateSphere(r)) if r == 0.0
        ));
        assert!(Sphere::new(Vec3::ZERO, f32::NAN, grey()).is_err());
    }
}
