//! Camera for ray generation.

use crate::{sampling::random_in_unit_disk, Ray};
use halo_core::RenderSettings;
use halo_math::Vec3;
use rand::RngCore;

/// Thin-lens camera.
///
/// Maps image-plane coordinates `(u, v)` in [0, 1]² to world rays. `u` runs
/// left to right and `v` runs bottom to top. Every setter rebuilds the whole
/// derived frame, so the cached basis is never stale.
#[derive(Debug, Clone)]
pub struct Camera {
    // Lens settings
    vfov: f32,           // Vertical field of view in degrees
    aspect: f32,         // Width / height
    aperture: f32,       // Lens diameter
    focus_distance: f32, // Distance from camera to plane of perfect focus

    // Camera positioning
    look_from: Vec3,
    look_to: Vec3,
    look_up: Vec3,

    // Derived frame
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera at the origin looking down -Z with +Y up.
    pub fn new(vfov: f32, aspect: f32, aperture: f32, focus_distance: f32) -> Self {
        let mut camera = Self {
            vfov,
            aspect,
            aperture,
            focus_distance,
            look_from: Vec3::ZERO,
            look_to: Vec3::new(0.0, 0.0, -1.0),
            look_up: Vec3::Y,
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.update();
        camera
    }

    /// Build the camera described by render settings.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let cam = &settings.camera;
        Self::new(
            cam.vfov,
            settings.aspect_ratio(),
            cam.aperture,
            cam.effective_focus_distance(),
        )
        .with_look(cam.look_from, cam.look_to, cam.look_up)
    }

    /// Set camera position and orientation.
    pub fn with_look(mut self, look_from: Vec3, look_to: Vec3, look_up: Vec3) -> Self {
        self.set_look(look_from, look_to, look_up);
        self
    }

    /// Set camera position and orientation in place.
    pub fn set_look(&mut self, look_from: Vec3, look_to: Vec3, look_up: Vec3) {
        self.look_from = look_from;
        self.look_to = look_to;
        self.look_up = look_up;
        self.update();
    }

    /// Set lens settings.
    pub fn set_lens(&mut self, vfov: f32, aperture: f32, focus_distance: f32) {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self.update();
    }

    /// Set the image aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update();
    }

    fn update(&mut self) {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect * half_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_to).normalize();
        self.u = self.look_up.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // The viewport sits on the focal plane, so anything at focus_distance
        // is sharp whatever the aperture.
        let focus = self.focus_distance;
        self.origin = self.look_from;
        self.horizontal = 2.0 * half_width * focus * self.u;
        self.vertical = 2.0 * half_height * focus * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - focus * self.w;
        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through image-plane point `(s, t)`.
    ///
    /// With a non-zero aperture the ray starts at a random point on the lens
    /// but still passes through the same focal-plane point.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let ray_origin = self.origin + offset;
        Ray::new(ray_origin, target - ray_origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal camera frame: (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(90.0, 2.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_pose() {
        let camera = Camera::new(90.0, 2.0, 0.0, 1.0);
        let (u, v, w) = camera.basis();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!(close(u, Vec3::X));
        assert!(close(v, Vec3::Y));
        assert!(close(w, Vec3::Z));
    }

    #[test]
    fn test_classic_viewport() {
        // 90 degrees at aspect 2 gives the familiar 4x2 viewport at z = -1
        let camera = Camera::new(90.0, 2.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(close(ray.direction(), Vec3::new(-2.0, -1.0, -1.0)));

        let ray = camera.get_ray(1.0, 1.0, &mut rng);
        assert!(close(ray.direction(), Vec3::new(2.0, 1.0, -1.0)));
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::new(45.0, 1.5, 0.0, 3.0)
            .with_look(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, -7.0), Vec3::Y);
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        assert!(close(ray.direction(), Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_v_runs_bottom_to_top() {
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(0);

        let bottom = camera.get_ray(0.5, 0.0, &mut rng);
        let top = camera.get_ray(0.5, 1.0, &mut rng);
        assert!(bottom.direction().y < 0.0);
        assert!(top.direction().y > 0.0);

        let left = camera.get_ray(0.0, 0.5, &mut rng);
        let right = camera.get_ray(1.0, 0.5, &mut rng);
        assert!(left.direction().x < 0.0);
        assert!(right.direction().x > 0.0);
    }

    #[test]
    fn test_basis_orthonormal_for_arbitrary_look() {
        let camera = Camera::new(30.0, 1.0, 0.0, 1.0).with_look(
            Vec3::new(8.0, 2.0, 2.0),
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::Y,
        );
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(u.dot(v).abs() < 1e-5);
        assert!(v.dot(w).abs() < 1e-5);
        assert!(u.dot(w).abs() < 1e-5);
        assert!(close(w, (Vec3::new(8.0, 2.0, 2.0) - Vec3::new(0.0, -0.5, 0.0)).normalize()));
    }

    #[test]
    fn test_set_look_recomputes_everything() {
        let mut camera = Camera::new(90.0, 1.0, 0.0, 2.0);
        camera.set_look(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);

        let fresh = Camera::new(90.0, 1.0, 0.0, 2.0)
            .with_look(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);

        let mut rng = StdRng::seed_from_u64(0);
        for (s, t) in [(0.0, 0.0), (0.25, 0.8), (1.0, 1.0)] {
            let a = camera.get_ray(s, t, &mut rng);
            let b = fresh.get_ray(s, t, &mut rng);
            assert_eq!(a, b);
        }

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert!(close(ray.direction(), Vec3::new(-2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_set_lens_and_aspect_rebuild_frame() {
        let look_from = Vec3::new(1.0, 3.0, 4.0);
        let look_to = Vec3::new(0.0, 0.5, -1.0);
        let mut camera = Camera::new(90.0, 1.0, 0.0, 1.0).with_look(look_from, look_to, Vec3::Y);
        camera.set_lens(35.0, 0.0, 2.5);
        camera.set_aspect(1.5);

        let fresh = Camera::new(35.0, 1.5, 0.0, 2.5).with_look(look_from, look_to, Vec3::Y);
        assert_eq!(camera.focus_distance(), 2.5);
        assert_eq!(camera.lens_radius(), 0.0);

        let mut rng = StdRng::seed_from_u64(0);
        for (s, t) in [(0.0, 0.0), (0.7, 0.2), (1.0, 1.0)] {
            let a = camera.get_ray(s, t, &mut rng);
            let b = fresh.get_ray(s, t, &mut rng);
            assert!(close(a.origin(), b.origin()));
            assert!(close(a.direction(), b.direction()));
        }

        // Wider frame: the right edge moves further out than the top edge
        let right = camera.get_ray(1.0, 0.5, &mut rng).direction() - camera.get_ray(0.5, 0.5, &mut rng).direction();
        let top = camera.get_ray(0.5, 1.0, &mut rng).direction() - camera.get_ray(0.5, 0.5, &mut rng).direction();
        assert!((right.length() / top.length() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_set_lens_opens_aperture() {
        let mut camera = Camera::default();
        camera.set_lens(90.0, 0.4, 1.0);
        assert!((camera.lens_radius() - 0.2).abs() < 1e-6);

        let mut rng = StdRng::seed_from_u64(3);
        let moved = (0..20).any(|_| camera.get_ray(0.5, 0.5, &mut rng).origin() != camera.origin());
        assert!(moved);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus_point() {
        let focus = 4.0;
        let camera = Camera::new(60.0, 1.0, 0.5, focus);
        let mut rng = StdRng::seed_from_u64(11);

        let target = camera.get_ray(0.3, 0.6, &mut StdRng::seed_from_u64(0)).at(1.0);
        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(0.3, 0.6, &mut rng);
            let offset = ray.origin() - camera.origin();
            assert!(offset.length() < camera.lens_radius());
            assert!(offset.z.abs() < 1e-6);
            assert!(close(ray.at(1.0), target));
            moved |= offset.length() > 1e-4;
        }
        assert!(moved);
    }

    #[test]
    fn test_pinhole_uses_no_randomness() {
        let camera = Camera::new(60.0, 1.0, 0.0, 1.0);
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_eq!(camera.get_ray(0.1, 0.9, &mut a), camera.get_ray(0.1, 0.9, &mut b));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = RenderSettings::default();
        settings.camera.look_from = Vec3::new(0.0, 0.0, 2.0);
        let camera = Camera::from_settings(&settings);

        assert_eq!(camera.origin(), Vec3::new(0.0, 0.0, 2.0));
        assert!((camera.focus_distance() - 3.0).abs() < 1e-6);
    }
}
