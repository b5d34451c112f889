//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce limit
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Square-root gamma and 8-bit quantization

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::sampling::gen_f32;
use crate::{Camera, Color, Hittable, Ray};
use halo_core::RenderSettings;
use halo_math::Interval;
use rand::RngCore;
use rayon::prelude::*;

/// Smallest accepted hit distance. Keeps a bounced ray from re-hitting the
/// surface it just left because of floating point error.
pub const T_MIN: f32 = 0.001;

/// Default bounce limit.
pub const MAX_DEPTH: u32 = 50;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-bucket random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            max_depth: MAX_DEPTH,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Take the sampling parameters from render settings.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            seed: settings.seed,
        }
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts the bounces already taken; camera rays start at 0. A ray
/// that escapes returns the sky. A ray that hits something once `depth`
/// reaches `config.max_depth`, or whose material absorbs it, returns black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    if depth < config.max_depth {
        if let Some(result) = rec.material.scatter(ray, &rec, rng) {
            return result.attenuation * ray_color(&result.scattered, world, depth + 1, config, rng);
        }
    }

    Color::ZERO
}

/// Compute sky gradient background: white toward -Y, pale blue toward +Y.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.99 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Row 0 is the top of the image, so `v` is flipped before asking the
/// camera for a ray. With more than one sample each one is jittered
/// uniformly within the pixel footprint.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(x < config.width && y < config.height, "pixel ({}, {}) outside image", x, y);
    let width = config.width as f32;
    let height = config.height as f32;
    let row_from_bottom = config.height.saturating_sub(y).saturating_sub(1) as f32;
    let jitter = config.samples_per_pixel > 1;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let (dx, dy) = if jitter {
            (gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
        } else {
            (0.0, 0.0)
        };
        let u = (x as f32 + 0.5 + dx) / width;
        let v = (row_from_bottom + 0.5 + dy) / height;

        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Simple image buffer for storing render output.
///
/// Pixels are linear colors in row-major order, row 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[local_y as usize * bucket.width as usize + local_x as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to gamma-corrected RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel on the current rayon pool. Each bucket
/// draws from its own random stream derived from `config.seed`, so the
/// result does not depend on the number of threads or their scheduling.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    if config.width == 0 || config.height == 0 || config.samples_per_pixel == 0 {
        log::warn!(
            "Nothing to render for {}x{} @ {} spp",
            config.width,
            config.height,
            config.samples_per_pixel
        );
        return ImageBuffer::new(config.width, config.height);
    }

    let buckets = generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} ({} buckets on {} threads)",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, world, config);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, done, buckets.len());
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
