//! Halo Renderer - CPU path tracing of sphere scenes.
//!
//! A Monte Carlo path tracer: camera rays bounce between spheres until
//! they escape to the sky, get absorbed, or hit the bounce limit.

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
mod sampling;
mod sphere;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use output::{save_image, save_png, save_ppm, write_ppm};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig, MAX_DEPTH, T_MIN,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use sphere::Sphere;
pub use world::build_world;

/// Re-export Vec3 and common math types from halo_math
pub use halo_math::{Interval, Ray, Vec3};
