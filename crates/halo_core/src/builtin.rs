//! Built-in scenes.

use halo_math::Vec3;
use rand::Rng;

use crate::scene::{MaterialDescription, SceneDescription, SphereDescription};
use crate::settings::{CameraSettings, RenderSettings};

const SMALL_RADIUS: f32 = 0.2;
const LARGE_RADIUS: f32 = 1.0;
const GRID_JITTER: f32 = 0.9;
const GLASS: MaterialDescription = MaterialDescription::Dielectric {
    refractive_index: 1.5,
};

/// Three spheres on a large ground sphere, viewed from the origin.
///
/// The left sphere is a hollow glass bubble: a dielectric sphere with a
/// slightly smaller negative-radius dielectric sphere inside it.
pub fn basic_scene() -> SceneDescription {
    let mut scene = SceneDescription::new("basic");
    scene.push(SphereDescription::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        MaterialDescription::Lambertian {
            albedo: Vec3::new(0.1, 0.2, 0.5),
        },
    ));
    scene.push(SphereDescription::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        MaterialDescription::Lambertian {
            albedo: Vec3::new(0.8, 0.8, 0.0),
        },
    ));
    scene.push(SphereDescription::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        MaterialDescription::Metal {
            albedo: Vec3::new(0.8, 0.6, 0.2),
            fuzz: 0.0,
        },
    ));
    scene.push(SphereDescription::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, GLASS));
    scene.push(SphereDescription::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, GLASS));
    scene
}

/// A field of small random spheres around three large feature spheres.
///
/// `range` sets the half-size of the grid: small spheres are placed on
/// `[-range, range)` along x and z. The layout depends only on the rng, so
/// a seeded rng reproduces the same scene.
pub fn demo_scene<R: Rng + ?Sized>(range: i32, rng: &mut R) -> SceneDescription {
    let mut scene = SceneDescription::new("demo");
    scene.push(SphereDescription::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        MaterialDescription::Lambertian {
            albedo: Vec3::splat(0.5),
        },
    ));

    let keep_clear = Vec3::new(4.0, SMALL_RADIUS, 0.0);
    for a in -range..range {
        for b in -range..range {
            let center = Vec3::new(
                a as f32 + GRID_JITTER * rng.gen::<f32>(),
                SMALL_RADIUS,
                b as f32 + GRID_JITTER * rng.gen::<f32>(),
            );
            if (center - keep_clear).length() < 0.9 {
                continue;
            }

            let choose_material: f32 = rng.gen();
            let material = if choose_material < 0.8 {
                let mut diffuse = || rng.gen::<f32>() * rng.gen::<f32>();
                MaterialDescription::Lambertian {
                    albedo: Vec3::new(diffuse(), diffuse(), diffuse()),
                }
            } else if choose_material > 0.95 {
                let mut metal = || 0.5 * (1.0 + rng.gen::<f32>());
                let albedo = Vec3::new(metal(), metal(), metal());
                MaterialDescription::Metal {
                    albedo,
                    fuzz: 0.5 * rng.gen::<f32>(),
                }
            } else {
                GLASS
            };
            scene.push(SphereDescription::new(center, SMALL_RADIUS, material));
        }
    }

    scene.push(SphereDescription::new(
        Vec3::new(0.0, LARGE_RADIUS, 0.0),
        LARGE_RADIUS,
        GLASS,
    ));
    scene.push(SphereDescription::new(
        Vec3::new(-4.0, LARGE_RADIUS, 0.0),
        LARGE_RADIUS,
        MaterialDescription::Lambertian {
            albedo: Vec3::new(0.4, 0.2, 0.1),
        },
    ));
    scene.push(SphereDescription::new(
        Vec3::new(4.0, LARGE_RADIUS, 0.0),
        LARGE_RADIUS,
        MaterialDescription::Metal {
            albedo: Vec3::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    ));

    log::debug!("Built demo scene with {} spheres", scene.len());
    scene
}

/// Settings framing the demo scene, focused on the metal feature sphere.
pub fn demo_settings() -> RenderSettings {
    let look_from = Vec3::new(8.0, 2.0, 2.0);
    RenderSettings {
        camera: CameraSettings {
            vfov: 45.0,
            aperture: 0.0,
            focus_distance: Some((look_from - Vec3::new(4.0, 1.0, 0.0)).length()),
            look_from,
            look_to: Vec3::new(0.0, -0.5, 0.0),
            look_up: Vec3::Y,
        },
        ..RenderSettings::default()
    }
}
