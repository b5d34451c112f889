//! Simple path tracer example.
//!
//! Renders the basic scene and saves it in PPM format.

use halo_core::basic_scene;
use halo_renderer::{build_world, render, save_ppm, Camera, RenderConfig, Vec3};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Build the scene
    let start = std::time::Instant::now();
    let world = match build_world(&basic_scene()) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Failed to build scene: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig {
        width: 400,
        height: 200,
        samples_per_pixel: 50,
        ..RenderConfig::default()
    };

    // Slightly raised viewpoint, focused on the center sphere
    let look_from = Vec3::new(-2.0, 2.0, 1.0);
    let look_to = Vec3::new(0.0, 0.0, -1.0);
    let camera = Camera::new(
        30.0,
        config.width as f32 / config.height as f32,
        0.1,
        (look_from - look_to).length(),
    )
    .with_look(look_from, look_to, Vec3::Y);

    let image = render(&camera, &world, &config);

    let filename = "output.ppm";
    if let Err(err) = save_ppm(&image, filename) {
        log::error!("Failed to save image: {}", err);
        std::process::exit(1);
    }
    log::info!("Saved to {}", filename);
}
