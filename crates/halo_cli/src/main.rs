use anyhow::{Context, Result};
use clap::Parser;
use halo_core::{basic_scene, demo_scene, demo_settings, load_scene, RenderSettings, SceneDescription};
use halo_renderer::{build_world, render, save_image, Camera, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;

use cli::{Args, SceneSource};

fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Settings before command line overrides: the config file if given,
/// otherwise a framing that suits the chosen scene.
fn base_settings(args: &Args) -> Result<RenderSettings> {
    if let Some(path) = &args.config {
        return RenderSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }
    Ok(match args.scene {
        SceneSource::Demo => demo_settings(),
        SceneSource::Basic => {
            let mut settings = RenderSettings::default();
            settings.camera.vfov = 90.0;
            settings
        }
        SceneSource::File(_) => RenderSettings::default(),
    })
}

fn apply_overrides(settings: &mut RenderSettings, args: &Args) {
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(samples) = args.samples {
        settings.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        settings.max_depth = max_depth;
    }
    if let Some(aperture) = args.aperture {
        settings.camera.aperture = aperture;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.threads.is_some() {
        settings.threads = args.threads;
    }
}

fn resolve_settings(args: &Args) -> Result<RenderSettings> {
    let mut settings = base_settings(args)?;
    apply_overrides(&mut settings, args);
    settings.validate().context("Invalid render settings")?;
    Ok(settings)
}

fn load_scene_source(args: &Args, settings: &RenderSettings) -> Result<SceneDescription> {
    match &args.scene {
        SceneSource::Basic => Ok(basic_scene()),
        SceneSource::Demo => {
            let mut rng = StdRng::seed_from_u64(settings.seed);
            Ok(demo_scene(args.range, &mut rng))
        }
        SceneSource::File(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene from {}", path.display())),
    }
}

fn render_with_pool(settings: &RenderSettings, scene: &SceneDescription) -> Result<ImageBuffer> {
    let world = build_world(scene).context("Failed to build scene geometry")?;
    let camera = Camera::from_settings(settings);
    let config = RenderConfig::from_settings(settings);

    match settings.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to create worker pool")?;
            Ok(pool.install(|| render(&camera, &world, &config)))
        }
        None => Ok(render(&camera, &world, &config)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let settings = resolve_settings(&args)?;
    let scene = load_scene_source(&args, &settings)?;
    log::info!(
        "Scene '{}': {} spheres, {}x{} @ {} spp",
        scene.name,
        scene.len(),
        settings.width,
        settings.height,
        settings.samples_per_pixel
    );

    let image = render_with_pool(&settings, &scene)?;
    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(())
}
