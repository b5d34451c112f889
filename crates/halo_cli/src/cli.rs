use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Where the scene comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSource {
    /// Three spheres and a glass bubble on a ground sphere
    Basic,
    /// Random field of small spheres around three feature spheres
    Demo,
    /// A JSON scene description
    File(PathBuf),
}

fn parse_scene(value: &str) -> Result<SceneSource, String> {
    match value {
        "basic" => Ok(SceneSource::Basic),
        "demo" => Ok(SceneSource::Demo),
        "" => Err("scene must be 'basic', 'demo' or a path".to_string()),
        path => Ok(SceneSource::File(PathBuf::from(path))),
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "halo")]
#[command(about = "Path trace a scene of spheres")]
pub struct Args {
    /// Render settings file (JSON); flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scene to render: "basic", "demo" or a JSON scene file
    #[arg(short, long, default_value = "demo", value_parser = parse_scene)]
    pub scene: SceneSource,

    /// Half-size of the demo scene's sphere grid
    #[arg(long, default_value_t = 11)]
    pub range: i32,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Lens aperture; 0 disables depth of field
    #[arg(long)]
    pub aperture: Option<f32>,

    /// Random seed for sampling and the demo scene layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Output file (.ppm or .png)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["halo"]).unwrap();
        assert_eq!(args.scene, SceneSource::Demo);
        assert_eq!(args.range, 11);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.width.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_scene_sources() {
        let args = Args::try_parse_from(["halo", "--scene", "basic"]).unwrap();
        assert_eq!(args.scene, SceneSource::Basic);

        let args = Args::try_parse_from(["halo", "-s", "scenes/bubble.json"]).unwrap();
        assert_eq!(args.scene, SceneSource::File(PathBuf::from("scenes/bubble.json")));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "halo", "--width", "320", "--height", "160", "-n", "8", "--seed", "4", "-j", "2",
            "--aperture", "0.2", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(args.width, Some(320));
        assert_eq!(args.height, Some(160));
        assert_eq!(args.samples, Some(8));
        assert_eq!(args.seed, Some(4));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.aperture, Some(0.2));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        assert!(Args::try_parse_from(["halo", "--log-level", "loud"]).is_err());
    }
}
