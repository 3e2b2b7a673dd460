use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_math::Vec3;
use lumen_tracer::{Camera, RenderConfig, SamplingStrategy};

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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// A red sphere lit from the side
    Sphere,
    /// A row of cubes on a grey slab
    Cubes,
    /// A reflective checkerboard with a gold sphere
    Reflection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sampler {
    Jitter,
    MultiJitter,
}

impl From<Sampler> for SamplingStrategy {
    fn from(sampler: Sampler) -> Self {
        match sampler {
            Sampler::Jitter => SamplingStrategy::Jitter,
            Sampler::MultiJitter => SamplingStrategy::MultiJitter,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(version, about = "A recursive reflective ray tracer")]
pub struct Args {
    /// Scene file to render instead of a demo
    #[arg(long, conflicts_with = "demo")]
    pub scene: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Demo::Reflection, help = "Built-in demo scene")]
    pub demo: Demo,

    #[arg(short, long, default_value = "render.png", help = "Output PNG path")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    #[arg(long, short = 's', help = "Samples per pixel (rounded down to a square)")]
    pub samples: Option<u32>,

    #[arg(long, value_enum)]
    pub sampler: Option<Sampler>,

    /// Worker threads, 0 for one per CPU
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, value_parser = parse_rgb, help = "Sky color as r,g,b")]
    pub sky: Option<Vec3>,

    #[arg(long, value_parser = parse_rgb, help = "Ambient color as r,g,b")]
    pub ambient: Option<Vec3>,

    /// JSON render settings; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply explicit flags on top of a loaded configuration.
    pub fn apply(&self, config: &mut RenderConfig, camera: &mut Camera) {
        if let Some(width) = self.width {
            camera.width = width;
        }
        if let Some(height) = self.height {
            camera.height = height;
        }
        if let Some(fov) = self.fov {
            camera.fov_degrees = fov;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(sampler) = self.sampler {
            config.sampling = sampler.into();
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(sky) = self.sky {
            config.trace.sky_color = sky;
        }
        if let Some(ambient) = self.ambient {
            config.trace.ambient_color = ambient;
        }
    }
}

/// Parse a color written as `r,g,b`.
pub fn parse_rgb(s: &str) -> Result<Vec3, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<f32>().map_err(|e| format!("invalid channel `{}`: {}", c.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;

    match channels.as_slice() {
        [r, g, b] => Ok(Vec3::new(*r, *g, *b)),
        _ => Err(format!("expected 3 comma-separated channels, got {}", channels.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("0.1,0.2,0.3"), Ok(Vec3::new(0.1, 0.2, 0.3)));
        assert_eq!(parse_rgb(" 1, 0 ,0.5 "), Ok(Vec3::new(1.0, 0.0, 0.5)));
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("1,2,x").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.demo, Demo::Reflection);
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert!(args.scene.is_none());
        assert!(args.samples.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "lumen",
            "--demo",
            "cubes",
            "--width",
            "320",
            "--samples",
            "16",
            "--sampler",
            "multi-jitter",
            "--sky",
            "0,0,1",
            "--threads",
            "0",
        ])
        .unwrap();
        assert_eq!(args.demo, Demo::Cubes);

        let mut config = RenderConfig::default();
        let mut camera = Camera::new(100, 100, 60.0);
        args.apply(&mut config, &mut camera);

        assert_eq!(camera.width, 320);
        assert_eq!(camera.height, 100);
        assert_eq!(config.samples_per_pixel, 16);
        assert_eq!(config.sampling, SamplingStrategy::MultiJitter);
        assert_eq!(config.threads, 0);
        assert_eq!(config.trace.sky_color, Vec3::Z);
        assert_eq!(config.trace.ambient_color, Vec3::ZERO);
    }

    #[test]
    fn test_scene_conflicts_with_demo() {
        assert!(Args::try_parse_from(["lumen", "--scene", "a.txt"]).is_ok());
        assert!(Args::try_parse_from(["lumen", "--scene", "a.txt", "--demo", "sphere"]).is_err());
    }
}
