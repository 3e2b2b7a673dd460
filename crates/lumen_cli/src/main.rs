use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use lumen_core::load_scene;
use lumen_tracer::{render, Camera, RenderConfig, TraceConfig};

mod cli;
mod demos;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env().filter_level(level).init();
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid render config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    log::info!("Starting lumen");

    let (scene, mut camera, trace) = match &args.scene {
        Some(path) => {
            let scene = load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?;
            (scene, Camera::new(800, 600, 60.0), TraceConfig::default())
        }
        None => {
            let demo = demos::build(args.demo);
            log::info!("Using demo scene {:?}", args.demo);
            (demo.scene, demo.camera, demo.trace)
        }
    };

    // A config file replaces the scene's preset wholesale
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig {
            trace,
            ..Default::default()
        },
    };
    args.apply(&mut config, &mut camera);

    let image = render(&scene, &camera, &config)?;
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
