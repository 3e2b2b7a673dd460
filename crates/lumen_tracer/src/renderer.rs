//! Parallel per-pixel render scheduler.
//!
//! Every pixel is an independent task on a rayon pool. A task builds its own
//! sub-pixel samples, traces them, averages the result and writes its single
//! pixel into a shared framebuffer. The calling thread waits for the pool
//! with a timeout and returns whatever has been written if it expires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use lumen_core::{Color, Scene};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::framebuffer::Framebuffer;
use crate::progress::ProgressTracker;
use crate::sampler::SamplingStrategy;
use crate::tracer::{TraceConfig, Tracer};

/// Errors that can occur while rendering or writing output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot render an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("At least one sample per pixel is required")]
    NoSamples,

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("A render worker panicked")]
    WorkerPanicked,
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel, rounded down to a perfect square
    pub samples_per_pixel: u32,
    pub sampling: SamplingStrategy,
    /// Worker threads; 0 uses one per logical CPU
    pub threads: usize,
    /// Safety net for runaway renders
    pub timeout_secs: u64,
    /// Progress is reported every this many percent
    pub progress_interval: u32,
    pub trace: TraceConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 4,
            sampling: SamplingStrategy::Jitter,
            threads: 5,
            timeout_secs: 24 * 60 * 60,
            progress_interval: 5,
            trace: TraceConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Render `scene` through `camera`, logging progress at `info`.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> RenderResult<Framebuffer> {
    render_with_progress(scene, camera, config, |percent| {
        log::info!("{}% complete", percent);
    })
}

/// Render `scene` through `camera`, calling `on_progress` with each
/// percentage threshold reached.
///
/// If the timeout expires, pixels that have not started are skipped and the
/// partially filled framebuffer is returned.
pub fn render_with_progress<F>(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    on_progress: F,
) -> RenderResult<Framebuffer>
where
    F: Fn(u32) + Sync,
{
    let (width, height) = (camera.width, camera.height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    if config.samples_per_pixel == 0 {
        return Err(RenderError::NoSamples);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("lumen-worker-{}", i))
        .build()?;

    let total = camera.pixel_count();
    log::info!(
        "Rendering {}x{} ({} faces, {} lights), {} samples/pixel ({:?}), {} threads",
        width,
        height,
        scene.face_count(),
        scene.light_count(),
        config.samples_per_pixel,
        config.sampling,
        pool.current_num_threads()
    );

    let tracer = Tracer::new(scene, config.trace);
    let framebuffer = Mutex::new(Framebuffer::new(width, height));
    let progress = ProgressTracker::new(total as u64, config.progress_interval);
    let cancelled = AtomicBool::new(false);
    let start = Instant::now();

    let (done_tx, done_rx) = mpsc::channel();
    let outcome = std::thread::scope(|s| {
        let (pool, tracer, framebuffer, progress, cancelled, on_progress) =
            (&pool, &tracer, &framebuffer, &progress, &cancelled, &on_progress);

        let worker = s.spawn(move || {
            pool.install(|| {
                (0..total).into_par_iter().for_each(|index| {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    let x = (index % width as usize) as u32;
                    let y = (index / width as usize) as u32;
                    let color = render_pixel(tracer, camera, x, y, config, &mut rand::thread_rng());

                    framebuffer
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .set(x, y, color);

                    for percent in progress.increment() {
                        on_progress(percent);
                    }
                });
            });
            // The receiver is gone if the render already timed out
            done_tx.send(()).ok();
        });

        if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(config.timeout()) {
            log::error!(
                "Render timed out after {:?} with {}/{} pixels complete; cancelling",
                config.timeout(),
                progress.complete(),
                progress.total()
            );
            cancelled.store(true, Ordering::Relaxed);
        }

        worker.join().map_err(|_| {
            log::error!("Render worker panicked");
            RenderError::WorkerPanicked
        })
    });
    outcome?;

    if progress.is_done() {
        log::info!("Render finished in {:.2?}", start.elapsed());
    } else {
        log::warn!(
            "Render stopped after {:.2?} with {}/{} pixels written",
            start.elapsed(),
            progress.complete(),
            progress.total()
        );
    }
    Ok(framebuffer.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Average color of pixel (x, y) over its sub-pixel samples.
pub fn render_pixel(
    tracer: &Tracer<'_>,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut impl Rng,
) -> Color {
    let sample = config.sampling.pixel(x, y, config.samples_per_pixel, rng);
    if sample.points.is_empty() {
        return Color::ZERO;
    }

    let total: Color = sample
        .points
        .iter()
        .map(|p| tracer.trace(&camera.ray_for_pixel(p.x, p.y)))
        .sum();
    total / sample.points.len() as f32
}
