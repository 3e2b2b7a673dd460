//! lumen tracer - recursive reflective ray tracing on the CPU.
//!
//! Scenes are brute-force traced against every triangle. Each primary ray
//! is shaded with Phong lighting and shadow rays, then mirrored off the
//! surface until the carried energy falls below a cutoff.
//!
//! # Example
//!
//! ```ignore
//! use lumen_tracer::{render, Camera, RenderConfig};
//!
//! let camera = Camera::new(640, 480, 60.0);
//! let image = render(&scene, &camera, &RenderConfig::default())?;
//! image.save_png("render.png")?;
//! ```

mod camera;
mod framebuffer;
mod intersection;
mod progress;
mod renderer;
mod sampler;
mod shading;
mod tracer;

pub use camera::Camera;
pub use framebuffer::{color_to_rgb8, Framebuffer};
pub use intersection::{closest_hit, intersect_face, Intersection};
pub use progress::ProgressTracker;
pub use renderer::{render, render_pixel, render_with_progress, RenderConfig, RenderError, RenderResult};
pub use sampler::{jitter, jitter_pixel, multi_jitter, multi_jitter_pixel, PixelSample, SamplingStrategy};
pub use shading::{diffuse, has_path_to_light, shade, specular};
pub use tracer::{TraceConfig, Tracer};
