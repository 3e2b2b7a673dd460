//! lumen core - scene data model and scene file loading.
//!
//! This crate provides:
//!
//! - **Geometry types**: `Vertex`, `Face`, `Material`, `Model`
//! - **Scene types**: `Scene`, `LightSource`
//! - **Procedural builders**: spheres, cubes and rectangular prisms
//! - **Scene files**: parsing of the `WORLD ... END_WORLD` text format
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Model, Scene, Surface, LightSource};
//! use lumen_core::math::Vec3;
//!
//! let mut scene = Scene::new("demo");
//! let red = Surface::new(Vec3::new(1.0, 0.0, 0.0));
//! scene.add_model(Model::sphere(Vec3::ZERO, 1.0, &red, 24));
//! scene.add_light(LightSource::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, 1.0));
//! ```

pub mod format;
pub mod mesh;
pub mod model;
pub mod scene;
pub mod texture;

pub use lumen_math as math;

use lumen_math::Vec3;

/// Linear RGB color, nominally in [0, 1] per channel.
pub type Color = Vec3;

/// Tolerance shared by the geometry contract checks.
pub const EPSILON: f32 = 1e-4;

// Re-export commonly used types
pub use format::{load_scene, parse_scene, LoadError, ParseError};
pub use mesh::{Face, Material, Vertex};
pub use model::{rect, Axis, Model, ModelId, Surface};
pub use scene::{LightSource, Scene};
pub use texture::{Texture, TextureError};
