//! Scene file support for lumen.
//!
//! This module provides parsing of the line-oriented scene text format and
//! loading scene files from disk into a `Scene`.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::format::load_scene;
//!
//! let scene = load_scene("assets/pyramid.txt")?;
//! println!("Loaded {} models, {} lights",
//!     scene.model_count(),
//!     scene.light_count());
//! ```

mod loader;
mod parser;

pub use loader::*;
pub use parser::*;
