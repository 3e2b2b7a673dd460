// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
mod transform;
pub use ray::{reflect_direction, Ray, TriangleHit};
pub use transform::Mat4Ext;
