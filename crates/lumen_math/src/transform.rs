// Homogeneous transform helpers for Mat4.
//
// glam already covers directions (transform_vector3, w=0) and projective
// points (project_point3). Camera and model transforms here use plain
// homogeneous multiplication with no divide.

use glam::{Mat4, Vec3};

/// Extension trait for Mat4 transforms used by the tracer.
pub trait Mat4Ext {
    /// Transform a point as the homogeneous vector (x, y, z, 1) and keep the
    /// xyz part of the product. No perspective divide is applied.
    fn transform_homogeneous(&self, point: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_homogeneous(&self, point: Vec3) -> Vec3 {
        (*self * point.extend(1.0)).truncate()
    }
}
