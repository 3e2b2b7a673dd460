//! Triangle mesh primitives: vertices, faces and per-face materials.
//!
//! Every type here is an immutable value. Transforms return new values,
//! so faces can be shared freely between render threads.

use std::fmt;
use std::sync::Arc;

use lumen_math::{Mat4, Mat4Ext, Vec2, Vec3};

use crate::texture::Texture;
use crate::{Color, EPSILON};

/// A mesh vertex with per-vertex surface attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    position: Vec3,
    /// Always unit length
    normal: Vec3,
    color: Color,
    opacity: f32,
    reflectance: f32,
    texture_uv: Vec2,
}

impl Vertex {
    /// Create an opaque, non-reflective vertex. The normal is normalized.
    pub fn new(position: Vec3, normal: Vec3, color: Color) -> Self {
        Self {
            position,
            normal: normal.normalize_or_zero(),
            color,
            opacity: 1.0,
            reflectance: 0.0,
            texture_uv: Vec2::ZERO,
        }
    }

    /// Set the opacity (0 = transparent, 1 = opaque).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the mirror reflectance (0 = matte, 1 = perfect mirror).
    pub fn with_reflectance(mut self, reflectance: f32) -> Self {
        self.reflectance = reflectance;
        self
    }

    /// Set the texture coordinate.
    pub fn with_texture_uv(mut self, texture_uv: Vec2) -> Self {
        self.texture_uv = texture_uv;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn reflectance(&self) -> f32 {
        self.reflectance
    }

    pub fn texture_uv(&self) -> Vec2 {
        self.texture_uv
    }

    /// Transform the position as a point and the normal as a direction.
    pub fn transform(&self, matrix: &Mat4) -> Vertex {
        Vertex {
            position: matrix.transform_homogeneous(self.position),
            normal: matrix.transform_vector3(self.normal).normalize_or_zero(),
            ..*self
        }
    }
}

/// Phong-style material parameters shared by a face.
#[derive(Clone)]
pub struct Material {
    /// Phong exponent
    pub shine: f32,
    pub diffuse_ratio: f32,
    pub specular_ratio: f32,
    pub texture: Option<Arc<Texture>>,
    /// Blend weight of the texture over the vertex colors
    pub texture_weight: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shine: 0.0,
            diffuse_ratio: 1.0,
            specular_ratio: 0.0,
            texture: None,
            texture_weight: 0.0,
        }
    }
}

impl Material {
    /// Create an untextured material.
    pub fn phong(shine: f32, diffuse_ratio: f32, specular_ratio: f32) -> Self {
        Self {
            shine,
            diffuse_ratio,
            specular_ratio,
            ..Default::default()
        }
    }

    /// Whatever is left after diffuse and specular, never negative.
    pub fn ambient_ratio(&self) -> f32 {
        (1.0 - self.diffuse_ratio - self.specular_ratio).max(0.0)
    }

    /// A texture only counts when its blend weight is not negligible.
    pub fn has_texture(&self) -> bool {
        self.texture.is_some() && self.texture_weight >= EPSILON
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material")
            .field("shine", &self.shine)
            .field("diffuse_ratio", &self.diffuse_ratio)
            .field("specular_ratio", &self.specular_ratio)
            .field("texture", &self.texture.as_ref().map(|t| t.path.as_str()))
            .field("texture_weight", &self.texture_weight)
            .finish()
    }
}

/// A triangle of three vertices plus its material.
#[derive(Clone, Debug)]
pub struct Face {
    v1: Vertex,
    v2: Vertex,
    v3: Vertex,
    material: Material,
}

impl Face {
    /// Create a face with the default material.
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self::with_material(v1, v2, v3, Material::default())
    }

    pub fn with_material(v1: Vertex, v2: Vertex, v3: Vertex, material: Material) -> Self {
        Self { v1, v2, v3, material }
    }

    pub fn v1(&self) -> &Vertex {
        &self.v1
    }

    pub fn v2(&self) -> &Vertex {
        &self.v2
    }

    pub fn v3(&self) -> &Vertex {
        &self.v3
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn shine(&self) -> f32 {
        self.material.shine
    }

    pub fn diffuse_ratio(&self) -> f32 {
        self.material.diffuse_ratio
    }

    pub fn specular_ratio(&self) -> f32 {
        self.material.specular_ratio
    }

    pub fn ambient_ratio(&self) -> f32 {
        self.material.ambient_ratio()
    }

    /// Vertex positions in order, for intersection tests.
    pub fn positions(&self) -> [Vec3; 3] {
        [self.v1.position, self.v2.position, self.v3.position]
    }

    pub fn position(&self, u: f32, v: f32) -> Vec3 {
        check_uv(u, v);
        lerp3(u, v, self.v1.position, self.v2.position, self.v3.position)
    }

    /// Interpolated normal. Not re-normalized.
    pub fn normal(&self, u: f32, v: f32) -> Vec3 {
        check_uv(u, v);
        lerp3(u, v, self.v1.normal, self.v2.normal, self.v3.normal)
    }

    /// Interpolated vertex color, blended with the texture when one is set.
    pub fn color(&self, u: f32, v: f32) -> Color {
        check_uv(u, v);
        let base = lerp3(u, v, self.v1.color, self.v2.color, self.v3.color);

        match &self.material.texture {
            Some(texture) if self.material.has_texture() => {
                let uv = self.texture_uv(u, v);
                let sampled = texture.sample(uv.x, uv.y);
                base.lerp(sampled, self.material.texture_weight.min(1.0))
            }
            _ => base,
        }
    }

    pub fn opacity(&self, u: f32, v: f32) -> f32 {
        check_uv(u, v);
        lerp1(u, v, self.v1.opacity, self.v2.opacity, self.v3.opacity)
    }

    pub fn reflectance(&self, u: f32, v: f32) -> f32 {
        check_uv(u, v);
        lerp1(u, v, self.v1.reflectance, self.v2.reflectance, self.v3.reflectance)
    }

    pub fn texture_uv(&self, u: f32, v: f32) -> Vec2 {
        check_uv(u, v);
        let w = 1.0 - u - v;
        self.v1.texture_uv * w + self.v2.texture_uv * u + self.v3.texture_uv * v
    }

    /// Transform all three vertices, keeping the material.
    pub fn transform(&self, matrix: &Mat4) -> Face {
        Face {
            v1: self.v1.transform(matrix),
            v2: self.v2.transform(matrix),
            v3: self.v3.transform(matrix),
            material: self.material.clone(),
        }
    }
}

#[inline]
fn check_uv(u: f32, v: f32) {
    debug_assert!(
        u + v <= 1.0 + EPSILON,
        "barycentric coordinates must not sum past 1 (u={u}, v={v})"
    );
}

#[inline]
fn lerp3(u: f32, v: f32, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let w = 1.0 - u - v;
    a * w + b * u + c * v
}

#[inline]
fn lerp1(u: f32, v: f32, a: f32, b: f32, c: f32) -> f32 {
    let w = 1.0 - u - v;
    w * a + u * b + v * c
}
