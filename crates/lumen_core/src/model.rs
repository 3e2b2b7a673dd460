//! Models: groups of faces with a stable identity, plus procedural
//! builders for spheres, cubes and rectangular prisms.

use std::f32::consts::PI;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lumen_math::{Mat4, Vec2, Vec3};

use crate::mesh::{Face, Material, Vertex};
use crate::texture::Texture;
use crate::Color;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of a model.
///
/// Two models with identical geometry still get different ids. A clone of a
/// model is the same object and keeps its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// An unordered collection of faces forming one logical object.
#[derive(Clone, Debug)]
pub struct Model {
    id: ModelId,
    faces: Vec<Face>,
}

impl Model {
    /// Create a model with a fresh identity.
    pub fn new(faces: Vec<Face>) -> Self {
        Self {
            id: ModelId::next(),
            faces,
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Return a transformed copy. The copy is a new object with its own id.
    pub fn transform(&self, matrix: &Mat4) -> Model {
        Model::new(self.faces.iter().map(|face| face.transform(matrix)).collect())
    }

    pub fn translate(&self, offset: Vec3) -> Model {
        self.transform(&Mat4::from_translation(offset))
    }

    /// UV-sphere with `steps` longitude segments and `steps / 2` latitude
    /// bands. Odd step counts are rounded up.
    pub fn sphere(center: Vec3, radius: f32, surface: &Surface, steps: u32) -> Model {
        let steps = (steps.max(2) + 1) & !1;
        let step_size = 2.0 * PI / steps as f32;

        let vertex_at = |phi: f32, theta: f32| {
            let offset = Vec3::new(
                radius * theta.cos() * phi.sin(),
                radius * theta.sin() * phi.sin(),
                radius * phi.cos(),
            );
            surface.vertex(center + offset, offset)
        };

        let mut faces = Vec::with_capacity((steps * steps) as usize);
        for i in 0..steps {
            let phi = i as f32 * step_size;
            let phi_next = ((i + 1) % steps) as f32 * step_size;

            for j in 0..steps / 2 {
                let theta = j as f32 * step_size;
                let theta_next = (j + 1) as f32 * step_size;

                let a = vertex_at(phi, theta);
                let b = vertex_at(phi_next, theta);
                let c = vertex_at(phi, theta_next);
                let d = vertex_at(phi_next, theta_next);

                faces.push(surface.face(a, b, c));
                faces.push(surface.face(c, d, b));
            }
        }

        Model::new(faces)
    }

    /// Axis-aligned cube of edge length `width` centered on `center`.
    pub fn cube(center: Vec3, width: f32, surface: &Surface) -> Model {
        let half = Vec3::splat(width / 2.0);
        Model::rect_prism(center - half, center + half, surface)
    }

    /// Axis-aligned box spanning two opposite corners, in any order.
    pub fn rect_prism(a: Vec3, b: Vec3, surface: &Surface) -> Model {
        let min = a.min(b);
        let max = a.max(b);

        let mut faces = Vec::with_capacity(12);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            faces.extend(rect(axis, min, max, false, surface));
            faces.extend(rect(axis, min, max, true, surface));
        }
        Model::new(faces)
    }
}

/// Coordinate axis a rectangle is perpendicular to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One side of an axis-aligned box: two triangles on the `min` (or `max`)
/// plane of `axis`, normal pointing away from the box.
pub fn rect(axis: Axis, min: Vec3, max: Vec3, positive: bool, surface: &Surface) -> [Face; 2] {
    let sign = if positive { 1.0 } else { -1.0 };
    let plane = if positive { max } else { min };

    // Spans (s, t) over the two axes the rectangle lies in
    let (normal, (s1, s2), (t1, t2)) = match axis {
        Axis::X => (Vec3::X * sign, (min.y, max.y), (min.z, max.z)),
        Axis::Y => (Vec3::Y * sign, (min.x, max.x), (min.z, max.z)),
        Axis::Z => (Vec3::Z * sign, (min.x, max.x), (min.y, max.y)),
    };
    let corner = |s: f32, t: f32| match axis {
        Axis::X => Vec3::new(plane.x, s, t),
        Axis::Y => Vec3::new(s, plane.y, t),
        Axis::Z => Vec3::new(s, t, plane.z),
    };

    let v1 = surface.textured_vertex(corner(s1, t1), normal, Vec2::new(0.0, 0.0));
    let v2 = surface.textured_vertex(corner(s1, t2), normal, Vec2::new(0.0, 1.0));
    let v3 = surface.textured_vertex(corner(s2, t2), normal, Vec2::new(1.0, 1.0));
    let v4 = surface.textured_vertex(corner(s2, t1), normal, Vec2::new(1.0, 0.0));

    [surface.face(v1, v2, v3), surface.face(v3, v4, v1)]
}

/// Surface description used by the procedural builders.
#[derive(Clone, Debug)]
pub struct Surface {
    pub color: Color,
    pub opacity: f32,
    pub reflectance: f32,
    pub material: Material,
}

impl Surface {
    /// Opaque, matte, fully diffuse surface of one color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            reflectance: 0.0,
            material: Material::default(),
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_reflectance(mut self, reflectance: f32) -> Self {
        self.reflectance = reflectance;
        self
    }

    pub fn with_phong(mut self, shine: f32, diffuse_ratio: f32, specular_ratio: f32) -> Self {
        self.material.shine = shine;
        self.material.diffuse_ratio = diffuse_ratio;
        self.material.specular_ratio = specular_ratio;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>, weight: f32) -> Self {
        self.material.texture = Some(texture);
        self.material.texture_weight = weight;
        self
    }

    pub fn vertex(&self, position: Vec3, normal: Vec3) -> Vertex {
        Vertex::new(position, normal, self.color)
            .with_opacity(self.opacity)
            .with_reflectance(self.reflectance)
    }

    pub fn textured_vertex(&self, position: Vec3, normal: Vec3, texture_uv: Vec2) -> Vertex {
        self.vertex(position, normal).with_texture_uv(texture_uv)
    }

    pub fn face(&self, v1: Vertex, v2: Vertex, v3: Vertex) -> Face {
        Face::with_material(v1, v2, v3, self.material.clone())
    }
}
