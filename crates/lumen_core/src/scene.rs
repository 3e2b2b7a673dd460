//! Scene types for lumen.
//!
//! A `Scene` is the immutable snapshot handed to the tracer: a set of models
//! and a set of point lights.

use lumen_math::Vec3;

use crate::model::{Model, ModelId};
use crate::Color;

/// A point light.
///
/// `intensity` is carried for scene files but does not scale the lighting
/// terms; brightness comes from `color` alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl LightSource {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

/// A complete scene containing models and lights.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,
    models: Vec<Model>,
    lights: Vec<LightSource>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a model to the scene and return its identity.
    pub fn add_model(&mut self, model: Model) -> ModelId {
        let id = model.id();
        self.models.push(model);
        id
    }

    pub fn add_light(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Total triangle count across all models.
    pub fn face_count(&self) -> usize {
        self.models.iter().map(Model::face_count).sum()
    }
}
