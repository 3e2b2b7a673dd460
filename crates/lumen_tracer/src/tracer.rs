//! Recursive reflective ray tracing.
//!
//! Each hit is shaded locally and then mirrored. The reflected ray carries
//! `power * reflectance` of the energy, and recursion stops once that drops
//! below `reflection_cutoff` or the bounce count reaches `max_depth`.

use lumen_core::{Color, Scene};
use lumen_math::Ray;
use serde::{Deserialize, Serialize};

use crate::intersection::closest_hit;
use crate::shading::shade;

/// Tracing parameters shared by every pixel of a render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Color returned by rays that hit nothing
    pub sky_color: Color,
    pub ambient_color: Color,
    /// Minimum hit distance, also used for the parallel-ray test
    pub epsilon: f32,
    /// Remaining energy below which reflections are dropped
    pub reflection_cutoff: f32,
    /// Hard bounce cap for reflectance values at or near 1
    pub max_depth: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            sky_color: Color::ZERO,
            ambient_color: Color::ZERO,
            epsilon: 1e-4,
            reflection_cutoff: 0.01,
            max_depth: 256,
        }
    }
}

/// Traces rays against a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: TraceConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: TraceConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Color seen along `ray` at full power.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.trace_with_power(ray, 1.0, 0)
    }

    /// Color seen along `ray` carrying `power` of the original energy,
    /// `depth` bounces after the primary ray.
    pub fn trace_with_power(&self, ray: &Ray, power: f32, depth: u32) -> Color {
        if power < self.config.reflection_cutoff || depth >= self.config.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = closest_hit(self.scene.models(), ray, None, self.config.epsilon) else {
            return self.config.sky_color;
        };

        let surface = shade(&hit, self.scene, self.config.ambient_color, self.config.epsilon);
        let reflectance = hit.reflectance();
        let reflected = ray.reflect(hit.point, hit.normal());
        let reflection = self.trace_with_power(&reflected, power * reflectance, depth + 1);

        surface * (1.0 - reflectance) + reflection * reflectance
    }
}
