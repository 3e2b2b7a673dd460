//! Ray hits against scene geometry and the closest-hit query.

use lumen_core::{Color, Face, Model, ModelId};
use lumen_math::{Ray, Vec3};

/// A ray hitting one face of one model.
///
/// Borrows the face and model from the scene, so an `Intersection` never
/// outlives the render that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub point: Vec3,
    pub ray: Ray,
    pub model: &'a Model,
    pub face: &'a Face,
    /// Barycentric (u, v, w) with `w = 1 - u - v`
    pub uvw: Vec3,
    /// Distance from the ray origin to `point`
    pub t: f32,
}

impl<'a> Intersection<'a> {
    pub fn u(&self) -> f32 {
        self.uvw.x
    }

    pub fn v(&self) -> f32 {
        self.uvw.y
    }

    pub fn w(&self) -> f32 {
        self.uvw.z
    }

    pub fn model_id(&self) -> ModelId {
        self.model.id()
    }

    /// Interpolated surface normal, re-normalized.
    pub fn normal(&self) -> Vec3 {
        self.face.normal(self.u(), self.v()).normalize_or_zero()
    }

    pub fn color(&self) -> Color {
        self.face.color(self.u(), self.v())
    }

    pub fn reflectance(&self) -> f32 {
        self.face.reflectance(self.u(), self.v())
    }

    pub fn opacity(&self) -> f32 {
        self.face.opacity(self.u(), self.v())
    }
}

/// Test a single face of `model`.
pub fn intersect_face<'a>(ray: &Ray, face: &'a Face, model: &'a Model, epsilon: f32) -> Option<Intersection<'a>> {
    let [v1, v2, v3] = face.positions();
    ray.intersect_triangle(v1, v2, v3, epsilon).map(|hit| Intersection {
        point: hit.point,
        ray: *ray,
        model,
        face,
        uvw: hit.uvw(),
        t: hit.t,
    })
}

/// Nearest hit over every face of every model, skipping the model `ignore`.
///
/// On equal distances the first face scanned wins.
pub fn closest_hit<'a>(models: &'a [Model], ray: &Ray, ignore: Option<ModelId>, epsilon: f32) -> Option<Intersection<'a>> {
    models
        .iter()
        .filter(|model| Some(model.id()) != ignore)
        .flat_map(|model| {
            model
                .faces()
                .iter()
                .filter_map(move |face| intersect_face(ray, face, model, epsilon))
        })
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Surface, Vertex};

    const EPS: f32 = 1e-4;

    /// A unit right triangle in the z = `z` plane facing +z.
    fn triangle_model(z: f32, color: Color) -> Model {
        let v = |x: f32, y: f32| Vertex::new(Vec3::new(x, y, z), Vec3::Z, color);
        Model::new(vec![Face::new(v(0.0, 0.0), v(2.0, 0.0), v(0.0, 2.0))])
    }

    #[test]
    fn test_intersect_face_interpolates() {
        let model = Model::new(vec![Face::new(
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z, Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, Vec3::new(0.0, 1.0, 0.0)),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 1.0)).with_reflectance(0.9),
        )]);
        let ray = Ray::new(Vec3::new(0.25, 0.5, 3.0), Vec3::NEG_Z);

        let hit = intersect_face(&ray, &model.faces()[0], &model, EPS).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!((hit.u() - 0.25).abs() < 1e-5);
        assert!((hit.v() - 0.5).abs() < 1e-5);
        assert!((hit.w() - 0.25).abs() < 1e-5);
        assert!((hit.color() - Vec3::new(0.25, 0.25, 0.5)).length() < 1e-5);
        assert!((hit.reflectance() - 0.45).abs() < 1e-5);
        assert_eq!(hit.model_id(), model.id());
        assert!((hit.normal() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let far = triangle_model(-5.0, Vec3::X);
        let near = triangle_model(-1.0, Vec3::Y);
        let models = vec![far, near];
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z);

        let hit = closest_hit(&models, &ray, None, EPS).unwrap();
        assert_eq!(hit.model_id(), models[1].id());
        assert!((hit.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_ignores_model() {
        let models = vec![triangle_model(-5.0, Vec3::X), triangle_model(-1.0, Vec3::Y)];
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z);

        let hit = closest_hit(&models, &ray, Some(models[1].id()), EPS).unwrap();
        assert_eq!(hit.model_id(), models[0].id());
        assert!((hit.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_identical_models_are_distinct() {
        let a = triangle_model(-1.0, Vec3::X);
        let b = triangle_model(-1.0, Vec3::X);
        let models = vec![a, b];
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z);

        // Ignoring one copy still hits the other
        let hit = closest_hit(&models, &ray, Some(models[0].id()), EPS).unwrap();
        assert_eq!(hit.model_id(), models[1].id());
    }

    #[test]
    fn test_closest_hit_miss() {
        let cube = Model::cube(Vec3::ZERO, 1.0, &Surface::new(Vec3::ONE));
        let models = vec![cube];

        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(closest_hit(&models, &away, None, EPS).is_none());
        assert!(closest_hit(&[], &away, None, EPS).is_none());
    }

    #[test]
    fn test_cube_front_face_hit() {
        let cube = Model::cube(Vec3::ZERO, 2.0, &Surface::new(Vec3::ONE));
        let models = vec![cube];
        let ray = Ray::new(Vec3::new(0.2, 0.3, 5.0), Vec3::NEG_Z);

        let hit = closest_hit(&models, &ray, None, EPS).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
        assert!((hit.normal() - Vec3::Z).length() < 1e-5);
    }
}
