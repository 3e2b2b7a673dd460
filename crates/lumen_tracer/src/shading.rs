//! Local illumination: Phong ambient, diffuse and specular terms with
//! shadow rays toward each light.

use lumen_core::{Color, LightSource, Model, ModelId, Scene};
use lumen_math::{Ray, Vec3};

use crate::intersection::{closest_hit, Intersection};

/// Shade a hit with every light in `scene`.
///
/// Light intensity does not scale the result; each channel is capped at 1.
pub fn shade(hit: &Intersection<'_>, scene: &Scene, ambient: Color, epsilon: f32) -> Color {
    let face = hit.face;
    let normal = hit.normal();
    let origin = hit.ray.origin();

    let mut light_total = ambient * face.ambient_ratio();
    for light in scene.lights() {
        if has_path_to_light(hit.point, light, scene.models(), hit.model_id(), epsilon) {
            light_total += diffuse(hit.point, normal, light) * face.diffuse_ratio()
                + specular(origin, hit.point, normal, light, face.shine()) * face.specular_ratio();
        }
    }

    (hit.color() * light_total).min(Vec3::ONE)
}

/// Whether `light` is visible from `point`, ignoring the surface's own model.
///
/// An occluder only blocks if it lies closer than the light.
pub fn has_path_to_light(point: Vec3, light: &LightSource, models: &[Model], ignore: ModelId, epsilon: f32) -> bool {
    let path = light.position - point;
    let shadow_ray = Ray::new(point, path.normalize_or_zero());

    match closest_hit(models, &shadow_ray, Some(ignore), epsilon) {
        Some(occluder) => occluder.t > path.length(),
        None => true,
    }
}

/// Lambert term: light color scaled by `max(n · l, 0)`.
pub fn diffuse(point: Vec3, normal: Vec3, light: &LightSource) -> Color {
    let light_dir = (light.position - point).normalize_or_zero();
    let intensity = normal.dot(light_dir);
    if intensity < 0.0 {
        Color::ZERO
    } else {
        light.color * intensity
    }
}

/// Phong term: light color scaled by `max(r · view, 0)^shine`, where `r` is
/// the light direction mirrored about the normal.
pub fn specular(eye: Vec3, point: Vec3, normal: Vec3, light: &LightSource, shine: f32) -> Color {
    let view_dir = (eye - point).normalize_or_zero();
    let incident = (light.position - point).normalize_or_zero();
    let mirrored = normal * (2.0 * normal.dot(incident)) - incident;

    light.color * mirrored.dot(view_dir).max(0.0).powf(shine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{rect, Axis, Surface};

    const EPS: f32 = 1e-4;

    fn plane_at(y: f32, surface: &Surface) -> Model {
        let min = Vec3::new(-5.0, y, -5.0);
        let max = Vec3::new(5.0, y, 5.0);
        Model::new(rect(Axis::Y, min, max, true, surface).to_vec())
    }

    fn overhead_light() -> LightSource {
        LightSource::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE, 1.0)
    }

    fn shade_floor(scene: &Scene) -> Color {
        let ray = Ray::new(Vec3::new(1.0, -1.0, -2.0), Vec3::Y);
        let hit = closest_hit(scene.models(), &ray, None, EPS).unwrap();
        assert_eq!(Some(hit.model_id()), scene.models().first().map(Model::id));
        shade(&hit, scene, Color::ZERO, EPS)
    }

    #[test]
    fn test_diffuse_falloff() {
        let light = overhead_light();
        let straight = diffuse(Vec3::ZERO, Vec3::Y, &light);
        assert!((straight - Vec3::ONE).length() < 1e-6);

        let facing_away = diffuse(Vec3::ZERO, Vec3::NEG_Y, &light);
        assert_eq!(facing_away, Color::ZERO);

        let grazing = diffuse(Vec3::new(-5.0, 0.0, 0.0), Vec3::Y, &light);
        assert!((grazing.x - 5.0 / 50.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_specular_peaks_along_mirror_direction() {
        let light = LightSource::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::ONE, 1.0);
        let mirror_eye = Vec3::new(1.0, 1.0, 0.0);
        let off_eye = Vec3::new(0.0, 1.0, 1.0);

        let peak = specular(mirror_eye, Vec3::ZERO, Vec3::Y, &light, 16.0);
        let off = specular(off_eye, Vec3::ZERO, Vec3::Y, &light, 16.0);

        assert!((peak - Vec3::ONE).length() < 1e-4);
        assert!(off.x < 0.01);
    }

    #[test]
    fn test_occluder_blocks_light() {
        let floor_surface = Surface::new(Vec3::new(0.8, 0.6, 0.4));

        let mut open = Scene::new("open");
        open.add_model(plane_at(0.0, &floor_surface));
        open.add_light(overhead_light());

        let mut blocked = Scene::new("blocked");
        blocked.add_model(plane_at(0.0, &floor_surface));
        blocked.add_model(plane_at(1.0, &Surface::new(Vec3::ONE)));
        blocked.add_light(overhead_light());

        // Floor point (1, 0, -2) sees the light at cos = 5 / sqrt(30)
        let lit = shade_floor(&open);
        let expected = Vec3::new(0.8, 0.6, 0.4) * (5.0 / 30.0f32.sqrt());
        assert!((lit - expected).length() < 1e-4);

        let shadowed = shade_floor(&blocked);
        assert_eq!(shadowed, Color::ZERO);
    }

    #[test]
    fn test_occluder_beyond_light_does_not_block() {
        let floor = plane_at(0.0, &Surface::new(Vec3::ONE));
        let ceiling = plane_at(10.0, &Surface::new(Vec3::ONE));
        let floor_id = floor.id();
        let models = vec![floor, ceiling];

        assert!(has_path_to_light(Vec3::new(1.0, 0.0, 1.0), &overhead_light(), &models, floor_id, EPS));
    }

    #[test]
    fn test_ambient_and_clamp() {
        let surface = Surface::new(Vec3::new(1.0, 0.5, 0.25)).with_phong(1.0, 0.5, 0.0);
        let mut scene = Scene::new("ambient");
        scene.add_model(plane_at(0.0, &surface));
        let ray = Ray::new(Vec3::new(1.0, -1.0, -2.0), Vec3::Y);
        let hit = closest_hit(scene.models(), &ray, None, EPS).unwrap();

        // No lights: ambient only, weighted by 1 - 0.5 - 0.0
        let color = shade(&hit, &scene, Vec3::splat(0.5), EPS);
        assert!((color - Vec3::new(0.25, 0.125, 0.0625)).length() < 1e-6);

        // A very bright ambient clamps per channel
        let color = shade(&hit, &scene, Vec3::splat(10.0), EPS);
        assert_eq!(color, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_light_intensity_is_inert() {
        let surface = Surface::new(Vec3::splat(0.5));
        let mut dim = Scene::new("dim");
        dim.add_model(plane_at(0.0, &surface));
        dim.add_light(LightSource::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE, 0.1));

        let mut bright = Scene::new("bright");
        bright.add_model(plane_at(0.0, &surface));
        bright.add_light(LightSource::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE, 100.0));

        assert_eq!(shade_floor(&dim), shade_floor(&bright));
    }
}
