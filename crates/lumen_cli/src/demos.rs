//! Built-in demo scenes with matching cameras and lighting.

use std::f32::consts::PI;

use lumen_core::{LightSource, Model, Scene, Surface};
use lumen_math::{Mat4, Vec3};
use lumen_tracer::{Camera, TraceConfig};

use crate::cli::Demo;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

/// A scene together with the camera and trace colors it was set up for.
pub struct DemoScene {
    pub scene: Scene,
    pub camera: Camera,
    pub trace: TraceConfig,
}

pub fn build(demo: Demo) -> DemoScene {
    match demo {
        Demo::Sphere => sphere(),
        Demo::Cubes => cubes(),
        Demo::Reflection => reflection(),
    }
}

fn sphere() -> DemoScene {
    let red = Surface::new(Vec3::new(1.0, 0.0, 0.0)).with_phong(10.0, 0.8, 0.1);

    let mut scene = Scene::new("sphere");
    scene.add_model(Model::sphere(Vec3::new(0.0, 0.0, -5.0), 0.5, &red, 24));
    scene.add_light(LightSource::new(Vec3::new(-10.0, 1.0, 2.0), Vec3::ONE, 10.0));

    DemoScene {
        scene,
        camera: Camera::new(WIDTH, HEIGHT, 90.0).with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0))),
        trace: TraceConfig {
            sky_color: Vec3::ONE,
            ambient_color: Vec3::splat(0.07),
            ..Default::default()
        },
    }
}

fn cubes() -> DemoScene {
    let red = Surface::new(Vec3::new(1.0, 0.0, 0.0)).with_phong(50.0, 0.6, 0.1);
    let grey = Surface::new(Vec3::splat(0.5)).with_phong(50.0, 0.6, 0.1);

    let mut scene = Scene::new("cubes");
    for x in [-4.0, -2.0, 0.0, 2.0, 4.0] {
        scene.add_model(Model::cube(Vec3::new(x, -1.0, -3.0), 1.0, &red));
    }
    scene.add_model(Model::rect_prism(
        Vec3::new(-100.0, -10.0, -30.0),
        Vec3::new(100.0, -1.5, 30.0),
        &grey,
    ));
    scene.add_light(LightSource::new(Vec3::new(-5.0, 5.0, -1.0), Vec3::ONE, 10.0));

    DemoScene {
        scene,
        camera: Camera::new(WIDTH, HEIGHT, 120.0),
        trace: TraceConfig {
            sky_color: Vec3::new(0.59, 0.75, 0.82),
            ambient_color: Vec3::splat(0.3),
            ..Default::default()
        },
    }
}

fn reflection() -> DemoScene {
    const SIZE: usize = 8;
    let white = Vec3::splat(0.8);
    let black = Vec3::splat(0.2);
    let gold = Vec3::new(0.828, 0.684, 0.216);

    let tile = |color: Vec3| Surface::new(color).with_reflectance(0.25).with_phong(30.0, 0.6, 0.2);

    let mut scene = Scene::new("reflection");
    let offset = Vec3::new(-(SIZE as f32) / 2.0, -1.0, -(SIZE as f32));
    for x in 0..SIZE {
        for z in 0..SIZE {
            let surface = if (x + z) % 2 == 0 { tile(white) } else { tile(black) };
            let center = offset + Vec3::new(x as f32 + 0.5, 0.0, z as f32 + 0.5);
            scene.add_model(Model::cube(center, 1.0, &surface));
        }
    }
    let gold = Surface::new(gold).with_reflectance(0.15).with_phong(30.0, 0.6, 0.2);
    scene.add_model(Model::sphere(Vec3::new(0.0, 0.5, -4.0), 0.5, &gold, 48));
    scene.add_light(LightSource::new(Vec3::new(-4.0, 5.0, 0.0), white * 0.5, 10.0));

    let transform = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)) * Mat4::from_rotation_x(-PI / 5.0);

    DemoScene {
        scene,
        camera: Camera::new(WIDTH, HEIGHT, 90.0).with_transform(transform),
        trace: TraceConfig {
            sky_color: Vec3::new(0.59, 0.75, 0.82),
            ambient_color: Vec3::ONE,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_contents() {
        let sphere = build(Demo::Sphere);
        assert_eq!(sphere.scene.model_count(), 1);
        assert_eq!(sphere.scene.light_count(), 1);

        let cubes = build(Demo::Cubes);
        assert_eq!(cubes.scene.model_count(), 6);
        assert_eq!(cubes.scene.face_count(), 6 * 12);

        let reflection = build(Demo::Reflection);
        assert_eq!(reflection.scene.model_count(), 65);
        assert_eq!(reflection.scene.face_count(), 64 * 12 + 48 * 48);
    }

    #[test]
    fn test_reflection_camera_looks_at_board() {
        let demo = build(Demo::Reflection);
        let ray = demo.camera.ray_for_pixel(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);

        assert!((ray.origin - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!(ray.direction.y < 0.0 && ray.direction.z < 0.0);
    }
}
