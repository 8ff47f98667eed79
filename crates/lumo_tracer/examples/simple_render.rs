//! Simple ray tracer example.
//!
//! Builds a small scene in code (floor, mirror wall, a rotated pyramid) and
//! saves it as PNG.
//!
//! Run with: cargo run --release -p lumo_tracer --example simple_render

use std::path::Path;

use lumo_core::{GroupId, MaterialId, Transform};
use lumo_math::Quat;
use lumo_tracer::{
    CameraSpec, Color, Light, Material, Plane, Scene, Tracer, TracerConfig, Triangle, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    log::info!("Scene built in {:?}", start.elapsed());

    let config = TracerConfig {
        camera: CameraSpec {
            center: Vec3::new(0.0, 2.0, 7.0),
            direction: Vec3::new(0.0, -0.25, -1.0),
            up: Vec3::Y,
            fov: 50.0,
        },
        width: 640,
        height: 480,
        max_bounces: 3,
        background: Color::new(0.05, 0.07, 0.1),
        shadows: true,
        samples: 16,
        ..Default::default()
    };

    let tracer = Tracer::new(config)?;
    tracer.render(&scene, Some(Path::new("output.png")))?;

    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let mut scene = Scene::new("simple");

    let floor = scene.add_object("floor", Plane::new(Vec3::Y, 0.0), Transform::default(), None)?;
    let grey = scene.add_material(Material::diffuse(Color::splat(0.6)));
    scene.bind_material(floor, grey)?;

    let wall = scene.add_object("mirror", Plane::new(Vec3::Z, -4.0), Transform::default(), None)?;
    let mirror = scene.add_material(Material::new(
        Color::splat(0.02),
        Color::splat(0.05),
        Color::splat(0.85),
        64.0,
    ));
    scene.bind_material(wall, mirror)?;

    let pyramid = scene.add_group(
        "pyramid",
        Transform {
            translation: Vec3::new(0.0, 0.0, 0.5),
            rotation: Quat::from_rotation_y(0.6),
            scale: Vec3::splat(1.5),
        },
        None,
    )?;
    let red = scene.add_material(Material::new(
        Color::new(0.3, 0.05, 0.05),
        Color::new(0.8, 0.15, 0.1),
        Color::splat(0.3),
        32.0,
    ));
    add_pyramid(&mut scene, pyramid, red)?;

    scene.add_light("fill", Light::ambient(Color::splat(0.2)), Transform::default(), None)?;
    scene.add_light(
        "sun",
        Light::directional(Vec3::new(-1.0, -2.0, -1.0), Color::splat(0.6)),
        Transform::default(),
        None,
    )?;
    scene.add_light(
        "key",
        Light::point(Color::splat(20.0)),
        Transform::from_translation(Vec3::new(2.0, 4.0, 3.0)),
        None,
    )?;

    Ok(scene)
}

/// Four outward-facing sides of a square pyramid, apex up.
fn add_pyramid(
    scene: &mut Scene,
    group: GroupId,
    material: MaterialId,
) -> Result<(), Box<dyn std::error::Error>> {
    let apex = Vec3::new(0.0, 1.0, 0.0);
    let base = [
        Vec3::new(-0.5, 0.0, 0.5),
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(-0.5, 0.0, -0.5),
    ];

    for i in 0..4 {
        let side = Triangle::flat(base[i], base[(i + 1) % 4], apex);
        let id = scene.add_object(format!("side_{}", i), side, Transform::default(), Some(group))?;
        scene.bind_material(id, material)?;
    }

    Ok(())
}
