//! Flattened, render-ready snapshot of a scene.
//!
//! The tracer never walks the scene hierarchy while rendering. A `SceneView`
//! is taken once per render: every object carries its world-to-local matrix
//! and normal matrix precomputed, every light its placement. The view
//! borrows shapes, lights and materials from the scene.

use lumo_core::{Light, Material, SceneQuery, Shape};
use lumo_math::{Interval, Mat3, Mat4, Mat4Ext, Ray, Vec3};

use crate::hittable::{HitRecord, Intersect};

/// An object ready for intersection.
#[derive(Debug, Clone)]
pub struct ViewObject<'a> {
    pub name: &'a str,
    pub shape: &'a Shape,
    pub world_to_local: Mat4,
    /// Maps local normals to world normals
    pub normal_matrix: Mat3,
    pub material: Option<&'a Material>,
}

impl ViewObject<'_> {
    /// Bring a local-space normal into world space.
    pub fn world_normal(&self, local_normal: Vec3) -> Vec3 {
        (self.normal_matrix * local_normal).normalize_or_zero()
    }
}

/// A light with its placement.
#[derive(Debug, Clone, Copy)]
pub struct ViewLight<'a> {
    pub light: &'a Light,
    pub local_to_world: Mat4,
}

/// Snapshot of the objects and lights of a scene.
#[derive(Debug, Clone, Default)]
pub struct SceneView<'a> {
    objects: Vec<ViewObject<'a>>,
    lights: Vec<ViewLight<'a>>,
}

impl<'a> SceneView<'a> {
    /// Take a snapshot of `scene`.
    ///
    /// Objects whose placement cannot be inverted are skipped with a warning.
    /// Objects without a material are kept and reported once here.
    pub fn new<S: SceneQuery + ?Sized>(scene: &'a S) -> Self {
        let mut objects = Vec::new();
        for object in scene.tracing_objects() {
            let det = object.local_to_world.determinant();
            if det == 0.0 || !det.is_finite() {
                log::warn!(
                    "Skipping object '{}': transform is not invertible",
                    object.name
                );
                continue;
            }
            if object.material.is_none() {
                log::warn!("Object '{}' has no material bound", object.name);
            }
            objects.push(ViewObject {
                name: object.name,
                shape: object.shape,
                world_to_local: object.local_to_world.inverse(),
                normal_matrix: object.local_to_world.normal_matrix(),
                material: object.material,
            });
        }

        let lights = scene
            .light_objects()
            .into_iter()
            .map(|light| ViewLight {
                light: light.light,
                local_to_world: light.local_to_world,
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Scene snapshot: {} objects, {} lights",
            objects.len(),
            lights.len()
        );

        Self { objects, lights }
    }

    pub fn objects(&self) -> &[ViewObject<'a>] {
        &self.objects
    }

    pub fn lights(&self) -> &[ViewLight<'a>] {
        &self.lights
    }

    /// Nearest object hit by a world-space ray with parameter inside `range`.
    ///
    /// The ray is moved into each object's local space without renormalizing
    /// the direction, so local hit times are directly comparable. On a hit,
    /// `record` holds the time and the local normal of the winning object.
    pub fn closest_hit(
        &self,
        ray: &Ray,
        range: Interval,
        record: &mut HitRecord,
    ) -> Option<&ViewObject<'a>> {
        let mut closest = None;
        let mut candidate = HitRecord::new();
        for object in &self.objects {
            let local_ray = object.world_to_local.transform_ray(ray);
            candidate.time = f32::INFINITY;
            if !object.shape.intersect(&local_ray, range.min, &mut candidate) {
                continue;
            }
            if range.with_max(record.time.min(range.max)).accepts(candidate.time) {
                *record = candidate;
                closest = Some(object);
            }
        }
        closest
    }

    /// Whether anything blocks `ray` with parameter in `[t_min, max_t)`.
    pub fn occluded(&self, ray: &Ray, t_min: f32, max_t: f32) -> bool {
        let mut record = HitRecord::new();
        for object in &self.objects {
            let local_ray = object.world_to_local.transform_ray(ray);
            record.time = f32::INFINITY;
            if object.shape.intersect(&local_ray, t_min, &mut record) && record.time < max_t {
                return true;
            }
        }
        false
    }
}
