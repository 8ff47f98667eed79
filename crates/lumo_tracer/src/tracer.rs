//! Recursive Whitted-style tracer.
//!
//! Shading is Phong per light with optional shadow rays, plus a fixed number
//! of mirror bounces scaled by the material's specular color. Pixels are
//! multi-sampled with uniform jitter and rendered bucket by bucket in
//! parallel.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use lumo_core::{Color, CubeMap, Material, SceneQuery};
use lumo_math::{reflect, Interval, Ray, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::background::Background;
use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::camera::Camera;
use crate::config::TracerConfig;
use crate::error::TracerResult;
use crate::hittable::HitRecord;
use crate::illuminator::illuminate;
use crate::image_buffer::ImageBuffer;
use crate::scene_view::SceneView;

/// Minimum ray parameter accepted for any ray, primary rays included.
pub const HIT_EPSILON: f32 = 0.001;

/// Color returned for surfaces without a material.
pub const ERROR_COLOR: Color = Color::new(1.0, 0.0, 1.0);

/// A configured tracer, reusable across renders.
#[derive(Debug, Clone)]
pub struct Tracer {
    config: TracerConfig,
    camera: Camera,
    background: Background,
}

impl Tracer {
    /// Validate `config` and build the camera.
    pub fn new(config: TracerConfig) -> TracerResult<Self> {
        config.validate()?;
        let camera = Camera::new(&config.camera, config.projection, config.fisheye_strength)?;
        let background = Background::Solid(config.background);
        Ok(Self {
            config,
            camera,
            background,
        })
    }

    /// Look up misses in `cube_map` instead of the solid background color.
    pub fn with_cube_map(mut self, cube_map: Arc<CubeMap>) -> Self {
        self.background = Background::Environment(cube_map);
        self
    }

    /// Render `scene` and optionally write the result to `output`.
    ///
    /// The scene is snapshotted once; buckets then render in parallel, each
    /// with its own random source, and are copied into the image.
    pub fn render<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        output: Option<&Path>,
    ) -> TracerResult<ImageBuffer> {
        let start = Instant::now();
        let view = SceneView::new(scene);
        let (width, height) = (self.config.width, self.config.height);

        log::info!(
            "Rendering {}x{} {:?} ({} spp, {} bounces, {} objects, {} lights)",
            width,
            height,
            self.camera.projection(),
            self.config.samples,
            self.config.max_bounces,
            view.objects().len(),
            view.lights().len()
        );

        let buckets = generate_buckets(width, height, self.config.bucket_size);
        let total = buckets.len();
        let completed = AtomicUsize::new(0);

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let mut rng = StdRng::from_entropy();
                let pixels = render_bucket(bucket, self, &view, &mut rng);

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done * 10 / total > (done - 1) * 10 / total {
                    log::info!("Progress: {}% ({}/{} buckets)", done * 100 / total, done, total);
                }

                BucketResult::new(*bucket, pixels)
            })
            .collect();

        let mut image = ImageBuffer::new(width, height);
        for result in results {
            let bucket = result.bucket;
            for (i, color) in result.pixels.into_iter().enumerate() {
                let local_x = (i % bucket.width as usize) as u32;
                let local_y = (i / bucket.width as usize) as u32;
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }

        log::info!("Render finished in {:.2?}", start.elapsed());

        if let Some(path) = output {
            image.save(path)?;
            log::info!("Wrote {}", path.display());
        }

        Ok(image)
    }

    /// Average of the configured number of samples for pixel `(x, y)`.
    ///
    /// A single sample goes through the pixel center; more samples jitter
    /// both coordinates uniformly by up to half a pixel.
    pub fn render_pixel<R: Rng + ?Sized>(
        &self,
        view: &SceneView<'_>,
        x: u32,
        y: u32,
        rng: &mut R,
    ) -> Color {
        let samples = self.config.samples.max(1);
        let t_min = self.camera.t_min().max(HIT_EPSILON);

        if samples == 1 {
            let ray = self.camera.generate_ray(self.image_point(x as f32, y as f32));
            return self.trace(view, &ray, t_min, self.config.max_bounces, &mut HitRecord::new());
        }

        let mut pixel_color = Color::ZERO;
        for _ in 0..samples {
            let jitter_x = rng.gen::<f32>() - 0.5;
            let jitter_y = rng.gen::<f32>() - 0.5;
            let point = self.image_point(x as f32 + jitter_x, y as f32 + jitter_y);
            let ray = self.camera.generate_ray(point);
            pixel_color += self.trace(view, &ray, t_min, self.config.max_bounces, &mut HitRecord::new());
        }
        pixel_color / samples as f32
    }

    /// Color seen along a world-space ray.
    ///
    /// `record` receives the nearest hit, if any.
    pub fn trace_ray(
        &self,
        view: &SceneView<'_>,
        ray: &Ray,
        bounces: u32,
        record: &mut HitRecord,
    ) -> Color {
        self.trace(view, ray, HIT_EPSILON, bounces, record)
    }

    /// Map a (possibly jittered) pixel position to the normalized image plane.
    fn image_point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            to_ndc(x, self.config.width),
            -to_ndc(y, self.config.height),
        )
    }

    fn trace(
        &self,
        view: &SceneView<'_>,
        ray: &Ray,
        t_min: f32,
        bounces: u32,
        record: &mut HitRecord,
    ) -> Color {
        let Some(object) = view.closest_hit(ray, Interval::from_min(t_min), record) else {
            return self.background.color(ray.direction());
        };

        let Some(material) = object.material else {
            return ERROR_COLOR;
        };

        let hit_pos = ray.at(record.time);
        let normal = object.world_normal(record.normal);
        let view_dir = -ray.direction().normalize_or_zero();

        let mut color = Color::ZERO;
        for light in view.lights() {
            if light.light.is_ambient() {
                color += material.ambient * light.light.color();
                continue;
            }

            let Some(illum) = illuminate(light.light, &light.local_to_world, hit_pos) else {
                continue;
            };

            if self.config.shadows {
                let shadow_ray = Ray::new(hit_pos, illum.dir_to_light);
                if view.occluded(&shadow_ray, HIT_EPSILON, illum.distance) {
                    continue;
                }
            }

            color += phong(material, normal, view_dir, illum.dir_to_light, illum.intensity);
        }

        // A black specular color would scale the bounce to zero anyway
        if bounces > 0 && material.is_reflective() {
            let bounce_ray = Ray::new(hit_pos, reflect(ray.direction(), normal));
            let bounce_color =
                self.trace(view, &bounce_ray, HIT_EPSILON, bounces - 1, &mut HitRecord::new());
            color += bounce_color * material.specular;
        }

        color
    }
}

/// Diffuse plus mirror-reflection specular term for one light.
fn phong(material: &Material, normal: Vec3, view_dir: Vec3, to_light: Vec3, intensity: Color) -> Color {
    let diffuse = material.diffuse * intensity * normal.dot(to_light).max(0.0);

    let reflected = reflect(-to_light, normal);
    let highlight = reflected.dot(view_dir).max(0.0).powf(material.shininess);
    let specular = material.specular * intensity * highlight;

    diffuse + specular
}

/// Pixel coordinate to [-1, 1]; a single row or column sits at 0.
fn to_ndc(coord: f32, extent: u32) -> f32 {
    if extent <= 1 {
        return 0.0;
    }
    2.0 * coord / (extent - 1) as f32 - 1.0
}
