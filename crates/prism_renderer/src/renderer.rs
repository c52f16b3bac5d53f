//! Core recursive ray tracer.
//!
//! Implements Whitted-style ray tracing with:
//! - Point-light shading with shadows through transparent occluders
//! - Fresnel-weighted reflection and refraction, recursing to a fixed depth
//! - Anti-aliasing via multi-sampling
//! - Parallel bucket rendering

use crate::bucket::{generate_buckets, render_bucket};
use crate::lighting::{reflectance_at_normal, schlick};
use crate::Scene;
use prism_core::{ConfigError, RenderConfig};
use prism_math::{Color, Ray, Vec3, VecExt};
use rand::RngCore;
use rayon::prelude::*;
use std::time::Instant;

/// Reflectivities at or below this don't spawn a reflection ray.
const REFLECTION_EPSILON: f64 = 1e-6;

/// Refraction rays cross the surface, so they are pushed further off it.
const REFRACTION_BIAS_SCALE: f64 = 10.0;

/// Sky gradient seen by rays that escape the scene.
///
/// White looking down, blending to sky blue looking up.
pub fn background(direction: Vec3) -> Color {
    let unit_direction = direction.normalized();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Radiance estimator for one scene and configuration.
#[derive(Clone, Copy)]
pub struct Integrator<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Compute the radiance arriving along `ray`.
    ///
    /// `depth` counts bounces taken so far. At `max_depth`, or when nothing
    /// is hit, the background is returned.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> Color {
        let ray = ray.normalized();
        if depth >= self.config.max_depth {
            return background(ray.direction);
        }

        let hit = match self.scene.intersect_closest(&ray) {
            Some(hit) => hit,
            None => return background(ray.direction),
        };

        let incoming = ray.direction;
        let material = &hit.material;
        let bias = self.config.bias;

        // Face the normal against the incoming ray
        let entering = hit.normal.dot(incoming) < 0.0;
        let normal = if entering { hit.normal } else { -hit.normal };

        let cos_theta = (-incoming.dot(normal)).clamp(0.0, 1.0);
        let ior = material.effective_refractive_index();
        let mut fresnel = schlick(cos_theta, reflectance_at_normal(ior));

        let transparency = material.clamped_transparency();

        let local = self
            .scene
            .direct_lighting(hit.point, normal, -incoming, material, bias)
            * (1.0 - transparency);

        let mut refraction = Color::ZERO;
        if transparency > 0.0 {
            let eta = if entering { 1.0 / ior } else { ior };
            let refracted = incoming.refracted(normal, eta);
            if refracted.is_zero() {
                // Total internal reflection: everything goes to the mirror branch
                fresnel = 1.0;
            } else {
                let refracted_ray =
                    Ray::offset(hit.point, refracted, bias * REFRACTION_BIAS_SCALE);
                refraction = self.trace_ray(&refracted_ray, depth + 1)
                    * (transparency * (1.0 - fresnel));
            }
        }

        let reflectivity = if transparency > 0.0 {
            fresnel
        } else {
            material.clamped_specular()
        };

        let mut reflection = Color::ZERO;
        if reflectivity > REFLECTION_EPSILON {
            let reflected_ray = Ray::offset(hit.point, incoming.reflected(normal), bias);
            reflection = self.trace_ray(&reflected_ray, depth + 1) * reflectivity;
        }

        local + refraction + reflection
    }
}

/// Render a single pixel with multi-sampling.
///
/// Every sample counts towards the average, including those that only see
/// the background.
pub fn render_pixel(integrator: &Integrator, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
    let camera = integrator.scene().camera();
    let samples = camera.samples().max(1);
    let mut pixel_color = Color::ZERO;

    for sample in 0..samples {
        let ray = camera.sample_ray(x, y, sample, rng);
        pixel_color += integrator.trace_ray(&ray, 0);
    }

    pixel_color / samples as f64
}

/// Row-major buffer of linear-light colors, origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// All pixels of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel on the rayon thread pool. The scene is only
/// read, and every bucket owns its output and its random number generator.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, ConfigError> {
    config.validate()?;
    for material in scene.materials() {
        if let Err(err) = material.validate() {
            log::warn!("Material {:?}: {}; shading it as air", material.color, err);
        }
    }

    let camera = scene.camera();
    let (width, height) = (camera.width(), camera.height());
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, {} buckets on {} threads",
        width,
        height,
        camera.samples(),
        buckets.len(),
        rayon::current_num_threads()
    );
    log::debug!(
        "Scene: {} surfaces, {} lights, max depth {}",
        scene.surface_count(),
        scene.lights().len(),
        config.max_depth
    );

    let start = Instant::now();
    let integrator = Integrator::new(scene, config);
    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, &integrator, config.seed))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in results {
        let bucket = result.bucket;
        for (row, pixels) in result.pixels.chunks_exact(bucket.width as usize).enumerate() {
            let offset = image.index(bucket.x, bucket.y + row as u32);
            image.pixels[offset..offset + pixels.len()].copy_from_slice(pixels);
        }
    }

    log::info!("Image rendered in {:.2?}", start.elapsed());
    Ok(image)
}
