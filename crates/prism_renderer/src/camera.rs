//! Pinhole camera for primary ray generation.

use prism_math::{Interval, Ray, Vec3, VecExt};
use rand::{Rng, RngCore};

/// Pinhole camera.
///
/// Pixel (0, 0) is the top-left corner of the image and rows run downwards,
/// matching the row-major layout of [`crate::ImageBuffer`]. The sensor is
/// measured in pixels and sits `focal` pixels in front of the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,

    // Image settings
    width: u32,
    height: u32,
    samples: u32,

    focal: f64,
    near: f64,
    far: f64,

    // Cached basis (set from forward)
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking down +Z with one sample per pixel.
    pub fn new(position: Vec3, focal: f64, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::Z,
            width,
            height,
            samples: 1,
            focal,
            near: 1.0,
            far: 1000.0,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_basis();
        camera
    }

    /// Set the viewing direction.
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        let forward = forward.normalized();
        if forward.is_zero() {
            log::warn!("Ignoring zero-length camera forward axis");
        } else {
            self.forward = forward;
            self.update_basis();
        }
        self
    }

    /// Set the near/far distances used by [`Camera::normalized_depth`].
    pub fn with_planes(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the anti-aliasing sample count. Zero is treated as one.
    pub fn with_samples(mut self, samples: u32) -> Self {
        if samples == 0 {
            log::warn!("Anti-aliasing sample count of 0 treated as 1");
        }
        self.samples = samples.max(1);
        self
    }

    fn update_basis(&mut self) {
        // Fall back to +Z as "up" when looking straight up or down
        let world_up = if self.forward.cross(Vec3::Y).length() < 1e-9 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        self.right = world_up.cross(self.forward).normalized();
        self.up = self.forward.cross(self.right);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    /// Ray through pixel (x, y), optionally shifted by a sub-pixel `jitter`.
    ///
    /// Without jitter the ray goes through the pixel center.
    pub fn primary_ray(&self, x: u32, y: u32, jitter: Option<(f64, f64)>) -> Ray {
        let (jx, jy) = jitter.unwrap_or((0.0, 0.0));
        let sx = x as f64 + 0.5 + jx - self.width as f64 / 2.0;
        let sy = self.height as f64 / 2.0 - (y as f64 + 0.5 + jy);

        let direction = (self.right * sx + self.up * sy + self.forward * self.focal).normalized();
        Ray::new(self.position, direction)
    }

    /// Ray for the `sample`-th anti-aliasing sample of pixel (x, y).
    ///
    /// Sample 0 is always the unjittered pixel center. Later samples are
    /// jittered by up to `1 / samples` of a pixel on each axis.
    pub fn sample_ray(&self, x: u32, y: u32, sample: u32, rng: &mut dyn RngCore) -> Ray {
        if sample == 0 || self.samples <= 1 {
            return self.primary_ray(x, y, None);
        }
        let span = 1.0 / self.samples as f64;
        let jitter = (rng.gen_range(0.0..span), rng.gen_range(0.0..span));
        self.primary_ray(x, y, Some(jitter))
    }

    /// Map a hit distance into [0, 1] between the near and far planes.
    ///
    /// Purely informational; the integrator never clips against these planes.
    pub fn normalized_depth(&self, distance: f64) -> f64 {
        let planes = Interval::new(self.near, self.far);
        if planes.size() <= 0.0 {
            return 0.0;
        }
        Interval::UNIT.clamp((distance - self.near) / planes.size())
    }
}
