//! Infinite plane primitive.

use crate::hittable::{Surface, SurfaceKind};
use prism_core::Material;
use prism_math::{Ray, Vec3, VecExt};

/// Rays whose direction is this close to perpendicular to the normal are
/// treated as parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

/// An infinite plane through `position` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    position: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized; a zero normal gives a
    /// plane no ray can hit.
    pub fn new(position: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            position,
            normal: normal.normalized(),
            material,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Surface for Plane {
    const KIND: SurfaceKind = SurfaceKind::Plane;

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
