//! Surface trait and HitRecord for ray-object intersection.

use prism_core::Material;
use prism_math::{Ray, Vec3};

/// Which per-kind bucket of the scene a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Sphere,
    Plane,
    Triangle,
    Mesh,
}

/// Record of a ray-surface intersection.
///
/// Carries a copy of the surface's material so shading never has to go back
/// to scene storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Distance along the (unit) ray, always > 0
    pub distance: f64,
    /// Kind of surface that was hit
    pub kind: SurfaceKind,
    /// Index of the surface within its kind's bucket
    pub index: usize,
    /// Material snapshot of the hit surface
    pub material: Material,
    /// Outward unit normal at the hit point
    pub normal: Vec3,
    /// World-space point of intersection
    pub point: Vec3,
}

impl HitRecord {
    /// Strict ordering by distance; equal distances are not closer.
    #[inline]
    pub fn is_closer_than(&self, other: &HitRecord) -> bool {
        self.distance < other.distance
    }
}

/// Geometry that rays can hit.
///
/// Every surface owns its own placement and material. The scene keeps one
/// `Vec` per implementor and scans each with static dispatch.
pub trait Surface: Send + Sync {
    /// Tag stamped into hit records.
    const KIND: SurfaceKind;

    /// Distance along `ray` to the nearest valid intersection.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Material of this surface.
    fn material(&self) -> &Material;

    /// Full hit description for `ray`, tagged with this surface's `index`.
    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitRecord> {
        let distance = self.intersect(ray)?;
        if distance <= 0.0 {
            return None;
        }
        let point = ray.at(distance);
        Some(HitRecord {
            distance,
            kind: Self::KIND,
            index,
            material: *self.material(),
            normal: self.normal_at(point),
            point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(distance: f64) -> HitRecord {
        HitRecord {
            distance,
            kind: SurfaceKind::Sphere,
            index: 0,
            material: Material::default(),
            normal: Vec3::Y,
            point: Vec3::ZERO,
        }
    }

    #[test]
    fn test_closer_than() {
        assert!(record(1.0).is_closer_than(&record(2.0)));
        assert!(!record(2.0).is_closer_than(&record(1.0)));
        assert!(!record(1.0).is_closer_than(&record(1.0)));
    }
}
