//! Sphere primitive for ray tracing.

use crate::hittable::{Surface, SurfaceKind};
use crate::HIT_EPSILON;
use prism_core::Material;
use prism_math::{Ray, Vec3, VecExt};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Sphere {
    const KIND: SurfaceKind = SurfaceKind::Sphere;

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        if a <= f64::EPSILON {
            return None;
        }
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        // Origin inside the sphere: the near root is behind us, use the far one
        if near > HIT_EPSILON {
            Some(near)
        } else if far > HIT_EPSILON {
            Some(far)
        } else {
            None
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalized()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: Vec3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Material::default())
    }

    #[test]
    fn test_sphere_hit_at_center_distance_minus_radius() {
        let cases = [
            (Vec3::new(0.0, 0.0, 10.0), 2.0),
            (Vec3::new(3.0, -4.0, 12.0), 0.5),
            (Vec3::new(-25.0, 40.0, 7.0), 10.0),
        ];
        for (center, radius) in cases {
            let sphere = unit_sphere_at(center, radius);
            let ray = Ray::new(Vec3::ZERO, center.normalized());

            let t = sphere.intersect(&ray).expect("ray aimed at the center must hit");
            assert!((t - (center.length() - radius)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_tangent_single_hit() {
        let sphere = unit_sphere_at(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let t = sphere.intersect(&ray).expect("tangent ray touches the sphere");
        assert!((t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.intersect(&ray).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere_at(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = sphere.intersect(&ray).expect("ray from the center exits the sphere");
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_info() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Vec3::new(1.0, 0.0, 0.0)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = sphere.hit_info_at(&ray, 3).expect("hit");
        assert_eq!(hit.kind, SurfaceKind::Sphere);
        assert_eq!(hit.index, 3);
        assert_eq!(hit.material.color, Vec3::new(1.0, 0.0, 0.0));
        assert!((hit.point - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-9);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_negative_radius_clamped() {
        assert_eq!(unit_sphere_at(Vec3::ZERO, -3.0).radius(), 0.0);
    }
}
