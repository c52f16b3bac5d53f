use crate::{Vec3, VecExt};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length; the integrator
/// normalizes it on use.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose origin is pushed `bias` units along its direction.
    ///
    /// Secondary rays start this way so they don't re-hit the surface they
    /// leave from.
    #[inline]
    pub fn offset(origin: Vec3, direction: Vec3, bias: f64) -> Self {
        Self::new(origin + direction * bias, direction)
    }

    /// Copy of this ray with a unit direction.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::new(self.origin, self.direction.normalized())
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_offset() {
        let ray = Ray::offset(Vec3::ZERO, Vec3::Y, 0.5);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(ray.direction, Vec3::Y);
    }

    #[test]
    fn test_ray_normalized() {
        let ray = Ray::new(Vec3::ONE, Vec3::new(0.0, 0.0, 4.0)).normalized();
        assert_eq!(ray.origin, Vec3::ONE);
        assert_eq!(ray.direction, Vec3::Z);
    }
}
