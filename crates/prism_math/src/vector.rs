//! Optics helpers on top of glam's vector algebra.

use crate::Vec3;

/// Vectors shorter than this normalize to zero instead of blowing up.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Ray-tracing operations missing from (or stricter than) glam's `DVec3`.
pub trait VecExt: Sized {
    /// Unit vector in the same direction, or zero when the length is below
    /// [`NORMALIZE_EPSILON`].
    fn normalized(self) -> Self;

    /// Mirror this direction about `normal`: `d - 2(d·n)n`.
    fn reflected(self, normal: Self) -> Self;

    /// Bend this unit direction through a surface with unit `normal` facing
    /// against it, using the relative index `eta = η_incident / η_transmitted`.
    ///
    /// Returns the zero vector on total internal reflection.
    fn refracted(self, normal: Self, eta: f64) -> Self;

    /// True when every component is exactly zero.
    fn is_zero(self) -> bool;
}

impl VecExt for Vec3 {
    #[inline]
    fn normalized(self) -> Self {
        let len = self.length();
        if len <= NORMALIZE_EPSILON {
            return Vec3::ZERO;
        }
        self / len
    }

    #[inline]
    fn reflected(self, normal: Self) -> Self {
        self - 2.0 * self.dot(normal) * normal
    }

    #[inline]
    fn refracted(self, normal: Self, eta: f64) -> Self {
        let cos_i = (-self.dot(normal)).clamp(-1.0, 1.0);
        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k < 0.0 {
            return Vec3::ZERO;
        }
        eta * self + (eta * cos_i - k.sqrt()) * normal
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == Vec3::ZERO
    }
}
