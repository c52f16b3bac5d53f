//! Point lights.

use prism_math::{Color, Ray, Vec3, VecExt};
use serde::{Deserialize, Serialize};

/// Distances at or below this are treated as the light sitting on the point.
pub const LIGHT_EPSILON: f64 = 1e-6;

/// An isotropic point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f64,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            intensity: 1.0,
        }
    }
}

impl Light {
    pub fn new(position: Vec3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Unit direction from the light towards `point`.
    #[inline]
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        (point - self.position).normalized()
    }

    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f64 {
        (point - self.position).length()
    }

    /// Radiant color leaving the light.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.color * self.intensity
    }

    /// Ray from a surface `point` towards the light, with its origin pushed
    /// `bias` units along the surface `normal`.
    pub fn shadow_ray_from(&self, point: Vec3, normal: Vec3, bias: f64) -> Ray {
        Ray::new(point + normal * bias, -self.direction_to(point))
    }

    /// Light arriving at a surface `distance` away whose normal makes
    /// cosine `n_dot_l` with the light direction (inverse-square falloff).
    pub fn contribution(&self, distance: f64, n_dot_l: f64) -> Color {
        if distance <= LIGHT_EPSILON || n_dot_l <= 0.0 {
            return Color::ZERO;
        }
        self.emitted() * (n_dot_l / (distance * distance))
    }
}
