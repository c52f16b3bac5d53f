//! Surface material description.

use prism_math::{Color, Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`Material::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("refractive index must be a positive finite number, got {0}")]
    InvalidRefractiveIndex(f64),
}

/// Phong-style material with optional transparency.
///
/// `specular` and `transparency` describe how energy is split between the
/// diffuse, mirror and transmitted paths. They are not required to sum to 1;
/// the renderer only clamps each to [0, 1] where it uses them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base (diffuse) color, linear RGB
    pub color: Color,

    /// Phong exponent for the specular highlight
    pub shininess: f64,

    /// Specular coefficient: highlight strength and mirror reflectivity of opaque surfaces
    pub specular: f64,

    /// Fraction of light transmitted through the surface
    pub transparency: f64,

    /// Index of refraction of the material's interior (1.0 = air, 1.5 = glass)
    pub refractive_index: f64,

    /// Per-channel absorption inside the medium. Stored for scene authors, not used for shading.
    pub absorption: Option<Vec3>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::splat(0.5), // Grey default
            shininess: 32.0,
            specular: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            absorption: None,
        }
    }
}

impl Material {
    /// Opaque, non-specular material of the given color.
    pub fn diffuse(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the specular coefficient (highlight strength, mirror reflectivity when opaque).
    pub fn with_specular(mut self, specular: f64) -> Self {
        self.specular = specular;
        self
    }

    /// Set the Phong exponent of the specular highlight.
    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the fraction of light transmitted through the surface.
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    /// Set the index of refraction of the interior.
    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Attach a per-channel absorption coefficient.
    pub fn with_absorption(mut self, absorption: Vec3) -> Self {
        self.absorption = Some(absorption);
        self
    }

    /// Specular coefficient clamped to [0, 1].
    #[inline]
    pub fn clamped_specular(&self) -> f64 {
        Interval::UNIT.clamp(self.specular)
    }

    /// Transparency clamped to [0, 1].
    #[inline]
    pub fn clamped_transparency(&self) -> f64 {
        Interval::UNIT.clamp(self.transparency)
    }

    /// Refractive index the integrator shades with.
    ///
    /// Indices that fail [`Material::validate`] fall back to 1.0, so a bad
    /// material behaves like air instead of producing NaN radiance.
    #[inline]
    pub fn effective_refractive_index(&self) -> f64 {
        if self.has_valid_refractive_index() {
            self.refractive_index
        } else {
            1.0
        }
    }

    fn has_valid_refractive_index(&self) -> bool {
        self.refractive_index.is_finite() && self.refractive_index > 0.0
    }

    /// Check the invariants the integrator relies on.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !self.has_valid_refractive_index() {
            return Err(MaterialError::InvalidRefractiveIndex(self.refractive_index));
        }
        Ok(())
    }
}
