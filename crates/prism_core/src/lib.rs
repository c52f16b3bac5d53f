//! Prism Core - scene description data for the Prism ray tracer.
//!
//! This crate provides the renderer-agnostic pieces a scene is built from:
//!
//! - **Materials**: `Material` (color, Phong shininess, specular, transparency, IOR)
//! - **Lights**: `Light` (point light with color and intensity)
//! - **Meshes**: `MeshData` (validated positions + triangle indices)
//! - **Configuration**: `RenderConfig` (recursion depth, bias, bucket size, seed)
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{Material, RenderConfig};
//!
//! let glass = Material::diffuse(Color::ONE)
//!     .with_transparency(0.9)
//!     .with_refractive_index(1.5);
//! let config = RenderConfig::from_json_str(r#"{ "max_depth": 8 }"#)?;
//! ```

pub mod config;
pub mod light;
pub mod material;
pub mod mesh;

// Re-export commonly used types
pub use config::{ConfigError, RenderConfig};
pub use light::Light;
pub use material::{Material, MaterialError};
pub use mesh::{MeshData, MeshError};
