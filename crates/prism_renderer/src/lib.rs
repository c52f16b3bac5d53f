//! Prism renderer - recursive CPU ray tracing
//!
//! A Whitted-style ray tracer: point lights with shadows attenuated by
//! transparent occluders, mirror reflection, Fresnel-weighted refraction and
//! multi-sample anti-aliasing. The image is split into buckets that are
//! traced in parallel.

mod bucket;
mod camera;
mod hittable;
mod lighting;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use camera::Camera;
pub use hittable::{HitRecord, Surface, SurfaceKind};
pub use lighting::{reflectance_at_normal, schlick, SHADOW_EPSILON};
pub use mesh::Mesh;
pub use plane::Plane;
pub use renderer::{background, render, render_pixel, ImageBuffer, Integrator};
pub use scene::{Scene, Shape};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export scene description types from prism_core
pub use prism_core::{ConfigError, Light, Material, MeshData, RenderConfig};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Color, Interval, Ray, Vec3, VecExt};

/// Hits closer than this along a ray are treated as self-intersections.
pub const HIT_EPSILON: f64 = 1e-6;
