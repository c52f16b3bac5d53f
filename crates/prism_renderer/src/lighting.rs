//! Direct lighting, shadow transmittance and Fresnel terms.

use crate::Scene;
use prism_core::Material;
use prism_math::{Color, Interval, Ray, Vec3, VecExt};

/// Transmittance at or below this counts as full shadow.
pub const SHADOW_EPSILON: f64 = 1e-6;

/// Below this the shadow march gives up and reports an opaque path.
const OPAQUE_THRESHOLD: f64 = 1e-4;

/// Upper bound on occluders crossed by one shadow ray.
const MAX_TRANSMITTANCE_STEPS: usize = 64;

/// Schlick's approximation of Fresnel reflectance.
///
/// `cos_theta` is the cosine between the incoming direction and the normal,
/// `f0` the reflectance at normal incidence.
#[inline]
pub fn schlick(cos_theta: f64, f0: f64) -> f64 {
    f0 + (1.0 - f0) * (1.0 - cos_theta).powi(5)
}

/// Reflectance at normal incidence between air and a medium of index `ior`.
#[inline]
pub fn reflectance_at_normal(ior: f64) -> f64 {
    let r = (ior - 1.0) / (ior + 1.0);
    r * r
}

impl Scene {
    /// Fraction of light that survives travelling `max_distance` along `ray`.
    ///
    /// Each occluder crossed multiplies the result by its transparency. The
    /// march restarts `bias` past every hit and stops once the path is
    /// effectively opaque or the iteration budget runs out, in which case the
    /// value computed so far is returned.
    pub fn compute_transmittance(&self, ray: &Ray, max_distance: f64, bias: f64) -> f64 {
        let direction = ray.direction.normalized();
        let mut origin = ray.origin;
        let mut travelled = 0.0;
        let mut transmittance = 1.0;

        for _ in 0..MAX_TRANSMITTANCE_STEPS {
            if travelled >= max_distance {
                break;
            }
            let remaining = max_distance - travelled;

            let hit = match self.intersect_closest(&Ray::new(origin, direction)) {
                Some(hit) if hit.distance < remaining => hit,
                _ => break,
            };

            transmittance *= hit.material.clamped_transparency();
            if transmittance < OPAQUE_THRESHOLD {
                return 0.0;
            }

            origin = hit.point + direction * bias;
            travelled += hit.distance + bias;
        }

        Interval::UNIT.clamp(transmittance)
    }

    /// Light reaching `point` directly from every light, as seen from `view`.
    ///
    /// Diffuse is Lambertian with inverse-square falloff; the specular
    /// highlight is Blinn-Phong and skipped for fully transparent or
    /// non-specular materials. Shadow rays are attenuated by
    /// [`Scene::compute_transmittance`].
    pub fn direct_lighting(
        &self,
        point: Vec3,
        normal: Vec3,
        view: Vec3,
        material: &Material,
        bias: f64,
    ) -> Color {
        let normal = if normal.dot(view) < 0.0 { -normal } else { normal };
        let specular = material.clamped_specular();
        let shades_specular = material.clamped_transparency() < 1.0 && specular > 0.0;

        let mut diffuse = Color::ZERO;
        let mut highlight = Color::ZERO;

        for light in self.lights() {
            let distance = light.distance_to(point);
            if distance <= SHADOW_EPSILON {
                continue;
            }

            let shadow_ray = light.shadow_ray_from(point, normal, bias);
            let light_dir = shadow_ray.direction;
            let n_dot_l = normal.dot(light_dir);
            if n_dot_l <= 0.0 {
                continue;
            }

            let transmittance = self.compute_transmittance(&shadow_ray, distance - bias, bias);
            if transmittance <= SHADOW_EPSILON {
                continue;
            }

            let contribution = light.contribution(distance, n_dot_l) * transmittance;
            diffuse += contribution;

            if shades_specular {
                let half = (light_dir + view).normalized();
                let n_dot_h = normal.dot(half).max(0.0);
                highlight += contribution * n_dot_h.powf(material.shininess) * specular;
            }
        }

        material.color * diffuse + highlight
    }
}
