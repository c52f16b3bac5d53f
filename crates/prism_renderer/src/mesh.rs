//! Triangle mesh surface.
//!
//! A mesh is a set of triangles sharing one placement and one material.
//! Queries test every triangle; there is no bounding-volume pruning.

use crate::hittable::{HitRecord, Surface, SurfaceKind};
use crate::Triangle;
use prism_core::{Material, MeshData};
use prism_math::{Ray, Vec3};

/// A triangle mesh placed at `position`.
#[derive(Debug, Clone)]
pub struct Mesh {
    position: Vec3,
    triangles: Vec<Triangle>,
    material: Material,
}

impl Mesh {
    /// Place validated mesh data at `position` (local vertices are offset by it).
    pub fn new(position: Vec3, data: &MeshData, material: Material) -> Self {
        let triangles = data
            .triangles()
            .map(|[a, b, c]| Triangle::new(a + position, b + position, c + position, material))
            .collect();

        Self {
            position,
            triangles,
            material,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Nearest triangle hit along `ray`: (triangle index, distance).
    fn closest_triangle(&self, ray: &Ray) -> Option<(usize, f64)> {
        self.triangles
            .iter()
            .enumerate()
            .filter_map(|(i, tri)| tri.intersect(ray).map(|t| (i, t)))
            .fold(None, |best, (i, t)| match best {
                Some((_, best_t)) if best_t <= t => best,
                _ => Some((i, t)),
            })
    }
}

impl Surface for Mesh {
    const KIND: SurfaceKind = SurfaceKind::Mesh;

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.closest_triangle(ray).map(|(_, t)| t)
    }

    /// Normal of the triangle whose plane passes closest to `point`.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.triangles
            .iter()
            .min_by(|a, b| {
                a.plane_distance(point)
                    .abs()
                    .total_cmp(&b.plane_distance(point).abs())
            })
            .map_or(Vec3::ZERO, Triangle::normal)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    // Uses the normal of the triangle actually hit rather than searching again.
    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitRecord> {
        let (tri, distance) = self.closest_triangle(ray)?;
        let point = ray.at(distance);
        Some(HitRecord {
            distance,
            kind: SurfaceKind::Mesh,
            index,
            material: self.material,
            normal: self.triangles[tri].normal(),
            point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit quad in the XY plane facing +Z, made of two triangles.
    fn quad() -> MeshData {
        MeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 1, 3, 2],
        )
        .expect("valid quad")
    }

    #[test]
    fn test_mesh_offsets_vertices() {
        let mesh = Mesh::new(Vec3::new(0.0, 0.0, 5.0), &quad(), Material::default());

        assert_eq!(mesh.triangles().len(), 2);
        assert_eq!(mesh.triangles()[0].vertices()[0], Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_mesh_hits_both_halves() {
        let mesh = Mesh::new(Vec3::new(0.0, 0.0, 5.0), &quad(), Material::default());

        for (x, y) in [(0.2, 0.2), (0.8, 0.8)] {
            let ray = Ray::new(Vec3::new(x, y, 0.0), Vec3::Z);
            let t = mesh.intersect(&ray).expect("ray hits the quad");
            assert!((t - 5.0).abs() < 1e-9);
        }

        let ray = Ray::new(Vec3::new(1.5, 0.5, 0.0), Vec3::Z);
        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    fn test_mesh_picks_nearest_triangle() {
        let near = [Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, -1.0, 2.0), Vec3::new(0.0, 1.0, 2.0)];
        let far = [Vec3::new(-1.0, -1.0, 4.0), Vec3::new(0.0, 1.0, 4.0), Vec3::new(1.0, -1.0, 4.0)];
        // Far triangle listed first so order alone can't produce the answer
        let data = MeshData::from_triangles(&[far, near]).expect("valid mesh");
        let mesh = Mesh::new(Vec3::ZERO, &data, Material::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = mesh.hit_info_at(&ray, 2).expect("hit");

        assert!((hit.distance - 2.0).abs() < 1e-9);
        assert_eq!(hit.kind, SurfaceKind::Mesh);
        assert_eq!(hit.index, 2);
        assert!((hit.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_mesh_normal_at_uses_closest_plane() {
        let floor = [Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec3::X];
        let wall = [Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 5.0)];
        let data = MeshData::from_triangles(&[floor, wall]).expect("valid mesh");
        let mesh = Mesh::new(Vec3::ZERO, &data, Material::default());

        assert!((mesh.normal_at(Vec3::new(0.2, 0.0, 0.2)) - Vec3::Y).length() < 1e-9);
        assert!((mesh.normal_at(Vec3::new(0.2, 0.2, 5.0)) - Vec3::Z).length() < 1e-9);
    }
}
