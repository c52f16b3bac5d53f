//! Renderable scene and its intersection queries.
//!
//! A scene is built once through the additive `add_*` API and is then only
//! read. Rendering shares it by reference across worker threads.

use crate::hittable::{HitRecord, Surface};
use crate::{Camera, Mesh, Plane, Sphere, Triangle};
use prism_core::{Light, Material};
use prism_math::{Interval, Ray};

/// Any surface the scene can hold, for the generic [`Scene::add`].
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Mesh> for Shape {
    fn from(mesh: Mesh) -> Self {
        Shape::Mesh(mesh)
    }
}

/// Surfaces, lights and the camera looking at them.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    triangles: Vec<Triangle>,
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add a surface of any kind.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        match shape.into() {
            Shape::Sphere(s) => self.add_sphere(s),
            Shape::Plane(p) => self.add_plane(p),
            Shape::Triangle(t) => self.add_triangle(t),
            Shape::Mesh(m) => self.add_mesh(m),
        }
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Total number of surfaces across every kind.
    pub fn surface_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    /// Materials of every surface, in scan order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> + '_ {
        self.spheres
            .iter()
            .map(Surface::material)
            .chain(self.planes.iter().map(Surface::material))
            .chain(self.triangles.iter().map(Surface::material))
            .chain(self.meshes.iter().map(Surface::material))
    }

    /// Row-major index of pixel (x, y) in the output buffer.
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.camera.width() as usize + x as usize
    }

    /// Nearest surface hit along `ray`, if any.
    ///
    /// Scans spheres, planes, triangles, then meshes. Only a strictly closer
    /// hit replaces the current one, so the first surface found wins ties.
    pub fn intersect_closest(&self, ray: &Ray) -> Option<HitRecord> {
        let mut closest = None;
        closest_in(&self.spheres, ray, &mut closest);
        closest_in(&self.planes, ray, &mut closest);
        closest_in(&self.triangles, ray, &mut closest);
        closest_in(&self.meshes, ray, &mut closest);
        closest
    }

    /// True if any surface is hit at a distance in (0, max_distance).
    pub fn intersect_any_before(&self, ray: &Ray, max_distance: f64) -> bool {
        let range = Interval::new(0.0, max_distance);
        any_in(&self.spheres, ray, range)
            || any_in(&self.planes, ray, range)
            || any_in(&self.triangles, ray, range)
            || any_in(&self.meshes, ray, range)
    }
}

fn closest_in<S: Surface>(surfaces: &[S], ray: &Ray, closest: &mut Option<HitRecord>) {
    for (index, surface) in surfaces.iter().enumerate() {
        if let Some(hit) = surface.hit_info_at(ray, index) {
            if closest.map_or(true, |best| hit.is_closer_than(&best)) {
                *closest = Some(hit);
            }
        }
    }
}

fn any_in<S: Surface>(surfaces: &[S], ray: &Ray, range: Interval) -> bool {
    surfaces
        .iter()
        .filter_map(|s| s.intersect(ray))
        .any(|t| range.surrounds(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::SurfaceKind;
    use prism_core::MeshData;
    use prism_math::{Color, Vec3};

    fn scene() -> Scene {
        Scene::new(Camera::new(Vec3::ZERO, 100.0, 8, 8))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.intersect_closest(&ray).is_none());
        assert!(!scene.intersect_any_before(&ray, f64::INFINITY));
    }

    #[test]
    fn test_closest_across_kinds() {
        let mut scene = scene();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0, Material::default()));
        scene.add(Plane::new(Vec3::new(0.0, 0.0, 30.0), -Vec3::Z, Material::default()));
        scene.add(Triangle::new(
            Vec3::new(-1.0, -1.0, 10.0),
            Vec3::new(1.0, -1.0, 10.0),
            Vec3::new(0.0, 1.0, 10.0),
            Material::diffuse(Color::new(0.0, 1.0, 0.0)),
        ));

        let hit = scene
            .intersect_closest(&Ray::new(Vec3::ZERO, Vec3::Z))
            .expect("hit");
        assert_eq!(hit.kind, SurfaceKind::Triangle);
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 10.0).abs() < 1e-9);
        assert_eq!(hit.material.color, Color::new(0.0, 1.0, 0.0));
        assert_eq!(scene.surface_count(), 3);
    }

    #[test]
    fn test_closest_reports_index_within_kind() {
        let mut scene = scene();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0, Material::default()));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Material::default()));

        let hit = scene
            .intersect_closest(&Ray::new(Vec3::ZERO, Vec3::Z))
            .expect("hit");
        assert_eq!(hit.kind, SurfaceKind::Sphere);
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_tie_goes_to_first_found() {
        let mut scene = scene();
        let first = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let second = Material::diffuse(Color::new(0.0, 0.0, 1.0));
        scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Z, first));
        scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Z, second));

        let hit = scene
            .intersect_closest(&Ray::new(Vec3::ZERO, Vec3::Z))
            .expect("hit");
        assert_eq!(hit.index, 0);
        assert_eq!(hit.material.color, first.color);
    }

    #[test]
    fn test_mesh_in_scene() {
        let mut scene = scene();
        let data = MeshData::from_triangles(&[[
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]])
        .expect("valid mesh");
        scene.add(Mesh::new(Vec3::new(0.0, 0.0, 3.0), &data, Material::default()));

        let hit = scene
            .intersect_closest(&Ray::new(Vec3::ZERO, Vec3::Z))
            .expect("hit");
        assert_eq!(hit.kind, SurfaceKind::Mesh);
        assert!((hit.distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_any_before_respects_max_distance() {
        let mut scene = scene();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Material::default()));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.intersect_any_before(&ray, 20.0));
        assert!(!scene.intersect_any_before(&ray, 9.0));
        assert!(!scene.intersect_any_before(&Ray::new(Vec3::ZERO, -Vec3::Z), 20.0));
    }

    #[test]
    fn test_pixel_index_row_major() {
        let scene = scene();
        assert_eq!(scene.pixel_index(0, 0), 0);
        assert_eq!(scene.pixel_index(3, 2), 19);
    }

    #[test]
    fn test_materials_in_scan_order() {
        let mut scene = scene();
        let red = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let blue = Material::diffuse(Color::new(0.0, 0.0, 1.0));
        scene.add(Plane::new(Vec3::ZERO, Vec3::Y, blue));
        scene.add(Sphere::new(Vec3::ZERO, 1.0, red));

        let colors: Vec<_> = scene.materials().map(|m| m.color).collect();
        assert_eq!(colors, vec![red.color, blue.color]);
    }

    #[test]
    fn test_lights_are_stored() {
        let mut scene = scene();
        scene.add_light(Light::default());
        assert_eq!(scene.lights().len(), 1);
    }
}
