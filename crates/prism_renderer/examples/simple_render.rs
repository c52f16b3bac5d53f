//! Simple ray tracer example.
//!
//! Renders a closed room with a few spheres, a glass ball and a small
//! pyramid mesh, then saves the result as a PNG.
//!
//! ```text
//! cargo run --example simple_render --release -- [output.png]
//! ```

use anyhow::{Context, Result};
use prism_renderer::{
    render, Camera, Color, ImageBuffer, Light, Material, Mesh, MeshData, Plane, RenderConfig,
    Scene, Sphere, Vec3,
};
use std::time::Instant;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;
const SAMPLES: u32 = 4;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output.png".to_string());

    let scene = build_scene()?;
    let config = RenderConfig {
        max_depth: 8,
        seed: Some(0),
        ..RenderConfig::default()
    };

    let start = Instant::now();
    let image = render(&scene, &config).context("Failed to render scene")?;
    log::info!("Total time {:.2?}", start.elapsed());

    save_png(&image, &output)?;
    log::info!("Saved to {}", output);
    Ok(())
}

fn build_scene() -> Result<Scene> {
    let camera = Camera::new(Vec3::new(0.0, 0.0, -50.0), 300.0, WIDTH, HEIGHT)
        .with_planes(0.0, 150.0)
        .with_samples(SAMPLES);
    let mut scene = Scene::new(camera);

    // Spheres
    scene.add(Sphere::new(
        Vec3::new(25.0, 0.0, 18.0),
        10.0,
        Material::diffuse(Color::new(1.0, 0.0, 0.0))
            .with_specular(0.3)
            .with_shininess(64.0),
    ));
    scene.add(Sphere::new(
        Vec3::new(-35.0, 0.0, 20.0),
        12.0,
        Material::diffuse(Color::new(0.0, 1.0, 0.0)),
    ));
    scene.add(Sphere::new(
        Vec3::new(12.0, -10.0, 5.0),
        5.0,
        Material::diffuse(Color::new(0.0, 0.0, 1.0)).with_specular(0.8),
    ));

    // Glass ball in front of everything
    scene.add(Sphere::new(
        Vec3::new(-8.0, 5.0, 0.0),
        7.0,
        Material::diffuse(Color::ONE)
            .with_transparency(0.9)
            .with_refractive_index(1.5)
            .with_specular(0.5)
            .with_shininess(128.0),
    ));

    // Room
    let white = Material::diffuse(Color::ONE);
    scene.add(Plane::new(Vec3::new(0.0, 50.0, 0.0), Vec3::Y, white));
    scene.add(Plane::new(Vec3::new(0.0, -50.0, 0.0), -Vec3::Y, white));
    scene.add(Plane::new(
        Vec3::new(-50.0, 0.0, 0.0),
        -Vec3::X,
        Material::diffuse(Color::new(1.0, 0.0, 0.0)),
    ));
    scene.add(Plane::new(
        Vec3::new(50.0, 0.0, 0.0),
        Vec3::X,
        Material::diffuse(Color::new(0.0, 0.0, 1.0)),
    ));
    scene.add(Plane::new(
        Vec3::new(0.0, 0.0, 30.0),
        -Vec3::Z,
        Material::diffuse(Color::new(0.0, 1.0, 1.0)),
    ));

    // Pyramid resting on the floor
    let pyramid = MeshData::new(
        vec![
            Vec3::new(-8.0, 0.0, -8.0),
            Vec3::new(8.0, 0.0, -8.0),
            Vec3::new(8.0, 0.0, 8.0),
            Vec3::new(-8.0, 0.0, 8.0),
            Vec3::new(0.0, 14.0, 0.0),
        ],
        vec![0, 4, 1, 1, 4, 2, 2, 4, 3, 3, 4, 0],
    )
    .context("Invalid pyramid mesh")?;
    scene.add(Mesh::new(
        Vec3::new(-20.0, -50.0, 10.0),
        &pyramid,
        Material::diffuse(Color::new(1.0, 0.8, 0.2)).with_specular(0.2),
    ));

    scene.add_light(Light::new(
        Vec3::new(0.0, 30.0, -20.0),
        Color::new(1.0, 1.0, 0.9),
        3000.0,
    ));
    scene.add_light(Light::new(
        Vec3::new(30.0, -20.0, -30.0),
        Color::new(0.6, 0.6, 1.0),
        1500.0,
    ));

    Ok(scene)
}

/// Clamp linear radiance to [0, 1] and quantize to 8 bits per channel.
fn to_rgb8(color: Color) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}

fn save_png(buffer: &ImageBuffer, path: &str) -> Result<()> {
    let rgb = image::RgbImage::from_fn(buffer.width, buffer.height, |x, y| {
        image::Rgb(to_rgb8(buffer.get(x, y)))
    });
    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path))
}
