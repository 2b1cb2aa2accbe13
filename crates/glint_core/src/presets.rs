//! Built-in scenes.
//!
//! Each preset is an ordinary [`SceneDesc`] built through the same API a
//! caller would use, so presets double as usage examples.

use glint_math::DVec3;

use crate::loader::{SceneError, SceneResult};
use crate::scene::{CameraDesc, Color, LightDesc, Material, SceneDesc};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["snowman", "mirror_corridor", "triangle_floor"];

/// Look up a preset scene by name.
pub fn preset(name: &str) -> SceneResult<SceneDesc> {
    match name {
        "snowman" => Ok(snowman()),
        "mirror_corridor" => Ok(mirror_corridor()),
        "triangle_floor" => Ok(triangle_floor()),
        other => Err(SceneError::UnknownPreset(other.to_string())),
    }
}

/// Three stacked white spheres with a red hat, on a huge white ground sphere.
pub fn snowman() -> SceneDesc {
    let camera = CameraDesc::look_at(DVec3::new(3.0, 1.0, 5.0), DVec3::new(0.0, -0.4, 0.0))
        .with_lens(24.0, 16.0 / 9.0);

    let mut scene = SceneDesc::new(camera);
    scene
        .add_material("white", Material::diffuse(Color::ONE).with_mirror(Color::splat(0.4)))
        .add_material(
            "red",
            Material::diffuse(Color::new(1.0, 0.05, 0.05)).with_mirror(Color::splat(0.2)),
        )
        .add_material("orange", Material::diffuse(Color::new(0.8, 0.393, 0.0)))
        .add_material("black", Material::diffuse(Color::ZERO));

    scene
        .add_sphere(DVec3::new(0.0, -1.0, 0.0), 0.45, "white")
        .add_sphere(DVec3::new(0.0, -0.32, 0.0), 0.35, "white")
        .add_sphere(DVec3::new(0.0, 0.2, 0.0), 0.26, "white")
        .add_sphere(DVec3::new(0.0, 0.4, 0.0), 0.2, "red")
        // nose and eyes
        .add_sphere(DVec3::new(0.2, 0.2, 0.2), 0.05, "orange")
        .add_sphere(DVec3::new(0.06, 0.27, 0.28), 0.042, "black")
        .add_sphere(DVec3::new(0.25, 0.27, 0.1), 0.042, "black")
        .add_sphere(DVec3::new(0.0, -41.0, 0.0), 39.7, "white");

    scene
        .add_light(LightDesc::Point {
            position: DVec3::new(12.0, 10.0, 5.0),
            intensity: Color::splat(300.0),
        })
        .add_light(LightDesc::Ambient {
            intensity: Color::splat(0.1),
        });

    scene
}

/// A red sphere between two parallel, facing mirror walls.
pub fn mirror_corridor() -> SceneDesc {
    let camera = CameraDesc::look_at(DVec3::new(0.0, 0.5, 4.0), DVec3::new(0.0, 0.0, -3.0))
        .with_lens(50.0, 4.0 / 3.0);

    let mut scene = SceneDesc::new(camera).with_background(Color::new(0.05, 0.05, 0.1));
    scene
        .add_material(
            "mirror",
            Material::diffuse(Color::splat(0.05)).with_mirror(Color::splat(0.9)),
        )
        .add_material(
            "red",
            Material::diffuse(Color::new(0.8, 0.1, 0.1)).with_specular(Color::splat(0.4), 60.0),
        );

    for x in [-2.0, 2.0] {
        scene.add_quad(
            [
                DVec3::new(x, -2.0, 2.0),
                DVec3::new(x, -2.0, -12.0),
                DVec3::new(x, 2.0, -12.0),
                DVec3::new(x, 2.0, 2.0),
            ],
            "mirror",
        );
    }
    scene.add_sphere(DVec3::new(0.0, 0.0, -3.0), 0.75, "red");

    scene
        .add_light(LightDesc::Point {
            position: DVec3::new(0.0, 3.0, 0.0),
            intensity: Color::splat(20.0),
        })
        .add_light(LightDesc::Ambient {
            intensity: Color::splat(0.05),
        });

    scene
}

/// A glossy blue sphere resting above a mirror floor made of two triangles.
pub fn triangle_floor() -> SceneDesc {
    let camera = CameraDesc::look_at(DVec3::new(0.0, 1.0, 4.0), DVec3::new(0.0, 0.0, -2.0))
        .with_lens(45.0, 4.0 / 3.0);

    let mut scene = SceneDesc::new(camera);
    scene
        .add_material(
            "floor",
            Material::diffuse(Color::splat(0.2)).with_mirror(Color::splat(0.4)),
        )
        .add_material(
            "blue",
            Material::diffuse(Color::new(0.2, 0.2, 0.5))
                .with_specular(Color::splat(0.3), 90.0)
                .with_mirror(Color::splat(0.5)),
        );

    scene
        .add_quad(
            [
                DVec3::new(-4.0, -1.0, 2.0),
                DVec3::new(4.0, -1.0, 2.0),
                DVec3::new(4.0, -1.0, -6.0),
                DVec3::new(-4.0, -1.0, -6.0),
            ],
            "floor",
        )
        .add_sphere(DVec3::new(0.0, 0.0, -2.0), 1.0, "blue");

    scene
        .add_light(LightDesc::Point {
            position: DVec3::new(4.0, 6.0, 4.0),
            intensity: Color::splat(100.0),
        })
        .add_light(LightDesc::Ambient {
            intensity: Color::splat(0.1),
        });

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_validate() {
        for name in PRESET_NAMES {
            let scene = preset(name).unwrap();
            assert!(scene.validate().is_ok(), "preset {name} failed validation");
            assert!(!scene.surfaces.is_empty());
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            preset("cornell_box"),
            Err(SceneError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_snowman_contents() {
        let scene = snowman();
        assert_eq!(scene.surfaces.len(), 8);
        assert_eq!(scene.lights.len(), 2);
        assert!((scene.camera.aspect - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_corridor_walls_face_each_other() {
        let scene = mirror_corridor();
        // two quads plus the sphere
        assert_eq!(scene.surfaces.len(), 5);
        assert!(scene.materials["mirror"].is_reflective());
    }
}
