//! Scene description types for glint.
//!
//! These types describe *what* is in a scene: camera placement, named
//! materials, surfaces and lights. They serialize to and from JSON and are
//! validated once, before any rendering starts.

use std::collections::BTreeMap;

use glint_math::DVec3;
use serde::{Deserialize, Deserializer, Serialize};

use crate::loader::{SceneError, SceneResult};

/// Color type alias (linear RGB, not clamped)
pub type Color = DVec3;

/// Background used when a scene file does not set one.
pub const DEFAULT_BACKGROUND: Color = DVec3::new(0.2, 0.3, 0.5);

/// Blinn-Phong material with a mirror term.
///
/// In scene files every coefficient may be written either as a single grey
/// value or as an `[r, g, b]` triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Material {
    /// Diffuse coefficient
    #[serde(deserialize_with = "deserialize_color")]
    pub k_d: Color,

    /// Specular coefficient
    #[serde(default, deserialize_with = "deserialize_color")]
    pub k_s: Color,

    /// Specular exponent
    #[serde(default = "default_shininess")]
    pub p: f64,

    /// Mirror reflection coefficient
    #[serde(default, deserialize_with = "deserialize_color")]
    pub k_m: Color,

    /// Ambient coefficient (falls back to `k_d`)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub k_a: Option<Color>,
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5))
    }
}

impl Material {
    /// Create a purely diffuse material.
    pub fn diffuse(k_d: Color) -> Self {
        Self {
            k_d,
            k_s: Color::ZERO,
            p: default_shininess(),
            k_m: Color::ZERO,
            k_a: None,
        }
    }

    /// Set the specular coefficient and exponent.
    pub fn with_specular(mut self, k_s: Color, p: f64) -> Self {
        self.k_s = k_s;
        self.p = p;
        self
    }

    /// Set the mirror reflection coefficient.
    pub fn with_mirror(mut self, k_m: Color) -> Self {
        self.k_m = k_m;
        self
    }

    /// Set an ambient coefficient different from the diffuse one.
    pub fn with_ambient(mut self, k_a: Color) -> Self {
        self.k_a = Some(k_a);
        self
    }

    /// The coefficient applied to ambient light.
    #[inline]
    pub fn ambient(&self) -> Color {
        self.k_a.unwrap_or(self.k_d)
    }

    /// Check if this material reflects mirror rays at all.
    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.k_m != Color::ZERO
    }

    fn validate(&self, name: &str) -> SceneResult<()> {
        let invalid = |reason: &str| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if !(self.p.is_finite() && self.p >= 0.0) {
            return Err(invalid("specular exponent must be finite and >= 0"));
        }
        let coefficients = [self.k_d, self.k_s, self.k_m, self.ambient()];
        if !coefficients.iter().all(|c| c.is_finite()) {
            return Err(invalid("coefficients must be finite"));
        }
        Ok(())
    }
}

/// Camera placement and projection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    /// Viewpoint
    pub eye: DVec3,

    /// Point that appears centered in the image
    pub target: DVec3,

    /// Direction that appears straight up in the image
    #[serde(default = "default_up")]
    pub up: DVec3,

    /// Full vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f64,

    /// Width / height of the image plane
    #[serde(default = "default_aspect")]
    pub aspect: f64,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            eye: DVec3::ZERO,
            target: DVec3::NEG_Z,
            up: default_up(),
            vfov: default_vfov(),
            aspect: default_aspect(),
        }
    }
}

impl CameraDesc {
    /// Create a camera looking from `eye` at `target` with +Y up.
    pub fn look_at(eye: DVec3, target: DVec3) -> Self {
        Self {
            eye,
            target,
            ..Default::default()
        }
    }

    /// Set the up vector.
    pub fn with_up(mut self, up: DVec3) -> Self {
        self.up = up;
        self
    }

    /// Set the vertical field of view (degrees) and aspect ratio.
    pub fn with_lens(mut self, vfov: f64, aspect: f64) -> Self {
        self.vfov = vfov;
        self.aspect = aspect;
        self
    }

    /// Check the camera can produce a well-defined view.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.eye.is_finite() || !self.target.is_finite() || !self.up.is_finite() {
            return Err(SceneError::InvalidCamera(
                "eye, target and up must be finite".to_string(),
            ));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(SceneError::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                self.aspect
            )));
        }

        let forward = self.target - self.eye;
        if forward.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "eye and target are the same point".to_string(),
            ));
        }
        // Relative test so the check does not depend on scene scale
        let side = forward.cross(self.up).length_squared();
        if side <= 1e-12 * forward.length_squared() * self.up.length_squared() {
            return Err(SceneError::InvalidCamera(
                "up vector is zero or parallel to the viewing direction".to_string(),
            ));
        }
        Ok(())
    }
}

/// A surface in the scene, referring to a material by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceDesc {
    Sphere {
        center: DVec3,
        radius: f64,
        material: String,
    },
    /// Vertices in counter-clockwise order
    Triangle {
        vertices: [DVec3; 3],
        material: String,
    },
}

impl SurfaceDesc {
    /// Name of the material this surface uses.
    pub fn material(&self) -> &str {
        match self {
            SurfaceDesc::Sphere { material, .. } | SurfaceDesc::Triangle { material, .. } => {
                material
            }
        }
    }
}

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        position: DVec3,
        #[serde(deserialize_with = "deserialize_color")]
        intensity: Color,
    },
    Ambient {
        #[serde(deserialize_with = "deserialize_color")]
        intensity: Color,
    },
}

/// A complete scene description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDesc {
    pub camera: CameraDesc,

    /// Color seen where no surface is hit
    #[serde(default = "default_background", deserialize_with = "deserialize_color")]
    pub background: Color,

    /// Materials by name
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,

    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,

    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

impl SceneDesc {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: CameraDesc) -> Self {
        Self {
            camera,
            background: DEFAULT_BACKGROUND,
            materials: BTreeMap::new(),
            surfaces: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Register a material under `name`, replacing any previous one.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) -> &mut Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Add a sphere.
    pub fn add_sphere(
        &mut self,
        center: DVec3,
        radius: f64,
        material: impl Into<String>,
    ) -> &mut Self {
        self.surfaces.push(SurfaceDesc::Sphere {
            center,
            radius,
            material: material.into(),
        });
        self
    }

    /// Add a triangle (counter-clockwise vertices).
    pub fn add_triangle(&mut self, vertices: [DVec3; 3], material: impl Into<String>) -> &mut Self {
        self.surfaces.push(SurfaceDesc::Triangle {
            vertices,
            material: material.into(),
        });
        self
    }

    /// Add a planar quad as two triangles sharing the `a`-`c` diagonal.
    pub fn add_quad(&mut self, corners: [DVec3; 4], material: impl Into<String>) -> &mut Self {
        let material = material.into();
        let [a, b, c, d] = corners;
        self.add_triangle([a, b, c], material.clone());
        self.add_triangle([a, c, d], material)
    }

    /// Add a light.
    pub fn add_light(&mut self, light: LightDesc) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> SceneResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
    }

    /// Check the whole description before rendering.
    ///
    /// Degenerate geometry (zero radius, zero-area triangles) is *not* an
    /// error; such surfaces simply never intersect.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;

        if !self.background.is_finite() {
            return Err(SceneError::NonFinite("background color".to_string()));
        }
        for (name, material) in &self.materials {
            material.validate(name)?;
        }
        for surface in &self.surfaces {
            self.material(surface.material())?;
        }
        for light in &self.lights {
            let finite = match light {
                LightDesc::Point {
                    position,
                    intensity,
                } => position.is_finite() && intensity.is_finite(),
                LightDesc::Ambient { intensity } => intensity.is_finite(),
            };
            if !finite {
                return Err(SceneError::NonFinite(format!("light {light:?}")));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Serde helpers
// =============================================================================

/// A color as written in scene files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Grey(f64),
    Rgb([f64; 3]),
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Self {
        match value {
            ColorValue::Grey(v) => Color::splat(v),
            ColorValue::Rgb(rgb) => Color::from_array(rgb),
        }
    }
}

fn deserialize_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    ColorValue::deserialize(deserializer).map(Color::from)
}

fn deserialize_optional_color<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Color>, D::Error> {
    Option::<ColorValue>::deserialize(deserializer).map(|value| value.map(Color::from))
}

fn default_shininess() -> f64 {
    20.0
}

fn default_up() -> DVec3 {
    DVec3::Y
}

fn default_vfov() -> f64 {
    90.0
}

fn default_aspect() -> f64 {
    1.0
}

fn default_background() -> Color {
    DEFAULT_BACKGROUND
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_scene() -> SceneDesc {
        let mut scene = SceneDesc::new(CameraDesc::look_at(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO));
        scene
            .add_material("grey", Material::default())
            .add_sphere(DVec3::ZERO, 1.0, "grey")
            .add_light(LightDesc::Ambient {
                intensity: Color::splat(0.1),
            });
        scene
    }

    #[test]
    fn test_material_defaults() {
        let material = Material::diffuse(Color::new(0.4, 0.4, 0.2));
        assert_eq!(material.k_s, Color::ZERO);
        assert_eq!(material.p, 20.0);
        assert_eq!(material.k_m, Color::ZERO);
        assert_eq!(material.ambient(), material.k_d);
        assert!(!material.is_reflective());
    }

    #[test]
    fn test_material_ambient_override() {
        let material = Material::diffuse(Color::ONE)
            .with_ambient(Color::splat(0.25))
            .with_mirror(Color::splat(0.5));
        assert_eq!(material.ambient(), Color::splat(0.25));
        assert!(material.is_reflective());
    }

    #[test]
    fn test_material_accepts_grey_and_rgb() {
        let json = r#"{ "k_d": [0.2, 0.2, 0.5], "k_s": 0.3, "p": 90, "k_m": 0.5 }"#;
        let material: Material = serde_json::from_str(json).unwrap();

        assert_eq!(material.k_d, Color::new(0.2, 0.2, 0.5));
        assert_eq!(material.k_s, Color::splat(0.3));
        assert_eq!(material.p, 90.0);
        assert_eq!(material.k_m, Color::splat(0.5));
        assert_eq!(material.k_a, None);
    }

    #[test]
    fn test_valid_scene_passes() {
        assert!(simple_scene().validate().is_ok());
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let scene = SceneDesc::new(CameraDesc::default());
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_unknown_material_rejected() {
        let mut scene = simple_scene();
        scene.add_sphere(DVec3::X, 0.5, "chrome");

        match scene.validate() {
            Err(SceneError::UnknownMaterial(name)) => assert_eq!(name, "chrome"),
            other => panic!("expected UnknownMaterial, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_shininess_rejected() {
        let mut scene = simple_scene();
        scene.add_material("bad", Material::default().with_specular(Color::ONE, -1.0));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn test_degenerate_geometry_is_valid() {
        let mut scene = simple_scene();
        scene.add_sphere(DVec3::ZERO, -1.0, "grey");
        scene.add_triangle([DVec3::ZERO, DVec3::X, DVec3::X * 2.0], "grey");
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_camera_rejects_bad_fov() {
        for vfov in [0.0, -10.0, 180.0, f64::NAN] {
            let camera = CameraDesc::default().with_lens(vfov, 1.0);
            assert!(
                matches!(camera.validate(), Err(SceneError::InvalidCamera(_))),
                "vfov {vfov} should be rejected"
            );
        }
    }

    #[test]
    fn test_camera_rejects_bad_aspect() {
        let camera = CameraDesc::default().with_lens(45.0, 0.0);
        assert!(matches!(camera.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_camera_rejects_parallel_up() {
        let camera = CameraDesc::look_at(DVec3::ZERO, DVec3::new(0.0, 5.0, 0.0));
        assert!(matches!(camera.validate(), Err(SceneError::InvalidCamera(_))));

        let camera = CameraDesc::default().with_up(DVec3::ZERO);
        assert!(matches!(camera.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_camera_rejects_coincident_eye_target() {
        let camera = CameraDesc::look_at(DVec3::ONE, DVec3::ONE);
        assert!(matches!(camera.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_add_quad_splits_into_two_triangles() {
        let mut scene = simple_scene();
        let before = scene.surfaces.len();
        scene.add_quad([DVec3::ZERO, DVec3::X, DVec3::X + DVec3::Y, DVec3::Y], "grey");

        assert_eq!(scene.surfaces.len(), before + 2);
        assert!(scene.validate().is_ok());
    }
}
