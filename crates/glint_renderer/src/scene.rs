//! Renderable scene: surfaces, lights, camera and background.

use glint_core::{Color, SceneDesc, SceneResult};
use glint_math::Ray;

use crate::hittable::{Hit, Intersect, Surface};
use crate::{Camera, Light};

/// A scene ready for tracing.
///
/// Built once, then only read. Intersection is a linear scan over all
/// surfaces.
#[derive(Debug, Clone)]
pub struct Scene {
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
    camera: Camera,
    background: Color,
}

impl Scene {
    /// Create a scene with no surfaces or lights.
    pub fn new(camera: Camera, background: Color) -> Self {
        Self {
            surfaces: Vec::new(),
            lights: Vec::new(),
            camera,
            background,
        }
    }

    /// Build a scene from a description.
    ///
    /// Validates the description first; invalid cameras, unknown materials
    /// and the like are reported here and never reach the render loop.
    pub fn from_desc(desc: &SceneDesc) -> SceneResult<Self> {
        desc.validate()?;

        let mut scene = Scene::new(Camera::new(&desc.camera)?, desc.background);

        for surface_desc in &desc.surfaces {
            let material = *desc.material(surface_desc.material())?;
            let surface = Surface::from_desc(surface_desc, material);
            if surface.is_degenerate() {
                log::warn!("Degenerate surface will never be hit: {:?}", surface_desc);
            }
            scene.add_surface(surface);
        }

        for light_desc in &desc.lights {
            scene.add_light(Light::from(light_desc));
        }

        log::debug!(
            "Built scene: {} surfaces, {} lights",
            scene.surfaces.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Add a surface.
    pub fn add_surface(&mut self, surface: impl Into<Surface>) {
        self.surfaces.push(surface.into());
    }

    /// Add a light.
    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Color returned for rays that escape the scene.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Find the nearest hit along `ray`.
    ///
    /// On equal `t` the surface added first wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;
        let mut probe = *ray;

        for surface in &self.surfaces {
            if let Some(hit) = surface.intersect(&probe) {
                probe = probe.clipped(hit.t);
                closest = Some(hit);
            }
        }

        closest.map(|hit| Hit { ray: *ray, ..hit })
    }

    /// True if anything blocks `ray` inside its interval.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        self.surfaces
            .iter()
            .any(|surface| surface.intersect(ray).is_some())
    }
}
