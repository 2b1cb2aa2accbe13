//! Light sources.

use glint_core::{Color, LightDesc};
use glint_math::{DVec3, Ray};

use crate::{Hit, RenderConfig, Scene};

/// An isotropic point light with inverse-square falloff.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: DVec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: DVec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Blinn-Phong contribution of this light at `hit`, or black if the light
    /// is blocked.
    pub fn illuminate(&self, hit: &Hit, scene: &Scene, config: &RenderConfig) -> Color {
        let origin = hit.offset_point(config.epsilon);
        let to_light = self.position - origin;
        let distance = to_light.length();
        if distance <= config.epsilon {
            return Color::ZERO;
        }
        let l = to_light / distance;

        let shadow_ray = Ray::segment(origin, l, config.epsilon, distance);
        if scene.is_occluded(&shadow_ray) {
            return Color::ZERO;
        }

        let n = hit.normal;
        let v = -hit.ray.direction.normalize();
        let h = (l + v).normalize_or_zero();
        let material = hit.material;

        let diffuse = material.k_d * n.dot(l).max(0.0);
        let specular = material.k_s * n.dot(h).max(0.0).powf(material.p);
        let irradiance = self.intensity / (self.position - hit.point).length_squared();

        (diffuse + specular) * irradiance
    }
}

/// Uniform light that reaches every point, unshadowed.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub intensity: Color,
}

impl AmbientLight {
    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }

    pub fn illuminate(&self, hit: &Hit) -> Color {
        hit.material.ambient() * self.intensity
    }
}

/// Every light kind the tracer knows about.
#[derive(Debug, Clone, Copy)]
pub enum Light {
    Point(PointLight),
    Ambient(AmbientLight),
}

impl Light {
    /// Light reflected toward the viewer at `hit` due to this light.
    #[inline]
    pub fn illuminate(&self, hit: &Hit, scene: &Scene, config: &RenderConfig) -> Color {
        match self {
            Light::Point(light) => light.illuminate(hit, scene, config),
            Light::Ambient(light) => light.illuminate(hit),
        }
    }
}

impl From<&LightDesc> for Light {
    fn from(desc: &LightDesc) -> Self {
        match *desc {
            LightDesc::Point {
                position,
                intensity,
            } => Light::Point(PointLight::new(position, intensity)),
            LightDesc::Ambient { intensity } => Light::Ambient(AmbientLight::new(intensity)),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}
