//! Intersection contract and the hit record.

use glint_core::{Material, SurfaceDesc};
use glint_math::{DVec3, Ray};

use crate::{Sphere, Triangle};

/// Record of a ray-surface intersection.
///
/// Produced per query and never stored; it borrows the material from the
/// surface that was hit.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: DVec3,
    /// Unit surface normal at the intersection
    pub normal: DVec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// The ray that produced this hit
    pub ray: Ray,
}

impl<'a> Hit<'a> {
    /// Hit point nudged `epsilon` along the normal, toward the side the
    /// incident ray came from.
    ///
    /// Secondary rays start here so they do not re-hit the same surface.
    pub fn offset_point(&self, epsilon: f64) -> DVec3 {
        if self.ray.direction.dot(self.normal) > 0.0 {
            self.point - self.normal * epsilon
        } else {
            self.point + self.normal * epsilon
        }
    }
}

/// Trait for geometry that rays can hit.
pub trait Intersect {
    /// Find the nearest intersection with `t` strictly inside the ray's
    /// interval, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
}

/// Every surface kind the tracer knows about.
#[derive(Debug, Clone)]
pub enum Surface {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Surface {
    /// Build a surface from its description and resolved material.
    pub fn from_desc(desc: &SurfaceDesc, material: Material) -> Self {
        match desc {
            SurfaceDesc::Sphere { center, radius, .. } => {
                Surface::Sphere(Sphere::new(*center, *radius, material))
            }
            SurfaceDesc::Triangle { vertices, .. } => {
                let [v0, v1, v2] = *vertices;
                Surface::Triangle(Triangle::new(v0, v1, v2, material))
            }
        }
    }

    /// True if this surface can never be hit.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Surface::Sphere(sphere) => sphere.is_degenerate(),
            Surface::Triangle(triangle) => triangle.is_degenerate(),
        }
    }
}

impl Intersect for Surface {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        match self {
            Surface::Sphere(sphere) => sphere.intersect(ray),
            Surface::Triangle(triangle) => triangle.intersect(ray),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Surface::Triangle(triangle)
    }
}
