//! Triangle primitive for ray tracing.
//!
//! The intersection solves the 3x3 system
//! `v0 + beta (v1 - v0) + gamma (v2 - v0) = o + t d` with Cramer's rule,
//! entirely in f64.

use glint_core::Material;
use glint_math::{DVec3, Ray};

use crate::hittable::{Hit, Intersect};

/// Below this |cos| between ray and plane the system is treated as singular.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices (counter-clockwise)
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    /// Pre-computed unit normal from the winding, zero when degenerate
    normal: DVec3,
    /// Twice the triangle's area
    double_area: f64,
    /// Material
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3, material: Material) -> Self {
        let cross = (v1 - v0).cross(v2 - v0);
        let double_area = cross.length();
        let normal = if double_area > 0.0 {
            cross / double_area
        } else {
            DVec3::ZERO
        };

        Self {
            v0,
            v1,
            v2,
            normal,
            double_area,
            material,
        }
    }

    /// Normal implied by the counter-clockwise winding.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// True if the triangle has zero (or non-finite) area.
    pub fn is_degenerate(&self) -> bool {
        !(self.double_area > 0.0 && self.double_area.is_finite())
    }

    /// Solve for `(t, beta, gamma)` where the ray meets the triangle.
    ///
    /// `beta` weights `v1` and `gamma` weights `v2`; `v0` gets the remainder.
    pub(crate) fn solve(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        if self.is_degenerate() {
            return None;
        }

        let e1 = self.v0 - self.v1;
        let e2 = self.v0 - self.v2;
        let d = ray.direction;
        let rhs = self.v0 - ray.origin;

        let det = triple(e1, e2, d);
        if !(det.abs() > PARALLEL_EPSILON * self.double_area * d.length()) {
            return None;
        }

        let t = triple(e1, e2, rhs) / det;
        if !ray.accepts(t) {
            return None;
        }

        let gamma = triple(e1, rhs, d) / det;
        if !(0.0..=1.0).contains(&gamma) {
            return None;
        }

        let beta = triple(rhs, e2, d) / det;
        if beta < 0.0 || beta > 1.0 - gamma {
            return None;
        }

        Some((t, beta, gamma))
    }
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let (t, _, _) = self.solve(ray)?;

        // Two-sided: the normal always faces the incoming ray
        let normal = if self.normal.dot(ray.direction) > 0.0 {
            -self.normal
        } else {
            self.normal
        };

        Some(Hit {
            t,
            point: ray.at(t),
            normal,
            material: &self.material,
            ray: *ray,
        })
    }
}

/// Determinant of the matrix with columns a, b, c.
#[inline]
fn triple(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    a.dot(b.cross(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y, Material::default())
    }

    #[test]
    fn test_triangle_containment() {
        let tri = unit_triangle();
        let ray = Ray::new(DVec3::new(0.2, 0.2, 5.0), DVec3::NEG_Z);

        let (t, beta, gamma) = tri.solve(&ray).unwrap();
        let alpha = 1.0 - beta - gamma;
        assert!((t - 5.0).abs() < 1e-12);
        assert!(beta >= 0.0 && gamma >= 0.0 && alpha >= 0.0);
        assert!((alpha + beta + gamma - 1.0).abs() < 1e-12);
        assert!((beta - 0.2).abs() < 1e-12);
        assert!((gamma - 0.2).abs() < 1e-12);

        let hit = tri.intersect(&ray).unwrap();
        assert!(hit.point.z.abs() < 1e-12);
        let reconstructed = alpha * DVec3::ZERO + beta * DVec3::X + gamma * DVec3::Y;
        assert!((hit.point - reconstructed).length() < 1e-12);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = unit_triangle();
        for (x, y) in [(0.6, 0.6), (-0.1, 0.5), (0.5, -0.1), (2.0, 2.0)] {
            let ray = Ray::new(DVec3::new(x, y, 5.0), DVec3::NEG_Z);
            assert!(tri.intersect(&ray).is_none(), "({x}, {y}) should miss");
        }
    }

    #[test]
    fn test_triangle_miss_outside_interval() {
        let tri = unit_triangle();
        let ray = Ray::segment(DVec3::new(0.2, 0.2, 5.0), DVec3::NEG_Z, 0.0, 4.0);
        assert!(tri.intersect(&ray).is_none());

        let behind = Ray::new(DVec3::new(0.2, 0.2, -5.0), DVec3::NEG_Z);
        assert!(tri.intersect(&behind).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray() {
        let ray = Ray::new(DVec3::new(-1.0, 0.2, 0.0), DVec3::X);
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, Material::default());
        assert!(tri.is_degenerate());

        let ray = Ray::new(DVec3::new(0.5, 0.0, 5.0), DVec3::NEG_Z);
        assert!(tri.intersect(&ray).is_none());

        let point = Triangle::new(DVec3::ONE, DVec3::ONE, DVec3::ONE, Material::default());
        assert!(point.is_degenerate());
    }

    #[test]
    fn test_normal_faces_incoming_ray() {
        let tri = unit_triangle();
        assert_eq!(tri.normal(), DVec3::Z);

        let from_front = Ray::new(DVec3::new(0.2, 0.2, 5.0), DVec3::NEG_Z);
        assert_eq!(tri.intersect(&from_front).unwrap().normal, DVec3::Z);

        let from_back = Ray::new(DVec3::new(0.2, 0.2, -5.0), DVec3::Z);
        assert_eq!(tri.intersect(&from_back).unwrap().normal, DVec3::NEG_Z);
    }

    #[test]
    fn test_long_distance_thin_triangle() {
        // A sliver far from the ray origin still resolves in f64
        let tri = Triangle::new(
            DVec3::new(0.0, 0.0, -1.0e6),
            DVec3::new(1.0e-3, 0.0, -1.0e6),
            DVec3::new(0.0, 1.0e-3, -1.0e6),
            Material::default(),
        );
        let ray = Ray::new(DVec3::new(2.0e-4, 2.0e-4, 0.0), DVec3::NEG_Z);

        let hit = tri.intersect(&ray).unwrap();
        assert!((hit.t - 1.0e6).abs() < 1e-6);
    }
}
