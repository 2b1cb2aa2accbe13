//! Sphere primitive for ray tracing.

use glint_core::Material;
use glint_math::{DVec3, Ray};

use crate::hittable::{Hit, Intersect};

/// A sphere primitive.
///
/// A sphere with a non-positive radius is kept but never intersects.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// True if the radius is not strictly positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.radius > 0.0)
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        if self.is_degenerate() {
            return None;
        }

        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray.accepts(root) {
            root = (h + sqrtd) / a;
            if !ray.accepts(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(Hit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
            material: &self.material,
            ray: *ray,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(DVec3::ZERO, 1.0, Material::diffuse(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit_on_axis() {
        for (d, r) in [(5.0, 1.0), (2.5, 0.5), (100.0, 3.0)] {
            let sphere = Sphere::new(DVec3::ZERO, r, Material::default());
            let ray = Ray::new(DVec3::new(0.0, 0.0, d), DVec3::NEG_Z);

            let hit = sphere.intersect(&ray).unwrap();
            assert!((hit.t - (d - r)).abs() < 1e-12);
            assert!((hit.normal - DVec3::Z).length() < 1e-12);
            assert!((hit.point - DVec3::new(0.0, 0.0, r)).length() < 1e-12);
        }
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -2.0));
        let sphere = unit_sphere();
        let hit = sphere.intersect(&ray).unwrap();

        // t is measured in units of the direction vector
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);
        assert!(unit_sphere().intersect(&ray).is_none());

        // Ray passing beside the sphere
        let ray = Ray::new(DVec3::new(2.0, 0.0, 5.0), DVec3::NEG_Z);
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_miss_outside_interval() {
        // Geometric hits exist at t = 4 and t = 6
        let short = Ray::segment(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z, 0.0, 3.5);
        assert!(unit_sphere().intersect(&short).is_none());

        let late = Ray::segment(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z, 6.5, f64::INFINITY);
        assert!(unit_sphere().intersect(&late).is_none());

        // Endpoints are excluded
        let exact = Ray::segment(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z, 0.0, 4.0);
        assert!(unit_sphere().intersect(&exact).is_none());
    }

    #[test]
    fn test_sphere_far_root_when_near_excluded() {
        let ray = Ray::segment(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z, 4.5, f64::INFINITY);
        let sphere = unit_sphere();
        let hit = sphere.intersect(&ray).unwrap();

        assert!((hit.t - 6.0).abs() < 1e-12);
        assert!((hit.normal - DVec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_ray_from_inside() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let sphere = unit_sphere();
        let hit = sphere.intersect(&ray).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-12);
        // Geometric normal still points outward
        assert!((hit.normal - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_radius_never_hits() {
        for radius in [0.0, -1.0, f64::NAN] {
            let sphere = Sphere::new(DVec3::ZERO, radius, Material::default());
            let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z);

            assert!(sphere.is_degenerate());
            assert!(sphere.intersect(&ray).is_none());
        }
    }

    #[test]
    fn test_hit_borrows_sphere_material() {
        let red = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let sphere = Sphere::new(DVec3::ZERO, 1.0, red);
        let hit = sphere
            .intersect(&Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z))
            .unwrap();

        assert_eq!(*hit.material, red);
    }
}
