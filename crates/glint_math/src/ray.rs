use crate::{DVec3, Interval};

/// A ray segment in 3D space.
///
/// A ray is the set of points `origin + t * direction` for `t` strictly inside
/// `interval`. The interval is how secondary rays skip their own surface
/// (a small positive `min`) and how shadow rays stop at the light (`max`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Not necessarily unit length.
    pub direction: DVec3,
    pub interval: Interval,
}

impl Ray {
    /// Create a ray covering everything in front of its origin.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction,
            interval: Interval::POSITIVE,
        }
    }

    /// Create a ray restricted to `(t_min, t_max)`.
    pub fn segment(origin: DVec3, direction: DVec3, t_min: f64, t_max: f64) -> Self {
        Self {
            origin,
            direction,
            interval: Interval::new(t_min, t_max),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Whether a hit at parameter `t` lies strictly inside the valid interval.
    #[inline]
    pub fn accepts(&self, t: f64) -> bool {
        self.interval.surrounds(t)
    }

    /// The same ray with its far bound moved to `t_max`.
    #[inline]
    pub fn clipped(&self, t_max: f64) -> Self {
        Self {
            interval: self.interval.with_max(t_max),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let direction = DVec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.interval, Interval::POSITIVE);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_unnormalized_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -2.0));
        assert_eq!(ray.at(1.5), DVec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_segment_accepts_strictly() {
        let ray = Ray::segment(DVec3::ZERO, DVec3::Y, 0.5, 2.0);

        assert!(!ray.accepts(0.5));
        assert!(!ray.accepts(2.0));
        assert!(ray.accepts(1.0));
        assert!(!ray.accepts(-1.0));
    }

    #[test]
    fn test_clipped_keeps_near_bound() {
        let ray = Ray::segment(DVec3::ZERO, DVec3::Y, 0.25, f64::INFINITY);
        let clipped = ray.clipped(4.0);

        assert_eq!(clipped.interval, Interval::new(0.25, 4.0));
        assert_eq!(clipped.origin, ray.origin);
        assert!(!clipped.accepts(5.0));
    }
}
