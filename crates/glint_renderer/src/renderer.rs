//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Nearest-hit search against every surface
//! - Blinn-Phong local illumination with shadow rays
//! - Mirror reflection, recursing up to a fixed depth

use std::time::Instant;

use glint_core::Color;
use glint_math::{DVec3, Interval, Ray};

use crate::{Hit, Scene};

/// Deepest recursion level at which a reflection ray is still spawned from.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Render configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Reflection rays are spawned only while `depth < max_depth`
    pub max_depth: u32,
    /// Offset for secondary ray origins and their interval start
    pub epsilon: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            epsilon: 1e-6,
        }
    }
}

impl RenderConfig {
    /// Set the maximum reflection depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `trace` invocations (camera plus reflection rays)
    pub rays: u64,
    /// Deepest recursion level reached
    pub max_depth_reached: u32,
}

impl TraceStats {
    #[inline]
    fn record(&mut self, depth: u32) {
        self.rays += 1;
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }
}

/// Compute the color seen along a ray.
///
/// `depth` is 0 for camera rays and grows by one per mirror bounce.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    trace_with_stats(ray, scene, depth, config, &mut TraceStats::default())
}

/// [`trace`], also counting rays into `stats`.
pub fn trace_with_stats(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    stats.record(depth);

    match scene.closest_hit(ray) {
        Some(hit) => shade(&hit, scene, depth, config, stats),
        None => scene.background(),
    }
}

/// Shade a hit: every light's contribution plus the mirror term.
///
/// At `depth >= max_depth` only local illumination is returned.
pub fn shade(
    hit: &Hit,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    let mut color = scene
        .lights()
        .iter()
        .fold(Color::ZERO, |acc, light| acc + light.illuminate(hit, scene, config));

    if hit.material.is_reflective() && depth < config.max_depth {
        let direction = reflect(hit.ray.direction, hit.normal);
        let reflected = Ray::segment(
            hit.offset_point(config.epsilon),
            direction,
            config.epsilon,
            f64::INFINITY,
        );
        color += hit.material.k_m * trace_with_stats(&reflected, scene, depth + 1, config, stats);
    }

    color
}

/// Mirror `d` about the unit normal `n`.
#[inline]
pub fn reflect(d: DVec3, n: DVec3) -> DVec3 {
    d - 2.0 * d.dot(n) * n
}

/// Trace the camera ray through the center of pixel (x, y).
pub fn render_pixel(
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    let ray = scene.camera().generate_ray(x, y, width, height);
    trace_with_stats(&ray, scene, 0, config, stats)
}

/// Apply gamma correction (gamma = 2.2).
#[inline]
fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit sRGB-ish RGB after scaling by `exposure`.
pub fn color_to_rgb8(color: Color, exposure: f64) -> [u8; 3] {
    let encode = |c: f64| {
        let encoded = linear_to_gamma(c * exposure);
        (255.0 * Interval::UNIT.clamp(encoded)).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Floating-point RGB image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to interleaved 8-bit RGB bytes.
    pub fn to_rgb8(&self, exposure: f64) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color, exposure))
            .collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; see [`crate::render_parallel`] for the bucketed version.
pub fn render(scene: &Scene, width: u32, height: u32, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);
    let mut stats = TraceStats::default();

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, x, y, width, height, config, &mut stats);
            image.set(x, y, color);
        }
    }

    log::info!(
        "Rendered {}x{} in {:?} ({} rays, max depth {})",
        width,
        height,
        start.elapsed(),
        stats.rays,
        stats.max_depth_reached
    );

    image
}
