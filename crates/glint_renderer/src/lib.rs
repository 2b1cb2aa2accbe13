//! Glint Renderer - recursive ray tracing on the CPU.
//!
//! A brute-force Whitted-style tracer: camera rays, nearest-hit search over
//! every surface, Blinn-Phong shading with shadow rays, and mirror
//! reflection down to a fixed depth.

mod camera;
mod hittable;
mod light;
mod renderer;
mod scene;
mod sphere;
mod triangle;
mod bucket;

pub use camera::Camera;
pub use hittable::{Hit, Intersect, Surface};
pub use light::{AmbientLight, Light, PointLight};
pub use renderer::{
    color_to_rgb8, reflect, render, render_pixel, shade, trace, trace_with_stats, ImageBuffer,
    RenderConfig, TraceStats, DEFAULT_MAX_DEPTH,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};

/// Re-export the scene description and math types the renderer consumes
pub use glint_core::{Color, Material, SceneDesc, SceneError, SceneResult};
pub use glint_math::{DVec3, Interval, Ray};
