//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Every pixel is a pure function of the
//! read-only scene, so the result matches [`crate::render`] bit for bit.

use std::time::Instant;

use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer, RenderConfig, TraceStats};
use crate::{Color, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering a `width` x `height` image, center first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    image_width: u32,
    image_height: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            pixels.push(render_pixel(scene, x, y, image_width, image_height, config, stats));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    /// Rays traced for this bucket
    pub stats: TraceStats,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>, stats: TraceStats) -> Self {
        Self { bucket, pixels, stats }
    }

    /// Copy this bucket's pixels into `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let b = &self.bucket;
        for (i, color) in self.pixels.iter().enumerate() {
            let local_x = i as u32 % b.width;
            let local_y = i as u32 / b.width;
            image.set(b.x + local_x, b.y + local_y, *color);
        }
    }
}

/// Render the scene on the rayon thread pool, one task per bucket.
///
/// Workers only read the scene; the image is assembled on the calling thread
/// once all buckets are done.
pub fn render_parallel(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut stats = TraceStats::default();
            let pixels = render_bucket(bucket, scene, width, height, config, &mut stats);
            log::debug!(
                "Bucket {} at ({}, {}) done: {} rays",
                bucket.index,
                bucket.x,
                bucket.y,
                stats.rays
            );
            BucketResult::new(*bucket, pixels, stats)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    let mut stats = TraceStats::default();
    for result in &results {
        result.write_into(&mut image);
        stats.merge(&result.stats);
    }

    log::info!(
        "Rendered {}x{} in {:?} on {} threads ({} buckets, {} rays, max depth {})",
        width,
        height,
        start.elapsed(),
        rayon::current_num_threads(),
        results.len(),
        stats.rays,
        stats.max_depth_reached
    );

    image
}
