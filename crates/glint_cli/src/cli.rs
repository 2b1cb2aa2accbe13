use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Largest image the CLI will allocate, in pixels (8192 x 8192).
pub const MAX_PIXELS: u64 = 1 << 26;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene with the glint ray tracer and write a PNG.
#[derive(Debug, Parser)]
#[command(name = "glint", version, about)]
pub struct Args {
    /// JSON scene file; when omitted the preset is rendered
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long, default_value = "snowman")]
    pub preset: String,

    /// Image width in pixels; height follows from the camera aspect ratio
    #[arg(long = "nx", default_value_t = 256)]
    pub width: u32,

    /// Output PNG path
    #[arg(long = "outFile", visible_alias = "out-file", default_value = "render.png")]
    pub out_file: PathBuf,

    /// Gain applied to linear colors before gamma encoding
    #[arg(long, default_value_t = 1.0)]
    pub exposure: f64,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    pub serial: bool,

    /// Logging level (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Image height for `width` at the given aspect ratio, at least one row.
///
/// Fails when the resulting image would exceed [`MAX_PIXELS`].
pub fn derived_height(width: u32, aspect: f64) -> Result<u32> {
    let height = (f64::from(width) / aspect).round().max(1.0);
    if !height.is_finite() || height * f64::from(width) > MAX_PIXELS as f64 {
        bail!(
            "{}x{} image from aspect ratio {} exceeds the {} pixel limit",
            width,
            height,
            aspect,
            MAX_PIXELS
        );
    }
    Ok(height as u32)
}
