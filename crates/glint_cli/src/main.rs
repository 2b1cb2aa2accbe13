use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_core::{load_scene, preset, SceneDesc, PRESET_NAMES};
use glint_renderer::{render, render_parallel, ImageBuffer, RenderConfig, Scene};

mod cli;

use cli::{derived_height, Args};

fn load_description(args: &Args) -> Result<SceneDesc> {
    match &args.scene {
        Some(path) => {
            load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
        }
        None => preset(&args.preset).with_context(|| {
            format!("Available presets: {}", PRESET_NAMES.join(", "))
        }),
    }
}

fn save_png(image: &ImageBuffer, exposure: f64, path: &Path) -> Result<()> {
    let bytes = image.to_rgb8(exposure);
    let Some(buffer) = image::RgbImage::from_raw(image.width, image.height, bytes) else {
        bail!("Image buffer size does not match {}x{}", image.width, image.height);
    };
    buffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting glint");

    if args.width == 0 {
        bail!("--nx must be at least 1");
    }

    let start = Instant::now();
    let desc = load_description(&args)?;
    let scene = Scene::from_desc(&desc).context("Invalid scene")?;
    log::info!(
        "Scene ready in {:?}: {} surfaces, {} lights",
        start.elapsed(),
        scene.surfaces().len(),
        scene.lights().len()
    );

    let width = args.width;
    let height = derived_height(width, scene.camera().aspect())?;
    let config = RenderConfig::default();

    let image = if args.serial {
        render(&scene, width, height, &config)
    } else {
        render_parallel(&scene, width, height, &config)
    };

    save_png(&image, args.exposure, &args.out_file)?;
    log::info!("Saved {}", args.out_file.display());

    Ok(())
}
