//! Scene file loading.
//!
//! Scene files are JSON documents matching [`SceneDesc`]. Every loaded scene
//! is validated before it is handed back, so callers never see a camera or
//! material reference that would fail half way through a render.

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDesc;

/// Errors that can occur while building or loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid material {name}: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Non-finite value in {0}")]
    NonFinite(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a JSON scene file.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/snowman.json")?;
/// println!("Loaded {} surfaces", scene.surfaces.len());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDesc> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded {}: {} surfaces, {} lights, {} materials",
        path.display(),
        scene.surfaces.len(),
        scene.lights.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Parse and validate a JSON scene from a string.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDesc> {
    let scene: SceneDesc = serde_json::from_str(text)?;
    scene.validate()?;
    Ok(scene)
}
