//! Glint Core - scene description for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDesc`, `CameraDesc`, `SurfaceDesc`,
//!   `LightDesc` and `Material`
//! - **Loading**: JSON scene files via serde, validated before use
//! - **Presets**: built-in scenes addressable by name
//!
//! A `SceneDesc` is plain immutable data. The renderer turns it into
//! something it can trace; nothing here knows about rays.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("snowman.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surfaces.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use presets::{preset, PRESET_NAMES};
pub use scene::{CameraDesc, Color, LightDesc, Material, SceneDesc, SurfaceDesc};
