//! Rendering seam
//!
//! The scene graph never talks to a graphics API directly. Once per frame
//! [`SolarRenderer`] animates the graph, turns each drawable node into
//! GPU-ready uniform data and hands it to a [`RenderBackend`] implemented by
//! the windowing/graphics layer.

mod renderer;
pub mod stars;
mod uniforms;

pub use renderer::{FrameStats, SolarRenderer, SUN_NODE};
pub use stars::{generate_star_field, StarFieldConfig};
pub use uniforms::{LightUniforms, ObjectUniforms, StarVertex};

use crate::scene::{MeshHandle, SceneError};
use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Scene graph lookup or transform failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Failure reported by the graphics backend
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Main rendering backend trait
///
/// Implemented by whatever owns the GPU resources. Mesh handles passed back
/// here are the ones the backend handed out when the geometry was uploaded.
pub trait RenderBackend {
    /// Upload the point light for the current frame
    fn upload_light(&mut self, light: &LightUniforms) -> Result<(), RenderError>;

    /// Draw an indexed mesh with per-object uniforms
    fn draw_mesh(&mut self, mesh: MeshHandle, uniforms: &ObjectUniforms) -> Result<(), RenderError>;

    /// Draw a world-space line strip
    fn draw_line_strip(&mut self, points: &[[f32; 3]]) -> Result<(), RenderError>;

    /// Draw a point cloud
    fn draw_points(&mut self, points: &[StarVertex]) -> Result<(), RenderError>;
}
