//! Free-flying view controller
//!
//! Turns discrete movement commands and mouse deltas into a camera transform.
//! The view matrix handed to the renderer is the inverse of that transform.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{rotate, translate, utils, Mat4, Mat4Ext, Vec3};
use crate::scene::{NodeId, NodeKind, SceneError, SceneGraph};

/// Camera placement and input tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera position on reset
    pub start_position: [f32; 3],
    /// Camera position for the top-down overview
    pub overview_position: [f32; 3],
    /// Distance moved per movement command
    pub move_step: f32,
    /// Mouse delta per degree of rotation
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 4.0],
            overview_position: [0.0, 50.0, 0.0],
            move_step: 1.0,
            mouse_sensitivity: 20.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Discrete view movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Move along the view direction
    Forward,
    /// Move against the view direction
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Jump back to the start position
    Reset,
    /// Jump to the overview position
    TopDown,
}

/// Camera transform and projection driven by user input
#[derive(Debug, Clone)]
pub struct ViewController {
    config: CameraConfig,
    transform: Mat4,
    projection: Mat4,
}

impl ViewController {
    /// Create a controller at the start position with the given aspect ratio
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        Self {
            transform: Self::placed_at(config.start_position),
            projection: Self::projection_for(&config, aspect),
            config,
        }
    }

    fn placed_at(position: [f32; 3]) -> Mat4 {
        translate(&Mat4::identity(), Vec3::from(position))
    }

    fn projection_for(config: &CameraConfig, aspect: f32) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(config.fov_degrees), aspect, config.near, config.far)
    }

    /// Apply a movement command
    pub fn handle_command(&mut self, command: ViewCommand) {
        let step = self.config.move_step;
        self.transform = match command {
            ViewCommand::Forward => translate(&self.transform, Vec3::new(0.0, 0.0, -step)),
            ViewCommand::Backward => translate(&self.transform, Vec3::new(0.0, 0.0, step)),
            ViewCommand::Left => translate(&self.transform, Vec3::new(-step, 0.0, 0.0)),
            ViewCommand::Right => translate(&self.transform, Vec3::new(step, 0.0, 0.0)),
            ViewCommand::Reset => Self::placed_at(self.config.start_position),
            ViewCommand::TopDown => Self::placed_at(self.config.overview_position),
        };
        log::trace!("View command {:?}", command);
    }

    /// Rotate by a mouse delta.
    ///
    /// Only the dominant axis is applied: a mostly horizontal motion pans
    /// around Y, a mostly vertical one tilts around X.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let (dx, dy) = (dx as f32, dy as f32);
        let sensitivity = self.config.mouse_sensitivity;
        let pan = -dx / sensitivity;
        let tilt = -dy / sensitivity;

        self.transform = if pan.abs() > tilt.abs() {
            rotate(&self.transform, utils::deg_to_rad(pan), Vec3::new(0.0, 1.0, 0.0))
        } else {
            rotate(&self.transform, utils::deg_to_rad(tilt), Vec3::new(1.0, 0.0, 0.0))
        };
    }

    /// Recompute the projection for a new framebuffer size
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            log::warn!("Ignoring resize to zero height ({}x{})", width, height);
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let aspect = width as f32 / height as f32;
        self.projection = Self::projection_for(&self.config, aspect);
        log::info!("Projection updated for {}x{} (aspect {:.3})", width, height, aspect);
    }

    /// Camera-to-world transform
    pub fn camera_transform(&self) -> &Mat4 {
        &self.transform
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.try_inverse().unwrap_or_else(Mat4::identity)
    }

    /// Current projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Copy the transform and projection into a camera node
    pub fn sync_camera_node(&self, graph: &mut SceneGraph, id: NodeId) -> Result<(), SceneError> {
        let node = graph.node_mut(id).ok_or(SceneError::UnknownNode(id))?;
        let NodeKind::Camera(rig) = node.kind_mut() else {
            return Err(SceneError::UnexpectedKind {
                name: node.name().to_string(),
                expected: "camera",
            });
        };
        rig.set_projection(self.projection);
        node.set_local_transform(self.transform);
        Ok(())
    }
}
