//! Per-frame scene submission

use crate::animation::{
    orbit_path_name, refresh_orbit_paths, update_orbits, OrbitPathConfig, OrbitSelection,
};
use crate::foundation::math::{normal_matrix, Mat4};
use crate::scene::{GeometryData, NodeId, NodeKind, SceneError, SceneGraph};

use super::{LightUniforms, ObjectUniforms, RenderBackend, RenderError, StarVertex};

/// Well-known name of the light node
pub const SUN_NODE: &str = "sun";

/// Draw calls issued for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Mesh draws
    pub meshes: usize,
    /// Orbit line strips
    pub orbits: usize,
    /// Stars in the point cloud
    pub stars: usize,
}

/// Walks the solar system graph once per frame and feeds a [`RenderBackend`]
#[derive(Debug)]
pub struct SolarRenderer {
    stars: Vec<StarVertex>,
    draw_orbits: bool,
    orbit_paths: OrbitPathConfig,
}

impl Default for SolarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarRenderer {
    /// Create a renderer that draws orbit paths and no stars
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            draw_orbits: true,
            orbit_paths: OrbitPathConfig::default(),
        }
    }

    /// Replace the background star field
    pub fn set_star_field(&mut self, stars: Vec<StarVertex>) {
        log::info!("Star field set to {} stars", stars.len());
        self.stars = stars;
    }

    /// Sampling used when moon paths are refreshed during a frame
    pub fn set_orbit_config(&mut self, config: OrbitPathConfig) {
        self.orbit_paths = config;
    }

    /// Toggle orbit path drawing
    pub fn set_draw_orbits(&mut self, enabled: bool) {
        self.draw_orbits = enabled;
    }

    /// Animate `graph` to `elapsed` seconds and submit the frame.
    ///
    /// `view` is the world-to-camera matrix; normals are transformed by the
    /// inverse-transpose of `view × model`. A missing or mistyped `sun` node
    /// is reported as an error rather than skipped. When orbits are drawn,
    /// moon paths are resampled against the freshly updated parents first.
    pub fn render_frame(
        &self,
        graph: &mut SceneGraph,
        backend: &mut dyn RenderBackend,
        elapsed: f32,
        view: &Mat4,
    ) -> Result<FrameStats, RenderError> {
        let drawables = update_orbits(graph, elapsed)?;
        if self.draw_orbits {
            refresh_orbit_paths(graph, &self.orbit_paths, OrbitSelection::MoonsOnly)?;
        }
        let root = graph.require_root()?;
        let mut stats = FrameStats::default();

        if !self.stars.is_empty() {
            backend.draw_points(&self.stars)?;
            stats.stars = self.stars.len();
        }

        backend.upload_light(&Self::sun_uniforms(graph, root)?)?;

        for &id in &drawables {
            stats.meshes += Self::draw_body(graph, backend, id, view)?;
        }

        if self.draw_orbits {
            for &id in &drawables {
                if Self::draw_orbit(graph, backend, id)? {
                    stats.orbits += 1;
                }
            }
        }

        Ok(stats)
    }

    fn sun_uniforms(graph: &SceneGraph, root: NodeId) -> Result<LightUniforms, SceneError> {
        let sun_id = graph.require(root, SUN_NODE)?;
        let sun = graph.node(sun_id).ok_or(SceneError::UnknownNode(sun_id))?;
        let light = sun.as_light().ok_or_else(|| SceneError::UnexpectedKind {
            name: sun.name().to_string(),
            expected: "light",
        })?;
        Ok(LightUniforms::new(
            sun.world_position(),
            light.color().to_unit(),
            light.intensity(),
        ))
    }

    fn draw_body(
        graph: &SceneGraph,
        backend: &mut dyn RenderBackend,
        id: NodeId,
        view: &Mat4,
    ) -> Result<usize, RenderError> {
        let node = graph.node(id).ok_or(SceneError::UnknownNode(id))?;
        let model = *node.local_transform();
        let normal = normal_matrix(view, &model)
            .ok_or_else(|| SceneError::SingularTransform(node.name().to_string()))?;
        let uniforms = ObjectUniforms::new(model, normal);

        let mut drawn = 0;
        for &child in graph.children(id) {
            if let Some(NodeKind::Geometry(GeometryData::Mesh(mesh))) = graph.node(child).map(|c| c.kind()) {
                backend.draw_mesh(*mesh, &uniforms)?;
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    fn draw_orbit(
        graph: &SceneGraph,
        backend: &mut dyn RenderBackend,
        id: NodeId,
    ) -> Result<bool, RenderError> {
        let Some(node) = graph.node(id) else { return Ok(false) };
        if !matches!(node.kind(), NodeKind::Body(_)) {
            return Ok(false);
        }

        let name = orbit_path_name(node.name());
        let path = graph
            .children(id)
            .iter()
            .filter_map(|&c| graph.node(c))
            .find(|c| c.name() == name)
            .and_then(|c| c.as_geometry());

        match path {
            Some(GeometryData::Points(points)) => {
                let strip: Vec<[f32; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
                backend.draw_line_strip(&strip)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
