//! Solar system construction from a [`SystemConfig`]

use crate::config::{BodyKind, SystemConfig};
use crate::scene::{CameraRig, GeometryData, MeshHandle, Node, NodeId, SceneError, SceneGraph};

/// Name of the scene graph built by [`build_solar_system`]
pub const GRAPH_NAME: &str = "solarSystem";
/// Name of the root node
pub const ROOT_NODE: &str = "root";
/// Name of the camera node
pub const CAMERA_NODE: &str = "camera";

/// Name of the mesh child of `body`
pub fn mesh_node_name(body: &str) -> String {
    format!("geo_{body}")
}

/// Build the scene graph for `config`.
///
/// Planets and lights hang off the root, moons off the body they orbit. Every
/// body gets one mesh child sharing `mesh`. A camera node is attached under
/// the root last.
pub fn build_solar_system(config: &SystemConfig, mesh: MeshHandle) -> Result<SceneGraph, SceneError> {
    let mut graph = SceneGraph::with_root(GRAPH_NAME, Node::root(ROOT_NODE));
    let root = graph.require_root()?;

    for body in &config.bodies {
        let holder = match body.kind.orbit_kind() {
            Some(orbit) => Node::body(body.name.as_str(), orbit),
            None => Node::light(body.name.as_str(), config.light.into()),
        }
        .with_speed(body.speed)
        .with_distance(config.distance_of(body))
        .with_size(body.size);

        let parent = match (body.kind, body.orbits.as_deref()) {
            (BodyKind::Moon, Some(orbited)) => graph.require(root, orbited)?,
            (BodyKind::Moon, None) => return Err(SceneError::MissingOrbitTarget(body.name.clone())),
            _ => root,
        };

        let id = graph.add_child(parent, holder)?;
        graph.add_child(id, Node::geometry(mesh_node_name(&body.name), GeometryData::Mesh(mesh)))?;
        log::debug!("Attached {} at depth {}", body.name, graph.depth(id));
    }

    graph.add_child(root, Node::camera(CAMERA_NODE, CameraRig::default()))?;
    log::info!("Built {} with {} nodes", graph.name(), graph.len());
    Ok(graph)
}

/// Id of the camera node created by [`build_solar_system`]
pub fn camera_node(graph: &SceneGraph) -> Result<NodeId, SceneError> {
    graph.require(graph.require_root()?, CAMERA_NODE)
}
