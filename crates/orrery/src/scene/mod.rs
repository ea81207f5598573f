//! Scene graph
//!
//! Hierarchical tree of named nodes carrying transforms, orbital attributes
//! and renderable or light payloads. The graph is walked once per frame by
//! [`crate::animation`] to compose transforms and by [`crate::render`] to
//! issue draw calls.
//!
//! ```text
//! root
//!  ├─ sun        (light)
//!  │   └─ geo_sun
//!  ├─ earth      (planet)
//!  │   ├─ geo_earth
//!  │   ├─ moon   (moon)
//!  │   └─ earth_geom_orbit
//!  └─ camera
//! ```

mod node;
mod scene_graph;

pub use node::{
    CameraRig, Color, GeometryData, MeshHandle, Node, NodeId, NodeKind, OrbitKind, PointLight,
};
pub use scene_graph::SceneGraph;

use thiserror::Error;

/// Scene graph errors
///
/// Every variant is a programming or configuration error; nothing here is
/// expected to be retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Graph was constructed without a root
    #[error("Scene graph has no root node")]
    MissingRoot,

    /// Id does not refer to a live node
    #[error("Unknown node id: {0:?}")]
    UnknownNode(NodeId),

    /// Name lookup found nothing
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Node exists but has the wrong role
    #[error("Node '{name}' is not a {expected} node")]
    UnexpectedKind {
        /// Name of the offending node
        name: String,
        /// Role the caller needed
        expected: &'static str,
    },

    /// Reparent would make a node its own ancestor
    #[error("Cannot attach '{node}' under its descendant '{parent}'")]
    CycleDetected {
        /// Node being moved
        node: String,
        /// Requested parent
        parent: String,
    },

    /// Moon configured without the body it circles
    #[error("Moon '{0}' does not name a body to orbit")]
    MissingOrbitTarget(String),

    /// The root cannot be given a parent
    #[error("Root node cannot be reparented")]
    RootReparent,

    /// Model matrix cannot be inverted for normal computation
    #[error("Transform of '{0}' is singular")]
    SingularTransform(String),
}
