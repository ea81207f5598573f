//! Scene nodes and their role-specific payloads
//!
//! A [`Node`] carries identity, an accumulated transform and the orbital
//! attributes every body shares. What a node *is* (orbiting body, light,
//! camera rig, bare geometry) is decided once at construction through
//! [`NodeKind`]; names are labels only and never change behaviour.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{origin_of, Mat4, Point3, Vec3};

slotmap::new_key_type! {
    /// Stable identifier of a node inside a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

/// Handle to mesh data owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// How a body moves relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitKind {
    /// Circles the origin of its parent frame
    Planet,
    /// Circles a parent that is itself moving
    Moon,
}

/// RGB color with 0-255 channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure white
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Channels mapped into 0.0..=1.0
    pub fn to_unit(self) -> Vec3 {
        Vec3::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Point light payload
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    color: Color,
    intensity: f32,
}

impl PointLight {
    /// Create a point light
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Light color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the light color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Scalar intensity multiplier
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Replace the intensity
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0)
    }
}

/// Camera rig payload
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    perspective: bool,
    enabled: bool,
    projection: Mat4,
}

impl CameraRig {
    /// Create a camera rig with an explicit projection
    pub fn new(perspective: bool, enabled: bool, projection: Mat4) -> Self {
        Self { perspective, enabled, projection }
    }

    /// Whether the projection is a perspective one
    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    /// Switch between perspective and orthographic
    pub fn set_perspective(&mut self, perspective: bool) {
        self.perspective = perspective;
    }

    /// Whether this camera is the active one
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the camera
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Replace the projection matrix
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(true, true, Mat4::identity())
    }
}

/// Geometry referenced by a renderable node
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryData {
    /// Indexed mesh living in the backend
    Mesh(MeshHandle),
    /// Raw point list, drawn as a line strip
    Points(Vec<Point3>),
}

/// Role of a node in the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Top of the hierarchy, never animated
    Root,
    /// Orbiting celestial body
    Body(OrbitKind),
    /// Camera rig, never drawn
    Camera(CameraRig),
    /// Geometry leaf hanging off a body
    Geometry(GeometryData),
    /// Light-emitting body (the sun)
    Light(PointLight),
}

/// One element of the scene hierarchy.
///
/// `local_transform` holds the accumulated model matrix produced by the
/// per-frame orbit update; it is composed against the parent's matrix of the
/// same frame rather than being purely parent-relative.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    local_transform: Mat4,
    speed: f32,
    distance: f32,
    size: f32,
}

impl Node {
    /// Create a detached node with default orbital attributes
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            local_transform: Mat4::identity(),
            speed: 1.0,
            distance: 0.0,
            size: 1.0,
        }
    }

    /// Create a root node
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Root)
    }

    /// Create an orbiting body
    pub fn body(name: impl Into<String>, orbit: OrbitKind) -> Self {
        Self::new(name, NodeKind::Body(orbit))
    }

    /// Create a geometry leaf
    pub fn geometry(name: impl Into<String>, geometry: GeometryData) -> Self {
        Self::new(name, NodeKind::Geometry(geometry))
    }

    /// Create a light-emitting body
    pub fn light(name: impl Into<String>, light: PointLight) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    /// Create a camera rig
    pub fn camera(name: impl Into<String>, rig: CameraRig) -> Self {
        Self::new(name, NodeKind::Camera(rig))
    }

    /// Builder form of [`Node::set_speed`]
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder form of [`Node::set_distance`]
    #[must_use]
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Builder form of [`Node::set_size`]
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node role
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable access to the role payload
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Parent back-reference
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Model matrix as of the last update
    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    /// Overwrite the model matrix
    pub fn set_local_transform(&mut self, transform: Mat4) {
        self.local_transform = transform;
    }

    /// Angular velocity factor
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the angular velocity factor
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Radial offset from the parent
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Set the radial offset.
    ///
    /// Stored as an attribute only; the offset is applied by the orbit update.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    /// Uniform scale factor
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Set the uniform scale factor
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    /// Position of this node's origin under its current model matrix
    pub fn world_position(&self) -> Point3 {
        origin_of(&self.local_transform)
    }

    /// Whether the orbit update animates and the renderer draws this node
    pub fn is_drawable(&self) -> bool {
        matches!(self.kind, NodeKind::Body(_) | NodeKind::Light(_))
    }

    /// Orbit behaviour of drawable nodes; lights move like planets
    pub fn orbit_kind(&self) -> Option<OrbitKind> {
        match self.kind {
            NodeKind::Body(kind) => Some(kind),
            NodeKind::Light(_) => Some(OrbitKind::Planet),
            _ => None,
        }
    }

    /// Light payload, if this is a light node
    pub fn as_light(&self) -> Option<&PointLight> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Geometry payload, if this is a geometry node
    pub fn as_geometry(&self) -> Option<&GeometryData> {
        match &self.kind {
            NodeKind::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Camera payload, if this is a camera node
    pub fn as_camera(&self) -> Option<&CameraRig> {
        match &self.kind {
            NodeKind::Camera(rig) => Some(rig),
            _ => None,
        }
    }
}
