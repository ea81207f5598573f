//! Orbit path sampling
//!
//! An orbit path is a closed polyline approximating one revolution of a body.
//! Paths are precomputed rather than rebuilt every frame and stored as a
//! `Points` geometry child named `<body>_geom_orbit`.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{origin_of, rotate, translate, y_axis, Mat4, Mat4Ext, Point3, Vec3};
use crate::scene::{GeometryData, Node, NodeKind, OrbitKind, SceneError, SceneGraph};

/// Sampling resolution of orbit paths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPathConfig {
    /// Points per path
    pub samples: usize,
    /// Rotation between consecutive points, in radians
    pub step: f32,
}

impl Default for OrbitPathConfig {
    fn default() -> Self {
        // 65 × 0.1 rad overshoots a full turn slightly, closing the strip
        Self { samples: 65, step: 0.1 }
    }
}

/// Which bodies a refresh touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitSelection {
    /// Every orbiting body
    All,
    /// Only moons, whose path follows a moving parent
    MoonsOnly,
}

/// Name of the geometry child holding the orbit path of `body`
pub fn orbit_path_name(body: &str) -> String {
    format!("{body}_geom_orbit")
}

/// Sample `config.samples` points of a circular orbit of radius `distance`.
///
/// Planets circle the origin. Moons circle `parent_position`: the radial
/// offset is taken relative to the parent first and then swept around it.
/// The parent's scale is not applied; [`sample_orbit_around`] samples through
/// the full parent matrix.
pub fn sample_orbit(
    kind: OrbitKind,
    distance: f32,
    parent_position: Point3,
    config: &OrbitPathConfig,
) -> Vec<Point3> {
    let center = match kind {
        OrbitKind::Planet => Point3::origin(),
        OrbitKind::Moon => parent_position,
    };
    let radial = Vec3::new(0.0, 0.0, distance);

    (0..config.samples)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = k as f32 * config.step;
            center + Mat4::rotation_y(angle).transform_vector(&radial)
        })
        .collect()
}

/// Sample the orbit of a satellite through its parent's model matrix.
///
/// Point k is where a body at `distance` would sit after rotating by
/// `k × step` in the parent's frame, so the path inherits the parent's
/// position, orientation and scale exactly as [`update_orbits`] applies them.
///
/// [`update_orbits`]: super::update_orbits
pub fn sample_orbit_around(parent: &Mat4, distance: f32, config: &OrbitPathConfig) -> Vec<Point3> {
    let radial = Vec3::new(0.0, 0.0, distance);
    (0..config.samples)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = k as f32 * config.step;
            origin_of(&translate(&rotate(parent, angle, y_axis()), radial))
        })
        .collect()
}

/// (Re)build orbit paths for the selected bodies.
///
/// Planet paths circle the origin. Moon paths are sampled through the
/// parent's current model matrix, so they follow a moving and scaled parent.
/// Existing `<body>_geom_orbit` children are updated in place, missing ones
/// are attached. Light nodes never get a path. Returns the number of paths
/// written.
pub fn refresh_orbit_paths(
    graph: &mut SceneGraph,
    config: &OrbitPathConfig,
    selection: OrbitSelection,
) -> Result<usize, SceneError> {
    let root = graph.require_root()?;
    let mut written = 0;

    for id in graph.drawables(root) {
        let node = graph.node(id).ok_or(SceneError::UnknownNode(id))?;
        let NodeKind::Body(kind) = *node.kind() else { continue };
        if selection == OrbitSelection::MoonsOnly && kind != OrbitKind::Moon {
            continue;
        }

        let points = match kind {
            OrbitKind::Planet => sample_orbit(kind, node.distance(), Point3::origin(), config),
            OrbitKind::Moon => {
                let parent = graph
                    .parent(id)
                    .and_then(|p| graph.node(p))
                    .map_or_else(Mat4::identity, |p| *p.local_transform());
                sample_orbit_around(&parent, node.distance(), config)
            }
        };
        let name = orbit_path_name(node.name());

        let existing = graph
            .children(id)
            .iter()
            .copied()
            .find(|&c| graph.node(c).is_some_and(|n| n.name() == name));

        match existing {
            Some(path_id) => {
                if let Some(path_node) = graph.node_mut(path_id) {
                    *path_node.kind_mut() = NodeKind::Geometry(GeometryData::Points(points));
                }
            }
            None => {
                graph.add_child(id, Node::geometry(name, GeometryData::Points(points)))?;
            }
        }
        written += 1;
    }

    log::debug!("Refreshed {} orbit paths ({:?})", written, selection);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::update_orbits;
    use crate::foundation::math::constants::TAU;
    use crate::scene::{NodeId, PointLight};
    use approx::assert_relative_eq;

    fn solar() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut graph = SceneGraph::with_root("solar", Node::root("root"));
        let root = graph.root().unwrap();
        let sun = graph
            .add_child(root, Node::light("sun", PointLight::default()).with_size(7.0))
            .unwrap();
        let earth = graph
            .add_child(root, Node::body("earth", OrbitKind::Planet).with_distance(19.93))
            .unwrap();
        let moon = graph
            .add_child(earth, Node::body("moon", OrbitKind::Moon).with_speed(0.5).with_distance(1.4))
            .unwrap();
        (graph, sun, earth, moon)
    }

    #[test]
    fn test_planet_orbit_is_circle_around_origin() {
        let config = OrbitPathConfig::default();
        let points = sample_orbit(OrbitKind::Planet, 10.0, Point3::new(5.0, 0.0, 0.0), &config);

        assert_eq!(points.len(), 65);
        for p in &points {
            assert_relative_eq!(p.coords.norm(), 10.0, epsilon = 1e-4);
            assert_relative_eq!(p.y, 0.0);
        }
        assert_relative_eq!(points[0], Point3::new(0.0, 0.0, 10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_sweeps_a_full_turn_and_closes() {
        let config = OrbitPathConfig::default();
        #[allow(clippy::cast_precision_loss)]
        let swept = (config.samples - 1) as f32 * config.step;
        assert!(swept >= TAU);

        let points = sample_orbit(OrbitKind::Planet, 3.0, Point3::origin(), &config);
        let gap = (points[points.len() - 1] - points[0]).norm();
        assert!(gap < 2.0 * config.step * 3.0, "strip does not close: gap {gap}");
    }

    #[test]
    fn test_moon_orbit_is_centered_on_parent() {
        let config = OrbitPathConfig { samples: 12, step: 0.6 };
        let parent = Point3::new(4.0, 0.0, -2.0);
        let points = sample_orbit(OrbitKind::Moon, 1.5, parent, &config);

        assert_eq!(points.len(), 12);
        for p in &points {
            assert_relative_eq!((p - parent).norm(), 1.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_refresh_attaches_paths_once() {
        let (mut graph, sun, earth, moon) = solar();
        let config = OrbitPathConfig::default();

        assert_eq!(refresh_orbit_paths(&mut graph, &config, OrbitSelection::All).unwrap(), 2);
        let count = graph.len();
        assert_eq!(refresh_orbit_paths(&mut graph, &config, OrbitSelection::All).unwrap(), 2);
        assert_eq!(graph.len(), count);

        assert!(graph.find(earth, "earth_geom_orbit").is_some());
        assert!(graph.find(moon, "moon_geom_orbit").is_some());
        assert!(graph.find(sun, "sun_geom_orbit").is_none());
    }

    #[test]
    fn test_refresh_moons_follows_moving_parent() {
        let (mut graph, _, earth, moon) = solar();
        let config = OrbitPathConfig::default();
        refresh_orbit_paths(&mut graph, &config, OrbitSelection::All).unwrap();

        update_orbits(&mut graph, 1.0).unwrap();
        assert_eq!(refresh_orbit_paths(&mut graph, &config, OrbitSelection::MoonsOnly).unwrap(), 1);

        let earth_pos = graph.node(earth).unwrap().world_position();
        let path = graph.find(moon, "moon_geom_orbit").unwrap();
        let Some(GeometryData::Points(points)) = graph.node(path).unwrap().as_geometry() else {
            panic!("orbit path is not a point list");
        };
        assert_eq!(points.len(), 65);
        for p in points {
            assert_relative_eq!((p - earth_pos).norm(), 1.4, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_moon_path_follows_scaled_parent() {
        let mut graph = SceneGraph::with_root("solar", Node::root("root"));
        let root = graph.root().unwrap();
        let jupiter = graph
            .add_child(
                root,
                Node::body("jupiter", OrbitKind::Planet)
                    .with_speed(0.943)
                    .with_distance(37.0)
                    .with_size(4.0),
            )
            .unwrap();
        let io = graph
            .add_child(
                jupiter,
                Node::body("io", OrbitKind::Moon).with_speed(0.5).with_distance(4.5).with_size(0.3),
            )
            .unwrap();

        // 1.0 s × 0.5 puts io at sample 5 of a 0.1 rad step
        update_orbits(&mut graph, 1.0).unwrap();
        refresh_orbit_paths(&mut graph, &OrbitPathConfig::default(), OrbitSelection::All).unwrap();

        let center = graph.node(jupiter).unwrap().world_position();
        let io_pos = graph.node(io).unwrap().world_position();
        assert_relative_eq!((io_pos - center).norm(), 18.0, epsilon = 1e-3);

        let path = graph.find(io, "io_geom_orbit").unwrap();
        let Some(GeometryData::Points(points)) = graph.node(path).unwrap().as_geometry() else {
            panic!("orbit path is not a point list");
        };
        for p in points {
            assert_relative_eq!((p - center).norm(), 18.0, epsilon = 1e-3);
        }
        assert_relative_eq!(points[5], io_pos, epsilon = 1e-3);
    }

    #[test]
    fn test_sample_around_identity_matches_planet_sampling() {
        let config = OrbitPathConfig::default();
        let around = sample_orbit_around(&Mat4::identity(), 6.0, &config);
        let planet = sample_orbit(OrbitKind::Planet, 6.0, Point3::origin(), &config);
        for (a, b) in around.iter().zip(&planet) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_orbit_paths_are_not_drawable() {
        let (mut graph, sun, earth, moon) = solar();
        refresh_orbit_paths(&mut graph, &OrbitPathConfig::default(), OrbitSelection::All).unwrap();
        let root = graph.root().unwrap();
        assert_eq!(graph.drawables(root), vec![sun, earth, moon]);
    }
}
