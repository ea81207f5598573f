//! Per-frame orbit update
//!
//! Each drawable node's matrix is rebuilt from its parent's matrix of the same
//! frame:
//!
//! ```text
//! model = parent.model × R_y(elapsed × speed) × T(0, 0, distance) × S(size)
//! ```
//!
//! Drawables come out of [`SceneGraph::drawables`] in pre-order, so a parent
//! is always finalized before any of its satellites read it.

use crate::foundation::math::{rotate, scale, translate, y_axis, Mat4, Vec3};
use crate::scene::{NodeId, SceneError, SceneGraph};

/// Compose one body's model matrix against its parent's
pub fn body_transform(parent: &Mat4, elapsed: f32, speed: f32, distance: f32, size: f32) -> Mat4 {
    let m = rotate(parent, elapsed * speed, y_axis());
    let m = translate(&m, Vec3::new(0.0, 0.0, distance));
    scale(&m, Vec3::new(size, size, size))
}

/// Advance every drawable node to `elapsed` seconds.
///
/// Returns the nodes in the order they were processed.
pub fn update_orbits(graph: &mut SceneGraph, elapsed: f32) -> Result<Vec<NodeId>, SceneError> {
    let root = graph.require_root()?;
    let order = graph.drawables(root);

    for &id in &order {
        let parent = graph.parent(id).ok_or(SceneError::UnknownNode(id))?;
        let parent_transform = *graph
            .node(parent)
            .ok_or(SceneError::UnknownNode(parent))?
            .local_transform();

        let node = graph.node_mut(id).ok_or(SceneError::UnknownNode(id))?;
        let model = body_transform(
            &parent_transform,
            elapsed,
            node.speed(),
            node.distance(),
            node.size(),
        );
        node.set_local_transform(model);
    }

    log::trace!("Updated {} orbiting nodes at t={:.3}", order.len(), elapsed);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use crate::scene::{CameraRig, Node, OrbitKind};
    use approx::assert_relative_eq;

    fn earth_moon() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::with_root("solar", Node::root("root"));
        let root = graph.root().unwrap();
        let earth = graph
            .add_child(
                root,
                Node::body("earth", OrbitKind::Planet)
                    .with_speed(1.0)
                    .with_distance(12.93 + 7.0)
                    .with_size(1.0),
            )
            .unwrap();
        let moon = graph
            .add_child(
                earth,
                Node::body("moon", OrbitKind::Moon)
                    .with_speed(0.5)
                    .with_distance(0.4 + 1.0)
                    .with_size(0.27),
            )
            .unwrap();
        (graph, earth, moon)
    }

    #[test]
    fn test_moon_composes_against_updated_earth() {
        let (mut graph, earth, moon) = earth_moon();
        let t = 2.75;
        update_orbits(&mut graph, t).unwrap();

        let earth_model = *graph.node(earth).unwrap().local_transform();
        let expected = rotate(&earth_model, t * 0.5, y_axis())
            * Mat4::new_translation(&Vec3::new(0.0, 0.0, 0.4 + 1.0))
            * Mat4::new_scaling(0.27);
        assert_relative_eq!(*graph.node(moon).unwrap().local_transform(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_planet_sits_on_circle_of_its_distance() {
        let (mut graph, earth, _) = earth_moon();
        for t in [0.0, 0.3, 1.7, 4.0] {
            update_orbits(&mut graph, t).unwrap();
            let p = graph.node(earth).unwrap().world_position();
            assert_relative_eq!(p.coords.norm(), 19.93, epsilon = 1e-4);
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_update_at_time_zero_places_body_on_z_axis() {
        let (mut graph, earth, _) = earth_moon();
        update_orbits(&mut graph, 0.0).unwrap();
        let p = graph.node(earth).unwrap().world_position();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 19.93), epsilon = 1e-5);
    }

    #[test]
    fn test_update_is_idempotent_for_same_time() {
        let (mut graph, _, moon) = earth_moon();
        update_orbits(&mut graph, 1.25).unwrap();
        let first = *graph.node(moon).unwrap().local_transform();
        update_orbits(&mut graph, 1.25).unwrap();
        assert_relative_eq!(*graph.node(moon).unwrap().local_transform(), first, epsilon = 1e-6);
    }

    #[test]
    fn test_update_skips_camera_nodes() {
        let (mut graph, earth, moon) = earth_moon();
        let root = graph.root().unwrap();
        let camera = graph
            .add_child(root, Node::camera("camera", CameraRig::default()).with_distance(3.0))
            .unwrap();

        let order = update_orbits(&mut graph, 0.5).unwrap();
        assert_eq!(order, vec![earth, moon]);
        assert_eq!(*graph.node(camera).unwrap().local_transform(), Mat4::identity());
    }

    #[test]
    fn test_update_without_root_fails() {
        let mut graph = SceneGraph::new("empty");
        assert_eq!(update_orbits(&mut graph, 1.0), Err(SceneError::MissingRoot));
    }
}
