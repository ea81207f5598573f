//! # Orrery
//!
//! Scene graph and orbital animation core for a solar system renderer.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed node hierarchy with checked reparenting
//! - **Orbital Animation**: Per-frame transform composition for planets and moons
//! - **Orbit Paths**: Precomputed polylines for every orbit
//! - **Backend Agnostic**: Draw calls go through the [`render::RenderBackend`] trait
//! - **Configurable**: Body table, camera and star field from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orrery::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SolarConfig::default();
//!     config.validate()?;
//!
//!     let mut graph = build_solar_system(&config.system, MeshHandle(0))?;
//!     refresh_orbit_paths(&mut graph, &config.orbits, OrbitSelection::All)?;
//!     update_orbits(&mut graph, 1.0)?;
//!     println!("{}", graph.print_graph()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod animation;
pub mod render;
pub mod camera;
pub mod solar;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        animation::{refresh_orbit_paths, update_orbits, OrbitPathConfig, OrbitSelection},
        camera::{CameraConfig, ViewCommand, ViewController},
        config::{Config, ConfigError, SolarConfig, SystemConfig},
        foundation::{
            math::{Mat4, Point3, Vec3},
            time::SimulationClock,
        },
        render::{
            generate_star_field, FrameStats, LightUniforms, ObjectUniforms, RenderBackend, RenderError,
            SolarRenderer, StarFieldConfig, StarVertex,
        },
        scene::{MeshHandle, Node, NodeId, NodeKind, OrbitKind, SceneError, SceneGraph},
        solar::{build_solar_system, camera_node},
    };
}
