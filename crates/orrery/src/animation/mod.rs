//! Orbital animation
//!
//! Per-frame transform composition for every drawable body plus the
//! precomputed orbit paths drawn as visual aids.

pub mod orbit;
pub mod orbit_path;

pub use orbit::{body_transform, update_orbits};
pub use orbit_path::{
    orbit_path_name, refresh_orbit_paths, sample_orbit, sample_orbit_around, OrbitPathConfig, OrbitSelection,
};
