//! Background star field

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::StarVertex;

/// Star field generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarFieldConfig {
    /// Number of stars
    pub count: usize,
    /// Half-extent of the cube the stars are scattered in
    pub radius: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self { count: 1000, radius: 100.0 }
    }
}

/// Scatter `config.count` stars uniformly in `[-radius, radius]³` with pale
/// random colors.
pub fn generate_star_field<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Vec<StarVertex> {
    let r = config.radius.abs();
    (0..config.count)
        .map(|_| StarVertex {
            position: [rng.gen_range(-r..=r), rng.gen_range(-r..=r), rng.gen_range(-r..=r)],
            color: [rng.gen_range(0.5..=1.0), rng.gen_range(0.5..=1.0), rng.gen_range(0.5..=1.0)],
        })
        .collect()
}
