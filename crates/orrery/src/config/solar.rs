//! Solar system configuration

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::animation::OrbitPathConfig;
use crate::camera::CameraConfig;
use crate::render::StarFieldConfig;
use crate::scene::{Color, OrbitKind, PointLight};

/// What a configured body becomes in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Light source, attached under the root
    Light,
    /// Orbits the origin, attached under the root
    Planet,
    /// Orbits its parent body and is attached under it
    Moon,
}

impl BodyKind {
    /// Orbit behaviour for non-light bodies
    pub fn orbit_kind(self) -> Option<OrbitKind> {
        match self {
            Self::Light => None,
            Self::Planet => Some(OrbitKind::Planet),
            Self::Moon => Some(OrbitKind::Moon),
        }
    }
}

/// One entry of the body table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Unique node name
    pub name: String,
    /// Node kind
    pub kind: BodyKind,
    /// Body this one orbits; its size is added to `gap`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbits: Option<String>,
    /// Angular speed multiplier
    pub speed: f32,
    /// Distance between the surface of the orbited body and this body's centre
    pub gap: f32,
    /// Uniform scale
    pub size: f32,
}

impl BodyConfig {
    fn new(name: &str, kind: BodyKind, orbits: Option<&str>, speed: f32, gap: f32, size: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            orbits: orbits.map(str::to_string),
            speed,
            gap,
            size,
        }
    }
}

/// Light emitted by `Light` bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    /// 8-bit RGB colour
    pub color: Color,
    /// Brightness multiplier
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 1.0 }
    }
}

impl From<LightConfig> for PointLight {
    fn from(config: LightConfig) -> Self {
        PointLight::new(config.color, config.intensity)
    }
}

/// Bodies and lighting of the simulated system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Bodies in attach order
    pub bodies: Vec<BodyConfig>,
    /// Light parameters
    #[serde(default)]
    pub light: LightConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        use BodyKind::{Light, Moon, Planet};
        let bodies = vec![
            BodyConfig::new("sun", Light, None, 1.0, 0.0, 7.0),
            BodyConfig::new("merkur", Planet, Some("sun"), 4.147, 5.0, 0.38),
            BodyConfig::new("venus", Planet, Some("sun"), 2.624, 9.31, 0.94),
            BodyConfig::new("earth", Planet, Some("sun"), 1.0, 12.93, 1.0),
            BodyConfig::new("moon", Moon, Some("earth"), 0.5, 0.4, 0.27),
            BodyConfig::new("mars", Planet, Some("sun"), 0.831, 19.65, 0.53),
            BodyConfig::new("jupiter", Planet, Some("sun"), 0.943, 30.0, 4.0),
            BodyConfig::new("saturn", Planet, Some("sun"), 0.74, 38.0, 3.0),
            BodyConfig::new("uranus", Planet, Some("sun"), 0.65, 50.0, 2.0),
            BodyConfig::new("neptun", Planet, Some("sun"), 0.607, 60.0, 2.0),
        ];
        Self { bodies, light: LightConfig::default() }
    }
}

impl SystemConfig {
    /// Look up a body by name
    pub fn body(&self, name: &str) -> Option<&BodyConfig> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Centre distance of `body`: its gap plus the size of the body it orbits
    pub fn distance_of(&self, body: &BodyConfig) -> f32 {
        let offset = body
            .orbits
            .as_deref()
            .and_then(|name| self.body(name))
            .map_or(0.0, |orbited| orbited.size);
        body.gap + offset
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarConfig {
    /// Body table
    #[serde(default)]
    pub system: SystemConfig,
    /// Orbit path sampling
    #[serde(default)]
    pub orbits: OrbitPathConfig,
    /// View controller tuning
    #[serde(default)]
    pub camera: CameraConfig,
    /// Background stars
    #[serde(default)]
    pub stars: StarFieldConfig,
}

impl Config for SolarConfig {}

impl SolarConfig {
    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for body in &self.system.bodies {
            if body.name.is_empty() {
                return Err(invalid("body with an empty name"));
            }
            if let Some(orbited) = &body.orbits {
                if !seen.contains(orbited.as_str()) {
                    return Err(invalid(format!(
                        "body '{}' orbits '{}', which is not defined before it",
                        body.name, orbited
                    )));
                }
            } else if body.kind == BodyKind::Moon {
                return Err(invalid(format!("moon '{}' does not name the body it orbits", body.name)));
            }
            if !seen.insert(body.name.as_str()) {
                return Err(invalid(format!("duplicate body name '{}'", body.name)));
            }
            if body.size <= 0.0 {
                return Err(invalid(format!("body '{}' has non-positive size {}", body.name, body.size)));
            }
        }

        if self.orbits.samples < 3 {
            return Err(invalid(format!("orbit paths need at least 3 samples, got {}", self.orbits.samples)));
        }
        if self.orbits.step <= 0.0 {
            return Err(invalid(format!("orbit step must be positive, got {}", self.orbits.step)));
        }
        if self.stars.radius <= 0.0 {
            return Err(invalid(format!("star radius must be positive, got {}", self.stars.radius)));
        }
        if self.camera.near <= 0.0 || self.camera.near >= self.camera.far {
            return Err(invalid(format!(
                "camera clip planes out of order: near {} far {}",
                self.camera.near, self.camera.far
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
