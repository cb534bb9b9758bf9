//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator policy and clock pacing
//! - [`ParametersConfig`] – physical constants and display scaling
//! - [`ViewConfig`]       – initial control values for the presentation loop
//! - [`BodyConfig`]       – one entry per body, prefab or manual
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The Earth–Moon scenario:
//!
//! ```yaml
//! engine:
//!   integrator: "euler"     # or "kinematic"
//!   speed: 36000.0          # simulated seconds per real second
//!   max_step: 60.0          # split longer deltas into sub-steps
//!   max_substeps: 1000      # at most this many per clock iteration
//!
//! parameters:
//!   softening: 0.0          # eps^2 in m^2
//!   unit_scale: 4.0e8       # metres per display unit
//!
//! view:
//!   centered: 0
//!
//! bodies:
//!   - prefab: Earth
//!   - prefab: Moon
//!     orbit: { phase: 0.0 }
//! ```
//!
//! Bodies without `prefab` give their own `name`, `mass` and `radius`. An
//! `orbit` entry places a body on the x-axis rotated by `phase` degrees at the
//! catalog semimajor axis, moving prograde at the catalog orbital velocity,
//! relative to `around` when given and to the origin otherwise.

use serde::Deserialize;

use crate::simulation::engine::DEFAULT_MAX_SUBSTEPS;
use crate::simulation::integrator::Integrator;
use crate::simulation::states::BodyType;

/// Clock and integration settings
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: Integrator, // time integrator used for every body
    #[serde(default = "default_speed")]
    pub speed: f64, // simulated seconds per real second
    pub max_step: Option<f64>, // longest single update in simulated seconds
    #[serde(default = "default_max_substeps")]
    pub max_substeps: u64, // updates per clock iteration at most, excess time is dropped
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64, // real-time pause between clock iterations
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: Integrator::default(),
            speed: default_speed(),
            max_step: None,
            max_substeps: default_max_substeps(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_speed() -> f64 {
    1.0
}

fn default_max_substeps() -> u64 {
    DEFAULT_MAX_SUBSTEPS
}

fn default_tick_ms() -> u64 {
    1
}

fn default_unit_scale() -> f64 {
    4.0e8
}

fn default_scale() -> f64 {
    1.0
}

/// Physical constants and scaling
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: Option<f64>, // overrides the catalog's gravitational constant
    #[serde(default)]
    pub softening: f64, // eps^2 added to squared separations
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64, // metres per display unit
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: None,
            softening: 0.0,
            unit_scale: default_unit_scale(),
        }
    }
}

/// Initial values of the shared control parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ViewConfig {
    #[serde(default)]
    pub centered: usize,
    #[serde(default = "default_scale")]
    pub body_scale: f64,
    #[serde(default = "default_scale")]
    pub focus_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            centered: 0,
            body_scale: 1.0,
            focus_scale: 1.0,
        }
    }
}

/// Circular-orbit placement from catalog orbital data
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrbitConfig {
    #[serde(default)]
    pub phase: f64, // degrees from +x in the xy-plane
    pub around: Option<String>, // parent body, must be listed earlier
    #[serde(default)]
    pub inclined: bool, // tilt the orbit by the catalog inclination
}

/// Configuration for a single body
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BodyConfig {
    pub prefab: Option<String>, // catalog name
    pub name: Option<String>,   // required without prefab, renames a prefab otherwise
    #[serde(rename = "type")]
    pub body_type: Option<BodyType>,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub rotational_velocity: Option<f64>,
    pub obliquity: Option<f64>,
    pub x: Option<Vec<f64>>, // initial position, 2 or 3 components, m
    pub v: Option<Vec<f64>>, // initial velocity, 2 or 3 components, m/s
    pub angle: Option<f64>,  // initial rotation angle, degrees
    pub orbit: Option<OrbitConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub title: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub view: ViewConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
