//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – optional overrides for the physical constants and step size
//! - [`BodyConfig`]       – initial state for each body (exactly three)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:               # optional, every field optional
//!   G: 1.0                  # gravitational constant
//!   softening: 0.1          # softening length, squared before use
//!   trail_len: 500          # points kept per trail
//!   h0: 0.01                # step size at speed 1.0
//!   speed: 1.0              # speed multiplier, clamped to [0.1, 30]
//!
//! bodies:
//!   - x: [0.0, 0.0]
//!     v: [0.0, 0.0]
//!     m: 1200.0
//!   - x: [250.0, 0.0]
//!     v: [0.0, 2.0]
//!     m: 15.0
//!   - x: [-450.0, 0.0]
//!     v: [0.0, -1.2]
//!     m: 5.0
//! ```
//!
//! The runtime maps this into [`InitialConditions`] and [`Parameters`],
//! validating both before any body is built.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::simulation::params::{clamp_speed, Parameters};
use crate::simulation::scenario::{BodyConditions, InitialConditions};

/// Global numerical and physical parameters; anything omitted keeps its default
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    #[serde(rename = "G", default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>, // gravitational constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub softening: Option<f64>, // softening length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_len: Option<usize>, // trail capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h0: Option<f64>, // step size at speed 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>, // speed multiplier
}

impl ParametersConfig {
    /// Overlay the given fields on the defaults
    pub fn to_parameters(&self) -> Parameters {
        let d = Parameters::default();
        Parameters {
            g: self.g.unwrap_or(d.g),
            softening: self.softening.unwrap_or(d.softening),
            trail_len: self.trail_len.unwrap_or(d.trail_len),
            base_dt: self.h0.unwrap_or(d.base_dt),
            speed: self.speed.unwrap_or(d.speed),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position in simulation units
    pub v: [f64; 2], // Initial velocity in simulation units per time unit
    pub m: f64,      // Mass of the body
}

impl From<&BodyConditions> for BodyConfig {
    fn from(bc: &BodyConditions) -> Self {
        Self {
            x: [bc.position_x, bc.position_y],
            v: [bc.velocity_x, bc.velocity_y],
            m: bc.mass,
        }
    }
}

impl From<&BodyConfig> for BodyConditions {
    fn from(bc: &BodyConfig) -> Self {
        BodyConditions::new(bc.m, bc.x, bc.v)
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // Initial state of each body, in order
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn to_yaml_string(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validated initial conditions and parameters
    pub fn to_parts(&self) -> SimResult<(InitialConditions, Parameters)> {
        let bodies: Vec<BodyConditions> = self.bodies.iter().map(BodyConditions::from).collect();
        let conditions = InitialConditions::from_slice(&bodies)?;
        conditions.validate()?;

        let mut parameters = self.parameters.to_parameters();
        parameters.validate()?;
        parameters.speed = clamp_speed(parameters.speed)?;

        Ok((conditions, parameters))
    }
}

impl From<&InitialConditions> for ScenarioConfig {
    fn from(ic: &InitialConditions) -> Self {
        Self {
            parameters: ParametersConfig::default(),
            bodies: ic.bodies.iter().map(BodyConfig::from).collect(),
        }
    }
}
