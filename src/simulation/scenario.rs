//! Build fully-initialized simulation scenarios from initial conditions
//!
//! `InitialConditions` is the record an outside collaborator (a scenario file,
//! a preset, a UI form) hands to the simulation: exactly three bodies with
//! mass, position and velocity. `Scenario` is the runtime bundle built from
//! it, containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)

use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::ForceSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{display_radius, Body, NVec2, System, Trail};

/// Number of bodies in every run
pub const BODY_COUNT: usize = 3;

pub const BODY_NAMES: [&str; BODY_COUNT] = ["Alpha", "Beta", "Gamma"];

/// Pastel orange, pale cyan, lavender
pub const BODY_COLORS: [[f32; 3]; BODY_COUNT] = [
    [1.0, 0.702, 0.278],
    [0.698, 1.0, 1.0],
    [0.902, 0.902, 0.980],
];

/// Initial state of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConditions {
    pub mass: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
}

impl BodyConditions {
    pub fn new(mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            mass,
            position_x: position[0],
            position_y: position[1],
            velocity_x: velocity[0],
            velocity_y: velocity[1],
        }
    }

    pub fn position(&self) -> NVec2 {
        NVec2::new(self.position_x, self.position_y)
    }

    pub fn velocity(&self) -> NVec2 {
        NVec2::new(self.velocity_x, self.velocity_y)
    }

    fn validate(&self, index: usize) -> SimResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::NonPositiveMass {
                index,
                mass: self.mass,
            });
        }
        if !self.position_x.is_finite() || !self.position_y.is_finite() {
            return Err(SimError::NonFiniteState {
                index,
                field: "position",
            });
        }
        if !self.velocity_x.is_finite() || !self.velocity_y.is_finite() {
            return Err(SimError::NonFiniteState {
                index,
                field: "velocity",
            });
        }
        Ok(())
    }
}

/// Masses, positions and velocities for exactly three bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub bodies: [BodyConditions; BODY_COUNT],
}

impl InitialConditions {
    pub fn new(bodies: [BodyConditions; BODY_COUNT]) -> Self {
        Self { bodies }
    }

    /// Accept any number of records, failing unless there are exactly three
    pub fn from_slice(bodies: &[BodyConditions]) -> SimResult<Self> {
        let bodies: [BodyConditions; BODY_COUNT] =
            bodies.try_into().map_err(|_| SimError::BodyCount {
                expected: BODY_COUNT,
                found: bodies.len(),
            })?;
        Ok(Self { bodies })
    }

    /// Every mass finite and positive, every component finite
    pub fn validate(&self) -> SimResult<()> {
        for (i, b) in self.bodies.iter().enumerate() {
            b.validate(i)?;
        }
        Ok(())
    }

    /// Runtime bodies with names, colors, display radii, and a trail seeded
    /// with each starting position
    pub fn build_bodies(&self, trail_len: usize) -> SimResult<Vec<Body>> {
        self.validate()?;

        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| {
                let x = bc.position();
                Body {
                    x,
                    v: bc.velocity(),
                    m: bc.mass,
                    trail: Trail::starting_at(x, trail_len),
                    name: BODY_NAMES[i],
                    color: BODY_COLORS[i],
                    radius: display_radius(bc.mass),
                }
            })
            .collect();

        Ok(bodies)
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        Preset::SunAndTwoPlanets.conditions()
    }
}

/// Built-in initial conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// A heavy star with two light planets on opposite sides
    #[default]
    SunAndTwoPlanets,
    /// Three equal masses on the Chenciner-Montgomery figure-eight
    FigureEight,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::SunAndTwoPlanets, Preset::FigureEight];

    pub fn name(self) -> &'static str {
        match self {
            Preset::SunAndTwoPlanets => "sun-and-two-planets",
            Preset::FigureEight => "figure-eight",
        }
    }

    pub fn conditions(self) -> InitialConditions {
        match self {
            Preset::SunAndTwoPlanets => InitialConditions::new([
                BodyConditions::new(1200.0, [0.0, 0.0], [0.0, 0.0]),
                BodyConditions::new(15.0, [250.0, 0.0], [0.0, 2.0]),
                BodyConditions::new(5.0, [-450.0, 0.0], [0.0, -1.2]),
            ]),
            Preset::FigureEight => figure_eight(100.0, 1000.0),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SimError::UnknownPreset(s.to_string()))
    }
}

/// Figure-eight choreography for G = 1, scaled to `length` and per-body
/// `mass`. Velocities scale with `sqrt(mass / length)`.
fn figure_eight(length: f64, mass: f64) -> InitialConditions {
    const X1: [f64; 2] = [0.970_004_36, -0.243_087_53];
    const V3: [f64; 2] = [-0.932_407_37, -0.864_731_46];

    let vs = (mass / length).sqrt();
    let outer_v = [-0.5 * V3[0] * vs, -0.5 * V3[1] * vs];

    InitialConditions::new([
        BodyConditions::new(mass, [X1[0] * length, X1[1] * length], outer_v),
        BodyConditions::new(mass, [-X1[0] * length, -X1[1] * length], outer_v),
        BodyConditions::new(mass, [0.0, 0.0], [V3[0] * vs, V3[1] * vs]),
    ])
}

/// Runtime bundle built from initial conditions and parameters
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
}

impl Scenario {
    pub fn build_scenario(conditions: &InitialConditions, parameters: Parameters) -> SimResult<Self> {
        parameters.validate()?;

        let bodies = conditions.build_bodies(parameters.trail_len)?;
        let forces = ForceSet::from_parameters(&parameters);

        Ok(Self {
            parameters,
            system: System::new(bodies),
            forces,
        })
    }

    /// Advance the held system by one tick at the current speed
    pub fn step(&mut self) {
        self.system = self.system.advanced(self.parameters.dt(), &self.forces);
    }
}
