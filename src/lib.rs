pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, System, Trail, NVec2};
pub use simulation::params::{Parameters, G, SOFTENING, MAX_TRAIL_LEN, BASE_DT, MIN_SPEED, MAX_SPEED};
pub use simulation::forces::{Force, ForceSet, NewtonianGravity, compute_forces};
pub use simulation::integrator::{advance, advance_with, try_advance};
pub use simulation::diagnostics::Invariants;
pub use simulation::scenario::{BodyConditions, InitialConditions, Preset, Scenario};
pub use simulation::run::{RunState, SimulationRun};

pub use configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_advance, drift_report, DriftReport};
