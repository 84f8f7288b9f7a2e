//! Lifecycle of one simulation run
//!
//! The integrator has no notion of running or paused; this is the caller-side
//! state machine that decides when to step:
//!
//! ```text
//! Uninitialized --load--> Initialized --play--> Running <--> Paused
//!                              ^                   |           |
//!                              +-------reset-------+-----------+
//! ```
//!
//! Loading new conditions or resetting always discards the current bodies and
//! leaves the run stopped.

use log::{debug, info};

use crate::error::{SimError, SimResult};
use crate::simulation::params::{clamp_speed, Parameters};
use crate::simulation::scenario::{InitialConditions, Scenario};
use crate::simulation::states::System;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Uninitialized,
    Initialized,
    Running,
    Paused,
}

pub struct SimulationRun {
    state: RunState,
    conditions: Option<InitialConditions>,
    parameters: Parameters,
    scenario: Option<Scenario>,
    ticks: u64,
}

impl Default for SimulationRun {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl SimulationRun {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            state: RunState::Uninitialized,
            conditions: None,
            parameters,
            scenario: None,
            ticks: 0,
        }
    }

    /// Convenience: a run already loaded with `conditions`
    pub fn with_conditions(conditions: InitialConditions, parameters: Parameters) -> SimResult<Self> {
        let mut run = Self::new(parameters);
        run.load(conditions)?;
        Ok(run)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn conditions(&self) -> Option<&InitialConditions> {
        self.conditions.as_ref()
    }

    pub fn speed(&self) -> f64 {
        self.parameters.speed
    }

    /// Ticks stepped since the last load or reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current state for rendering; `None` until conditions are loaded
    pub fn snapshot(&self) -> Option<&System> {
        self.scenario.as_ref().map(|s| &s.system)
    }

    /// Replace the run with new initial conditions. On error the previous
    /// run is left untouched.
    pub fn load(&mut self, conditions: InitialConditions) -> SimResult<()> {
        let scenario = Scenario::build_scenario(&conditions, self.parameters.clone())?;

        info!("loaded {} bodies, dt = {}", scenario.system.bodies.len(), self.parameters.dt());

        self.conditions = Some(conditions);
        self.scenario = Some(scenario);
        self.state = RunState::Initialized;
        self.ticks = 0;
        Ok(())
    }

    /// Rebuild the bodies from the loaded conditions at t = 0
    pub fn reset(&mut self) -> SimResult<()> {
        let conditions = self.conditions.ok_or(SimError::Uninitialized)?;
        debug!("reset after {} ticks", self.ticks);
        self.load(conditions)
    }

    pub fn play(&mut self) -> SimResult<()> {
        match self.state {
            RunState::Uninitialized => Err(SimError::Uninitialized),
            _ => {
                self.state = RunState::Running;
                Ok(())
            }
        }
    }

    /// No-op unless running
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    pub fn toggle(&mut self) -> SimResult<()> {
        if self.is_running() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Set the speed multiplier, clamped to the allowed range. Returns the
    /// speed actually applied.
    pub fn set_speed(&mut self, speed: f64) -> SimResult<f64> {
        let speed = clamp_speed(speed)?;
        self.parameters.speed = speed;
        if let Some(scenario) = self.scenario.as_mut() {
            scenario.parameters.speed = speed;
        }
        Ok(speed)
    }

    /// One frame: step once if running. Returns whether a step happened.
    pub fn tick(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        match self.scenario.as_mut() {
            Some(scenario) => {
                scenario.step();
                self.ticks += 1;
                true
            }
            None => false,
        }
    }
}
