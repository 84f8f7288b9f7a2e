//! Headless timing and drift measurement
//!
//! `bench_advance` times the step function over increasing run lengths.
//! `drift_report` runs a scenario without a window and measures how far the
//! conserved quantities wander, which is what the `run` subcommand prints.

use std::time::Instant;

use log::info;

use crate::error::SimResult;
use crate::simulation::diagnostics::Invariants;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{InitialConditions, Scenario};
use crate::simulation::states::System;

/// Result of a headless run
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub steps: usize,
    pub initial: Invariants,
    pub last: Invariants,
    pub system: System,
    pub elapsed_secs: f64,
}

impl DriftReport {
    pub fn energy_drift(&self) -> f64 {
        self.last.energy_drift(&self.initial)
    }

    pub fn momentum_drift(&self) -> f64 {
        self.last.momentum_drift(&self.initial)
    }
}

/// Step `conditions` forward `steps` times at `parameters.dt()` and measure
/// the invariants at both ends
pub fn drift_report(conditions: &InitialConditions, parameters: Parameters, steps: usize) -> SimResult<DriftReport> {
    let gravity = NewtonianGravity {
        g: parameters.g,
        eps2: parameters.eps2(),
    };
    let mut scenario = Scenario::build_scenario(conditions, parameters)?;
    let initial = Invariants::measure(&scenario.system.bodies, &gravity);

    let t0 = Instant::now();
    for _ in 0..steps {
        scenario.step();
    }
    let elapsed_secs = t0.elapsed().as_secs_f64();

    let last = Invariants::measure(&scenario.system.bodies, &gravity);

    Ok(DriftReport {
        steps,
        initial,
        last,
        system: scenario.system,
        elapsed_secs,
    })
}

/// Time the default scenario over increasing step counts
pub fn bench_advance() -> SimResult<()> {
    let steps = [1_000, 10_000, 100_000];
    let conditions = InitialConditions::default();

    // Warm up
    drift_report(&conditions, Parameters::default(), 100)?;

    for n in steps {
        let report = drift_report(&conditions, Parameters::default(), n)?;
        let per_step_us = report.elapsed_secs * 1.0e6 / n as f64;

        info!(
            "steps = {n:7}, total = {:8.4} s, per step = {:6.3} us, |dE/E| = {:.3e}, |dP| = {:.3e}",
            report.elapsed_secs,
            per_step_us,
            report.energy_drift(),
            report.momentum_drift(),
        );
    }

    Ok(())
}
