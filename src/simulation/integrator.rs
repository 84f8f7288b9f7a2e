//! Fixed-step time integrator for the three-body system
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked with the current
//! force first, then the position drifts with the *new* velocity. One force
//! evaluation per step.
//!
//! Steps are value-to-value: the input bodies are never modified and a fresh
//! collection, same order and length, is returned.

use super::forces::ForceSet;
use super::states::{Body, NVec2, System};
use crate::error::{SimError, SimResult};

/// Advance `bodies` by `dt` under default softened gravity
pub fn advance(bodies: &[Body], dt: f64) -> Vec<Body> {
    advance_with(bodies, dt, &ForceSet::default())
}

/// Like [`advance`] but rejects a negative or non-finite `dt`
pub fn try_advance(bodies: &[Body], dt: f64) -> SimResult<Vec<Body>> {
    check_dt(dt)?;
    Ok(advance(bodies, dt))
}

/// Advance `bodies` by one step of size `dt` using `forces`
pub fn advance_with(bodies: &[Body], dt: f64, forces: &ForceSet) -> Vec<Body> {
    let mut f = vec![NVec2::zeros(); bodies.len()];
    forces.accumulate_forces(bodies, &mut f);

    bodies
        .iter()
        .zip(f.iter())
        .map(|(b, f)| {
            let a = f / b.m;

            // Kick: v_n+1 = v_n + dt * a_n
            let v = b.v + a * dt;
            // Drift with the updated velocity: x_n+1 = x_n + dt * v_n+1
            let x = b.x + v * dt;

            let mut next = b.clone();
            next.v = v;
            next.x = x;
            // the trail records every call, including dt = 0
            next.trail.push(x);
            next
        })
        .collect()
}

pub(crate) fn check_dt(dt: f64) -> SimResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidTimeStep(dt));
    }
    Ok(())
}

impl System {
    /// The system one step later; `t` advances by `dt`
    pub fn advanced(&self, dt: f64, forces: &ForceSet) -> System {
        System {
            bodies: advance_with(&self.bodies, dt, forces),
            t: self.t + dt,
        }
    }
}
