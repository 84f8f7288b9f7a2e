//! Conserved-quantity diagnostics
//!
//! Nothing here feeds back into the integration. These are read-only
//! measurements used by the headless runner, the benchmark, and the tests to
//! watch how far a run has drifted.

use super::forces::NewtonianGravity;
use super::states::{Body, NVec2};

/// Sum of m·v over all bodies
pub fn total_momentum(bodies: &[Body]) -> NVec2 {
    bodies
        .iter()
        .map(Body::momentum)
        .fold(NVec2::zeros(), |acc, p| acc + p)
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.m).sum()
}

/// Mass-weighted mean position; the origin for an empty or massless slice
pub fn center_of_mass(bodies: &[Body]) -> NVec2 {
    let m = total_mass(bodies);
    if m == 0.0 {
        return NVec2::zeros();
    }
    bodies
        .iter()
        .fold(NVec2::zeros(), |acc, b| acc + b.x * b.m)
        / m
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Potential of one pair at separation `r`
///
/// The force law `g * mi * mj / (r^2 + eps2)` integrates to
/// `-(g * mi * mj / eps) * atan(eps / r)`, which tends to the Newtonian
/// `-g * mi * mj / r` far from the softening scale.
pub fn pair_potential(gravity: &NewtonianGravity, mi: f64, mj: f64, r: f64) -> f64 {
    let gm = gravity.g * mi * mj;
    if gravity.eps2 == 0.0 {
        return -gm / r;
    }
    let eps = gravity.eps2.sqrt();
    -gm / eps * eps.atan2(r)
}

/// Total pair potential, each pair once; coincident pairs are skipped like
/// their force
pub fn potential_energy(bodies: &[Body], gravity: &NewtonianGravity) -> f64 {
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..].iter().filter_map(move |b| {
                let r2 = (b.x - a.x).norm_squared();
                (r2 != 0.0).then(|| pair_potential(gravity, a.m, b.m, r2.sqrt()))
            })
        })
        .sum()
}

pub fn total_energy(bodies: &[Body], gravity: &NewtonianGravity) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, gravity)
}

/// Scalar (z) angular momentum about the origin, sum of m·(x × v)
pub fn angular_momentum(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| b.m * (b.x.x * b.v.y - b.x.y * b.v.x))
        .sum()
}

/// Snapshot of the conserved quantities at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invariants {
    pub momentum: NVec2,
    pub angular_momentum: f64,
    pub energy: f64,
}

impl Invariants {
    pub fn measure(bodies: &[Body], gravity: &NewtonianGravity) -> Self {
        Self {
            momentum: total_momentum(bodies),
            angular_momentum: angular_momentum(bodies),
            energy: total_energy(bodies, gravity),
        }
    }

    /// Relative energy change since `initial`; absolute change when the
    /// initial energy is zero
    pub fn energy_drift(&self, initial: &Invariants) -> f64 {
        let delta = self.energy - initial.energy;
        if initial.energy == 0.0 {
            delta.abs()
        } else {
            (delta / initial.energy).abs()
        }
    }

    /// Magnitude of the momentum change since `initial`
    pub fn momentum_drift(&self, initial: &Invariants) -> f64 {
        (self.momentum - initial.momentum).norm()
    }
}
