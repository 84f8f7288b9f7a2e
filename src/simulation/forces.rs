//! Force contributors for the three-body engine
//!
//! Defines the `Force` trait, a `ForceSet` that sums several terms, and the
//! softened Newtonian gravity term the simulation actually runs with

use crate::simulation::params::{Parameters, G, SOFTENING};
use crate::simulation::states::{Body, NVec2};

/// Collection of force terms
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Gravity only, using the constants carried by `params`
    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new().with(NewtonianGravity {
            g: params.g,
            eps2: params.eps2(),
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(bodies, out);
        }
    }
}

impl Default for ForceSet {
    /// Newtonian gravity with `G` and `SOFTENING`
    fn default() -> Self {
        Self::new().with(NewtonianGravity::default())
    }
}

/// Trait for force sources operating on an ordered slice of bodies
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]);
}

/// Pairwise Newtonian gravity with a softened inverse-square magnitude
///
/// For each unordered pair the force magnitude is `g * mi * mj / (r^2 + eps2)`
/// along the unit separation vector. Coincident bodies contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub eps2: f64, // softening squared
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: G,
            eps2: SOFTENING * SOFTENING,
        }
    }
}

impl NewtonianGravity {
    /// Force exerted on a body of mass `mi` at `xi` by a body of mass `mj`
    /// at `xj`. The force on the other body is the exact negation.
    pub fn pair_force(&self, xi: NVec2, mi: f64, xj: NVec2, mj: f64) -> NVec2 {
        // r points from i to j, so i is pulled along +r
        let r = xj - xi;
        let r2 = r.dot(&r);

        // no direction to pull along
        if r2 == 0.0 {
            return NVec2::zeros();
        }

        let magnitude = self.g * mi * mj / (r2 + self.eps2);

        r * (magnitude / r2.sqrt())
    }

    /// Upper bound on the magnitude of any single pair force:
    /// `g * mi * mj / eps2`, approached as the separation goes to zero
    pub fn max_pair_force(&self, mi: f64, mj: f64) -> f64 {
        self.g * mi * mj / self.eps2
    }
}

impl Force for NewtonianGravity {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]) {
        let n = bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &bodies[i];

            for j in (i + 1)..n {
                let bj = &bodies[j];

                let f = self.pair_force(bi.x, bi.m, bj.x, bj.m);

                // equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Net force on each body under default gravity, same order as `bodies`
pub fn compute_forces(bodies: &[Body]) -> Vec<NVec2> {
    let mut out = vec![NVec2::zeros(); bodies.len()];
    ForceSet::default().accumulate_forces(bodies, &mut out);
    out
}
