//! Numerical and physical parameters for the simulation
//!
//! The constants are simulation-internal units tuned for a pleasant picture,
//! not SI physics. `Parameters` carries them at runtime so a scenario file
//! can override them:
//! - gravitational constant and softening length (`g`, `softening`),
//! - trail capacity,
//! - base step size and speed multiplier (`dt = base_dt * speed`)

use crate::error::{SimError, SimResult};

/// Gravitational constant
pub const G: f64 = 1.0;

/// Softening length; `SOFTENING^2` is added to every squared separation
pub const SOFTENING: f64 = 0.1;

/// Maximum number of points kept in a body's trail
pub const MAX_TRAIL_LEN: usize = 500;

/// Simulated time advanced per tick at speed 1.0
pub const BASE_DT: f64 = 0.01;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 30.0;
pub const DEFAULT_SPEED: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub softening: f64, // softening length (not squared)
    pub trail_len: usize, // trail capacity per body
    pub base_dt: f64, // step size at speed 1.0
    pub speed: f64, // speed multiplier
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: G,
            softening: SOFTENING,
            trail_len: MAX_TRAIL_LEN,
            base_dt: BASE_DT,
            speed: DEFAULT_SPEED,
        }
    }
}

impl Parameters {
    /// Squared softening length, the term added to `r^2`
    pub fn eps2(&self) -> f64 {
        self.softening * self.softening
    }

    /// Step size for one tick at the current speed
    pub fn dt(&self) -> f64 {
        self.base_dt * self.speed
    }

    /// Reject constants that would make every step meaningless
    pub fn validate(&self) -> SimResult<()> {
        if !self.g.is_finite() || self.g <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "g",
                value: self.g,
            });
        }
        if !self.softening.is_finite() || self.softening <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "softening",
                value: self.softening,
            });
        }
        if !self.base_dt.is_finite() || self.base_dt <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "base_dt",
                value: self.base_dt,
            });
        }
        clamp_speed(self.speed)?;
        Ok(())
    }
}

/// Clamp a requested speed multiplier into `[MIN_SPEED, MAX_SPEED]`.
/// NaN and infinities are rejected rather than clamped.
pub fn clamp_speed(speed: f64) -> SimResult<f64> {
    if !speed.is_finite() {
        return Err(SimError::InvalidSpeed(speed));
    }
    Ok(speed.clamp(MIN_SPEED, MAX_SPEED))
}
