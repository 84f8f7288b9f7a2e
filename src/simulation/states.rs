//! Core state types for the three-body simulation.
//!
//! Defines the 2D body/system structs:
//! - `Body` holds mass, position, velocity, and a bounded `Trail`
//! - `System` holds the ordered list of bodies and the simulated time `t`
//!
//! Bodies are treated as values: the integrator never mutates a `Body` in
//! place, it builds the next snapshot from the previous one.

use std::collections::VecDeque;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Bounded history of past positions, oldest first.
///
/// Pushing past `cap` drops entries from the front (FIFO), so the trail is a
/// sliding window over the most recent `cap` positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<NVec2>,
    cap: usize,
}

impl Trail {
    /// Empty trail holding at most `cap` points
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap.min(1024)),
            cap,
        }
    }

    /// Trail seeded with a single starting point
    pub fn starting_at(p: NVec2, cap: usize) -> Self {
        let mut trail = Self::new(cap);
        trail.push(p);
        trail
    }

    /// Append `p` and evict the oldest points while over capacity
    pub fn push(&mut self, p: NVec2) {
        self.points.push_back(p);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn oldest(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&NVec2> {
        self.points.back()
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }
}

/// A point mass in the plane.
///
/// `m`, `name`, `color` and `radius` are fixed once the body is built; only
/// `x`, `v` and `trail` change from step to step.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub trail: Trail, // recent positions, oldest first
    pub name: &'static str, // display label
    pub color: [f32; 3], // display color (linear 0..1 rgb)
    pub radius: f64, // display radius, not used by the physics
}

impl Body {
    /// Build an unnamed white body whose trail starts at `x`
    pub fn new(m: f64, x: NVec2, v: NVec2, trail_cap: usize) -> Self {
        Self {
            x,
            v,
            m,
            trail: Trail::starting_at(x, trail_cap),
            name: "",
            color: [1.0, 1.0, 1.0],
            radius: display_radius(m),
        }
    }

    /// Linear momentum m·v
    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// Display radius grows with the order of magnitude of the mass:
/// `5 · max(1, log10(max(1, m)))`
pub fn display_radius(m: f64) -> f64 {
    const BASE_RADIUS: f64 = 5.0;
    BASE_RADIUS * m.max(1.0).log10().max(1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // ordered collection of bodies
    pub t: f64, // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }
}
