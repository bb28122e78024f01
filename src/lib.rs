pub mod boids;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod history;
pub mod moon;
pub mod penplot;
pub mod random;
pub mod sketch;
pub mod waves;

pub use error::Error;

use serde::{Deserialize, Serialize};

/// Interaction and seeding constants for one flock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub count: usize,
    /// Containment radius around the origin.
    pub diameter: f32,
    pub fov: f32,
    /// Angular width of the field of view, in degrees.
    pub angle_of_view: f32,
    pub inertia: f32,
    /// Width of the comfortable band, as a fraction of `fov`, in (0, 1).
    pub right_spot: f32,
    pub base_speed: f32,
    /// Speed multiplier range drawn per boid at start.
    pub speed_jitter: (f32, f32),
    /// Initial heading range, in degrees.
    pub angle_range: (f32, f32),
    pub scan: NeighborScan,
    pub boundary: Boundary,
    pub perturbation: Perturbation,
}

/// Which neighbours a boid reacts to each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborScan {
    AllVisible,
    Closest,
}

/// What a boid does when it drifts further out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Boundary {
    /// Flip the direction of travel.
    Reverse,
    /// Flip the direction of travel and turn by a random angle in `[min, max)`.
    Kick { min: f32, max: f32 },
}

/// Playhead-driven heading wobble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Perturbation {
    None,
    Oscillate { frequency: f32, amplitude: f32 },
}
