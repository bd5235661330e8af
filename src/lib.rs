//! Marbles - A tilt-controlled marble matching puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, matching, scoring, game state)
//! - `controller`: Host-facing loop wiring motion input and presentation
//! - `tuning`: Data-driven game balance

pub mod controller;
pub mod sim;
pub mod tuning;

pub use controller::{GameController, MotionSource, Presenter};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use crate::sim::MarbleColor;

    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the controller will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Board layout
    pub const HEADER_HEIGHT: f32 = 100.0; // Reserved for the score display
    pub const MARBLES_PER_ROW: f32 = 8.0;

    /// Accelerometer reading -> gravity (points/s²)
    pub const GRAVITY_SCALE: f32 = 50.0;
    /// Multiplier on diameter² below which two marbles touch for matching
    pub const PROXIMITY_MULTIPLIER: f32 = 2.1;

    /// Scoring
    pub const MIN_MATCH_SIZE: usize = 2;
    pub const SCORE_EXPONENT_CAP: u32 = 16;

    /// Contact solver passes per tick
    pub const SOLVER_ITERATIONS: u32 = 4;
    /// Below this speed (points/s) the board counts as settled
    pub const SETTLE_SPEED: f32 = 5.0;

    /// Spark effect lifetime, handed to the presenter
    pub const EFFECT_LIFETIME: f32 = 3.0;

    /// Palette used when tuning doesn't override it
    pub const DEFAULT_PALETTE: [MarbleColor; 6] = [
        MarbleColor::Blue,
        MarbleColor::Red,
        MarbleColor::Orange,
        MarbleColor::Yellow,
        MarbleColor::Green,
        MarbleColor::Purple,
    ];
}

/// Marble radius that fits `per_row` marbles across a frame of `width`
#[inline]
pub fn radius_for_width(width: f32, per_row: f32) -> f32 {
    (width / per_row) / 2.0
}

