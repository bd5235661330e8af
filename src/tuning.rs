//! Data-driven game balance
//!
//! Every field has a default from `consts`, so a tuning file only needs to
//! name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::radius_for_width;
use crate::sim::MarbleColor;

/// Errors that can occur when loading tuning
#[derive(Debug, Error)]
pub enum TuningError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A value is out of range
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Colors marbles are drawn from
    pub palette: Vec<MarbleColor>,
    /// Marbles that fit across the frame (sets the radius)
    pub marbles_per_row: f32,
    /// Space reserved above the board for the score display
    pub header_height: f32,
    /// Accelerometer units -> gravity
    pub gravity_scale: f32,
    /// Multiplier on diameter² for the matching adjacency test
    pub proximity_multiplier: f32,
    /// Smallest group that counts as a match
    pub min_match_size: usize,
    /// Match size beyond which the score stops growing
    pub score_exponent_cap: u32,
    /// How long spark effects live (presenter time units)
    pub effect_lifetime: f32,
    /// Contact solver passes per tick
    pub solver_iterations: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            marbles_per_row: MARBLES_PER_ROW,
            header_height: HEADER_HEIGHT,
            gravity_scale: GRAVITY_SCALE,
            proximity_multiplier: PROXIMITY_MULTIPLIER,
            min_match_size: MIN_MATCH_SIZE,
            score_exponent_cap: SCORE_EXPONENT_CAP,
            effect_lifetime: EFFECT_LIFETIME,
            solver_iterations: SOLVER_ITERATIONS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&content)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Marble radius for a frame `width` wide
    pub fn radius_for(&self, width: f32) -> f32 {
        radius_for_width(width, self.marbles_per_row)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.palette.is_empty() {
            return Err(invalid("palette", "must name at least one color"));
        }
        if !(self.marbles_per_row.is_finite() && self.marbles_per_row > 0.0) {
            return Err(invalid("marbles_per_row", "must be a positive number"));
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            return Err(invalid("header_height", "must be zero or positive"));
        }
        if !self.gravity_scale.is_finite() {
            return Err(invalid("gravity_scale", "must be finite"));
        }
        if !(self.proximity_multiplier.is_finite() && self.proximity_multiplier > 0.0) {
            return Err(invalid("proximity_multiplier", "must be a positive number"));
        }
        if self.min_match_size < MIN_MATCH_SIZE {
            return Err(invalid(
                "min_match_size",
                format!("{} is below the smallest match ({})", self.min_match_size, MIN_MATCH_SIZE),
            ));
        }
        if self.score_exponent_cap > 63 {
            return Err(invalid(
                "score_exponent_cap",
                format!("{} overflows a 64-bit score", self.score_exponent_cap),
            ));
        }
        if !(self.effect_lifetime.is_finite() && self.effect_lifetime >= 0.0) {
            return Err(invalid("effect_lifetime", "must be zero or positive"));
        }
        if self.solver_iterations == 0 {
            return Err(invalid("solver_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
