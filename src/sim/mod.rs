//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by marble ID)
//! - No rendering or platform dependencies

pub mod board;
pub mod body;
pub mod bounds;
pub mod collision;
pub mod matching;
pub mod score;
pub mod state;
pub mod tick;

pub use board::{Board, Marble, MarbleColor, MarbleId};
pub use body::{Body, Material};
pub use bounds::{Bounds, Insets};
pub use collision::{CollisionResult, circle_circle_collision, resolve_contact};
pub use matching::{MatchResolver, MatchSet};
pub use score::{ScoreEngine, format_score, score_delta};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, TiltSample, select, tick};
