//! Session state
//!
//! Everything one game session owns: the board, the score and the scratch
//! match set. There are no globals; the controller owns a `GameState` and
//! passes it to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::{Board, MarbleId};
use super::matching::{MatchResolver, MatchSet};
use super::score::ScoreEngine;
use crate::tuning::Tuning;

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A marble was cleared; spawn a spark effect that expires on its own
    EffectSpawned {
        marble: MarbleId,
        position: Vec2,
        lifetime: f32,
    },
    /// The total changed
    ScoreChanged { total: u64, delta: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the board colors were drawn with
    pub seed: u64,
    pub board: Board,
    pub score: ScoreEngine,
    pub resolver: MatchResolver,
    /// Reused by every selection, cleared before each pass
    pub matched: MatchSet,
    /// Accelerometer units -> gravity
    pub gravity_scale: f32,
    pub effect_lifetime: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session on a populated board for a frame of `size`
    pub fn new(seed: u64, size: Vec2, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::populate(
            size,
            tuning.radius_for(size.x),
            tuning.header_height,
            &tuning.palette,
            &mut rng,
        );
        Self::with_board(seed, board, tuning)
    }

    /// Session on a prepared board (scripted layouts)
    pub fn with_board(seed: u64, mut board: Board, tuning: &Tuning) -> Self {
        board.set_solver_iterations(tuning.solver_iterations);
        Self {
            seed,
            board,
            score: ScoreEngine::new(tuning.min_match_size, tuning.score_exponent_cap),
            resolver: MatchResolver::new(tuning.proximity_multiplier),
            matched: MatchSet::new(),
            gravity_scale: tuning.gravity_scale,
            effect_lifetime: tuning.effect_lifetime,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take pending events in the order they happened
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True if some marble still belongs to a scoring group
    pub fn has_moves(&self) -> bool {
        self.resolver.has_match(&self.board, self.score.min_size())
    }
}
