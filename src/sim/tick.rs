//! Fixed timestep simulation tick
//!
//! Advances the session deterministically. A tap is resolved before physics
//! runs for the tick, so the resolver always sees a completed step.

use glam::Vec2;

use super::board::MarbleId;
use super::state::{GameEvent, GameState};
use crate::consts::SETTLE_SPEED;

/// One accelerometer reading, already expressed in board axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TiltSample {
    pub x: f32,
    pub y: f32,
}

impl TiltSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Gravity vector for this reading
    pub fn to_gravity(self, scale: f32) -> Vec2 {
        Vec2::new(self.x * scale, self.y * scale)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest tilt reading, if a new one arrived
    pub tilt: Option<TiltSample>,
    /// Marble the player selected (already hit-tested)
    pub tap: Option<MarbleId>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(seed) = input.tap {
        select(state, seed);
    }

    if let Some(tilt) = input.tilt {
        let gravity = tilt.to_gravity(state.gravity_scale);
        state.board.set_gravity(gravity);
    }

    state.board.step(dt);
    state.time_ticks += 1;
}

/// Resolve a selection and clear the match if it scores.
///
/// Returns the number of marbles removed. Groups below the minimum size
/// change nothing and emit nothing.
pub fn select(state: &mut GameState, seed: MarbleId) -> usize {
    if !state.board.is_settled(SETTLE_SPEED) {
        log::debug!(
            "Resolving {} on a moving board (max speed {:.1})",
            seed,
            state.board.max_speed()
        );
    }

    state.resolver.resolve(&state.board, seed, &mut state.matched);
    let size = state.matched.len();
    if !state.score.counts(size) {
        log::debug!("Tap on {} matched {} marble(s), ignored", seed, size);
        return 0;
    }

    let before = state.score.total();
    let delta = state.score.apply_match(size);
    let removed = state.board.remove(state.matched.iter());

    let lifetime = state.effect_lifetime;
    for marble in &removed {
        state.push_event(GameEvent::EffectSpawned {
            marble: marble.id(),
            position: marble.position(),
            lifetime,
        });
    }
    let total = state.score.total();
    // A saturated total doesn't move
    if total != before {
        state.push_event(GameEvent::ScoreChanged { total, delta });
    }

    log::info!(
        "Cleared {} {} marbles (+{}, total {})",
        removed.len(),
        removed.first().map(|m| m.color().as_str()).unwrap_or("?"),
        delta,
        total
    );
    removed.len()
}
