//! Host-facing game loop
//!
//! The host calls `frame` once per display frame. The controller pulls a tilt
//! reading from its motion source for every fixed substep, runs the
//! simulation and forwards the resulting events to the presenter.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Board, GameEvent, GameState, MarbleId, TickInput, TiltSample, tick};
use crate::tuning::Tuning;

/// Supplies accelerometer readings
pub trait MotionSource {
    /// Latest reading, or `None` if nothing new arrived
    fn sample(&mut self) -> Option<TiltSample>;
}

impl<F> MotionSource for F
where
    F: FnMut() -> Option<TiltSample>,
{
    fn sample(&mut self) -> Option<TiltSample> {
        (self)()
    }
}

/// Receives fire-and-forget notifications for the rendering layer
pub trait Presenter {
    /// Spark at `position`; the effect removes itself after `lifetime`
    fn spawn_effect(&mut self, position: Vec2, lifetime: f32);
    /// The raw total; formatting is up to the presenter
    fn render_score(&mut self, total: u64);
}

/// Owns the session and its collaborators
pub struct GameController<M, P> {
    state: GameState,
    tuning: Tuning,
    motion: M,
    presenter: P,
    accumulator: f32,
    /// Hit-tested taps waiting for the next tick (one per tick)
    taps: VecDeque<MarbleId>,
}

impl<M: MotionSource, P: Presenter> GameController<M, P> {
    /// Start a session on a freshly populated board for a frame of `size`
    pub fn new(seed: u64, size: Vec2, tuning: Tuning, motion: M, presenter: P) -> Self {
        let state = GameState::new(seed, size, &tuning);
        log::info!(
            "Game initialized with seed: {} ({} marbles, r={:.1})",
            seed,
            state.board.len(),
            state.board.radius()
        );
        Self::from_state(state, tuning, motion, presenter)
    }

    /// Start a session on a prepared board
    pub fn with_board(seed: u64, board: Board, tuning: Tuning, motion: M, presenter: P) -> Self {
        let state = GameState::with_board(seed, board, &tuning);
        Self::from_state(state, tuning, motion, presenter)
    }

    fn from_state(state: GameState, tuning: Tuning, motion: M, mut presenter: P) -> Self {
        presenter.render_score(state.score.total());
        Self {
            state,
            tuning,
            motion,
            presenter,
            accumulator: 0.0,
            taps: VecDeque::new(),
        }
    }

    /// Run simulation ticks for `elapsed` seconds of wall time.
    ///
    /// Returns the number of substeps taken.
    pub fn frame(&mut self, elapsed: f32) -> u32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                tilt: self.motion.sample(),
                tap: self.taps.pop_front(),
            };
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.dispatch_events();
        }
        substeps
    }

    /// Queue a tap on `marble` for the next tick
    pub fn tap(&mut self, marble: MarbleId) {
        self.taps.push_back(marble);
    }

    /// Throw away the current session and start over with `seed`
    pub fn restart(&mut self, seed: u64) {
        let size = self.state.board.size();
        self.state = GameState::new(seed, size, &self.tuning);
        self.accumulator = 0.0;
        self.taps.clear();
        self.presenter.render_score(0);
        log::info!("Game restarted with seed: {}", seed);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::EffectSpawned {
                    position, lifetime, ..
                } => self.presenter.spawn_effect(position, lifetime),
                GameEvent::ScoreChanged { total, .. } => self.presenter.render_score(total),
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn score(&self) -> u64 {
        self.state.score.total()
    }

    pub fn has_moves(&self) -> bool {
        self.state.has_moves()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }
}
