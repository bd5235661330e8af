//! Marbles headless driver
//!
//! Plays a scripted session on the native target: the device is tilted
//! through a fixed sequence, the largest group on the board is tapped once
//! the marbles settle, and the run ends when no moves are left.
//!
//! Usage: `marbles [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use glam::Vec2;
    use marbles::consts::{SETTLE_SPEED, SIM_DT};
    use marbles::sim::format_score;
    use marbles::{GameController, Tuning};

    env_logger::init();
    log::info!("Marbles (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(20230608);
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("Failed to load tuning from {}: {} - using defaults", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    // Portrait phone frame
    let size = Vec2::new(390.0, 844.0);
    let mut game = GameController::new(seed, size, tuning, demo::TiltScript::default(), demo::LogPresenter);

    const MAX_TAPS: u32 = 64;
    const SETTLE_FRAMES: u32 = 600;

    let mut taps = 0;
    while taps < MAX_TAPS && game.has_moves() {
        // Let the board come to rest before picking a target
        for _ in 0..SETTLE_FRAMES {
            game.frame(SIM_DT);
            if game.board().is_settled(SETTLE_SPEED) {
                break;
            }
        }

        let groups = game.state().resolver.groups(game.board());
        let Some(target) = groups.iter().max_by_key(|g| g.len()) else {
            break;
        };
        let Some(seed_marble) = target.sorted().first().copied() else {
            break;
        };

        game.tap(seed_marble);
        game.frame(SIM_DT);
        taps += 1;
    }

    println!(
        "Seed {}: {} taps, {} marbles left, score {}",
        seed,
        taps,
        game.board().len(),
        format_score(game.score())
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use marbles::sim::{TiltSample, format_score};
    use marbles::{MotionSource, Presenter};

    /// Cycles the device through down / left / down / right tilts
    #[derive(Default)]
    pub struct TiltScript {
        tick: u32,
    }

    impl TiltScript {
        const HOLD_TICKS: u32 = 90;
        const TILTS: [(f32, f32); 4] = [(0.0, 1.0), (-0.7, 0.7), (0.0, 1.0), (0.7, 0.7)];
    }

    impl MotionSource for TiltScript {
        fn sample(&mut self) -> Option<TiltSample> {
            let phase = (self.tick / Self::HOLD_TICKS) as usize % Self::TILTS.len();
            self.tick = self.tick.wrapping_add(1);
            let (x, y) = Self::TILTS[phase];
            Some(TiltSample::new(x, y))
        }
    }

    /// Stands in for the renderer
    pub struct LogPresenter;

    impl Presenter for LogPresenter {
        fn spawn_effect(&mut self, position: Vec2, lifetime: f32) {
            log::debug!("Spark at ({:.0}, {:.0}) for {}s", position.x, position.y, lifetime);
        }

        fn render_score(&mut self, total: u64) {
            log::info!("SCORE: {}", format_score(total));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core has no web entry point of its own
}
