//! The marble board
//!
//! Owns every live marble, the containment rectangle and the current gravity.
//! Marbles are stored in ascending id order; removal preserves that order so
//! iteration stays deterministic.

use std::collections::HashSet;
use std::fmt;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bounds::{Bounds, Insets};
use super::collision::resolve_contact;
use crate::consts::SOLVER_ITERATIONS;

/// Stable marble identifier, unique within one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarbleId(pub u32);

impl fmt::Display for MarbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarbleColor {
    Blue,
    Red,
    Orange,
    Yellow,
    Green,
    Purple,
}

impl MarbleColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarbleColor::Blue => "blue",
            MarbleColor::Red => "red",
            MarbleColor::Orange => "orange",
            MarbleColor::Yellow => "yellow",
            MarbleColor::Green => "green",
            MarbleColor::Purple => "purple",
        }
    }
}

impl fmt::Display for MarbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marble entity
#[derive(Debug, Clone, Serialize)]
pub struct Marble {
    id: MarbleId,
    color: MarbleColor,
    body: Body,
}

impl Marble {
    pub fn id(&self) -> MarbleId {
        self.id
    }

    pub fn color(&self) -> MarbleColor {
        self.color
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.vel
    }

    pub fn radius(&self) -> f32 {
        self.body.radius()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

/// The board: live marbles, containment and gravity.
///
/// Serializes for snapshots and debugging. There is no deserializer: a board
/// is only built through `new`/`populate`/`spawn`, which keep marbles sorted
/// by id and give every marble the board's radius.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    size: Vec2,
    bounds: Bounds,
    radius: f32,
    gravity: Vec2,
    solver_iterations: u32,
    /// Live marbles (sorted by id)
    marbles: Vec<Marble>,
    next_id: u32,
}

impl Board {
    /// Empty board for a frame of `size`.
    ///
    /// The play area loses `header` on the top edge (score display) and one
    /// diameter on the right edge.
    pub fn new(size: Vec2, radius: f32, header: f32) -> Self {
        let insets = Insets {
            top: header,
            left: 0.0,
            bottom: 0.0,
            right: radius * 2.0,
        };
        Self {
            size,
            bounds: Bounds::from_frame(size, insets),
            radius,
            gravity: Vec2::ZERO,
            solver_iterations: SOLVER_ITERATIONS,
            marbles: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a board and fill it with the standard grid
    pub fn populate<R: Rng + ?Sized>(
        size: Vec2,
        radius: f32,
        header: f32,
        palette: &[MarbleColor],
        rng: &mut R,
    ) -> Self {
        let mut board = Self::new(size, radius, header);
        board.fill_grid(header, palette, rng);
        board
    }

    /// Grid cells spaced one diameter apart, filled column by column.
    ///
    /// Columns run from the left edge while `x < width - 3r`, rows from the
    /// header while `y < height - 4r`. Only the colors are random.
    fn fill_grid<R: Rng + ?Sized>(&mut self, header: f32, palette: &[MarbleColor], rng: &mut R) {
        let r = self.radius;
        if !(r.is_finite() && r > 0.0) {
            log::warn!("Marble radius {} is not positive, board left empty", r);
            return;
        }
        if palette.is_empty() {
            log::warn!("Empty palette, board left empty");
            return;
        }

        let diameter = r * 2.0;
        let x_end = self.size.x - r * 3.0;
        let y_end = self.size.y - r * 4.0;

        let mut col = 0u32;
        loop {
            let x = col as f32 * diameter;
            if x >= x_end {
                break;
            }
            let mut row = 0u32;
            loop {
                let y = header + row as f32 * diameter;
                if y >= y_end {
                    break;
                }
                if let Some(&color) = palette.choose(rng) {
                    self.spawn(color, Vec2::new(x, y));
                }
                row += 1;
            }
            col += 1;
        }

        log::debug!(
            "Populated {}x{} board with {} marbles (r={})",
            self.size.x,
            self.size.y,
            self.marbles.len(),
            r
        );
    }

    /// Place a marble at `pos` (contained on the next step)
    pub fn spawn(&mut self, color: MarbleColor, pos: Vec2) -> MarbleId {
        let id = MarbleId(self.next_id);
        self.next_id += 1;
        self.marbles.push(Marble {
            id,
            color,
            body: Body::new(pos, self.radius),
        });
        id
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Contact passes per step (at least one)
    pub fn set_solver_iterations(&mut self, iterations: u32) {
        self.solver_iterations = iterations.max(1);
    }

    /// Store the gravity for the next step. Non-finite samples are dropped.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        if !gravity.is_finite() {
            log::warn!("Ignoring non-finite gravity sample {:?}", gravity);
            return;
        }
        self.gravity = gravity;
    }

    /// Advance all marbles by one tick
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }

        let gravity = self.gravity;
        for marble in &mut self.marbles {
            marble.body.integrate(gravity, dt);
        }

        // Containment runs inside every solver pass so stacks against a wall
        // converge, and once more at the end so it holds after every step.
        for _ in 0..self.solver_iterations {
            let touching = self.solve_contacts();
            self.contain_all();
            if !touching {
                break;
            }
        }
        self.contain_all();
    }

    /// One pass over every marble pair. Returns true if any pair touched.
    fn solve_contacts(&mut self) -> bool {
        let mut touching = false;
        for i in 0..self.marbles.len() {
            let (head, tail) = self.marbles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail {
                touching |= resolve_contact(&mut a.body, &mut b.body);
            }
        }
        touching
    }

    fn contain_all(&mut self) {
        let bounds = self.bounds;
        for marble in &mut self.marbles {
            bounds.contain(&mut marble.body);
        }
    }

    /// Remove marbles by id, returning them in board order. Unknown ids are ignored.
    pub fn remove(&mut self, ids: impl IntoIterator<Item = MarbleId>) -> Vec<Marble> {
        let ids: HashSet<MarbleId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<Marble>, Vec<Marble>) = std::mem::take(&mut self.marbles)
            .into_iter()
            .partition(|m| ids.contains(&m.id));
        self.marbles = kept;
        removed
    }

    pub fn get(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.marbles[i])
    }

    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    /// Fastest marble speed on the board
    pub fn max_speed(&self) -> f32 {
        self.marbles
            .iter()
            .map(|m| m.body.speed())
            .fold(0.0, f32::max)
    }

    /// True when no marble moves faster than `epsilon`
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.max_speed() <= epsilon
    }
}
