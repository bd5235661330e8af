//! Match resolution
//!
//! Two marbles are adjacent when they share a color and the squared distance
//! between their centers is below `diameter² * proximity_multiplier`. A match
//! is the connected component containing the tapped marble.
//!
//! The search reads the board as it is at call time, so it must not run in
//! the middle of a physics step.

use std::collections::HashSet;

use glam::Vec2;

use super::board::{Board, MarbleId};
use crate::consts::PROXIMITY_MULTIPLIER;

/// Ids collected by one resolution pass (unordered)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: HashSet<MarbleId>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: MarbleId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = MarbleId> + '_ {
        self.ids.iter().copied()
    }

    /// Members in ascending id order
    pub fn sorted(&self) -> Vec<MarbleId> {
        let mut ids: Vec<_> = self.iter().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    fn insert(&mut self, id: MarbleId) -> bool {
        self.ids.insert(id)
    }
}

/// Proximity-based flood fill over same-colored marbles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResolver {
    pub proximity_multiplier: f32,
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self {
            proximity_multiplier: PROXIMITY_MULTIPLIER,
        }
    }
}

impl MatchResolver {
    pub fn new(proximity_multiplier: f32) -> Self {
        Self {
            proximity_multiplier,
        }
    }

    /// Squared-distance cutoff for marbles of `radius`
    pub fn threshold_sq(&self, radius: f32) -> f32 {
        let diameter = radius * 2.0;
        diameter * diameter * self.proximity_multiplier
    }

    /// Fill `out` with the component containing `seed`.
    ///
    /// `out` is cleared first. An unknown seed leaves it empty; a seed with no
    /// same-colored neighbor yields just the seed.
    pub fn resolve(&self, board: &Board, seed: MarbleId, out: &mut MatchSet) {
        out.clear();
        let Some(seed_marble) = board.get(seed) else {
            return;
        };

        let color = seed_marble.color();
        let threshold = self.threshold_sq(board.radius());

        // Same-colored marbles not yet reached
        let mut pending: Vec<(MarbleId, Vec2)> = board
            .marbles()
            .iter()
            .filter(|m| m.color() == color && m.id() != seed)
            .map(|m| (m.id(), m.position()))
            .collect();

        out.insert(seed);
        let mut stack = vec![seed_marble.position()];

        while let Some(center) = stack.pop() {
            let mut i = 0;
            while i < pending.len() {
                if (pending[i].1 - center).length_squared() < threshold {
                    let (id, pos) = pending.swap_remove(i);
                    out.insert(id);
                    stack.push(pos);
                } else {
                    i += 1;
                }
            }
        }
    }

    /// Partition every live marble into maximal same-colored components.
    ///
    /// Groups come out ordered by their lowest marble id.
    pub fn groups(&self, board: &Board) -> Vec<MatchSet> {
        let mut assigned: HashSet<MarbleId> = HashSet::with_capacity(board.len());
        let mut groups = Vec::new();

        for marble in board.marbles() {
            if assigned.contains(&marble.id()) {
                continue;
            }
            let mut group = MatchSet::new();
            self.resolve(board, marble.id(), &mut group);
            assigned.extend(group.iter());
            groups.push(group);
        }

        groups
    }

    /// True if tapping some marble would clear at least `min_size` marbles
    pub fn has_match(&self, board: &Board, min_size: usize) -> bool {
        self.groups(board).iter().any(|g| g.len() >= min_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HEADER_HEIGHT;
    use crate::sim::MarbleColor;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_board() -> Board {
        Board::new(Vec2::new(400.0, 600.0), 25.0, HEADER_HEIGHT)
    }

    #[test]
    fn test_threshold_matches_default_multiplier() {
        let resolver = MatchResolver::default();
        assert!((resolver.threshold_sq(25.0) - 5250.0).abs() < 1e-2);
    }

    #[test]
    fn test_two_close_reds_match_far_red_excluded() {
        let mut board = empty_board();
        let a = board.spawn(MarbleColor::Red, Vec2::new(50.0, 50.0));
        let b = board.spawn(MarbleColor::Red, Vec2::new(70.0, 50.0));
        let far = board.spawn(MarbleColor::Red, Vec2::new(500.0, 500.0));
        let resolver = MatchResolver::default();

        let mut set = MatchSet::new();
        resolver.resolve(&board, a, &mut set);
        assert_eq!(set.sorted(), vec![a, b]);

        resolver.resolve(&board, b, &mut set);
        assert_eq!(set.len(), 2);
        assert!(!set.contains(far));

        // Resolution never moves anything
        assert_eq!(board.get(far).unwrap().position(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_lone_marble_yields_itself() {
        let mut board = empty_board();
        let lone = board.spawn(MarbleColor::Blue, Vec2::new(100.0, 200.0));
        // Touching, but a different color
        board.spawn(MarbleColor::Green, Vec2::new(150.0, 200.0));
        let mut set = MatchSet::new();
        MatchResolver::default().resolve(&board, lone, &mut set);
        assert_eq!(set.sorted(), vec![lone]);
    }

    #[test]
    fn test_unknown_seed_is_empty_and_clears_previous() {
        let mut board = empty_board();
        let a = board.spawn(MarbleColor::Red, Vec2::new(50.0, 50.0));
        board.spawn(MarbleColor::Red, Vec2::new(90.0, 50.0));
        let resolver = MatchResolver::default();

        let mut set = MatchSet::new();
        resolver.resolve(&board, a, &mut set);
        assert_eq!(set.len(), 2);

        resolver.resolve(&board, MarbleId(4242), &mut set);
        assert!(set.is_empty());
    }

    #[test]
    fn test_chain_is_transitive_and_stops_at_gap() {
        let mut board = empty_board();
        // Reds in a row one diameter apart, then a full empty cell
        let chain: Vec<_> = (0..4)
            .map(|i| board.spawn(MarbleColor::Red, Vec2::new(25.0 + 50.0 * i as f32, 300.0)))
            .collect();
        let beyond_gap = board.spawn(MarbleColor::Red, Vec2::new(325.0, 300.0));

        let mut set = MatchSet::new();
        MatchResolver::default().resolve(&board, chain[3], &mut set);
        assert_eq!(set.sorted(), chain);
        assert!(!set.contains(beyond_gap));
    }

    #[test]
    fn test_diagonal_neighbors_are_adjacent() {
        let mut board = empty_board();
        let a = board.spawn(MarbleColor::Yellow, Vec2::new(100.0, 200.0));
        // sqrt(2) diameters away: 5000 < 5250
        let b = board.spawn(MarbleColor::Yellow, Vec2::new(150.0, 250.0));
        let mut set = MatchSet::new();
        MatchResolver::default().resolve(&board, a, &mut set);
        assert!(set.contains(b));
    }

    #[test]
    fn test_other_colors_do_not_bridge() {
        let mut board = empty_board();
        let left = board.spawn(MarbleColor::Red, Vec2::new(100.0, 200.0));
        board.spawn(MarbleColor::Blue, Vec2::new(150.0, 200.0));
        let right = board.spawn(MarbleColor::Red, Vec2::new(200.0, 200.0));
        let mut set = MatchSet::new();
        MatchResolver::default().resolve(&board, left, &mut set);
        assert!(!set.contains(right));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_single_color_board_is_one_group() {
        let mut rng = Pcg32::seed_from_u64(11);
        let board = Board::populate(
            Vec2::new(400.0, 600.0),
            25.0,
            HEADER_HEIGHT,
            &[MarbleColor::Purple],
            &mut rng,
        );
        let resolver = MatchResolver::default();
        let mut set = MatchSet::new();
        resolver.resolve(&board, board.marbles()[17].id(), &mut set);
        assert_eq!(set.len(), board.len());

        let groups = resolver.groups(&board);
        assert_eq!(groups.len(), 1);
        assert!(resolver.has_match(&board, 2));
    }

    #[test]
    fn test_groups_partition_board() {
        let mut board = empty_board();
        let a = board.spawn(MarbleColor::Red, Vec2::new(50.0, 150.0));
        let b = board.spawn(MarbleColor::Blue, Vec2::new(100.0, 150.0));
        let c = board.spawn(MarbleColor::Red, Vec2::new(50.0, 200.0));
        let d = board.spawn(MarbleColor::Green, Vec2::new(300.0, 500.0));

        let resolver = MatchResolver::default();
        let groups = resolver.groups(&board);
        let sorted: Vec<_> = groups.iter().map(|g| g.sorted()).collect();
        assert_eq!(sorted, vec![vec![a, c], vec![b], vec![d]]);
        assert!(resolver.has_match(&board, 2));
        assert!(!resolver.has_match(&board, 3));
    }

    /// Fixed-point expansion used as a reference for the flood fill
    fn reference_component(board: &Board, seed: MarbleId, threshold: f32) -> Vec<MarbleId> {
        let color = board.get(seed).unwrap().color();
        let mut members = vec![seed];
        loop {
            let mut grew = false;
            for m in board.marbles() {
                if m.color() != color || members.contains(&m.id()) {
                    continue;
                }
                let near = members.iter().any(|&id| {
                    (board.get(id).unwrap().position() - m.position()).length_squared() < threshold
                });
                if near {
                    members.push(m.id());
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
        members.sort_unstable();
        members
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_match_is_maximal_component(
            marbles in prop::collection::vec((0.0f32..350.0, 100.0f32..600.0, 0usize..3), 1..40),
            seed_index in any::<prop::sample::Index>(),
        ) {
            let palette = [MarbleColor::Red, MarbleColor::Blue, MarbleColor::Green];
            let mut board = empty_board();
            let ids: Vec<_> = marbles
                .iter()
                .map(|&(x, y, c)| board.spawn(palette[c], Vec2::new(x, y)))
                .collect();
            let seed = ids[seed_index.index(ids.len())];

            let resolver = MatchResolver::default();
            let mut set = MatchSet::new();
            resolver.resolve(&board, seed, &mut set);

            let seed_color = board.get(seed).unwrap().color();
            for id in set.iter() {
                prop_assert_eq!(board.get(id).unwrap().color(), seed_color);
            }
            prop_assert_eq!(set.sorted(), reference_component(&board, seed, resolver.threshold_sq(25.0)));
        }
    }
}
