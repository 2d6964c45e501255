//! Types shared by every game loop

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; only a start action leaves this phase
    GameOver,
}

/// Score counter. Only grows between resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Seeded RNG used by every game state
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Wrap a grid coordinate onto `[0, size)` (toroidal topology).
/// Sizes below one are treated as a single cell.
#[inline]
pub fn wrap_cell(value: i32, size: i32) -> i32 {
    value.rem_euclid(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_on_degenerate_grid() {
        assert_eq!(wrap_cell(7, 0), 0);
        assert_eq!(wrap_cell(-3, -5), 0);
        assert_eq!(wrap_cell(-1, 30), 29);
    }
    use proptest::prelude::*;

    #[test]
    fn test_score_reset_is_zero() {
        let mut score = Score::default();
        score.add(10);
        score.add(200);
        assert_eq!(score.value(), 210);
        score.reset();
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn test_wrap_cell_edges() {
        assert_eq!(wrap_cell(-1, 30), 29);
        assert_eq!(wrap_cell(30, 30), 0);
        assert_eq!(wrap_cell(15, 30), 15);
    }

    proptest! {
        #[test]
        fn wrap_cell_stays_in_bounds(value in -1000i32..1000, size in 1i32..64) {
            let wrapped = wrap_cell(value, size);
            prop_assert!((0..size).contains(&wrapped));
        }

        #[test]
        fn score_never_decreases(points in proptest::collection::vec(0u64..1000, 0..50)) {
            let mut score = Score::default();
            for p in points {
                let before = score.value();
                score.add(p);
                prop_assert!(score.value() >= before);
            }
        }
    }
}
