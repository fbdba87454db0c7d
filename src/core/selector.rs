//! Round Selector: draws the next target emoji

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{EmojiCode, EMOJI_CATALOG};

/// Uniform draw, with replacement, from the emoji catalog
#[derive(Debug, Clone)]
pub struct RoundSelector {
    rng: StdRng,
}

impl RoundSelector {
    /// Selector seeded from OS entropy
    pub fn new_random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic selector
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, random otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new_random(),
        }
    }

    /// Pick the next target: `floor(uniform(0,1) * catalog length)`
    pub fn pick_target(&mut self) -> EmojiCode {
        let u: f64 = self.rng.gen();
        let index = ((u * EMOJI_CATALOG.len() as f64) as usize).min(EMOJI_CATALOG.len() - 1);
        EMOJI_CATALOG[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_come_from_catalog() {
        let mut selector = RoundSelector::new_random();
        for _ in 0..200 {
            assert!(selector.pick_target().in_catalog());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RoundSelector::seeded(42);
        let mut b = RoundSelector::seeded(42);
        let seq_a: Vec<EmojiCode> = (0..20).map(|_| a.pick_target()).collect();
        let seq_b: Vec<EmojiCode> = (0..20).map(|_| b.pick_target()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_every_entry_reachable() {
        let mut selector = RoundSelector::seeded(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(selector.pick_target());
        }
        assert_eq!(seen.len(), EMOJI_CATALOG.len());
    }
}
