//! Simulated player for demos and soak tests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{ClassificationResult, EmojiCode, FeaturePoint, GameState, EMOJI_CATALOG};

/// Resting expression
pub const NEUTRAL_FACE: EmojiCode = EmojiCode(128528);

/// Face that reacts to each new target after a random delay.
///
/// Delays are drawn up to `max_reaction_frames`; with the default round
/// budget, long delays lose the round.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    rng: StdRng,
    max_reaction_frames: u32,
    current_target: Option<EmojiCode>,
    frames_until_match: u32,
    /// Chance per frame of a stray expression while matching
    flicker: f64,
}

impl SimulatedPlayer {
    pub fn new(seed: u64, max_reaction_frames: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_reaction_frames: max_reaction_frames.max(1),
            current_target: None,
            frames_until_match: 0,
            flicker: 0.05,
        }
    }

    /// Face for the next frame given what the screen shows
    pub fn next_face(&mut self, state: GameState, target: Option<EmojiCode>) -> ClassificationResult {
        if state != GameState::Mimic {
            return face(NEUTRAL_FACE);
        }
        if target != self.current_target {
            self.current_target = target;
            self.frames_until_match = self.rng.gen_range(0..self.max_reaction_frames);
        }
        if self.frames_until_match > 0 {
            self.frames_until_match -= 1;
            return face(NEUTRAL_FACE);
        }
        match target {
            Some(_) if self.rng.gen_bool(self.flicker) => {
                let stray = EMOJI_CATALOG[self.rng.gen_range(0..EMOJI_CATALOG.len())];
                face(stray)
            }
            Some(code) => face(code),
            None => face(NEUTRAL_FACE),
        }
    }
}

/// A face with a small fixed landmark box
fn face(code: EmojiCode) -> ClassificationResult {
    let points = vec![
        FeaturePoint::new(260.0, 180.0),
        FeaturePoint::new(380.0, 180.0),
        FeaturePoint::new(320.0, 260.0),
        FeaturePoint::new(320.0, 330.0),
    ];
    ClassificationResult::new(code.to_string(), points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_outside_mimic() {
        let mut player = SimulatedPlayer::new(1, 10);
        let result = player.next_face(GameState::GetReady, None);
        assert_eq!(result.dominant_code(), NEUTRAL_FACE);
    }

    #[test]
    fn test_eventually_shows_target() {
        let mut player = SimulatedPlayer::new(9, 10);
        let target = Some(EmojiCode(128561));
        let hits = (0..40)
            .filter(|_| player.next_face(GameState::Mimic, target).dominant_code() == EmojiCode(128561))
            .count();
        assert!(hits > 20, "only {} hits", hits);
    }
}
