//! Score and combo bookkeeping
//!
//! Score only grows within a session. The high score is raised alongside it
//! and survives restarts; persisting it is the caller's job (see
//! `persistence::HighScoreStore`), signalled through `new_high_score`.

use serde::{Deserialize, Serialize};

use super::collision::LandingZone;
use crate::config::SimulationConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub high_score: u64,
    /// Consecutive Perfect landings
    pub combo: u32,
}

/// Points awarded for one landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingScore {
    pub zone: LandingZone,
    /// Zone-based points (base + perfect + combo bonus)
    pub points: u64,
    /// Extra points from a special platform (combo unaffected)
    pub special_bonus: u64,
    /// Combo count after this landing
    pub combo: u32,
    /// The high score was raised by this landing
    pub new_high_score: bool,
}

impl LandingScore {
    pub fn total(&self) -> u64 {
        self.points + self.special_bonus
    }
}

impl ScoreState {
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// Zero score and combo for a new session; high score is kept
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.combo = 0;
    }

    /// Apply a landing classification. `special` grants the special-platform bonus.
    pub fn record_landing(
        &mut self,
        zone: LandingZone,
        special: bool,
        config: &SimulationConfig,
    ) -> LandingScore {
        let points = match zone {
            LandingZone::Perfect => {
                self.combo += 1;
                config.base_score + config.perfect_bonus + config.combo_bonus(self.combo)
            }
            LandingZone::Safe | LandingZone::Edge => {
                self.combo = 0;
                config.base_score
            }
            LandingZone::Miss => {
                self.combo = 0;
                0
            }
        };
        let special_bonus = if special && zone.is_hit() {
            config.special_score_value
        } else {
            0
        };

        let new_high_score = self.add(points + special_bonus);
        LandingScore {
            zone,
            points,
            special_bonus,
            combo: self.combo,
            new_high_score,
        }
    }

    /// Terminal miss: combo breaks, score stands
    pub fn record_miss(&mut self) {
        self.combo = 0;
    }

    fn add(&mut self, points: u64) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    #[test]
    fn test_perfect_streak_escalates() {
        let c = config();
        let mut score = ScoreState::default();
        // base 1 + perfect 2 + table[combo]
        assert_eq!(score.record_landing(LandingZone::Perfect, false, &c).points, 3);
        assert_eq!(score.record_landing(LandingZone::Perfect, false, &c).points, 5);
        assert_eq!(score.record_landing(LandingZone::Perfect, false, &c).points, 7);
        assert_eq!(score.combo, 3);
        assert_eq!(score.score, 15);
    }

    #[test]
    fn test_non_perfect_resets_combo() {
        let c = config();
        let mut score = ScoreState::default();
        score.record_landing(LandingZone::Perfect, false, &c);
        score.record_landing(LandingZone::Perfect, false, &c);
        let result = score.record_landing(LandingZone::Edge, false, &c);
        assert_eq!(result.points, c.base_score);
        assert_eq!(result.combo, 0);

        score.record_landing(LandingZone::Perfect, false, &c);
        score.record_miss();
        assert_eq!(score.combo, 0);
    }

    #[test]
    fn test_special_bonus_is_additive() {
        let c = config();
        let mut score = ScoreState::default();
        score.record_landing(LandingZone::Perfect, false, &c);
        let result = score.record_landing(LandingZone::Perfect, true, &c);
        assert_eq!(result.special_bonus, c.special_score_value);
        assert_eq!(result.combo, 2);
        assert_eq!(result.total(), 5 + c.special_score_value);
    }

    #[test]
    fn test_high_score_tracks_and_survives_reset() {
        let c = config();
        let mut score = ScoreState::with_high_score(4);
        let first = score.record_landing(LandingZone::Perfect, false, &c);
        assert!(!first.new_high_score);
        let second = score.record_landing(LandingZone::Safe, false, &c);
        assert!(!second.new_high_score);
        assert_eq!(score.score, 4);
        assert!(score.record_landing(LandingZone::Safe, false, &c).new_high_score);
        assert_eq!(score.high_score, 5);

        score.reset_session();
        assert_eq!(score.score, 0);
        assert_eq!(score.combo, 0);
        assert_eq!(score.high_score, 5);
    }

    fn zone() -> impl Strategy<Value = LandingZone> {
        prop_oneof![
            Just(LandingZone::Perfect),
            Just(LandingZone::Safe),
            Just(LandingZone::Edge),
            Just(LandingZone::Miss),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_and_combo_rules(zones in prop::collection::vec((zone(), any::<bool>()), 0..64)) {
            let c = config();
            let mut score = ScoreState::default();
            for (zone, special) in zones {
                let before = score.clone();
                let result = score.record_landing(zone, special, &c);
                prop_assert!(score.score >= before.score);
                prop_assert!(score.high_score >= before.high_score);
                prop_assert!(score.high_score >= score.score);
                if zone == LandingZone::Perfect {
                    prop_assert_eq!(result.combo, before.combo + 1);
                } else {
                    prop_assert_eq!(result.combo, 0);
                }
            }
        }
    }
}
