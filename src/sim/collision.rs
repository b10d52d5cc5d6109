//! Landing classification
//!
//! While the player descends, the next few platforms in travel order are
//! checked against nested horizontal tolerance bands around each platform
//! center. Candidates are scanned earliest index first, and the first
//! non-miss wins, so a body overlapping two bands lands on the nearer one.

use serde::{Deserialize, Serialize};

use super::platform::{Platform, PlatformTrack};
use crate::config::SimulationConfig;

/// How many platforms from the origin are examined (origin included)
pub const LANDING_CANDIDATES: usize = 3;

/// Landing quality by horizontal offset from the platform center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingZone {
    /// `dx <= perfect_radius`
    Perfect,
    /// `perfect_radius < dx <= safe_radius`
    Safe,
    /// `safe_radius < dx <= half width`
    Edge,
    /// Off the platform
    Miss,
}

impl LandingZone {
    pub fn is_hit(self) -> bool {
        self != LandingZone::Miss
    }
}

/// Result of a single player/platform check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformContact {
    /// Player bottom is still above the platform top (beyond tolerance)
    NotReached,
    Reached { zone: LandingZone, dx: f32 },
    /// Player bottom is more than `fall_through_margin` below the top
    Passed,
}

/// Decision for one descending tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingOutcome {
    /// Still falling toward a valid target
    Pending,
    Landed { index: usize, zone: LandingZone, dx: f32 },
    /// Fell past the next platform: the life is over
    FellThrough,
}

/// Classify a horizontal offset against a platform of `half_width`.
///
/// Boundaries are inclusive on the inner band (`dx == perfect_radius` is Perfect).
pub fn classify_offset(dx: f32, half_width: f32, config: &SimulationConfig) -> LandingZone {
    if dx <= config.perfect_radius {
        LandingZone::Perfect
    } else if dx <= config.safe_radius {
        LandingZone::Safe
    } else if dx <= half_width {
        LandingZone::Edge
    } else {
        LandingZone::Miss
    }
}

/// Check the player's feet (`center_x`, `bottom`) against one platform.
///
/// Only the band `[top - landing_tolerance, top + fall_through_margin]` counts:
/// a body that drifts under a platform from the side is never lifted onto it.
pub fn check_platform(
    center_x: f32,
    bottom: f32,
    platform: &Platform,
    config: &SimulationConfig,
) -> PlatformContact {
    if bottom < platform.top() - config.landing_tolerance {
        return PlatformContact::NotReached;
    }
    if bottom > platform.top() + config.fall_through_margin {
        return PlatformContact::Passed;
    }
    let dx = (center_x - platform.center_x()).abs();
    PlatformContact::Reached {
        zone: classify_offset(dx, platform.half_width(), config),
        dx,
    }
}

/// Resolve a descending player's landing against the track.
///
/// `origin` is the index the jump started from; candidates are
/// `origin..origin + LANDING_CANDIDATES`. Only call while `vy > 0`.
pub fn resolve_landing(
    center_x: f32,
    bottom: f32,
    track: &PlatformTrack,
    origin: usize,
    config: &SimulationConfig,
) -> LandingOutcome {
    for index in origin..origin + LANDING_CANDIDATES {
        let Some(platform) = track.get(index) else {
            continue;
        };
        if let PlatformContact::Reached { zone, dx } = check_platform(center_x, bottom, platform, config) {
            if zone.is_hit() {
                return LandingOutcome::Landed { index, zone, dx };
            }
        }
    }

    let fell_past_next = track
        .get(origin + 1)
        .is_some_and(|next| bottom > next.top() + config.fall_through_margin);
    if fell_past_next {
        return LandingOutcome::FellThrough;
    }

    LandingOutcome::Pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::PlatformTrack;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    /// Track with platforms at x = 0, 100, 200, ... all at y = 500
    fn flat_track(c: &SimulationConfig) -> PlatformTrack {
        let c = SimulationConfig {
            distance_jitter: (0.0, 0.0),
            vertical_jitter: (0.0, 0.0),
            direction_flip_chance: 0.0,
            special_platform_chance: 0.0,
            ..c.clone()
        };
        let mut track = PlatformTrack::from_seed(&c, 1);
        track.reset(Vec2::new(0.0, 500.0), Pcg32::seed_from_u64(1), &c);
        track.ensure_ahead(4, &c);
        track
    }

    #[test]
    fn test_zones_nest_with_inclusive_boundaries() {
        let c = config();
        let half = c.platform_width / 2.0;
        assert_eq!(classify_offset(0.0, half, &c), LandingZone::Perfect);
        assert_eq!(classify_offset(c.perfect_radius, half, &c), LandingZone::Perfect);
        assert_eq!(classify_offset(c.perfect_radius + 0.01, half, &c), LandingZone::Safe);
        assert_eq!(classify_offset(c.safe_radius, half, &c), LandingZone::Safe);
        assert_eq!(classify_offset(c.safe_radius + 0.01, half, &c), LandingZone::Edge);
        assert_eq!(classify_offset(half, half, &c), LandingZone::Edge);
        assert_eq!(classify_offset(half + 0.01, half, &c), LandingZone::Miss);
    }

    #[test]
    fn test_not_reached_above_tolerance() {
        let c = config();
        let track = flat_track(&c);
        let p = track.get(1).unwrap();
        let above = p.top() - c.landing_tolerance - 1.0;
        assert_eq!(check_platform(p.center_x(), above, p, &c), PlatformContact::NotReached);

        let within = p.top() - c.landing_tolerance + 1.0;
        assert!(matches!(
            check_platform(p.center_x(), within, p, &c),
            PlatformContact::Reached { zone: LandingZone::Perfect, .. }
        ));
    }

    #[test]
    fn test_passed_below_fall_through_margin() {
        let c = config();
        let track = flat_track(&c);
        let p = track.get(1).unwrap();
        let deepest = p.top() + c.fall_through_margin;
        assert!(matches!(
            check_platform(p.center_x(), deepest, p, &c),
            PlatformContact::Reached { zone: LandingZone::Perfect, .. }
        ));
        assert_eq!(
            check_platform(p.center_x(), deepest + 1.0, p, &c),
            PlatformContact::Passed
        );
    }

    #[test]
    fn test_body_far_below_is_not_lifted_onto_platform() {
        let c = config();
        let track = flat_track(&c);
        let p1 = track.get(1).unwrap();
        // Directly under the center of #1, well past its band
        let outcome = resolve_landing(p1.center_x(), p1.top() + 1190.0, &track, 0, &c);
        assert_eq!(outcome, LandingOutcome::FellThrough);

        assert_eq!(
            check_platform(p1.center_x(), p1.top() + 1190.0, p1, &c),
            PlatformContact::Passed
        );
    }

    #[test]
    fn test_lands_on_next_platform() {
        let c = config();
        let track = flat_track(&c);
        let target = track.get(1).unwrap();
        let outcome = resolve_landing(target.center_x() + 20.0, target.top(), &track, 0, &c);
        assert_eq!(
            outcome,
            LandingOutcome::Landed { index: 1, zone: LandingZone::Safe, dx: 20.0 }
        );
    }

    #[test]
    fn test_nearer_platform_wins_tie() {
        let c = SimulationConfig {
            platform_width: 300.0,
            ..config()
        };
        let track = flat_track(&c);
        // Platforms overlap: center of #1 is within #2's band too
        let p1 = track.get(1).unwrap();
        let p2 = track.get(2).unwrap();
        let x = (p1.center_x() + p2.center_x()) / 2.0;
        match resolve_landing(x, p1.top(), &track, 1, &c) {
            LandingOutcome::Landed { index, .. } => assert_eq!(index, 1),
            other => panic!("expected landing, got {:?}", other),
        }
    }

    #[test]
    fn test_can_land_back_on_origin() {
        let c = config();
        let track = flat_track(&c);
        let origin = track.get(0).unwrap();
        let outcome = resolve_landing(origin.center_x() + 5.0, origin.top(), &track, 0, &c);
        assert!(matches!(outcome, LandingOutcome::Landed { index: 0, zone: LandingZone::Perfect, .. }));
    }

    #[test]
    fn test_gap_is_pending_then_fell_through() {
        let c = config();
        let track = flat_track(&c);
        let p0 = track.get(0).unwrap();
        let p1 = track.get(1).unwrap();
        // Clear of every candidate, just below the tops: a miss but not yet terminal
        let gap_x = p0.right().max(p1.right()) + 1000.0;
        assert_eq!(resolve_landing(gap_x, p1.top() + 5.0, &track, 0, &c), LandingOutcome::Pending);
        assert_eq!(
            resolve_landing(gap_x, p1.top() + c.fall_through_margin + 1.0, &track, 0, &c),
            LandingOutcome::FellThrough
        );
    }

    #[test]
    fn test_just_past_safe_radius_is_edge() {
        let c = config();
        let track = flat_track(&c);
        let p1 = track.get(1).unwrap();
        let outcome = resolve_landing(p1.center_x() - (c.safe_radius + 0.5), p1.top(), &track, 0, &c);
        assert!(matches!(outcome, LandingOutcome::Landed { index: 1, zone: LandingZone::Edge, .. }));
    }
}
