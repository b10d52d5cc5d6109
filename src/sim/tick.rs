//! Per-tick simulation pipeline
//!
//! One call advances the session by `dt`:
//! input -> player update -> landing resolution (while descending) -> score ->
//! platform lookahead/recycling -> camera.

use serde::{Deserialize, Serialize};

use super::collision::{self, LandingOutcome, LandingZone};
use super::player::PlayerState;
use super::state::{GameState, SessionPhase};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Touch/press began this tick
    pub press: bool,
    /// Touch/press ended this tick
    pub release: bool,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { session: u64 },
    ChargeStarted,
    Jumped { power: f32, direction: f32, charge: f32 },
    Landed { index: usize, zone: LandingZone, dx: f32, points: u64, combo: u32 },
    SpecialBonus { index: usize, points: u64 },
    Fell { from: usize },
    NewHighScore { score: u64 },
    GameOver { score: u64, high_score: u64 },
}

/// Advance the session by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.config.max_frame_dt)
    } else {
        0.0
    };
    state.clock += f64::from(dt);
    state.time_ticks += 1;

    handle_input(state, input, &mut events);

    if state.phase == SessionPhase::Ready {
        return events;
    }

    // GAMEOVER keeps the falling body moving for the renderer
    state.player.update(dt, &state.config);

    if state.phase == SessionPhase::Playing {
        resolve_landing(state, &mut events);
    }
    if state.phase == SessionPhase::Playing {
        maintain_platforms(state);
    }

    update_camera(state);
    events
}

fn handle_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    match state.phase {
        // The starting press never doubles as a charge
        SessionPhase::Ready => {
            if input.press && state.start_session() {
                events.push(GameEvent::SessionStarted {
                    session: state.session_index,
                });
            }
        }
        SessionPhase::GameOver => {
            if input.press && state.restart() {
                events.push(GameEvent::SessionStarted {
                    session: state.session_index,
                });
            }
        }
        SessionPhase::Playing => {
            if input.press && state.player.start_charge(state.clock) {
                events.push(GameEvent::ChargeStarted);
            }
            if input.release && state.player.state == PlayerState::Charging {
                let charge = state.player.charge_elapsed(state.clock);
                let direction = state.track.direction_from(state.anchor_index());
                if let Some(power) = state.player.release(charge, direction, &state.config) {
                    log::debug!(
                        "Jump from #{}: charge {:.3}s, power {:.0}, direction {:+}",
                        state.player.origin_platform,
                        charge,
                        power,
                        direction
                    );
                    events.push(GameEvent::Jumped {
                        power,
                        direction,
                        charge,
                    });
                }
            }
        }
    }
}

fn resolve_landing(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let outcome = if state.player.is_descending() {
        collision::resolve_landing(
            state.player.center().x,
            state.player.bottom(),
            &state.track,
            state.player.origin_platform,
            &state.config,
        )
    } else {
        LandingOutcome::Pending
    };

    match outcome {
        LandingOutcome::Landed { index, zone, dx } => land(state, index, zone, dx, events),
        LandingOutcome::FellThrough => end_life(state, events),
        LandingOutcome::Pending => {
            // Backstop for trajectories that never cross the next platform
            if state.player.state == PlayerState::Jumping
                && state.player.pos.y > state.camera.visible_bottom()
            {
                log::debug!("Player left the view at y {:.0}", state.player.pos.y);
                end_life(state, events);
            }
        }
    }
}

fn land(
    state: &mut GameState,
    index: usize,
    zone: LandingZone,
    dx: f32,
    events: &mut Vec<GameEvent>,
) {
    let Some(platform) = state.track.get_mut(index) else {
        return;
    };
    let special = platform.is_special() && !platform.triggered;
    if special {
        platform.triggered = true;
    }
    let platform = platform.clone();

    state.player.land(index, &platform);
    let result = state.score.record_landing(zone, special, &state.config);
    log::debug!(
        "Landed on #{} ({:?}, dx {:.1}): +{} (combo {}, score {})",
        index,
        zone,
        dx,
        result.total(),
        result.combo,
        state.score.score
    );

    events.push(GameEvent::Landed {
        index,
        zone,
        dx,
        points: result.points,
        combo: result.combo,
    });
    if result.special_bonus > 0 {
        events.push(GameEvent::SpecialBonus {
            index,
            points: result.special_bonus,
        });
    }
    if result.new_high_score {
        events.push(GameEvent::NewHighScore {
            score: state.score.high_score,
        });
        state.persist_high_score();
    }
}

fn end_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let from = state.player.origin_platform;
    if state.end_life() {
        events.push(GameEvent::Fell { from });
        events.push(GameEvent::GameOver {
            score: state.score.score,
            high_score: state.score.high_score,
        });
    }
}

fn maintain_platforms(state: &mut GameState) {
    let anchor = state.anchor_index();
    state.track.update_difficulty(state.score.score, &state.config);
    state.track.ensure_ahead(anchor, &state.config);
    state.track.recycle(
        state.camera.visible_left(),
        state.camera.visible_right(),
        anchor,
        &state.config,
    );
}

fn update_camera(state: &mut GameState) {
    match state.player.state {
        PlayerState::Falling => state.camera.freeze(),
        // Target holds once the body sinks under the next platform
        PlayerState::Jumping if below_next_platform(state) => {}
        _ => state.camera.set_target(state.player.center()),
    }
    state.camera.update();
}

fn below_next_platform(state: &GameState) -> bool {
    state
        .track
        .get(state.player.origin_platform + 1)
        .is_some_and(|next| state.player.bottom() > next.top())
}
