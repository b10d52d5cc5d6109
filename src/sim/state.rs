//! Session state and the READY / PLAYING / GAMEOVER phase machine
//!
//! Everything a session mutates lives in one [`GameState`] that is passed by
//! reference into the tick. Nothing is process-global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::physics;
use super::platform::PlatformTrack;
use super::player::{Player, PlayerState};
use super::score::ScoreState;
use crate::config::{ConfigError, SimulationConfig};
use crate::persistence::HighScoreStore;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// World laid out, waiting for the first press
    #[default]
    Ready,
    Playing,
    /// Life over; the next press restarts
    GameOver,
}

/// Seed material for one session's platform stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Session index; each restart gets its own stream
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Charge meter readout for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeInfo {
    /// Seconds held
    pub duration: f32,
    pub power: f32,
    /// Power normalized into [0, 1]
    pub percent: f32,
}

/// Complete session-scoped simulation state
#[derive(Debug)]
pub struct GameState {
    pub config: SimulationConfig,
    pub phase: SessionPhase,
    pub track: PlatformTrack,
    pub player: Player,
    pub camera: Camera,
    pub score: ScoreState,
    /// Simulation clock (seconds since construction)
    pub clock: f64,
    /// Ticks processed since construction
    pub time_ticks: u64,
    /// Sessions started before the current one
    pub session_index: u64,
    pub rng_state: RngState,
    high_scores: HighScoreStore,
}

impl GameState {
    /// Build a READY world. The stored high score is loaded once here.
    ///
    /// An invalid config is logged and replaced by the defaults (keeping its
    /// seed); use [`GameState::try_new`] to refuse it instead.
    pub fn new(config: SimulationConfig, high_scores: HighScoreStore) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::error!("{}; falling back to the default config", e);
                SimulationConfig {
                    seed: config.seed,
                    ..SimulationConfig::default()
                }
            }
        };
        Self::build(config, high_scores)
    }

    /// Like [`GameState::new`] but rejects an invalid config
    pub fn try_new(
        config: SimulationConfig,
        high_scores: HighScoreStore,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, high_scores))
    }

    fn build(config: SimulationConfig, high_scores: HighScoreStore) -> Self {
        let high_score = high_scores.load();
        let rng_state = RngState::new(config.seed, 0);
        let mut state = Self {
            track: PlatformTrack::new(&config, rng_state.to_rng()),
            player: Player::new(&config),
            camera: Camera::new(&config),
            score: ScoreState::with_high_score(high_score),
            phase: SessionPhase::Ready,
            clock: 0.0,
            time_ticks: 0,
            session_index: 0,
            rng_state,
            high_scores,
            config,
        };
        state.lay_out_world();
        state
    }

    /// State with a volatile high score store
    pub fn with_config(config: SimulationConfig) -> Self {
        Self::new(config, HighScoreStore::in_memory())
    }

    /// Top-left of the opening platform
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(
            self.config.view_width / 2.0 - self.config.platform_width / 2.0,
            self.config.view_height / 2.0,
        )
    }

    /// Clear and regenerate platforms, reset the player, re-center the camera
    fn lay_out_world(&mut self) {
        self.rng_state = RngState::new(self.config.seed, self.session_index);
        let start = self.start_position();
        self.track.reset(start, self.rng_state.to_rng(), &self.config);

        self.player.reset();
        let origin = self.track.first_index();
        if let Some(platform) = self.track.get(origin) {
            self.player.place_on(origin, platform);
        }
        self.camera.snap_to(self.player.center());
        self.score.reset_session();
    }

    /// READY -> PLAYING. The world is already fresh from construction.
    pub fn start_session(&mut self) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.phase = SessionPhase::Playing;
        log::info!("Session {} started (seed {:#x})", self.session_index, self.config.seed);
        true
    }

    /// GAMEOVER -> PLAYING with all per-session state rebuilt
    pub fn restart(&mut self) -> bool {
        if self.phase != SessionPhase::GameOver {
            return false;
        }
        self.session_index += 1;
        self.lay_out_world();
        self.phase = SessionPhase::Playing;
        log::info!(
            "Session {} started (high score {})",
            self.session_index,
            self.score.high_score
        );
        true
    }

    /// PLAYING -> GAMEOVER: the player falls and the camera stops following
    pub fn end_life(&mut self) -> bool {
        if self.phase != SessionPhase::Playing || !self.player.fall() {
            return false;
        }
        self.score.record_miss();
        self.camera.freeze();
        self.phase = SessionPhase::GameOver;
        log::info!(
            "Game over: score {} (high score {})",
            self.score.score,
            self.score.high_score
        );
        true
    }

    /// Write the current high score through to the store (failures are logged)
    pub fn persist_high_score(&mut self) -> bool {
        self.high_scores.save(self.score.high_score)
    }

    /// Platform the player stands on, or the one the current jump left from
    pub fn anchor_index(&self) -> usize {
        self.player
            .current_platform
            .unwrap_or(self.player.origin_platform)
    }

    /// Current charge, if the player is charging
    pub fn charge_info(&self) -> Option<ChargeInfo> {
        if self.player.state != PlayerState::Charging {
            return None;
        }
        let duration = self.player.charge_elapsed(self.clock);
        let power = physics::charge_to_power(duration, &self.config);
        Some(ChargeInfo {
            duration,
            power,
            percent: physics::charge_percent(power, &self.config),
        })
    }
}
