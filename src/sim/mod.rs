//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (travel index)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod platform;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{LandingOutcome, LandingZone, PlatformContact, classify_offset, resolve_landing};
pub use physics::{LandingPrediction, charge_percent, charge_to_power, launch_velocity, predict_landing};
pub use platform::{Platform, PlatformKind, PlatformPool, PlatformTrack, SlotId};
pub use player::{Player, PlayerState};
pub use score::{LandingScore, ScoreState};
pub use state::{ChargeInfo, GameState, RngState, SessionPhase};
pub use tick::{GameEvent, TickInput, tick};
