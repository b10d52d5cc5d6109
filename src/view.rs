//! Read-only frame snapshots for renderers
//!
//! Renderers never see `GameState`. Each frame they get a [`FrameSnapshot`]
//! built from the [`Positioned`] / [`Renderable`] capabilities of the
//! simulation's plain data types.

use glam::Vec2;
use serde::Serialize;

use crate::lerp;
use crate::sim::{ChargeInfo, GameState, Platform, PlatformKind, Player, PlayerState, SessionPhase};

/// Player height scale at full squash while charging
pub const PLAYER_CHARGE_SCALE_Y: f32 = 0.7;
/// Seconds of charge to reach full player squash
pub const PLAYER_SQUASH_TIME: f32 = 1.5;
/// Platform height lost at full charge
pub const PLATFORM_MAX_SQUASH: f32 = 0.3;

/// Something with an axis-aligned world rectangle (top-left anchored)
pub trait Positioned {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn center(&self) -> Vec2 {
        self.position() + self.size() / 2.0
    }
}

/// What a renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Sprite {
    Player { state: PlayerState },
    Platform { kind: PlatformKind, depth: f32 },
}

/// Something a renderer can draw
pub trait Renderable: Positioned {
    fn sprite(&self) -> Sprite;

    fn is_visible(&self) -> bool {
        true
    }
}

impl Positioned for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

impl Renderable for Player {
    fn sprite(&self) -> Sprite {
        Sprite::Player { state: self.state }
    }
}

impl Positioned for Platform {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Renderable for Platform {
    fn sprite(&self) -> Sprite {
        Sprite::Platform {
            kind: self.kind,
            depth: self.depth,
        }
    }

    fn is_visible(&self) -> bool {
        self.active
    }
}

/// One drawable entity in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub sprite: Sprite,
    /// Top-left corner in screen space
    pub screen_pos: Vec2,
    pub size: Vec2,
    /// Vertical squash (1 = none), anchored at the bottom edge
    pub scale_y: f32,
}

/// Immutable per-frame view of the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    pub player: SpriteView,
    /// Visible platforms in travel order
    pub platforms: Vec<SpriteView>,
    pub camera_position: Vec2,
    pub view_size: Vec2,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub charge: Option<ChargeInfo>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let camera = &state.camera;
        let charge = state.charge_info();

        let player_squash = charge.map_or(1.0, |c| {
            lerp(1.0, PLAYER_CHARGE_SCALE_Y, (c.duration / PLAYER_SQUASH_TIME).min(1.0))
        });
        let platform_squash =
            charge.map_or(1.0, |c| lerp(1.0, 1.0 - PLATFORM_MAX_SQUASH, c.percent));
        let standing_on = state.player.current_platform;

        let platforms = state
            .track
            .iter()
            .filter(|(_, p)| p.is_visible() && camera.is_in_view(p.position(), p.size()))
            .map(|(index, p)| SpriteView {
                sprite: p.sprite(),
                screen_pos: camera.world_to_screen(p.position()),
                size: p.size(),
                scale_y: if standing_on == Some(index) { platform_squash } else { 1.0 },
            })
            .collect();

        Self {
            phase: state.phase,
            player: SpriteView {
                sprite: state.player.sprite(),
                screen_pos: camera.world_to_screen(state.player.position()),
                size: state.player.size(),
                scale_y: player_squash,
            },
            platforms,
            camera_position: camera.position,
            view_size: camera.view,
            score: state.score.score,
            high_score: state.score.high_score,
            combo: state.score.combo,
            charge,
        }
    }
}

/// Frame consumer. Implementations must not reach back into the simulation.
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot);
}

/// Renderer that discards frames
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameSnapshot) {}
}
