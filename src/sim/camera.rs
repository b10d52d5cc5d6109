//! Follow camera
//!
//! `position` is the world point at the center of the view. It eases toward
//! `target` by a fixed fraction every tick. Derived state only: nothing in the
//! simulation reads the camera except recycling and the out-of-bounds check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    pub target: Vec2,
    /// Fraction of the remaining distance covered per tick
    pub smoothing: f32,
    /// Added to the followed point's y
    pub offset_y: f32,
    pub view: Vec2,
    /// Target no longer follows the player
    pub frozen: bool,
}

impl Camera {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing: config.camera_smoothing,
            offset_y: config.camera_offset_y,
            view: Vec2::new(config.view_width, config.view_height),
            frozen: false,
        }
    }

    /// Jump straight to `focus` (re-centering on restart)
    pub fn snap_to(&mut self, focus: Vec2) {
        self.position = focus + Vec2::new(0.0, self.offset_y);
        self.target = self.position;
        self.frozen = false;
    }

    /// Follow `focus` unless frozen
    pub fn set_target(&mut self, focus: Vec2) {
        if !self.frozen {
            self.target = focus + Vec2::new(0.0, self.offset_y);
        }
    }

    /// Stop following; the target keeps its last value
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn update(&mut self) {
        self.position = self.position.lerp(self.target, self.smoothing);
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position + self.view / 2.0
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position - self.view / 2.0
    }

    /// Whether a rect (top-left `pos`, `size`) overlaps the view
    pub fn is_in_view(&self, pos: Vec2, size: Vec2) -> bool {
        let screen = self.world_to_screen(pos);
        screen.x + size.x > 0.0
            && screen.x < self.view.x
            && screen.y + size.y > 0.0
            && screen.y < self.view.y
    }

    /// World x of the left edge of the view
    pub fn visible_left(&self) -> f32 {
        self.position.x - self.view.x / 2.0
    }

    /// World x of the right edge of the view
    pub fn visible_right(&self) -> f32 {
        self.position.x + self.view.x / 2.0
    }

    /// World y of the bottom edge of the view
    pub fn visible_bottom(&self) -> f32 {
        self.position.y + self.view.y / 2.0
    }
}
