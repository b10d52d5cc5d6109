//! Host input folding
//!
//! Touch/mouse callbacks arrive between frames. The queue records them and
//! hands the simulation one [`TickInput`] per tick. Order is kept: a release
//! followed by a new press in the same frame becomes a release now and a press
//! next tick, never a zero-length charge.

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::TickInput;

/// Raw input from the host, in simulation (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    TouchStart { x: f32, y: f32 },
    TouchEnd,
}

#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    /// A touch is currently down
    held: bool,
    last_touch: Option<Vec2>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether a touch is down after the events drained so far
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Where the most recent touch began
    pub fn last_touch(&self) -> Option<Vec2> {
        self.last_touch
    }

    /// Fold queued events into the next tick's input
    pub fn next_tick(&mut self) -> TickInput {
        let mut input = TickInput::default();
        while let Some(&event) = self.pending.front() {
            match event {
                InputEvent::TouchStart { x, y } => {
                    if input.release {
                        // Leave it for the next tick
                        break;
                    }
                    if !self.held {
                        self.held = true;
                        input.press = true;
                        self.last_touch = Some(Vec2::new(x, y));
                    }
                }
                InputEvent::TouchEnd => {
                    if self.held {
                        self.held = false;
                        input.release = true;
                    }
                }
            }
            self.pending.pop_front();
        }
        input
    }

    /// Drop queued events and any held touch (used when the loop pauses)
    pub fn clear(&mut self) {
        self.pending.clear();
        self.held = false;
    }
}
