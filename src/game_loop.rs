//! Host frame scheduling
//!
//! The host calls [`GameLoop::frame`] from its frame callback (requestAnimationFrame
//! on the web, a timer natively). Each frame runs one simulation tick with a
//! clamped delta time and then hands a snapshot to the renderer.

use crate::config::SimulationConfig;
use crate::input::InputQueue;
use crate::sim::{GameEvent, GameState, tick};
use crate::view::{FrameSnapshot, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopStatus {
    #[default]
    Stopped,
    Running,
    /// App backgrounded; no ticks are scheduled
    Paused,
}

#[derive(Debug, Clone)]
pub struct GameLoop {
    status: LoopStatus,
    /// Host timestamp (seconds) of the previous frame
    last_time: f64,
    max_dt: f32,
    frames: u64,
}

impl GameLoop {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            status: LoopStatus::Stopped,
            last_time: 0.0,
            max_dt: config.max_frame_dt,
            frames: 0,
        }
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }

    /// Frames ticked since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self, now: f64) -> bool {
        if self.status != LoopStatus::Stopped {
            return false;
        }
        self.status = LoopStatus::Running;
        self.last_time = now;
        log::info!("Game loop started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != LoopStatus::Running {
            return false;
        }
        self.status = LoopStatus::Paused;
        log::info!("Game loop paused");
        true
    }

    /// Pause for backgrounding: drops held input and cancels a charge in progress
    pub fn suspend(&mut self, state: &mut GameState, input: &mut InputQueue) -> bool {
        if !self.pause() {
            return false;
        }
        input.clear();
        if state.player.cancel_charge() {
            log::debug!("Charge cancelled on pause");
        }
        true
    }

    /// Resume and re-base the clock so the gap while paused is not simulated
    pub fn resume(&mut self, now: f64) -> bool {
        if self.status != LoopStatus::Paused {
            return false;
        }
        self.status = LoopStatus::Running;
        self.last_time = now;
        log::info!("Game loop resumed");
        true
    }

    pub fn stop(&mut self) -> bool {
        if self.status == LoopStatus::Stopped {
            return false;
        }
        self.status = LoopStatus::Stopped;
        log::info!("Game loop stopped after {} frames", self.frames);
        true
    }

    /// Clamped delta since the previous frame, advancing the frame clock
    fn next_dt(&mut self, now: f64) -> f32 {
        let elapsed = (now - self.last_time).max(0.0) as f32;
        self.last_time = now;
        if elapsed > self.max_dt {
            log::trace!("Clamping frame dt {:.3}s to {:.3}s", elapsed, self.max_dt);
        }
        elapsed.min(self.max_dt)
    }

    /// Run one frame: tick then render. Returns `None` unless running.
    pub fn frame(
        &mut self,
        now: f64,
        state: &mut GameState,
        input: &mut InputQueue,
        renderer: &mut dyn Renderer,
    ) -> Option<Vec<GameEvent>> {
        if !self.is_running() {
            return None;
        }
        let dt = self.next_dt(now);
        let events = tick(state, &input.next_tick(), dt);
        renderer.render(&FrameSnapshot::capture(state));
        self.frames += 1;
        Some(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::sim::SessionPhase;

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<FrameSnapshot>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, frame: &FrameSnapshot) {
            self.frames.push(frame.clone());
        }
    }

    fn setup() -> (GameLoop, GameState, InputQueue, CountingRenderer) {
        let config = SimulationConfig::default();
        (
            GameLoop::new(&config),
            GameState::with_config(config),
            InputQueue::new(),
            CountingRenderer::default(),
        )
    }

    #[test]
    fn test_control_surface_transitions() {
        let mut game_loop = GameLoop::new(&SimulationConfig::default());
        assert!(!game_loop.pause());
        assert!(!game_loop.resume(0.0));
        assert!(game_loop.start(0.0));
        assert!(!game_loop.start(0.0));
        assert!(game_loop.pause());
        assert_eq!(game_loop.status(), LoopStatus::Paused);
        assert!(game_loop.resume(1.0));
        assert!(game_loop.stop());
        assert!(!game_loop.stop());
        assert_eq!(game_loop.status(), LoopStatus::Stopped);
    }

    #[test]
    fn test_frames_tick_and_render() {
        let (mut game_loop, mut state, mut input, mut renderer) = setup();
        assert!(game_loop.frame(0.0, &mut state, &mut input, &mut renderer).is_none());

        game_loop.start(10.0);
        input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
        let events = game_loop
            .frame(10.016, &mut state, &mut input, &mut renderer)
            .unwrap();
        assert!(matches!(events[..], [GameEvent::SessionStarted { .. }]));
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].phase, SessionPhase::Playing);
        assert_eq!(game_loop.frames(), 1);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let (mut game_loop, mut state, mut input, mut renderer) = setup();
        game_loop.start(0.0);
        game_loop.frame(30.0, &mut state, &mut input, &mut renderer);
        assert!((state.clock - f64::from(state.config.max_frame_dt)).abs() < 1e-9);
    }

    #[test]
    fn test_resume_rebases_clock() {
        let (mut game_loop, mut state, mut input, mut renderer) = setup();
        game_loop.start(0.0);
        game_loop.frame(0.01, &mut state, &mut input, &mut renderer);
        let clock = state.clock;

        game_loop.pause();
        assert!(game_loop.frame(5.0, &mut state, &mut input, &mut renderer).is_none());
        assert_eq!(state.clock, clock);

        game_loop.resume(100.0);
        game_loop.frame(100.004, &mut state, &mut input, &mut renderer);
        let step = state.clock - clock;
        assert!(step > 0.0 && step < 0.01);
    }

    #[test]
    fn test_suspend_cancels_charge() {
        use crate::sim::PlayerState;

        let (mut game_loop, mut state, mut input, mut renderer) = setup();
        game_loop.start(0.0);
        input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
        input.push(InputEvent::TouchEnd);
        game_loop.frame(0.016, &mut state, &mut input, &mut renderer);
        input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
        game_loop.frame(0.032, &mut state, &mut input, &mut renderer);
        assert_eq!(state.player.state, PlayerState::Charging);

        assert!(game_loop.suspend(&mut state, &mut input));
        assert_eq!(state.player.state, PlayerState::Idle);
        assert!(!input.is_held());
        assert!(!game_loop.suspend(&mut state, &mut input));

        // The finger lifts after resuming: nothing fires, and the next press charges again
        game_loop.resume(10.0);
        input.push(InputEvent::TouchEnd);
        let events = game_loop
            .frame(10.016, &mut state, &mut input, &mut renderer)
            .unwrap();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Jumped { .. })));
        assert_eq!(state.player.state, PlayerState::Idle);

        input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
        let events = game_loop
            .frame(10.032, &mut state, &mut input, &mut renderer)
            .unwrap();
        assert_eq!(events, vec![GameEvent::ChargeStarted]);
    }

    #[test]
    fn test_clock_going_backwards_is_zero_dt() {
        let (mut game_loop, mut state, mut input, mut renderer) = setup();
        game_loop.start(5.0);
        game_loop.frame(4.0, &mut state, &mut input, &mut renderer);
        assert_eq!(state.clock, 0.0);
    }
}
