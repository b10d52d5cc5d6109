//! Player lifecycle
//!
//! IDLE -> CHARGING -> JUMPING -> LANDING -> IDLE, with JUMPING -> FALLING
//! ending the life. Calls that don't apply to the current state are no-ops.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics;
use super::platform::Platform;
use crate::config::SimulationConfig;

/// Player lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Standing on a platform, ready to charge
    #[default]
    Idle,
    /// Input held; power grows with hold time
    Charging,
    /// Airborne after release
    Jumping,
    /// Just touched down; returns to Idle after a short grace period
    Landing,
    /// Missed every platform. Terminal for this life.
    Falling,
}

/// The player body (top-left anchored, `size` in world units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub state: PlayerState,
    /// Session clock at which charging began
    pub charge_start_time: f64,
    /// Platform stood on; `None` while airborne
    pub current_platform: Option<usize>,
    /// Platform the last jump left from (landing scan origin)
    pub origin_platform: usize,
    /// Time spent in Landing
    pub landing_timer: f32,
    /// Power of the last launch
    pub last_power: f32,
}

impl Player {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::new(config.player_width, config.player_height),
            state: PlayerState::Idle,
            charge_start_time: 0.0,
            current_platform: None,
            origin_platform: 0,
            landing_timer: 0.0,
            last_power: 0.0,
        }
    }

    /// Reset in place for a new session
    pub fn reset(&mut self) {
        self.vel = Vec2::ZERO;
        self.state = PlayerState::Idle;
        self.charge_start_time = 0.0;
        self.current_platform = None;
        self.origin_platform = 0;
        self.landing_timer = 0.0;
        self.last_power = 0.0;
    }

    /// Stand centered on `platform` (travel index `index`)
    pub fn place_on(&mut self, index: usize, platform: &Platform) {
        self.pos = Vec2::new(
            platform.center_x() - self.size.x / 2.0,
            platform.top() - self.size.y,
        );
        self.vel = Vec2::ZERO;
        self.current_platform = Some(index);
        self.origin_platform = index;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.state, PlayerState::Jumping | PlayerState::Falling)
    }

    /// Moving downward (+y) while jumping
    pub fn is_descending(&self) -> bool {
        self.state == PlayerState::Jumping && self.vel.y > 0.0
    }

    /// IDLE -> CHARGING
    pub fn start_charge(&mut self, now: f64) -> bool {
        if self.state != PlayerState::Idle {
            return false;
        }
        self.state = PlayerState::Charging;
        self.charge_start_time = now;
        true
    }

    /// Seconds held so far (0 unless charging)
    pub fn charge_elapsed(&self, now: f64) -> f32 {
        if self.state == PlayerState::Charging {
            (now - self.charge_start_time).max(0.0) as f32
        } else {
            0.0
        }
    }

    /// CHARGING -> IDLE without launching
    pub fn cancel_charge(&mut self) -> bool {
        if self.state != PlayerState::Charging {
            return false;
        }
        self.state = PlayerState::Idle;
        true
    }

    /// CHARGING -> JUMPING. Returns the launch power if the jump fired.
    pub fn release(&mut self, elapsed: f32, direction: f32, config: &SimulationConfig) -> Option<f32> {
        if self.state != PlayerState::Charging {
            return None;
        }
        let power = physics::charge_to_power(elapsed, config);
        self.vel = physics::launch_velocity(power, direction, config);
        self.state = PlayerState::Jumping;
        self.last_power = power;
        if let Some(index) = self.current_platform.take() {
            self.origin_platform = index;
        }
        Some(power)
    }

    /// JUMPING -> LANDING on `platform`
    pub fn land(&mut self, index: usize, platform: &Platform) -> bool {
        if self.state != PlayerState::Jumping {
            return false;
        }
        self.place_on(index, platform);
        self.state = PlayerState::Landing;
        self.landing_timer = 0.0;
        true
    }

    /// JUMPING -> FALLING (keeps current velocity)
    pub fn fall(&mut self) -> bool {
        if self.state != PlayerState::Jumping {
            return false;
        }
        self.state = PlayerState::Falling;
        true
    }

    /// Per-tick update: airborne integration and the landing grace countdown
    pub fn update(&mut self, dt: f32, config: &SimulationConfig) {
        match self.state {
            PlayerState::Jumping | PlayerState::Falling => {
                physics::integrate(&mut self.pos, &mut self.vel, config.gravity, dt);
            }
            PlayerState::Landing => {
                self.landing_timer += dt;
                if self.landing_timer >= config.landing_grace {
                    self.state = PlayerState::Idle;
                }
            }
            PlayerState::Idle | PlayerState::Charging => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::PlatformPool;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    fn platform_at(pos: Vec2) -> Platform {
        let c = config();
        let mut pool = PlatformPool::with_capacity(1);
        let slot = pool.acquire(pos, &c);
        pool.get(slot).unwrap().clone()
    }

    fn idle_player() -> Player {
        let mut player = Player::new(&config());
        player.place_on(0, &platform_at(Vec2::new(100.0, 500.0)));
        player
    }

    #[test]
    fn test_place_on_centers_feet() {
        let player = idle_player();
        assert_eq!(player.center().x, 150.0);
        assert_eq!(player.bottom(), 500.0);
        assert_eq!(player.current_platform, Some(0));
    }

    #[test]
    fn test_full_cycle() {
        let c = config();
        let mut player = idle_player();

        assert!(player.start_charge(1.0));
        assert_eq!(player.state, PlayerState::Charging);
        assert!((player.charge_elapsed(1.5) - 0.5).abs() < 1e-6);

        let power = player.release(1.0, 1.0, &c).unwrap();
        assert_eq!(power, c.max_power);
        assert_eq!(player.state, PlayerState::Jumping);
        assert_eq!(player.current_platform, None);
        assert_eq!(player.origin_platform, 0);
        assert!(player.vel.y < 0.0);

        let target = platform_at(Vec2::new(300.0, 480.0));
        assert!(player.land(1, &target));
        assert_eq!(player.state, PlayerState::Landing);
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.current_platform, Some(1));

        // Grace period is counted in sim time
        player.update(c.landing_grace / 2.0, &c);
        assert_eq!(player.state, PlayerState::Landing);
        player.update(c.landing_grace, &c);
        assert_eq!(player.state, PlayerState::Idle);
    }

    #[test]
    fn test_illegal_transitions_are_noops() {
        let c = config();
        let mut player = idle_player();
        assert!(player.release(1.0, 1.0, &c).is_none());
        assert!(!player.fall());
        assert!(!player.land(3, &platform_at(Vec2::ZERO)));
        assert_eq!(player.state, PlayerState::Idle);

        player.start_charge(0.0);
        player.release(0.2, -1.0, &c);
        let before = player.charge_start_time;
        assert!(!player.start_charge(9.0));
        assert_eq!(player.charge_start_time, before);
        assert_eq!(player.state, PlayerState::Jumping);
    }

    #[test]
    fn test_cancel_charge_returns_to_idle_in_place() {
        let mut player = idle_player();
        let pos = player.pos;
        assert!(!player.cancel_charge());
        player.start_charge(1.0);
        assert!(player.cancel_charge());
        assert_eq!(player.state, PlayerState::Idle);
        assert_eq!(player.pos, pos);
        assert_eq!(player.current_platform, Some(0));
        assert_eq!(player.charge_elapsed(5.0), 0.0);
    }

    #[test]
    fn test_falling_keeps_integrating() {
        let c = config();
        let mut player = idle_player();
        player.start_charge(0.0);
        player.release(0.0, 1.0, &c);
        assert!(player.fall());
        let y = player.pos.y;
        for _ in 0..60 {
            player.update(1.0 / 60.0, &c);
        }
        assert!(player.pos.y > y);
        assert_eq!(player.state, PlayerState::Falling);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let c = config();
        let mut player = idle_player();
        player.start_charge(0.0);
        player.release(0.3, 1.0, &c);
        player.fall();
        player.reset();
        assert_eq!(player.state, PlayerState::Idle);
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.size, Vec2::new(c.player_width, c.player_height));
    }
}
