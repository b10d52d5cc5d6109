//! Jump physics
//!
//! A single parabolic jump primitive: charge time becomes launch power, power
//! becomes a launch velocity at a fixed angle, and gravity is integrated with
//! semi-implicit Euler. Screen space: +y is down, so launches have negative vy.

use glam::Vec2;

use crate::config::SimulationConfig;

/// Convert a charge duration (seconds) into launch power.
///
/// Negative or NaN durations clamp to `min_power`; the result always lies in
/// `[min_power, max_power]`.
pub fn charge_to_power(duration: f32, config: &SimulationConfig) -> f32 {
    let raw = duration * config.charge_rate * 100.0;
    if raw.is_nan() {
        return config.min_power;
    }
    raw.clamp(config.min_power, config.max_power)
}

/// Fraction of the power range covered by `power` (0 = min, 1 = max)
pub fn charge_percent(power: f32, config: &SimulationConfig) -> f32 {
    let span = config.max_power - config.min_power;
    if span <= 0.0 {
        return 1.0;
    }
    ((power - config.min_power) / span).clamp(0.0, 1.0)
}

/// Launch velocity for `power` toward `direction` (+1 right, -1 left)
pub fn launch_velocity(power: f32, direction: f32, config: &SimulationConfig) -> Vec2 {
    let angle = config.jump_angle();
    let direction = if direction < 0.0 { -1.0 } else { 1.0 };
    Vec2::new(power * angle.cos() * direction, -power * angle.sin())
}

/// Advance one airborne step: velocity first, then position
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, gravity: f32, dt: f32) {
    vel.y += gravity * dt;
    *pos += *vel * dt;
}

/// Advisory landing estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingPrediction {
    pub x: f32,
    pub time: f32,
    /// False when the target height is unreachable and the values are a guess
    pub exact: bool,
}

/// Time for a body starting at `start_y` with vertical velocity `vy` to reach `target_y`.
///
/// Solves `0.5·g·t² + vy·t + (start_y - target_y) = 0`. When the target is
/// unreachable (negative discriminant) a fixed 2 s fallback is returned. This is
/// for trajectory previews only; landing decisions come from collision checks.
pub fn predict_landing_time(start_y: f32, vy: f32, target_y: f32, gravity: f32) -> (f32, bool) {
    const FALLBACK_TIME: f32 = 2.0;

    let a = 0.5 * gravity;
    let b = vy;
    let c = start_y - target_y;

    if a == 0.0 {
        // Linear motion
        return if b != 0.0 && -c / b > 0.0 {
            (-c / b, true)
        } else {
            (FALLBACK_TIME, false)
        };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return (FALLBACK_TIME, false);
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b + sqrt_d) / (2.0 * a);
    let t2 = (-b - sqrt_d) / (2.0 * a);

    // Smaller positive root, else the larger one
    let time = if t1 > 0.0 && t2 > 0.0 { t1.min(t2) } else { t1.max(t2) };
    (time, true)
}

/// Predict where a jump from `start` with `power`/`direction` crosses `target_y`
pub fn predict_landing(
    start: Vec2,
    power: f32,
    direction: f32,
    target_y: f32,
    config: &SimulationConfig,
) -> LandingPrediction {
    let vel = launch_velocity(power, direction, config);
    let (time, exact) = predict_landing_time(start.y, vel.y, target_y, config.gravity);
    LandingPrediction {
        x: start.x + vel.x * time,
        time,
        exact,
    }
}
