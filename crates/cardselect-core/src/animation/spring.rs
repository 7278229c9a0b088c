#![forbid(unsafe_code)]

//! Damped spring progress.
//!
//! [`Spring`] models a unit mass released toward its target with a given
//! damping ratio and initial velocity, tuned so that the oscillation envelope
//! has decayed to 0.1% of the travel distance when `duration` has elapsed.
//! At that point the animation completes and its value snaps to exactly 1.0.
//!
//! The initial velocity is expressed in travel distances per second: `1.0`
//! means the spring would cover the whole distance in one second if it kept
//! its starting speed.
//!
//! # Invariants
//!
//! 1. `raw_value()` is 0.0 before the first tick and exactly 1.0 once complete.
//! 2. `value()` is `raw_value()` clamped to [0.0, 1.0].
//! 3. Damping ratios at or above 1.0 use the critically damped solution.
//!
//! # Failure Modes
//!
//! - Non-finite damping: treated as 1.0 (critically damped).
//! - Non-positive or tiny damping: raised to a small positive ratio.
//! - Non-finite velocity: treated as 0.0.

use std::time::Duration;

use super::{Animation, nonzero, progress};

/// Remaining envelope at completion is `exp(-SETTLE_LN)`, i.e. 0.1%.
const SETTLE_LN: f32 = 6.907_755;

/// Smallest damping ratio accepted; anything lower would never settle.
const MIN_DAMPING: f32 = 0.05;

/// Spring-driven progress from 0.0 to 1.0 over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    elapsed: Duration,
    duration: Duration,
    damping: f32,
    initial_velocity: f32,
    /// Natural angular frequency, derived from `damping` and `duration`.
    omega: f32,
}

impl Spring {
    /// Create a spring that settles within `duration`.
    pub fn new(duration: Duration, damping: f32, initial_velocity: f32) -> Self {
        let duration = nonzero(duration);
        let damping = if damping.is_finite() {
            damping.clamp(MIN_DAMPING, 1.0)
        } else {
            1.0
        };
        let initial_velocity = if initial_velocity.is_finite() {
            initial_velocity
        } else {
            0.0
        };
        let omega = SETTLE_LN / (damping * duration.as_secs_f32());
        Self {
            elapsed: Duration::ZERO,
            duration,
            damping,
            initial_velocity,
            omega,
        }
    }

    /// Effective damping ratio after clamping.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear time progress, in [0.0, 1.0].
    pub fn time_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    /// Unclamped spring position. May briefly exceed 1.0 for underdamped
    /// springs; use this for positions so the overshoot is visible.
    pub fn raw_value(&self) -> f32 {
        if self.elapsed >= self.duration {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f32();
        let zeta = self.damping;
        let w0 = self.omega;
        let v0 = self.initial_velocity;

        // Remaining displacement x(t) with x(0) = 1, x'(0) = -v0.
        let remaining = if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            envelope * ((wd * t).cos() + ((zeta * w0 - v0) / wd) * (wd * t).sin())
        } else {
            (-w0 * t).exp() * (1.0 + (w0 - v0) * t)
        };
        1.0 - remaining
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        self.raw_value().clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_5: Duration = Duration::from_millis(5);
    const MS_800: Duration = Duration::from_millis(800);

    #[test]
    fn starts_at_zero() {
        let spring = Spring::new(MS_800, 0.8, 0.9);
        assert!(spring.raw_value().abs() < 1e-6);
        assert!(!spring.is_complete());
    }

    #[test]
    fn lands_exactly_on_one() {
        let mut spring = Spring::new(MS_800, 0.8, 0.9);
        spring.tick(MS_800);
        assert!(spring.is_complete());
        assert_eq!(spring.raw_value(), 1.0);
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn close_to_target_just_before_completion() {
        let mut spring = Spring::new(MS_800, 0.8, 0.9);
        spring.tick(Duration::from_millis(795));
        assert!((spring.raw_value() - 1.0).abs() < 0.01);
    }

    #[test]
    fn light_damping_overshoots() {
        let mut spring = Spring::new(Duration::from_secs(1), 0.2, 0.0);
        let mut peak = 0.0f32;
        for _ in 0..60 {
            spring.tick(MS_5);
            peak = peak.max(spring.raw_value());
            assert!(spring.value() <= 1.0);
        }
        assert!(peak > 1.0, "expected overshoot, peak = {peak}");
    }

    #[test]
    fn critical_damping_without_velocity_is_monotonic() {
        let mut spring = Spring::new(MS_800, 1.0, 0.0);
        let mut prev = 0.0f32;
        while !spring.is_complete() {
            spring.tick(MS_5);
            let v = spring.raw_value();
            assert!(v >= prev - 1e-5, "regressed from {prev} to {v}");
            prev = v;
        }
    }

    #[test]
    fn initial_velocity_speeds_up_the_start() {
        let mut slow = Spring::new(MS_800, 0.8, 0.0);
        let mut fast = Spring::new(MS_800, 0.8, 5.0);
        slow.tick(Duration::from_millis(20));
        fast.tick(Duration::from_millis(20));
        assert!(fast.raw_value() > slow.raw_value());
    }

    #[test]
    fn damping_is_clamped() {
        assert_eq!(Spring::new(MS_800, 3.0, 0.0).damping(), 1.0);
        assert_eq!(Spring::new(MS_800, -1.0, 0.0).damping(), MIN_DAMPING);
        assert_eq!(Spring::new(MS_800, f32::NAN, 0.0).damping(), 1.0);
        assert_eq!(Spring::new(MS_800, f32::INFINITY, 0.0).damping(), 1.0);
        assert_eq!(Spring::new(MS_800, 0.0, 0.0).damping(), MIN_DAMPING);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut spring = Spring::new(MS_800, 0.8, 0.9);
        spring.tick(MS_800);
        spring.reset();
        assert!(!spring.is_complete());
        assert!(spring.raw_value().abs() < 1e-6);
    }
}
