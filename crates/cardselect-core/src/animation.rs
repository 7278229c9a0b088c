#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f32` progress values
//! (0.0 to 1.0). Nothing here owns a clock: the caller advances every animation
//! with [`Animation::tick`] and reads the result back, which keeps transition
//! logic deterministic under test.
//!
//! - [`Fade`]: eased linear progress over a fixed duration.
//! - [`Spring`]: damped spring progress that settles within a fixed duration.
//! - [`Keyframes`]: a piecewise-linear offset track (used for the shake nudge).
//! - [`Milestones`]: wraps any animation and queues lifecycle events.

pub mod keyframes;
pub mod milestones;
pub mod spring;

use std::time::Duration;

pub use keyframes::Keyframes;
pub use milestones::{Milestone, Milestones};
pub use spring::Spring;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Maps time progress in [0, 1] to eased progress in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// No easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out: the crossfade curve.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

/// Linear interpolation between `from` and `to`. `t` is not clamped, so
/// overshooting curves carry through to the result.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Clamp a zero duration to one nanosecond so progress math never divides
/// by zero.
#[inline]
pub(crate) fn nonzero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

/// Elapsed / duration, clamped to [0.0, 1.0].
#[inline]
pub(crate) fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// Something that moves from 0.0 to 1.0 as the owner feeds it frame time.
pub trait Animation {
    /// Add `dt` of elapsed time.
    fn tick(&mut self, dt: Duration);

    /// Whether the end has been reached.
    fn is_complete(&self) -> bool;

    /// Progress in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Rewind to the start.
    fn reset(&mut self);

    /// How far past the end the accumulated time runs.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn tick(&mut self, dt: Duration) {
        (**self).tick(dt);
    }

    fn is_complete(&self) -> bool {
        (**self).is_complete()
    }

    fn value(&self) -> f32 {
        (**self).value()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn overshoot(&self) -> Duration {
        (**self).overshoot()
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Eased progress over a fixed duration; drives crossfades.
///
/// Elapsed time accumulates as a [`Duration`], so many small frame ticks add
/// up exactly.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Linear fade over `duration`. A zero duration completes on the first
    /// tick.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
            easing: linear,
        }
    }

    /// Use `easing` (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time progress before easing.
    pub fn raw_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
