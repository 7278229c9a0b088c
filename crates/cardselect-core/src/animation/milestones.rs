#![forbid(unsafe_code)]

//! Lifecycle events for a running animation.
//!
//! [`Milestones`] wraps any [`Animation`] and queues [`Milestone`] events as
//! it is ticked. The owner drains them after each tick and treats
//! [`Milestone::Finished`] as the edge that ends the animation's phase, which
//! keeps completion handling inside the owner's own state machine instead of
//! in a stored closure.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use cardselect_core::animation::{Fade, Milestone, Milestones};
//!
//! let mut anim = Milestones::new(Fade::new(Duration::from_millis(500)))
//!     .on_start()
//!     .on_finish();
//!
//! anim.tick(Duration::from_millis(600));
//! for event in anim.drain() {
//!     match event {
//!         Milestone::Started => { /* ... */ }
//!         Milestone::Finished => { /* commit */ }
//!         Milestone::Interrupted => {}
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! 1. `Started` fires at most once per play-through (on the first tick).
//! 2. `Finished` fires at most once, when `is_complete()` turns true.
//! 3. After [`interrupt`](Milestones::interrupt), ticks are ignored and
//!    `Finished` never fires; `Interrupted` fires exactly once.
//! 4. `drain()` clears the queue; events are not replayed.
//! 5. `reset()` clears all tracking state, including an interruption.

use std::time::Duration;

use super::Animation;

/// An event emitted by a [`Milestones`]-wrapped animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// The animation received its first tick.
    Started,
    /// The animation ran to completion.
    Finished,
    /// The animation was stopped before completing.
    Interrupted,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tracking {
    started: bool,
    finished: bool,
    interrupted: bool,
}

/// An animation wrapper that reports lifecycle milestones.
#[derive(Debug, Clone)]
pub struct Milestones<A> {
    inner: A,
    report_start: bool,
    report_finish: bool,
    tracking: Tracking,
    events: Vec<Milestone>,
}

impl<A: Animation> Milestones<A> {
    /// Wrap an animation. No events are reported until enabled.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            report_start: false,
            report_finish: false,
            tracking: Tracking::default(),
            events: Vec::new(),
        }
    }

    /// Report [`Milestone::Started`] (builder pattern).
    #[must_use]
    pub fn on_start(mut self) -> Self {
        self.report_start = true;
        self
    }

    /// Report [`Milestone::Finished`] (builder pattern).
    #[must_use]
    pub fn on_finish(mut self) -> Self {
        self.report_finish = true;
        self
    }

    /// Access the inner animation.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Whether [`interrupt`](Self::interrupt) has been called.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.tracking.interrupted
    }

    /// Stop the animation where it is. Returns `false` if it had already
    /// finished or been interrupted.
    pub fn interrupt(&mut self) -> bool {
        if self.tracking.finished || self.tracking.interrupted {
            return false;
        }
        self.tracking.interrupted = true;
        self.events.push(Milestone::Interrupted);
        true
    }

    /// Drain all pending events.
    pub fn drain(&mut self) -> Vec<Milestone> {
        std::mem::take(&mut self.events)
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl<A: Animation> Animation for Milestones<A> {
    fn tick(&mut self, dt: Duration) {
        if self.tracking.interrupted {
            return;
        }
        self.inner.tick(dt);

        if !self.tracking.started {
            self.tracking.started = true;
            if self.report_start {
                self.events.push(Milestone::Started);
            }
        }
        if !self.tracking.finished && self.inner.is_complete() {
            self.tracking.finished = true;
            if self.report_finish {
                self.events.push(Milestone::Finished);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        self.inner.value()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.tracking = Tracking::default();
        self.events.clear();
    }

    fn overshoot(&self) -> Duration {
        self.inner.overshoot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Fade;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_250: Duration = Duration::from_millis(250);
    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn nothing_reported_by_default() {
        let mut anim = Milestones::new(Fade::new(MS_100));
        anim.tick(MS_500);
        assert!(anim.drain().is_empty());
    }

    #[test]
    fn started_then_finished() {
        let mut anim = Milestones::new(Fade::new(MS_500)).on_start().on_finish();
        anim.tick(MS_250);
        assert_eq!(anim.drain(), vec![Milestone::Started]);
        anim.tick(MS_250);
        assert_eq!(anim.drain(), vec![Milestone::Finished]);
        anim.tick(MS_250);
        assert!(anim.drain().is_empty());
    }

    #[test]
    fn single_tick_reports_both_in_order() {
        let mut anim = Milestones::new(Fade::new(MS_100)).on_start().on_finish();
        anim.tick(MS_500);
        assert_eq!(anim.drain(), vec![Milestone::Started, Milestone::Finished]);
    }

    #[test]
    fn interrupt_suppresses_finish() {
        let mut anim = Milestones::new(Fade::new(MS_500)).on_finish();
        anim.tick(MS_100);
        assert!(anim.interrupt());
        anim.tick(MS_500);
        assert_eq!(anim.drain(), vec![Milestone::Interrupted]);
        assert!(!anim.is_complete());
        assert!(anim.is_interrupted());
    }

    #[test]
    fn interrupt_after_finish_is_rejected() {
        let mut anim = Milestones::new(Fade::new(MS_100)).on_finish();
        anim.tick(MS_100);
        assert!(!anim.interrupt());
        assert_eq!(anim.drain(), vec![Milestone::Finished]);
    }

    #[test]
    fn interrupt_is_reported_once() {
        let mut anim = Milestones::new(Fade::new(MS_500));
        assert!(anim.interrupt());
        assert!(!anim.interrupt());
        assert_eq!(anim.pending(), 1);
    }

    #[test]
    fn reset_clears_interruption() {
        let mut anim = Milestones::new(Fade::new(MS_100)).on_finish();
        anim.interrupt();
        anim.reset();
        assert!(!anim.is_interrupted());
        anim.tick(MS_100);
        assert_eq!(anim.drain(), vec![Milestone::Finished]);
    }

    #[test]
    fn value_delegates() {
        let mut anim = Milestones::new(Fade::new(MS_500));
        anim.tick(MS_250);
        assert!((anim.value() - 0.5).abs() < 0.02);
        assert!((anim.inner().raw_progress() - 0.5).abs() < 0.02);
    }
}
