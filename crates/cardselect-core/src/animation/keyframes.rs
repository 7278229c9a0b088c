#![forbid(unsafe_code)]

//! Piecewise-linear offset tracks.
//!
//! A [`Keyframes`] track maps relative time (0.0–1.0 of its duration) to an
//! offset value. Between keys the offset is linearly interpolated; after the
//! last key it holds the last value. The track always starts with an implicit
//! key `(0.0, 0.0)`.
//!
//! ```ignore
//! let mut nudge = Keyframes::new(Duration::from_millis(400))
//!     .key(0.5, 12.0)
//!     .key(1.0, 0.0);
//! nudge.tick(Duration::from_millis(200));
//! assert_eq!(nudge.offset(), 12.0);
//! ```

use std::time::Duration;

use super::{Animation, lerp, nonzero, progress};

/// An offset track sampled by relative time.
#[derive(Debug, Clone)]
pub struct Keyframes {
    /// `(relative_time, offset)`, sorted by time.
    keys: Vec<(f32, f32)>,
    elapsed: Duration,
    duration: Duration,
}

impl Keyframes {
    /// Create an empty track (constant 0.0) over `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            keys: vec![(0.0, 0.0)],
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
        }
    }

    /// Horizontal shake: out by `amplitude`, back, out by `-amplitude`, back,
    /// with each leg taking an eighth of `duration`. The second half of the
    /// duration holds still.
    #[must_use]
    pub fn shake(amplitude: f32, duration: Duration) -> Self {
        Self::new(duration)
            .key(0.125, amplitude)
            .key(0.25, 0.0)
            .key(0.375, -amplitude)
            .key(0.5, 0.0)
    }

    /// Add a key at relative time `at` (clamped to [0.0, 1.0]).
    ///
    /// Keys at an identical time keep insertion order; the later one wins
    /// once that time has passed. Non-finite inputs are ignored.
    #[must_use]
    pub fn key(mut self, at: f32, offset: f32) -> Self {
        if !at.is_finite() || !offset.is_finite() {
            return self;
        }
        let at = at.clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|&(t, _)| t <= at);
        self.keys.insert(idx, (at, offset));
        self
    }

    /// Number of keys, including the implicit starting key.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a track has at least its starting key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Offset at the current time.
    pub fn offset(&self) -> f32 {
        let t = progress(self.elapsed, self.duration);
        let idx = self.keys.partition_point(|&(at, _)| at <= t);
        if idx == 0 {
            return self.keys[0].1;
        }
        let (t0, v0) = self.keys[idx - 1];
        match self.keys.get(idx) {
            Some(&(t1, v1)) if t1 > t0 => lerp(v0, v1, (t - t0) / (t1 - t0)),
            _ => v0,
        }
    }
}

impl Animation for Keyframes {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        progress(self.elapsed, self.duration)
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

    const MS_500: Duration = Duration::from_millis(500);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn empty_track_is_constant_zero() {
        let mut track = Keyframes::new(MS_500);
        assert_eq!(track.len(), 1);
        track.tick(Duration::from_millis(250));
        assert!(close(track.offset(), 0.0));
    }

    #[test]
    fn interpolates_between_keys() {
        let mut track = Keyframes::new(Duration::from_millis(400)).key(0.5, 12.0);
        track.tick(Duration::from_millis(100));
        assert!(close(track.offset(), 6.0));
        track.tick(Duration::from_millis(100));
        assert!(close(track.offset(), 12.0));
    }

    #[test]
    fn holds_last_value_after_final_key() {
        let mut track = Keyframes::new(Duration::from_millis(400)).key(0.5, 12.0);
        track.tick(Duration::from_millis(350));
        assert!(close(track.offset(), 12.0));
    }

    #[test]
    fn keys_are_sorted_on_insert() {
        let mut track = Keyframes::new(Duration::from_millis(100))
            .key(1.0, 4.0)
            .key(0.5, 2.0);
        track.tick(Duration::from_millis(75));
        assert!(close(track.offset(), 3.0));
    }

    #[test]
    fn shake_path() {
        let mut shake = Keyframes::shake(10.0, MS_500);
        let samples: Vec<f32> = (0..8)
            .map(|_| {
                shake.tick(Duration::from_micros(62_500));
                shake.offset()
            })
            .collect();
        // 62.5ms steps land on the 1/8 boundaries.
        assert!(close(samples[0], 10.0));
        assert!(close(samples[1], 0.0));
        assert!(close(samples[2], -10.0));
        assert!(close(samples[3], 0.0));
        assert!(samples[4..].iter().all(|&v| close(v, 0.0)));
        assert!(shake.is_complete());
    }

    #[test]
    fn non_finite_keys_are_ignored() {
        let track = Keyframes::new(MS_500).key(f32::NAN, 1.0).key(0.5, f32::INFINITY);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn value_reports_time_progress() {
        let mut track = Keyframes::shake(10.0, MS_500);
        track.tick(Duration::from_millis(250));
        assert!(close(track.value(), 0.5));
    }
}
