//! Animated transition between two tabs
//!
//! Lifecycle: created on select (start), advanced by host ticks, finished
//! when progress reaches 1 (end) or dropped early (cancel). The start time is
//! anchored by the first tick so the first frame always renders progress 0.

use std::time::{Duration, Instant};

pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    from: usize,
    to: usize,
    duration: Duration,
    started_at: Option<Instant>,
}

impl Transition {
    pub fn new(from: usize, to: usize, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            started_at: None,
        }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&mut self, now: Instant) -> f32 {
        let started_at = *self.started_at.get_or_insert(now);
        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_anchors_start() {
        let mut transition = Transition::new(0, 1, Duration::from_millis(200));
        assert!(!transition.is_started());

        let t0 = Instant::now();
        assert_eq!(transition.progress(t0), 0.0);
        assert!(transition.is_started());
        assert!((transition.progress(t0 + Duration::from_millis(50)) - 0.25).abs() < 1e-4);
        assert_eq!(transition.progress(t0 + Duration::from_millis(400)), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut transition = Transition::new(2, 0, Duration::ZERO);
        assert_eq!(transition.progress(Instant::now()), 1.0);
        assert_eq!((transition.from(), transition.to()), (2, 0));
    }
}
