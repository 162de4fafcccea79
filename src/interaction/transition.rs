use std::time::{Duration, Instant};

use tracing::trace;

/// Cubic ease-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Animated scalar used for the upper bound of the horizontal domain.
///
/// Evaluated against a monotonic clock on each frame. Retargeting mid-flight
/// starts the new interpolation from the value currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainTransition {
    from: f64,
    to: f64,
    started_at: Option<Instant>,
    duration: Duration,
}

impl DomainTransition {
    #[must_use]
    pub fn settled(value: f64, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            started_at: None,
            duration,
        }
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.duration
    }

    /// Interpolation progress in `[0, 1]`; `1` once settled.
    #[must_use]
    pub fn progress(self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn is_settled(self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    #[must_use]
    pub fn current(self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(progress)
    }

    /// Replaces the in-flight interpolation with one heading to `target`.
    pub fn retarget(&mut self, target: f64, now: Instant) {
        let from = self.current(now);
        trace!(from, target, "retarget domain transition");
        self.from = from;
        self.to = target;
        self.started_at = if from == target { None } else { Some(now) };
    }
}
