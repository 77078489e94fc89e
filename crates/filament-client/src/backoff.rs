//! Exponential backoff schedule for the reconnection policy.

use std::time::Duration;

use rand::Rng;

/// An exponential backoff schedule with jitter.
///
/// Each call to [`duration`](Self::duration) returns the delay for the
/// next attempt and advances the attempt counter. Pre-jitter delays grow
/// by `factor` per attempt and are capped at `max`; jitter spreads the
/// result by up to ±`jitter × delay` to desynchronize clients that
/// dropped at the same instant.
#[derive(Debug)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    factor: f64,
    jitter: f64,
    attempts: u32,
}

impl Backoff {
    /// Creates a schedule. `factor` is clamped to at least 1.0 and
    /// `jitter` to `0.0..=1.0`.
    pub fn new(min: Duration, max: Duration, factor: f64, jitter: f64) -> Self {
        Self {
            min,
            max: max.max(min),
            factor: factor.max(1.0),
            jitter: jitter.clamp(0.0, 1.0),
            attempts: 0,
        }
    }

    /// The delay before the next attempt. Advances the attempt counter.
    pub fn duration(&mut self) -> Duration {
        let base = self.min.as_secs_f64()
            * self.factor.powi(self.attempts.min(30) as i32);
        let capped = base.min(self.max.as_secs_f64());

        let jittered = if self.jitter > 0.0 {
            let spread = rand::rng().random_range(-1.0..=1.0_f64);
            capped * (1.0 + self.jitter * spread)
        } else {
            capped
        };

        self.attempts = self.attempts.saturating_add(1);

        Duration::from_secs_f64(
            jittered.clamp(self.min.as_secs_f64(), self.max.as_secs_f64()),
        )
    }

    /// Attempts taken since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Resets the schedule to its initial state.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}
