//! Backoff policy: decides how long to wait between publish attempts.

use std::time::Duration;

/// Exponential backoff configuration.
///
/// A policy is cheap to clone and immutable; per-message retry state lives in
/// [`BackoffExecution`], created via [`BackoffPolicy::start`].
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Wait after the first failed attempt.
    pub initial_interval: Duration,

    /// Growth factor applied after each wait.
    pub multiplier: f64,

    /// Upper bound on any single wait.
    pub max_interval: Duration,
}

impl Default for BackoffPolicy {
    /// Defaults: 2s initial, x1.5 growth, capped at 30s.
    ///
    /// Sequence: 2000, 3000, 4500, 6750, 10125, ... ms, then 30000 forever.
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(2000),
            multiplier: 1.5,
            max_interval: Duration::from_millis(30_000),
        }
    }
}

impl BackoffPolicy {
    /// Begin a fresh retry sequence.
    ///
    /// Each message gets its own execution; sharing one across messages would
    /// leak accumulated delay from one retry sequence into the next.
    ///
    /// A multiplier below 1 (or non-finite) would make the sequence decrease;
    /// such values are treated as 1, turning the policy into flat backoff.
    pub fn start(&self) -> BackoffExecution {
        let multiplier = if self.multiplier.is_finite() && self.multiplier >= 1.0 {
            self.multiplier
        } else {
            1.0
        };

        BackoffExecution {
            current_interval: self.initial_interval.min(self.max_interval),
            multiplier,
            max_interval: self.max_interval,
            attempts: 0,
        }
    }
}

/// Mutable state for one retry sequence.
///
/// Discarded when the sequence ends (success or exhaustion).
#[derive(Debug)]
pub struct BackoffExecution {
    current_interval: Duration,
    multiplier: f64,
    max_interval: Duration,
    attempts: u32,
}

impl BackoffExecution {
    /// Return the next wait duration and advance the state.
    ///
    /// The returned sequence is non-decreasing and never exceeds the
    /// configured maximum.
    pub fn next_interval(&mut self) -> Duration {
        let interval = self.current_interval;
        self.attempts += 1;

        // Compare in seconds so a large multiplier saturates at the cap
        // instead of overflowing Duration arithmetic.
        let next_secs = self.current_interval.as_secs_f64() * self.multiplier;
        self.current_interval = if next_secs >= self.max_interval.as_secs_f64() {
            self.max_interval
        } else {
            Duration::from_secs_f64(next_secs)
        };

        interval
    }

    /// Number of intervals handed out so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_policy_matches_documented_values() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.initial_interval, Duration::from_millis(2000));
        assert_eq!(policy.multiplier, 1.5);
        assert_eq!(policy.max_interval, Duration::from_millis(30_000));
    }

    #[test]
    fn default_sequence_grows_then_caps() {
        let mut exec = BackoffPolicy::default().start();
        assert_eq!(exec.next_interval(), Duration::from_millis(2000));
        assert_eq!(exec.next_interval(), Duration::from_millis(3000));
        assert_eq!(exec.next_interval(), Duration::from_millis(4500));
        assert_eq!(exec.next_interval(), Duration::from_millis(6750));

        // Run it far past the cap.
        let mut last = Duration::ZERO;
        for _ in 0..20 {
            last = exec.next_interval();
        }
        assert_eq!(last, Duration::from_millis(30_000));
        assert_eq!(exec.attempts(), 24);
    }

    #[rstest]
    #[case(Duration::from_millis(100), 2.0, Duration::from_millis(800))]
    #[case(Duration::from_millis(50), 3.0, Duration::from_secs(10))]
    #[case(Duration::from_millis(500), 1.0, Duration::from_secs(1))]
    fn sequence_is_non_decreasing_and_bounded(
        #[case] initial: Duration,
        #[case] multiplier: f64,
        #[case] max: Duration,
    ) {
        let policy = BackoffPolicy {
            initial_interval: initial,
            multiplier,
            max_interval: max,
        };
        let mut exec = policy.start();

        let mut prev = Duration::ZERO;
        for _ in 0..32 {
            let next = exec.next_interval();
            assert!(next >= prev);
            assert!(next <= max);
            prev = next;
        }
    }

    #[rstest]
    #[case(0.5)]
    #[case(-3.0)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    fn multiplier_below_one_degrades_to_flat_backoff(#[case] multiplier: f64) {
        let policy = BackoffPolicy {
            initial_interval: Duration::from_millis(100),
            multiplier,
            max_interval: Duration::from_secs(1),
        };
        let mut exec = policy.start();

        // The sequence must stay non-decreasing even for a nonsense growth
        // factor, so bad input flattens to the initial interval.
        for _ in 0..8 {
            assert_eq!(exec.next_interval(), Duration::from_millis(100));
        }
    }

    #[test]
    fn huge_multiplier_saturates_at_max_without_panicking() {
        let policy = BackoffPolicy {
            initial_interval: Duration::from_millis(100),
            multiplier: 1e300,
            max_interval: Duration::from_secs(30),
        };
        let mut exec = policy.start();

        assert_eq!(exec.next_interval(), Duration::from_millis(100));
        assert_eq!(exec.next_interval(), Duration::from_secs(30));
        assert_eq!(exec.next_interval(), Duration::from_secs(30));
    }

    #[test]
    fn initial_interval_is_clamped_to_max() {
        let policy = BackoffPolicy {
            initial_interval: Duration::from_secs(60),
            multiplier: 2.0,
            max_interval: Duration::from_secs(5),
        };
        assert_eq!(policy.start().next_interval(), Duration::from_secs(5));
    }

    #[test]
    fn executions_are_independent() {
        let policy = BackoffPolicy::default();

        let mut first = policy.start();
        first.next_interval();
        first.next_interval();

        // A fresh execution starts over regardless of prior sequences.
        let mut second = policy.start();
        assert_eq!(second.next_interval(), policy.initial_interval);
    }
}
