// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Step strategies computing the delay between probe attempts.

use std::time::Duration;

use rand::Rng;

/// Computes the delay before the next probe attempt.
///
/// `attempt` is the number of probes already consumed, so the first
/// inter-attempt delay is computed with `attempt == 1`. Any closure
/// `Fn(u32) -> Duration` is a strategy.
pub trait StepStrategy: Send + Sync {
    /// Delay to wait after `attempt` completed probes.
    fn delay(&self, attempt: u32) -> Duration;
}

impl<F> StepStrategy for F
where
    F: Fn(u32) -> Duration + Send + Sync,
{
    fn delay(&self, attempt: u32) -> Duration {
        self(attempt)
    }
}

impl StepStrategy for Box<dyn StepStrategy> {
    fn delay(&self, attempt: u32) -> Duration {
        (**self).delay(attempt)
    }
}

/// Fixed delay regardless of attempt number.
#[derive(Debug, Clone)]
pub struct Constant {
    delay: Duration,
}

impl Constant {
    /// Create a constant strategy with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }
}

impl StepStrategy for Constant {
    fn delay(&self, _attempt: u32) -> Duration {
        self.delay
    }
}

/// Exponentially growing delay: `base * multiplier^attempt`.
///
/// Optionally truncated at `max_delay` and spread with multiplicative
/// jitter drawn uniformly from `[1 - jitter, 1 + jitter]`. The computed
/// delay is never negative.
///
/// Defaults: 1s base, 2.0 multiplier, no cap, no jitter.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    base: Duration,
    multiplier: f64,
    max_delay: Option<Duration>,
    jitter: Option<f64>,
}

impl ExponentialBackoff {
    /// Create an exponential strategy with the given base delay.
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Set the per-attempt growth factor.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Truncate the computed delay at `max_delay`.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Spread delays with jitter. The fraction is clamped to `[0, 1]`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter.clamp(0.0, 1.0));
        self
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: None,
            jitter: None,
        }
    }
}

impl StepStrategy for ExponentialBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        let mut seconds = self.base.as_secs_f64() * self.multiplier.powi(attempt as i32);
        if let Some(max_delay) = self.max_delay {
            seconds = seconds.min(max_delay.as_secs_f64());
        }
        if let Some(jitter) = self.jitter {
            let factor = rand::thread_rng().gen_range(1.0 - jitter..=1.0 + jitter);
            seconds *= factor;
        }
        // The growth can overflow f64 when no cap is set.
        Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_returns_same_delay_for_every_attempt() {
        let step = Constant::new(Duration::from_millis(250));
        assert_eq!(step.delay(1), Duration::from_millis(250));
        assert_eq!(step.delay(7), Duration::from_millis(250));
        assert_eq!(step.delay(1000), Duration::from_millis(250));
    }

    #[test]
    fn test_constant_default_is_one_second() {
        assert_eq!(Constant::default().delay(1), Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_is_monotonically_non_decreasing() {
        let step = ExponentialBackoff::new(Duration::from_millis(100)).with_multiplier(2.0);
        let mut previous = Duration::ZERO;
        for attempt in 1..16 {
            let delay = step.delay(attempt);
            assert!(delay >= previous, "delay shrank at attempt {attempt}");
            previous = delay;
        }
    }

    #[test]
    fn test_exponential_growth_follows_multiplier() {
        let step = ExponentialBackoff::new(Duration::from_secs(1)).with_multiplier(2.0);
        assert_eq!(step.delay(1), Duration::from_secs(2));
        assert_eq!(step.delay(2), Duration::from_secs(4));
        assert_eq!(step.delay(3), Duration::from_secs(8));
    }

    #[test]
    fn test_exponential_truncates_at_max_delay() {
        let step = ExponentialBackoff::new(Duration::from_secs(1))
            .with_multiplier(10.0)
            .with_max_delay(Duration::from_secs(5));
        assert_eq!(step.delay(1), Duration::from_secs(5));
        assert_eq!(step.delay(8), Duration::from_secs(5));
    }

    #[test]
    fn test_exponential_survives_huge_attempt_numbers() {
        let step = ExponentialBackoff::new(Duration::from_secs(1)).with_multiplier(10.0);
        // No cap: the f64 grows past what Duration can hold.
        assert!(step.delay(u32::MAX) > Duration::from_secs(86_400));
    }

    #[test]
    fn test_jitter_stays_within_the_configured_fraction() {
        let step = ExponentialBackoff::new(Duration::from_secs(1))
            .with_multiplier(1.0)
            .with_jitter(0.5);
        for _ in 0..200 {
            let delay = step.delay(3);
            assert!(delay >= Duration::from_millis(500), "delay {delay:?} below jitter band");
            assert!(delay <= Duration::from_millis(1500), "delay {delay:?} above jitter band");
        }
    }

    #[test]
    fn test_oversized_jitter_is_clamped_and_never_negative() {
        let step = ExponentialBackoff::new(Duration::from_secs(1))
            .with_multiplier(1.0)
            .with_jitter(5.0);
        for _ in 0..200 {
            let delay = step.delay(1);
            assert!(delay <= Duration::from_secs(2));
        }
    }

    #[test]
    fn test_closures_are_strategies() {
        let step = |attempt: u32| Duration::from_millis(attempt as u64 * 10);
        assert_eq!(StepStrategy::delay(&step, 3), Duration::from_millis(30));
    }

    #[test]
    fn test_boxed_strategies_dispatch() {
        let step: Box<dyn StepStrategy> = Box::new(Constant::new(Duration::from_millis(40)));
        assert_eq!(step.delay(9), Duration::from_millis(40));
    }
}
