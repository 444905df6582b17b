use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBackoff, ExponentialBuilder};
use futures::FutureExt;
use futures::future::BoxFuture;
use rand::Rng;
use reqwest::Method;

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default wait before the first retry
pub const DEFAULT_INITIAL_WAIT: Duration = Duration::from_secs(1);
/// Multiplier applied to the wait after each retry
pub const BACKOFF_FACTOR: f32 = 2.0;
/// Jitter applied to each computed wait, as a fraction of the wait
pub const DEFAULT_RANDOMNESS: f64 = 0.5;
/// Upper bound on a computed wait
pub const MAX_WAIT: Duration = Duration::from_secs(60);

/// Retry parameters for a [`crate::Client`]
///
/// Defaults: 3 retries, 1s initial wait, factor 2, ±50% jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_wait: Duration,
    randomness: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_INITIAL_WAIT)
    }
}

impl RetryPolicy {
    /// Creates a policy with the given retry budget and initial wait
    #[must_use]
    pub const fn new(max_retries: u32, initial_wait: Duration) -> Self {
        Self {
            max_retries,
            initial_wait,
            randomness: DEFAULT_RANDOMNESS,
        }
    }

    /// Sets the jitter fraction, clamped to `0.0..=1.0`
    ///
    /// NaN and infinite values disable jitter.
    #[must_use]
    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = if randomness.is_finite() {
            randomness.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Maximum number of retries after the first attempt
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait before the first retry, before jitter
    #[must_use]
    pub const fn initial_wait(&self) -> Duration {
        self.initial_wait
    }

    /// Jitter fraction
    #[must_use]
    pub const fn randomness(&self) -> f64 {
        self.randomness
    }

    /// Exponential schedule without jitter
    #[must_use]
    pub fn backoff_builder(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_wait)
            .with_max_delay(MAX_WAIT)
            .with_max_times(self.max_retries as usize)
            .with_factor(BACKOFF_FACTOR)
    }

    /// Yields one jittered wait per allowed retry
    #[must_use]
    pub fn delays(&self) -> JitteredBackoff {
        (*self).build()
    }
}

impl BackoffBuilder for RetryPolicy {
    type Backoff = JitteredBackoff;

    fn build(self) -> Self::Backoff {
        JitteredBackoff {
            inner: self.backoff_builder().build(),
            randomness: self.randomness,
        }
    }
}

/// Exponential schedule with [`jitter`] applied to every wait
#[derive(Debug)]
pub struct JitteredBackoff {
    inner: ExponentialBackoff,
    randomness: f64,
}

impl Iterator for JitteredBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        self.inner.next().map(|wait| jitter(wait, self.randomness))
    }
}

/// Scales `wait` by a uniform factor in `[1 - randomness, 1 + randomness]`
#[must_use]
pub fn jitter(wait: Duration, randomness: f64) -> Duration {
    if !randomness.is_finite() || randomness <= 0.0 {
        return wait;
    }
    let randomness = randomness.min(1.0);
    let factor = rand::thread_rng().gen_range((1.0 - randomness)..=(1.0 + randomness));
    wait.mul_f64(factor)
}

/// Determines if an HTTP status code should trigger a retry
///
/// Retries on: 429, 500, 502, 503, 504
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    matches!(code, 429 | 500 | 502 | 503 | 504)
}

/// Only GET and POST are retried
#[must_use]
pub fn is_retryable_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST
}

/// Waits between retry attempts
///
/// Swap the sleeper to observe waits in tests without actually sleeping.
pub trait Sleeper: Send + Sync + fmt::Debug {
    /// Returns a future that completes after `wait`
    fn sleep(&self, wait: Duration) -> BoxFuture<'static, ()>;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, wait: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(wait).boxed()
    }
}

impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    fn sleep(&self, wait: Duration) -> BoxFuture<'static, ()> {
        (**self).sleep(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_matrix() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(502));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(504));
        assert!(!is_retryable_status(501));
        assert!(!is_retryable_status(408));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(200));
    }

    #[test]
    fn methods() {
        assert!(is_retryable_method(&Method::GET));
        assert!(is_retryable_method(&Method::POST));
        assert!(!is_retryable_method(&Method::PUT));
        assert!(!is_retryable_method(&Method::DELETE));
    }

    #[test]
    fn delays_double_without_jitter() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1)).with_randomness(0.0);
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn zero_retries_yields_nothing() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.delays().count(), 0);
    }

    #[test]
    fn jitter_stays_within_band() {
        let base = Duration::from_millis(1000);
        for _ in 0..200 {
            let wait = jitter(base, 0.5);
            assert!(wait >= Duration::from_millis(500), "{wait:?}");
            assert!(wait <= Duration::from_millis(1500), "{wait:?}");
        }
    }

    #[test]
    fn non_finite_randomness_disables_jitter() {
        for r in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let policy = RetryPolicy::new(3, Duration::from_secs(1)).with_randomness(r);
            assert!(policy.randomness().abs() < f64::EPSILON, "{r}");
            let delays: Vec<_> = policy.delays().collect();
            assert_eq!(
                delays,
                vec![
                    Duration::from_secs(1),
                    Duration::from_secs(2),
                    Duration::from_secs(4)
                ]
            );
        }
    }

    #[test]
    fn jitter_ignores_non_finite_randomness() {
        let base = Duration::from_secs(1);
        assert_eq!(jitter(base, f64::NAN), base);
        assert_eq!(jitter(base, f64::INFINITY), base);
    }

    #[test]
    fn randomness_is_clamped() {
        let policy = RetryPolicy::default().with_randomness(3.0);
        assert!((policy.randomness() - 1.0).abs() < f64::EPSILON);
        let policy = RetryPolicy::default().with_randomness(-1.0);
        assert!(policy.randomness().abs() < f64::EPSILON);
    }

    #[test]
    fn policy_builds_a_backon_schedule() {
        fn schedule(builder: impl BackoffBuilder) -> Vec<Duration> {
            builder.build().collect()
        }

        let policy = RetryPolicy::new(2, Duration::from_secs(1)).with_randomness(0.0);
        assert_eq!(
            schedule(policy),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.initial_wait(), Duration::from_secs(1));
        assert!((policy.randomness() - 0.5).abs() < f64::EPSILON);
    }
}
