//! Retry as a first-class value: a policy plus an explicit combinator, instead
//! of an annotation baked into the call site.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use tokio::time::sleep;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tracing::debug;

/// Backoff schedule and cumulative wall-clock budget for transient failures.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// First backoff delay; doubles each attempt.
    pub base_delay: Duration,
    /// Cap for a single backoff delay.
    pub max_delay: Duration,
    /// Total wall-clock time allowed across all attempts before giving up.
    pub budget: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            budget: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    /// Doubling delays capped at `max_delay`, with equal jitter: each delay is
    /// at least half the scheduled value, so the budget is always reached.
    fn schedule(&self) -> impl Iterator<Item = Duration> {
        let factor = (self.base_delay.as_millis() as u64 / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.max_delay)
            .map(|d| d / 2 + jitter(d / 2))
    }
}

/// Run `op`, retrying while `is_transient` holds and the budget allows.
///
/// The last transient error is returned once the budget is exhausted;
/// non-transient errors are returned immediately without a retry. Cancellation
/// is observed at every backoff sleep, so dropping the future stops further
/// attempts.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_transient: P,
    mut op: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let started = Instant::now();
    let mut delays = policy.schedule();
    let mut attempt = 1usize;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_transient(&err) => return Err(err),
            Err(err) => {
                // The schedule iterator is infinite; the budget terminates us.
                let Some(delay) = delays.next() else {
                    return Err(err);
                };
                if started.elapsed() + delay >= policy.budget {
                    return Err(err);
                }
                debug!(attempt, delay_ms = delay.as_millis() as u64, "transient failure, backing off");
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(40),
            budget: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let attempts = AtomicUsize::new(0);
        let result: Result<&str, &str> = retry_with_backoff(
            &fast_policy(),
            |_| true,
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("flaky")
                    } else {
                        Ok("done")
                    }
                }
            },
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_transient_error_is_not_retried() {
        let attempts = AtomicUsize::new(0);
        let result: Result<(), &str> = retry_with_backoff(
            &fast_policy(),
            |e: &&str| *e != "fatal",
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err("fatal") }
            },
        )
        .await;

        assert_eq!(result, Err("fatal"));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn always_failing_op_stops_within_budget() {
        let policy = fast_policy();
        let attempts = AtomicUsize::new(0);
        let started = Instant::now();

        let result: Result<(), &str> = retry_with_backoff(&policy, |_| true, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err("down") }
        })
        .await;

        assert_eq!(result, Err("down"));
        assert!(attempts.load(Ordering::SeqCst) > 1);
        // Budget plus one max backoff interval of slack.
        assert!(started.elapsed() < policy.budget + policy.max_delay);
    }

    #[test]
    fn schedule_doubles_up_to_cap() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(400),
            budget: Duration::from_secs(60),
        };
        let delays: Vec<Duration> = policy.schedule().take(5).collect();

        // Jitter keeps each delay within [scheduled/2, scheduled].
        let expected_ms = [100u64, 200, 400, 400, 400];
        for (delay, expected) in delays.iter().zip(expected_ms) {
            let ms = delay.as_millis() as u64;
            assert!(ms >= expected / 2 && ms <= expected, "delay {ms} vs {expected}");
        }
    }
}
