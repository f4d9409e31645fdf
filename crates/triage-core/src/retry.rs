//! Bounded, constant-delay retry for remote calls.
//!
//! `RetryPolicy` knows nothing about the operation it runs. The collector uses
//! it for page fetches and the submitter for the assessment POST.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use triage_contracts::error::TriageResult;

/// Default number of attempts, counting the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

/// How many times to attempt an operation and how long to wait in between.
///
/// `max_attempts` counts every call including the first, so the default
/// policy calls the operation at most 5 times and sleeps at most 4 times. A
/// value of 0 behaves like 1. The delay is constant: no jitter, no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// A success returns immediately. After a failure with attempts left the
    /// policy sleeps for `delay` and calls `op` again. The error of the final
    /// attempt is returned unchanged. `label` only appears in log output.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> TriageResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TriageResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(
                        operation = label,
                        attempts = attempt,
                        error = %e,
                        "giving up after final attempt"
                    );
                    return Err(e);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
