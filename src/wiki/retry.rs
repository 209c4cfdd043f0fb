//! Bounded retry with fixed backoff for wiki requests.

use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::config::WikiSettings;
use crate::wiki::FetchError;

/// Retry policy shared by lookups and downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,
    /// Wait after a connection or TLS handshake failure.
    pub handshake_backoff: Duration,
    /// Wait after a timeout.
    pub timeout_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&WikiSettings::default())
    }
}

impl RetryPolicy {
    /// Build the policy from the `[wiki]` section.
    #[must_use]
    pub const fn from_settings(settings: &WikiSettings) -> Self {
        Self {
            max_attempts: settings.max_retries,
            handshake_backoff: Duration::from_secs(settings.handshake_backoff_secs),
            timeout_backoff: Duration::from_secs(settings.timeout_backoff_secs),
        }
    }

    /// What: Wait before retrying after `err`.
    ///
    /// Inputs:
    /// - `err`: Failure of the last attempt.
    ///
    /// Output:
    /// - `Some(delay)` for transient failures, `None` when the error is final.
    #[must_use]
    pub const fn backoff_for(&self, err: &FetchError) -> Option<Duration> {
        match err {
            FetchError::Handshake(_) => Some(self.handshake_backoff),
            FetchError::Timeout(_) => Some(self.timeout_backoff),
            _ => None,
        }
    }

    /// What: Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Inputs:
    /// - `label`: What is being requested, for logs.
    /// - `op`: Produces one attempt.
    ///
    /// Output:
    /// - The first successful value.
    ///
    /// # Errors
    /// - The last error when it is not transient or when every attempt failed.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.backoff_for(&err) else {
                error!(target_label = label, error = %err, "request failed");
                return Err(err);
            };
            if attempt >= self.max_attempts {
                error!(
                    target_label = label,
                    attempts = attempt,
                    error = %err,
                    "maximum retries reached; giving up"
                );
                return Err(err);
            }
            warn!(
                target_label = label,
                attempt,
                delay_secs = delay.as_secs(),
                error = %err,
                "transient failure; retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
