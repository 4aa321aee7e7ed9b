//! Retrying invoker
//!
//! One loop drives every mode. Per attempt:
//! 1. Check cancellation.
//! 2. Run the operation; success returns immediately.
//! 3. Classify the failure. A non-retryable error, or a failure on the last
//!    allowed attempt, is terminal.
//! 4. Otherwise sleep `delay_for_attempt(attempt)` and go again.
//!
//! The modes differ only in what happens to a terminal failure: surfacing
//! mode returns it, silent mode logs it and returns `None`.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::RetryError;
use super::classifier::Classify;
use super::policy::RetryPolicy;
use crate::error::ClassifiedError;

/// Result of a single execution, already judged against the policy.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<T> {
    Success(T),
    RetryableFailure(ClassifiedError),
    TerminalFailure(ClassifiedError),
}

impl<T> AttemptOutcome<T> {
    /// Judges attempt number `attempt` (1-based) against `policy`.
    pub fn judge<E: Classify>(
        result: Result<T, E>,
        attempt: u32,
        policy: &RetryPolicy,
    ) -> Self {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(err) => {
                let classified = err.classify();
                if classified.retryable && attempt < policy.max_attempts {
                    AttemptOutcome::RetryableFailure(classified)
                } else {
                    AttemptOutcome::TerminalFailure(classified)
                }
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptOutcome::RetryableFailure(_))
    }
}

/// Surfacing mode: the terminal error is returned to the caller and logged
/// once at error level.
pub async fn invoke<F, Fut, T, E>(
    operation: F,
    policy: &RetryPolicy,
    label: &str,
) -> Result<T, ClassifiedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify,
{
    match run(operation, policy, label, None).await {
        Ok(value) => Ok(value),
        Err(RetryError::Failed(err)) => {
            error!(label, kind = %err.kind, status = ?err.source_status, "request failed: {}", err.message);
            Err(err)
        }
        // Unreachable without a token; kept total rather than panicking.
        Err(RetryError::Aborted) => Err(ClassifiedError::malformed("retry aborted")),
    }
}

/// Silent mode: never fails. A terminal error is logged once at error level
/// and `None` is returned.
pub async fn invoke_silent<F, Fut, T, E>(operation: F, policy: &RetryPolicy, label: &str) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify,
{
    match run(operation, policy, label, None).await {
        Ok(value) => Some(value),
        Err(RetryError::Failed(err)) => {
            error!(label, kind = %err.kind, status = ?err.source_status, "background request gave up: {}", err.message);
            None
        }
        Err(RetryError::Aborted) => None,
    }
}

/// Surfacing mode with external cancellation, checked before every attempt
/// and raced against every backoff wait.
pub async fn invoke_cancellable<F, Fut, T, E>(
    operation: F,
    policy: &RetryPolicy,
    label: &str,
    cancel: &CancellationToken,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify,
{
    let result = run(operation, policy, label, Some(cancel)).await;
    match &result {
        Err(RetryError::Failed(err)) => {
            error!(label, kind = %err.kind, status = ?err.source_status, "request failed: {}", err.message);
        }
        Err(RetryError::Aborted) => debug!(label, "retry aborted by cancellation"),
        Ok(_) => {}
    }
    result
}

async fn run<F, Fut, T, E>(
    mut operation: F,
    policy: &RetryPolicy,
    label: &str,
    cancel: Option<&CancellationToken>,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify,
{
    // A zero-attempt policy still runs once.
    let max_attempts = policy.max_attempts.max(1);
    let policy = RetryPolicy {
        max_attempts,
        ..*policy
    };
    let mut attempt: u32 = 1;

    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(RetryError::Aborted);
        }

        let outcome = AttemptOutcome::judge(operation().await, attempt, &policy);
        match outcome {
            AttemptOutcome::Success(value) => return Ok(value),
            AttemptOutcome::TerminalFailure(err) => return Err(RetryError::Failed(err)),
            AttemptOutcome::RetryableFailure(err) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    label,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    kind = %err.kind,
                    "retrying after transient failure"
                );
                if let Some(token) = cancel {
                    if wait_with_cancel(token, delay).await.is_err() {
                        return Err(RetryError::Aborted);
                    }
                } else {
                    tokio::time::sleep(delay).await;
                }
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

async fn wait_with_cancel(cancel: &CancellationToken, duration: Duration) -> Result<(), ()> {
    if duration.is_zero() {
        return Ok(());
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => Ok(()),
        _ = cancel.cancelled() => Err(()),
    }
}
