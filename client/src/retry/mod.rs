//! Retry logic with capped exponential backoff
//!
//! This module provides:
//! - Error classification (retryable vs terminal)
//! - Deterministic exponential backoff, capped at a ceiling
//! - Max attempt limits per call category
//! - Surfacing and silent operating modes
//! - Cancellation support

pub mod classifier;
pub mod invoker;
pub mod policy;

pub use classifier::{Classify, ErrorClassifier, RawFailure};
pub use invoker::{AttemptOutcome, invoke, invoke_cancellable, invoke_silent};
pub use policy::{PolicyError, RetryPolicy, delay_for_attempt};

use crate::error::ClassifiedError;

/// Errors returned by [`invoke_cancellable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetryError {
    #[error(transparent)]
    Failed(ClassifiedError),

    /// External cancellation requested before an attempt or during a wait.
    #[error("Retry aborted by cancellation")]
    Aborted,
}
