//! Error taxonomy shared by every request path.
//!
//! A [`ClassifiedError`] is the only error a caller of [`crate::CvsClient`]
//! ever sees. It is derived deterministically from a raw failure by
//! [`crate::retry::classifier::ErrorClassifier`] and never recovers anything
//! by itself.

use std::fmt;

/// Closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response: connection refused, DNS failure, reset.
    Network,
    /// No response because of a timeout signal, or HTTP 408.
    Timeout,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    ValidationError,
    ServerError,
    /// Failing application code carried inside a successful transport response.
    BusinessError(i64),
    Unknown,
}

impl ErrorKind {
    /// Message used when neither the envelope nor the transport supplied one.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Network => "network connection failed",
            ErrorKind::Timeout => "request timed out",
            ErrorKind::Unauthorized => "session expired, please sign in again",
            ErrorKind::Forbidden => "permission denied",
            ErrorKind::NotFound => "requested resource does not exist",
            ErrorKind::Conflict => "operation conflicts with current state",
            ErrorKind::RateLimited => "too many requests",
            ErrorKind::ValidationError => "request parameters are invalid",
            ErrorKind::ServerError => "internal server error",
            ErrorKind::BusinessError(_) => "operation failed",
            ErrorKind::Unknown => "request failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => f.write_str("network error"),
            ErrorKind::Timeout => f.write_str("timeout"),
            ErrorKind::Unauthorized => f.write_str("unauthorized"),
            ErrorKind::Forbidden => f.write_str("forbidden"),
            ErrorKind::NotFound => f.write_str("not found"),
            ErrorKind::Conflict => f.write_str("conflict"),
            ErrorKind::RateLimited => f.write_str("rate limited"),
            ErrorKind::ValidationError => f.write_str("validation error"),
            ErrorKind::ServerError => f.write_str("server error"),
            ErrorKind::BusinessError(code) => write!(f, "business error {code}"),
            ErrorKind::Unknown => f.write_str("unknown error"),
        }
    }
}

/// A failure labelled with its kind and retry eligibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status of the response that carried the failure, if any.
    pub source_status: Option<u16>,
    pub retryable: bool,
}

impl ClassifiedError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        source_status: Option<u16>,
        retryable: bool,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source_status,
            retryable,
        }
    }

    /// Unauthorized errors raised on the client side (no usable credential).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message, None, false)
    }

    /// Failure to encode a request or decode a payload. Never retryable.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message, None, false)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// 401 has its own sign-in flow and 404 usually means a backend route
    /// that is not deployed yet, so neither reaches the generic notifier.
    pub fn suppresses_notification(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized | ErrorKind::NotFound)
    }
}
