//! Error classification for retry decisions

use crate::envelope::Envelope;
use crate::error::{ClassifiedError, ErrorKind};

/// Application codes that always mean the session is gone: 401 itself,
/// plus the backend's token-expired (1005) and token-invalid (1006) codes.
pub const UNAUTHORIZED_BUSINESS_CODES: [i64; 3] = [401, 1005, 1006];

/// Application codes for a signed-in user lacking rights: 403 and the
/// backend's insufficient-permissions (1007).
pub const FORBIDDEN_BUSINESS_CODES: [i64; 2] = [403, 1007];

/// Application codes worth retrying by default (too many requests,
/// service unavailable).
pub const DEFAULT_RETRYABLE_BUSINESS_CODES: [i64; 2] = [429, 503];

/// A failure as observed, before any labelling.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFailure {
    /// No response was received at all.
    Transport { timed_out: bool, message: String },

    /// The server answered with a non-success HTTP status.
    Http {
        status: u16,
        envelope: Option<Envelope>,
    },

    /// Transport succeeded but the envelope carried a failing code.
    Business { code: i64, message: Option<String> },
}

/// Trait for error classification
pub trait Classify {
    fn classify(&self) -> ClassifiedError;

    fn is_retryable(&self) -> bool {
        self.classify().retryable
    }
}

/// Maps raw failures to [`ClassifiedError`]s. Pure: the same input always
/// yields the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    retryable_business_codes: Vec<i64>,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self {
            retryable_business_codes: DEFAULT_RETRYABLE_BUSINESS_CODES.to_vec(),
        }
    }
}

impl ErrorClassifier {
    pub fn new(retryable_business_codes: Vec<i64>) -> Self {
        Self {
            retryable_business_codes,
        }
    }

    /// First match wins: missing response, then HTTP status, then the
    /// application code embedded in the envelope.
    pub fn classify(&self, raw: &RawFailure) -> ClassifiedError {
        match raw {
            RawFailure::Transport { timed_out, message } => {
                let kind = if *timed_out {
                    ErrorKind::Timeout
                } else {
                    ErrorKind::Network
                };
                ClassifiedError::new(
                    kind,
                    message_or_default(Some(message.as_str()), kind),
                    None,
                    true,
                )
            }
            RawFailure::Http { status, envelope } => {
                let (kind, retryable) = classify_status(*status);
                let message = envelope.as_ref().and_then(Envelope::message);
                ClassifiedError::new(
                    kind,
                    message_or_default(message, kind),
                    Some(*status),
                    retryable,
                )
            }
            RawFailure::Business { code, message } => {
                let (kind, retryable) = if UNAUTHORIZED_BUSINESS_CODES.contains(code) {
                    (ErrorKind::Unauthorized, false)
                } else if FORBIDDEN_BUSINESS_CODES.contains(code) {
                    (ErrorKind::Forbidden, false)
                } else {
                    (
                        ErrorKind::BusinessError(*code),
                        self.retryable_business_codes.contains(code),
                    )
                };
                ClassifiedError::new(kind, message_or_default(message.as_deref(), kind), None, retryable)
            }
        }
    }
}

fn classify_status(status: u16) -> (ErrorKind, bool) {
    match status {
        401 => (ErrorKind::Unauthorized, false),
        403 => (ErrorKind::Forbidden, false),
        404 => (ErrorKind::NotFound, false),
        408 => (ErrorKind::Timeout, true),
        429 => (ErrorKind::RateLimited, true),
        400 | 422 => (ErrorKind::ValidationError, false),
        409 => (ErrorKind::Conflict, false),
        500..=599 => (ErrorKind::ServerError, true),
        _ => (ErrorKind::Unknown, false),
    }
}

fn message_or_default(message: Option<&str>, kind: ErrorKind) -> String {
    match message.map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => kind.default_message().to_string(),
    }
}

impl Classify for RawFailure {
    fn classify(&self) -> ClassifiedError {
        ErrorClassifier::default().classify(self)
    }
}

impl Classify for ClassifiedError {
    fn classify(&self) -> ClassifiedError {
        self.clone()
    }

    fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl From<&reqwest::Error> for RawFailure {
    fn from(err: &reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RawFailure::Http {
                status: status.as_u16(),
                envelope: None,
            },
            None => RawFailure::Transport {
                timed_out: err.is_timeout(),
                message: err.to_string(),
            },
        }
    }
}

impl Classify for reqwest::Error {
    fn classify(&self) -> ClassifiedError {
        RawFailure::from(self).classify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn http(status: u16) -> RawFailure {
        RawFailure::Http {
            status,
            envelope: None,
        }
    }

    #[test]
    fn missing_response_is_network_or_timeout() {
        let refused = RawFailure::Transport {
            timed_out: false,
            message: "connection refused".to_string(),
        };
        let err = refused.classify();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.source_status, None);
        assert!(err.retryable);

        let timed_out = RawFailure::Transport {
            timed_out: true,
            message: String::new(),
        };
        let err = timed_out.classify();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert_eq!(err.message, ErrorKind::Timeout.default_message());
        assert!(err.retryable);
    }

    #[test]
    fn http_status_table() {
        let cases = [
            (401, ErrorKind::Unauthorized, false),
            (403, ErrorKind::Forbidden, false),
            (404, ErrorKind::NotFound, false),
            (408, ErrorKind::Timeout, true),
            (429, ErrorKind::RateLimited, true),
            (400, ErrorKind::ValidationError, false),
            (422, ErrorKind::ValidationError, false),
            (409, ErrorKind::Conflict, false),
            (500, ErrorKind::ServerError, true),
            (503, ErrorKind::ServerError, true),
            (504, ErrorKind::ServerError, true),
            (599, ErrorKind::ServerError, true),
            (302, ErrorKind::Unknown, false),
            (418, ErrorKind::Unknown, false),
        ];
        for (status, kind, retryable) in cases {
            let err = http(status).classify();
            assert_eq!(err.kind, kind, "status {status}");
            assert_eq!(err.retryable, retryable, "status {status}");
            assert_eq!(err.source_status, Some(status));
        }
    }

    #[test]
    fn http_message_comes_from_envelope() {
        let raw = RawFailure::Http {
            status: 403,
            envelope: Some(Envelope {
                code: Some(403),
                message: Some("teachers only".to_string()),
                data: None,
            }),
        };
        assert_eq!(raw.classify().message, "teachers only");
        assert_eq!(http(403).classify().message, "permission denied");
    }

    #[test]
    fn business_codes() {
        let full = RawFailure::Business {
            code: 2002,
            message: Some("activity is full".to_string()),
        };
        let err = full.classify();
        assert_eq!(err.kind, ErrorKind::BusinessError(2002));
        assert!(!err.retryable);

        let busy = RawFailure::Business {
            code: 503,
            message: None,
        };
        let err = busy.classify();
        assert_eq!(err.kind, ErrorKind::BusinessError(503));
        assert!(err.retryable);
        assert_eq!(err.message, "operation failed");

        for code in UNAUTHORIZED_BUSINESS_CODES {
            let err = RawFailure::Business {
                code,
                message: None,
            }
            .classify();
            assert_eq!(err.kind, ErrorKind::Unauthorized, "code {code}");
            assert!(!err.retryable);
        }
    }

    #[test]
    fn permission_codes_are_forbidden() {
        let err = RawFailure::Business {
            code: 1007,
            message: Some("not the organizer".to_string()),
        }
        .classify();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, "not the organizer");
        assert_eq!(err.source_status, None);
        assert!(!err.retryable);
        assert!(!err.is_unauthorized());

        let err = RawFailure::Business {
            code: 403,
            message: None,
        }
        .classify();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn custom_retryable_business_codes() {
        let classifier = ErrorClassifier::new(vec![2009]);
        let raw = RawFailure::Business {
            code: 2009,
            message: None,
        };
        assert!(classifier.classify(&raw).retryable);
        let raw = RawFailure::Business {
            code: 429,
            message: None,
        };
        assert!(!classifier.classify(&raw).retryable);
    }

    #[test]
    fn classification_is_pure() {
        let samples = [
            http(500),
            http(401),
            RawFailure::Transport {
                timed_out: true,
                message: "deadline".to_string(),
            },
            RawFailure::Business {
                code: 3003,
                message: Some("not enough hours".to_string()),
            },
        ];
        for raw in samples {
            assert_eq!(raw.classify(), raw.classify());
        }
    }

    #[test]
    fn classified_error_classifies_to_itself() {
        let err = http(429).classify();
        assert_eq!(err.classify(), err);
        assert!(err.is_retryable());
    }
}
