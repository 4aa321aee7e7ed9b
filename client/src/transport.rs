//! HTTP transport seam.
//!
//! The transport only moves bytes. Any response that arrives, whatever its
//! status, is a `RawResponse`; judging it is the interceptor chain's job.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::ClassifiedError;
use crate::retry::classifier::{Classify, RawFailure};

/// A fully decorated request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// No response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub timed_out: bool,
    pub message: String,
}

impl TransportFailure {
    pub fn new(timed_out: bool, message: impl Into<String>) -> Self {
        Self {
            timed_out,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<TransportFailure> for RawFailure {
    fn from(failure: TransportFailure) -> Self {
        RawFailure::Transport {
            timed_out: failure.timed_out,
            message: failure.message,
        }
    }
}

impl Classify for TransportFailure {
    fn classify(&self) -> ClassifiedError {
        RawFailure::from(self.clone()).classify()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportFailure>;
}

/// `reqwest` transport over rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(default_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(default_timeout)
            .user_agent(concat!("cvs-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportFailure> {
        let PreparedRequest {
            method,
            url,
            mut headers,
            body,
            timeout,
        } = request;

        let mut builder = self.client.request(method.clone(), url.clone()).timeout(timeout);
        if let Some(body) = body {
            let payload = serde_json::to_vec(&body)
                .map_err(|err| TransportFailure::new(false, format!("encode body: {err}")))?;
            headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
            builder = builder.body(payload);
        }
        builder = builder.headers(headers);

        debug!(%method, path = url.path(), "sending request");
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(%method, path = url.path(), status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Joins `path` onto `base_url` and appends `query`. Absolute `http(s)` paths
/// are used as-is.
pub fn build_url(
    base_url: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<Url, ClassifiedError> {
    let raw = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        let base = base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    };

    let mut url = Url::parse(&raw)
        .map_err(|err| ClassifiedError::malformed(format!("invalid request URL {raw}: {err}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_base_and_path() {
        let url = build_url("http://localhost:8080/", "/activities/7", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/activities/7");

        let url = build_url("http://localhost:8080/api", "signups/my", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/signups/my");
    }

    #[test]
    fn appends_encoded_query() {
        let query = vec![
            ("approved".to_string(), "false".to_string()),
            ("rejectReason".to_string(), "needs more detail".to_string()),
        ];
        let url = build_url("http://h", "/activities/1/approve", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://h/activities/1/approve?approved=false&rejectReason=needs+more+detail"
        );
    }

    #[test]
    fn absolute_paths_bypass_base() {
        let url = build_url("http://h", "https://cdn.example.com/a.pdf", &[]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/a.pdf");
    }

    #[test]
    fn bad_base_is_malformed() {
        let err = build_url("not a url", "/x", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(!err.retryable);
    }

    #[test]
    fn transport_failures_classify_by_timeout_signal() {
        assert_eq!(
            TransportFailure::new(true, "deadline").classify().kind,
            ErrorKind::Timeout
        );
        assert_eq!(
            TransportFailure::new(false, "refused").classify().kind,
            ErrorKind::Network
        );
    }
}
