//! Request/response hook chain.
//!
//! Hooks run in registration order on the way out and in registration order
//! on the way back. The built-in chain is `[AuthInterceptor,
//! EnvelopeInterceptor]`; callers may append their own.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::envelope::{Envelope, unwrap_payload};
use crate::error::ClassifiedError;
use crate::retry::classifier::{ErrorClassifier, RawFailure};
use crate::session::{CredentialStore, SessionGuard};

/// Header carrying the per-installation identifier.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// How the response body should be treated once the status is known good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Envelope-wrapped JSON.
    #[default]
    Json,
    /// File downloads and exports. Returned untouched.
    Bytes,
}

/// Everything needed to build one request, before decoration.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Whether the route needs a signed-in user. Only consulted when the
    /// client is configured to require credentials.
    pub requires_auth: bool,
    /// Keep failures of this request away from the [`crate::ErrorNotifier`].
    pub suppress_error_toast: bool,
    pub response_kind: ResponseKind,
    /// Overrides the client-wide timeout.
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            requires_auth: true,
            suppress_error_toast: false,
            response_kind: ResponseKind::Json,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends `key=value` only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ClassifiedError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ClassifiedError::malformed(format!("encode request body: {err}")))?;
        Ok(self.with_body(value))
    }

    /// Route reachable without signing in (login, registration, ...).
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.suppress_error_toast = true;
        self
    }

    pub fn bytes(mut self) -> Self {
        self.response_kind = ResponseKind::Bytes;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Identity of the request for coalescing: method, path, sorted query
    /// and the expected response kind.
    pub fn fingerprint(&self) -> String {
        let mut query = self.query.clone();
        query.sort();
        let query = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let kind = match self.response_kind {
            ResponseKind::Json => "json",
            ResponseKind::Bytes => "bytes",
        };
        format!("{} {}?{query} [{kind}]", self.method, self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Raw(Bytes),
    Json(Value),
}

impl ResponseBody {
    pub fn into_json(self) -> Result<Value, ClassifiedError> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(bytes) if bytes.is_empty() => Ok(Value::Null),
            ResponseBody::Raw(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| ClassifiedError::malformed(format!("response is not JSON: {err}"))),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            ResponseBody::Raw(bytes) => bytes,
            ResponseBody::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

/// A response travelling back through the chain.
#[derive(Debug, Clone)]
pub struct InterceptedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
    pub response_kind: ResponseKind,
}

pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn before_request(&self, request: RequestSpec) -> Result<RequestSpec, ClassifiedError> {
        Ok(request)
    }

    fn after_response(
        &self,
        response: InterceptedResponse,
    ) -> Result<InterceptedResponse, ClassifiedError> {
        Ok(response)
    }

    /// Observes every failure of a request that reached the transport.
    fn on_error(&self, _error: &ClassifiedError) {}
}

#[derive(Clone, Default)]
pub struct InterceptorChain {
    hooks: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: Arc<dyn Interceptor>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn apply_request(&self, request: RequestSpec) -> Result<RequestSpec, ClassifiedError> {
        self.hooks
            .iter()
            .try_fold(request, |request, hook| hook.before_request(request))
    }

    pub fn apply_response(
        &self,
        response: InterceptedResponse,
    ) -> Result<InterceptedResponse, ClassifiedError> {
        self.hooks
            .iter()
            .try_fold(response, |response, hook| hook.after_response(response))
    }

    pub fn notify_error(&self, error: &ClassifiedError) {
        for hook in &self.hooks {
            hook.on_error(error);
        }
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|hook| hook.name()))
            .finish()
    }
}

/// Attaches the bearer token and device identifier, and escalates
/// Unauthorized failures to the [`SessionGuard`].
pub struct AuthInterceptor {
    store: Arc<dyn CredentialStore>,
    guard: Arc<SessionGuard>,
    send_device_id: bool,
    require_credentials: bool,
}

impl AuthInterceptor {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        guard: Arc<SessionGuard>,
        send_device_id: bool,
        require_credentials: bool,
    ) -> Self {
        Self {
            store,
            guard,
            send_device_id,
            require_credentials,
        }
    }
}

impl Interceptor for AuthInterceptor {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn before_request(&self, mut request: RequestSpec) -> Result<RequestSpec, ClassifiedError> {
        let session = self.store.session();
        let usable = session.as_ref().is_some_and(|s| !s.is_expired_now());

        if self.require_credentials && request.requires_auth && !usable {
            debug!(path = %request.path, "no usable credential, refusing to send");
            return Err(ClassifiedError::unauthorized("not signed in"));
        }

        if let Some(session) = session {
            let value = HeaderValue::from_str(&format!("Bearer {}", session.access_token))
                .map_err(|_| ClassifiedError::malformed("access token is not a valid header value"))?;
            request.headers.insert(AUTHORIZATION, value);
        }

        if self.send_device_id {
            let device_id = self.store.device_id();
            let value = HeaderValue::from_str(&device_id)
                .map_err(|_| ClassifiedError::malformed("device id is not a valid header value"))?;
            request
                .headers
                .insert(HeaderName::from_static(DEVICE_ID_HEADER), value);
        }

        debug!(path = %request.path, has_token = request.headers.contains_key(AUTHORIZATION), "decorated request");
        Ok(request)
    }

    fn on_error(&self, error: &ClassifiedError) {
        if error.is_unauthorized() {
            self.guard.signal_invalid();
        }
    }
}

/// Judges the HTTP status, then unwraps the `{code, message, data}` envelope.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeInterceptor {
    classifier: ErrorClassifier,
}

impl EnvelopeInterceptor {
    pub fn new(classifier: ErrorClassifier) -> Self {
        Self { classifier }
    }

    fn business_failure(&self, envelope: &Envelope) -> Option<ClassifiedError> {
        if envelope.is_success() {
            return None;
        }
        let code = envelope.code?;
        Some(self.classifier.classify(&RawFailure::Business {
            code,
            message: envelope.message().map(str::to_string),
        }))
    }
}

impl Interceptor for EnvelopeInterceptor {
    fn name(&self) -> &'static str {
        "envelope"
    }

    fn after_response(
        &self,
        mut response: InterceptedResponse,
    ) -> Result<InterceptedResponse, ClassifiedError> {
        let ResponseBody::Raw(bytes) = &response.body else {
            return Ok(response);
        };

        if !response.status.is_success() {
            let envelope = serde_json::from_slice::<Value>(bytes)
                .ok()
                .as_ref()
                .and_then(Envelope::from_value);
            return Err(self.classifier.classify(&RawFailure::Http {
                status: response.status.as_u16(),
                envelope,
            }));
        }

        if response.response_kind == ResponseKind::Bytes {
            // A download endpoint that fails reports it as a JSON envelope.
            if is_json(&response.headers)
                && let Some(envelope) = serde_json::from_slice::<Value>(bytes)
                    .ok()
                    .as_ref()
                    .and_then(Envelope::from_value)
                && let Some(err) = self.business_failure(&envelope)
            {
                return Err(err);
            }
            return Ok(response);
        }

        if bytes.is_empty() {
            response.body = ResponseBody::Json(Value::Null);
            return Ok(response);
        }

        let body: Value = serde_json::from_slice(bytes)
            .map_err(|err| ClassifiedError::malformed(format!("response is not JSON: {err}")))?;
        if let Some(envelope) = Envelope::from_value(&body)
            && let Some(err) = self.business_failure(&envelope)
        {
            return Err(err);
        }

        response.body = ResponseBody::Json(unwrap_payload(body));
        Ok(response)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("json"))
}
