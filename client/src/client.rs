//! The client facade: interceptor chain, transport, retry and notification
//! wired together.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::FutureExt;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::coalesce::InFlight;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ClassifiedError;
use crate::interceptor::{
    AuthInterceptor, EnvelopeInterceptor, InterceptedResponse, Interceptor, InterceptorChain,
    RequestSpec, ResponseBody,
};
use crate::notify::{ErrorNotifier, NoopNotifier};
use crate::retry::classifier::{Classify, ErrorClassifier};
use crate::retry::{RetryError, RetryPolicy, invoke, invoke_cancellable, invoke_silent};
use crate::session::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, Session, SessionGuard,
    SessionOwner, StoreError,
};
use crate::transport::{PreparedRequest, ReqwestTransport, Transport, build_url};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

struct ClientInner {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    chain: InterceptorChain,
    notifier: Arc<dyn ErrorNotifier>,
    store: Arc<dyn CredentialStore>,
    guard: Arc<SessionGuard>,
    interactive: RetryPolicy,
    polling: RetryPolicy,
    access_token_ttl_ms: u64,
    in_flight: Option<InFlight>,
}

/// Cheap to clone; clones share the session latch and in-flight table.
#[derive(Clone)]
pub struct CvsClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for CvsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CvsClient")
            .field("base_url", &self.inner.base_url)
            .field("chain", &self.inner.chain)
            .field("interactive", &self.inner.interactive)
            .field("polling", &self.inner.polling)
            .field("coalescing", &self.inner.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl CvsClient {
    pub fn builder(config: ClientConfig) -> CvsClientBuilder {
        CvsClientBuilder::new(config)
    }

    /// Client with default transport, store and a detached session owner.
    pub fn from_config(config: ClientConfig) -> Result<Self, BuildError> {
        Self::builder(config).build()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn interactive_policy(&self) -> &RetryPolicy {
        &self.inner.interactive
    }

    pub fn polling_policy(&self) -> &RetryPolicy {
        &self.inner.polling
    }

    pub fn session_guard(&self) -> &SessionGuard {
        &self.inner.guard
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.store.session()
    }

    pub fn device_id(&self) -> String {
        self.inner.store.device_id()
    }

    /// Stores `session` and re-arms the invalidation latch.
    pub fn begin_session(&self, session: Session) -> Result<(), StoreError> {
        self.inner.store.save_session(session)?;
        self.inner.guard.reset();
        Ok(())
    }

    /// Stores a freshly issued token with the configured lifetime.
    pub fn login(&self, access_token: impl Into<String>) -> Result<Session, StoreError> {
        let session = Session::issued_now(access_token, self.inner.access_token_ttl_ms);
        self.begin_session(session.clone())?;
        Ok(session)
    }

    pub fn end_session(&self) -> Result<(), StoreError> {
        self.inner.store.clear()
    }

    /// One attempt through the chain and transport. No retry, no
    /// notification. Identical GETs are coalesced when enabled.
    pub async fn execute(&self, request: RequestSpec) -> Result<ResponseBody, ClassifiedError> {
        match &self.inner.in_flight {
            Some(in_flight) if request.method == reqwest::Method::GET => {
                let key = request.fingerprint();
                let inner = Arc::clone(&self.inner);
                in_flight
                    .run(key, move || send_once(inner, request).boxed())
                    .await
            }
            _ => send_once(Arc::clone(&self.inner), request).await,
        }
    }

    /// Surfacing mode with the interactive policy, decoded into `T`.
    pub async fn call<T: DeserializeOwned>(&self, request: RequestSpec) -> Result<T, ClassifiedError> {
        let quiet = request.suppress_error_toast;
        let label = label(&request);
        let result = invoke(
            || self.execute_decoded(request.clone()),
            &self.inner.interactive,
            &label,
        )
        .await;
        if let Err(err) = &result {
            self.surface(err, quiet);
        }
        result
    }

    /// Like [`CvsClient::call`] for endpoints whose payload is irrelevant.
    pub async fn call_unit(&self, request: RequestSpec) -> Result<(), ClassifiedError> {
        self.call::<IgnoredAny>(request).await.map(|_| ())
    }

    /// Surfacing mode for binary downloads.
    pub async fn call_bytes(&self, request: RequestSpec) -> Result<Bytes, ClassifiedError> {
        let quiet = request.suppress_error_toast;
        let request = request.bytes();
        let label = label(&request);
        let result = invoke(
            || {
                let request = request.clone();
                async move { Ok::<_, ClassifiedError>(self.execute(request).await?.into_bytes()) }
            },
            &self.inner.interactive,
            &label,
        )
        .await;
        if let Err(err) = &result {
            self.surface(err, quiet);
        }
        result
    }

    /// Silent mode with the polling policy. Never notifies the user.
    pub async fn poll<T: DeserializeOwned>(&self, request: RequestSpec) -> Option<T> {
        let label = label(&request);
        invoke_silent(
            || self.execute_decoded(request.clone()),
            &self.inner.polling,
            &label,
        )
        .await
    }

    /// Surfacing mode with external cancellation.
    pub async fn call_cancellable<T: DeserializeOwned>(
        &self,
        request: RequestSpec,
        cancel: &CancellationToken,
    ) -> Result<T, RetryError> {
        let quiet = request.suppress_error_toast;
        let label = label(&request);
        let result = invoke_cancellable(
            || self.execute_decoded(request.clone()),
            &self.inner.interactive,
            &label,
            cancel,
        )
        .await;
        if let Err(RetryError::Failed(err)) = &result {
            self.surface(err, quiet);
        }
        result
    }

    /// One attempt, decoded. A payload of the wrong shape is a terminal
    /// failure of the attempt, so the invoker logs it like any other.
    async fn execute_decoded<T: DeserializeOwned>(
        &self,
        request: RequestSpec,
    ) -> Result<T, ClassifiedError> {
        self.execute(request).await?.into_json().and_then(decode)
    }

    fn surface(&self, err: &ClassifiedError, quiet: bool) {
        if !quiet && !err.suppresses_notification() {
            self.inner.notifier.notify(err);
        }
    }
}

async fn send_once(
    inner: Arc<ClientInner>,
    request: RequestSpec,
) -> Result<ResponseBody, ClassifiedError> {
    // Refusals from the request hooks never reached the backend and are not
    // broadcast to `on_error`.
    let request = inner.chain.apply_request(request)?;

    let url = build_url(&inner.base_url, &request.path, &request.query)?;
    let response_kind = request.response_kind;
    let prepared = PreparedRequest {
        method: request.method,
        url,
        headers: request.headers,
        body: request.body,
        timeout: request.timeout.unwrap_or(inner.timeout),
    };

    let raw = match inner.transport.execute(prepared).await {
        Ok(raw) => raw,
        Err(failure) => {
            let err = failure.classify();
            inner.chain.notify_error(&err);
            return Err(err);
        }
    };

    let response = InterceptedResponse {
        status: raw.status,
        headers: raw.headers,
        body: ResponseBody::Raw(raw.body),
        response_kind,
    };
    match inner.chain.apply_response(response) {
        Ok(response) => Ok(response.body),
        Err(err) => {
            inner.chain.notify_error(&err);
            Err(err)
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClassifiedError> {
    serde_json::from_value(value)
        .map_err(|err| ClassifiedError::malformed(format!("unexpected payload shape: {err}")))
}

fn label(request: &RequestSpec) -> String {
    format!("{} {}", request.method, request.path)
}

pub struct CvsClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn CredentialStore>>,
    owner: Option<Arc<dyn SessionOwner>>,
    notifier: Option<Arc<dyn ErrorNotifier>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl CvsClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            store: None,
            owner: None,
            notifier: None,
            interceptors: Vec::new(),
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Receives `on_session_invalid` once per invalidation.
    pub fn session_owner(mut self, owner: Arc<dyn SessionOwner>) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn ErrorNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Appended after the built-in auth and envelope hooks.
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<CvsClient, BuildError> {
        let config = self.config;
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.request_timeout())?),
        };
        let store: Arc<dyn CredentialStore> = match (self.store, &config.credentials_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(FileCredentialStore::open(path)?),
            (None, None) => Arc::new(MemoryCredentialStore::new()),
        };
        let guard = Arc::new(match self.owner {
            Some(owner) => SessionGuard::new(owner),
            None => SessionGuard::detached(),
        });

        let mut chain = InterceptorChain::new();
        chain.push(Arc::new(AuthInterceptor::new(
            Arc::clone(&store),
            Arc::clone(&guard),
            config.send_device_id,
            config.require_credentials,
        )));
        chain.push(Arc::new(EnvelopeInterceptor::new(ErrorClassifier::new(
            config.retryable_business_codes.clone(),
        ))));
        for interceptor in self.interceptors {
            chain.push(interceptor);
        }

        Ok(CvsClient {
            inner: Arc::new(ClientInner {
                base_url: config.base_url.trim().to_string(),
                timeout: config.request_timeout(),
                transport,
                chain,
                notifier: self.notifier.unwrap_or_else(|| Arc::new(NoopNotifier)),
                store,
                guard,
                interactive: config.interactive_retry,
                polling: config.polling_retry,
                access_token_ttl_ms: config.access_token_ttl_ms,
                in_flight: config.coalesce_identical_gets.then(InFlight::default),
            }),
        })
    }
}
