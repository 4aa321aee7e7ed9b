//! Shared harness for the typed-API integration tests.

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::Mutex;

use cvs_api::CvsApi;
use cvs_client::ClassifiedError;
use cvs_client::ClientConfig;
use cvs_client::CvsClient;
use cvs_client::ErrorNotifier;
use cvs_client::MemoryCredentialStore;
use cvs_client::RetryPolicy;
use cvs_client::Session;
use serde_json::Value;
use serde_json::json;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

/// Collects every message the client would have shown to the user.
#[derive(Default)]
pub struct Toasts(Mutex<Vec<String>>);

impl Toasts {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorNotifier for Toasts {
    fn notify(&self, error: &ClassifiedError) {
        self.0.lock().unwrap().push(error.message.clone());
    }
}

pub struct TestApi {
    pub api: CvsApi,
    pub toasts: Arc<Toasts>,
}

/// Backend routes live under `/api`, as in production.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        interactive_retry: RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 5,
            max_delay_ms: 20,
            backoff_factor: 2.0,
        },
        polling_retry: RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 5,
            max_delay_ms: 20,
            backoff_factor: 1.5,
        },
        ..ClientConfig::default().with_base_url(format!("{}/api", server.uri()))
    }
}

pub fn api(server: &MockServer, session: Option<Session>) -> TestApi {
    let mut store = MemoryCredentialStore::with_device_id("device-7");
    if let Some(session) = session {
        store = store.with_session(session);
    }
    let toasts = Arc::new(Toasts::default());
    let client = CvsClient::builder(config(server))
        .credential_store(Arc::new(store))
        .notifier(toasts.clone())
        .build()
        .unwrap();
    TestApi {
        api: CvsApi::new(client),
        toasts,
    }
}

pub fn signed_in() -> Option<Session> {
    Some(Session::new("token-xyz", i64::MAX))
}

/// `{code: 200, message, data}` success envelope.
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 200,
        "message": "success",
        "data": data,
        "timestamp": 1_735_689_600_000_i64
    }))
}

/// HTTP 200 carrying a failing application code.
pub fn business_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": code,
        "message": message,
        "data": null
    }))
}
