use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use cvs_client::ClassifiedError;
use cvs_client::ClientConfig;
use cvs_client::CvsClient;
use cvs_client::ErrorKind;
use cvs_client::ErrorNotifier;
use cvs_client::MemoryCredentialStore;
use cvs_client::RequestSpec;
use cvs_client::RetryPolicy;
use cvs_client::Session;
use cvs_client::SessionOwner;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use tracing_test::traced_test;

#[derive(Default)]
struct CountingOwner(AtomicUsize);

impl SessionOwner for CountingOwner {
    fn on_session_invalid(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Toasts(Mutex<Vec<String>>);

impl ErrorNotifier for Toasts {
    fn notify(&self, error: &ClassifiedError) {
        if let Ok(mut seen) = self.0.lock() {
            seen.push(error.message.clone());
        }
    }
}

fn fast_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        interactive_retry: RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 10,
            max_delay_ms: 50,
            backoff_factor: 2.0,
        },
        polling_retry: RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 10,
            max_delay_ms: 50,
            backoff_factor: 1.5,
        },
        ..ClientConfig::default().with_base_url(server.uri())
    }
}

struct Harness {
    client: CvsClient,
    owner: Arc<CountingOwner>,
    toasts: Arc<Toasts>,
}

fn harness(config: ClientConfig, session: Option<Session>) -> Harness {
    let owner = Arc::new(CountingOwner::default());
    let toasts = Arc::new(Toasts::default());
    let mut store = MemoryCredentialStore::with_device_id("device-42");
    if let Some(session) = session {
        store = store.with_session(session);
    }
    let client = CvsClient::builder(config)
        .credential_store(Arc::new(store))
        .session_owner(owner.clone())
        .notifier(toasts.clone())
        .build()
        .unwrap_or_else(|err| panic!("client should build: {err}"));
    Harness {
        client,
        owner,
        toasts,
    }
}

fn signed_in() -> Option<Session> {
    Some(Session::new("token-abc", i64::MAX))
}

#[tokio::test]
async fn concurrent_unauthorized_responses_invalidate_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/signups/my"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": 401, "message": "login required"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let (a, b) = tokio::join!(
        h.client.call::<Value>(RequestSpec::get("/signups/my")),
        h.client.call::<Value>(RequestSpec::get("/signups/my")),
    );

    for result in [a, b] {
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.source_status, Some(401));
        assert!(!err.retryable);
    }
    assert_eq!(h.owner.0.load(Ordering::SeqCst), 1);
    // 401 has its own flow and is never toasted.
    assert!(h.toasts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn expired_token_business_code_invalidates_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/stats/my"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 1005, "message": "token expired"})),
        )
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h
        .client
        .call::<Value>(RequestSpec::get("/points/stats/my"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "token expired");
    assert_eq!(h.owner.0.load(Ordering::SeqCst), 1);

    h.client.login("token-new").unwrap();
    assert!(!h.client.session_guard().is_held());
    assert!(
        h.client
            .call::<Value>(RequestSpec::get("/points/stats/my"))
            .await
            .is_err()
    );
    assert_eq!(h.owner.0.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn decorates_requests_and_unwraps_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/activities/7/approve"))
        .and(query_param("approved", "false"))
        .and(query_param("rejectReason", "too vague"))
        .and(header("authorization", "Bearer token-abc"))
        .and(header("x-device-id", "device-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "success",
            "data": {"id": 7, "status": 4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let body: Value = h
        .client
        .call(
            RequestSpec::post("/activities/7/approve")
                .query("approved", false)
                .query("rejectReason", "too vague"),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"id": 7, "status": 4}));
}

#[tokio::test]
async fn sends_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "s1001", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {"token": "t"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), None);
    let body: Value = h
        .client
        .call(
            RequestSpec::post("/auth/login")
                .public()
                .json(&json!({"username": "s1001", "password": "pw"}))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body["token"], "t");
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities/3"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {"id": 3}})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let body: Value = h.client.call(RequestSpec::get("/activities/3")).await.unwrap();
    assert_eq!(body, json!({"id": 3}));
    assert!(h.toasts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn business_errors_are_not_retried_and_are_toasted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/activities/9/signup"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 2002, "message": "activity is full"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h
        .client
        .call_unit(RequestSpec::post("/activities/9/signup"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::BusinessError(2002));
    assert_eq!(*h.toasts.0.lock().unwrap(), vec!["activity is full".to_string()]);
}

#[tokio::test]
async fn not_found_is_single_attempt_and_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h.client.call::<Value>(RequestSpec::get("/roles")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(h.toasts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn polling_swallows_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications/unread-count"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let unread: Option<u64> = h
        .client
        .poll(RequestSpec::get("/notifications/unread-count"))
        .await;
    assert_eq!(unread, None);
    assert!(h.toasts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_credentials_short_circuit_when_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ClientConfig {
        require_credentials: true,
        ..fast_config(&server)
    };
    let h = harness(config, None);
    let err = h
        .client
        .call::<Value>(RequestSpec::get("/users/1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.source_status, None);
    assert_eq!(h.owner.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn identical_gets_are_coalesced_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statistics/admin-dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "data": {"users": 12}}))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        coalesce_identical_gets: true,
        ..fast_config(&server)
    };
    let h = harness(config, signed_in());
    let (a, b, c) = tokio::join!(
        h.client.call::<Value>(RequestSpec::get("/statistics/admin-dashboard")),
        h.client.call::<Value>(RequestSpec::get("/statistics/admin-dashboard")),
        h.client.call::<Value>(RequestSpec::get("/statistics/admin-dashboard")),
    );

    assert_eq!(a.unwrap(), json!({"users": 12}));
    assert_eq!(b.unwrap(), json!({"users": 12}));
    assert_eq!(c.unwrap(), json!({"users": 12}));
}

#[tokio::test]
async fn binary_downloads_bypass_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/certificates/5/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 ...".to_vec()),
        )
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let bytes = h
        .client
        .call_bytes(RequestSpec::get("/certificates/5/download"))
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.7 ...");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    // Grab a free port and close it again so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig {
        interactive_retry: RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 5,
            max_delay_ms: 5,
            backoff_factor: 2.0,
        },
        ..ClientConfig::default().with_base_url(uri)
    };
    let h = harness(config, signed_in());
    let err = h
        .client
        .call::<Value>(RequestSpec::get("/activities/1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert!(err.retryable);
    assert_eq!(h.toasts.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn downloads_and_json_reads_of_one_path_are_not_coalesced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statistics/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "data": {"n": 1}}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig {
        coalesce_identical_gets: true,
        ..fast_config(&server)
    };
    let h = harness(config, signed_in());
    let (bytes, value) = tokio::join!(
        h.client.call_bytes(RequestSpec::get("/statistics/export")),
        h.client.call::<Value>(RequestSpec::get("/statistics/export")),
    );

    let raw: Value = serde_json::from_slice(&bytes.unwrap()).unwrap();
    assert_eq!(raw, json!({"code": 200, "data": {"n": 1}}));
    assert_eq!(value.unwrap(), json!({"n": 1}));
}

fn one_error_event(lines: &[&str]) -> Result<(), String> {
    let errors = lines.iter().filter(|line| line.contains(" ERROR ")).count();
    if errors == 1 {
        Ok(())
    } else {
        Err(format!("expected exactly one ERROR event, saw {errors}: {lines:#?}"))
    }
}

#[tokio::test]
#[traced_test]
async fn exhausted_call_logs_one_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities/3"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h
        .client
        .call::<Value>(RequestSpec::get("/activities/3"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerError);
    logs_assert(one_error_event);
}

#[tokio::test]
#[traced_test]
async fn exhausted_poll_logs_one_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications/unread-count"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let count = h
        .client
        .poll::<u64>(RequestSpec::get("/notifications/unread-count"))
        .await;

    assert_eq!(count, None);
    logs_assert(one_error_event);
}

#[tokio::test]
#[traced_test]
async fn non_retryable_failure_logs_one_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/9"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h
        .client
        .call_unit(RequestSpec::delete("/users/9"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Forbidden);
    logs_assert(one_error_event);
}

#[tokio::test]
#[traced_test]
async fn undecodable_payload_logs_one_error_and_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": "nope"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(fast_config(&server), signed_in());
    let err = h
        .client
        .call::<Vec<u32>>(RequestSpec::get("/roles"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(h.toasts.0.lock().unwrap().len(), 1);
    logs_assert(one_error_event);
}
