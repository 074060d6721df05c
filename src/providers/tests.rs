use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::clio::ClioProvider;
use super::{connect, get_custom_fields, get_field_sets, Provider, System};
use crate::config::Credential;
use crate::error::{AuditError, Result};
use crate::model::ResourceCollection;

/// A provider serving canned payloads per endpoint and recording every fetch.
pub struct MockProvider {
    system: System,
    payloads: HashMap<String, Value>,
    pub calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl MockProvider {
    pub fn new(system: System) -> Self {
        Self {
            system,
            payloads: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    pub fn with(mut self, endpoint: &str, payload: Value) -> Self {
        self.payloads.insert(endpoint.to_string(), payload);
        self
    }

    pub fn failing_on(mut self, endpoint: &str) -> Self {
        self.fail_on = Some(endpoint.to_string());
        self
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn system(&self) -> System {
        self.system
    }

    async fn fetch(&self, endpoint: &str) -> Result<ResourceCollection> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        let malformed = |reason: &str| AuditError::MalformedResponse {
            system: self.system,
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        };
        if self.fail_on.as_deref() == Some(endpoint) {
            return Err(malformed("mock failure"));
        }
        let payload = self
            .payloads
            .get(endpoint)
            .cloned()
            .ok_or_else(|| malformed("no canned payload"))?;
        ResourceCollection::from_payload(payload).map_err(|r| malformed(&r))
    }
}

#[tokio::test]
async fn facade_uses_fixed_endpoints() {
    let provider = MockProvider::new(System::Grow)
        .with("custom_fields", json!({"data": [{"name": "A"}]}))
        .with("field_sets", json!({"data": []}));
    let calls = provider.calls.clone();

    let fields = get_custom_fields(&provider).await.unwrap();
    let sets = get_field_sets(&provider).await.unwrap();

    assert_eq!(fields.items.len(), 1);
    assert!(sets.items.is_empty());
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        &["custom_fields", "field_sets"]
    );
}

#[test]
fn system_labels() {
    assert_eq!(System::Manage.to_string(), "manage");
    assert_eq!(System::Grow.to_string(), "grow");
}

/// Serves exactly one HTTP response on a loopback port and hands back the
/// raw request head.
async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&head).to_string());
    });

    (format!("http://{addr}/api/v4/"), rx)
}

fn clio(system: System, base: String) -> ClioProvider {
    let cred = Credential::from_value(Some("tok-abc".into())).unwrap();
    ClioProvider::new(system, base, &cred)
}

#[tokio::test]
async fn clio_sends_bearer_and_parses_envelope() {
    let body = json!({"data": [{"name": "Matter Type", "field_type": "picklist"}]}).to_string();
    let (base, request) = serve_once("200 OK", body).await;

    let coll = clio(System::Manage, base).fetch("custom_fields").await.unwrap();
    assert_eq!(coll.items.len(), 1);
    assert_eq!(coll.items[0].name, "Matter Type");

    let head = request.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /api/v4/custom_fields "));
    assert!(head.contains("authorization: bearer tok-abc"));
    assert!(head.contains("content-type: application/json"));
}

#[tokio::test]
async fn clio_non_success_status_is_request_error() {
    let (base, _request) = serve_once("401 Unauthorized", "{}".to_string()).await;

    let err = clio(System::Grow, base).fetch("field_sets").await.unwrap_err();
    match err {
        AuditError::Request {
            system, endpoint, ..
        } => {
            assert_eq!(system, System::Grow);
            assert_eq!(endpoint, "field_sets");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn clio_missing_data_is_malformed() {
    let (base, _request) = serve_once("200 OK", json!({"error": "nope"}).to_string()).await;

    let err = clio(System::Manage, base).fetch("custom_fields").await.unwrap_err();
    assert!(matches!(err, AuditError::MalformedResponse { .. }));
    assert!(err.to_string().contains("missing \"data\""));
}

#[tokio::test]
async fn clio_non_json_body_is_malformed() {
    let (base, _request) = serve_once("200 OK", "<html>".to_string()).await;

    let err = clio(System::Manage, base).fetch("custom_fields").await.unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
}

#[tokio::test]
async fn clio_connection_refused_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = clio(System::Manage, format!("http://{addr}/"))
        .fetch("custom_fields")
        .await
        .unwrap_err();
    assert!(matches!(err, AuditError::Request { .. }));
}

#[test]
fn connect_without_token_fails_before_reading_config() {
    let dir = tempfile::tempdir().unwrap();
    let missing_config = dir.path().join("absent.toml");

    for api_key in [None, Some(String::new())] {
        let err = connect(api_key, Some(missing_config.as_path())).err().unwrap();
        assert!(matches!(err, AuditError::MissingCredential(_)));
    }
}

#[tokio::test]
async fn connect_uses_configured_endpoints() {
    let body = json!({"data": [{"name": "A"}]}).to_string();
    let (base, request) = serve_once("200 OK", body).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, format!("[endpoints]\ngrow = \"{base}\"\n")).unwrap();

    let [manage, grow] = connect(Some("tok-abc".into()), Some(config_path.as_path())).unwrap();
    assert_eq!(manage.system(), System::Manage);
    assert_eq!(grow.system(), System::Grow);

    let coll = get_custom_fields(&grow).await.unwrap();
    assert_eq!(coll.items[0].name, "A");
    let head = request.await.unwrap().to_lowercase();
    assert!(head.contains("authorization: bearer tok-abc"));
}
