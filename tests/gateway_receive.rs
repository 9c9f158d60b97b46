//! End-to-end tests for the receive gateway over real HTTP.

use locgate::{builtin_cases, router, GatewayState, TerminalStore};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Bind the gateway on an ephemeral port and return its base URL.
async fn spawn_gateway(data_file: PathBuf) -> String {
    let state = Arc::new(GatewayState {
        store: TerminalStore::load(&data_file),
        data_file,
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn valid_body() -> &'static str {
    // Same literal the smoke tool posts.
    builtin_cases()[0].body
}

#[tokio::test]
async fn accepts_a_valid_frame_and_exposes_it() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "application/json")
        .header("RequestId", "req-123")
        .body(valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Code"], "ok");
    assert_eq!(body["RequestId"], "req-123");

    // The terminal shows up in the machine-readable listing...
    let terminals: Value = client
        .get(format!("{}/api/terminals", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(terminals[0]["IdNumber"], "2019070111201");
    assert_eq!(terminals[0]["MessageCount"], 1);

    // ...and in the HTML views, with the hemisphere translated.
    let index = client
        .get(format!("{}/", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(index.contains("3958.80721"));
    assert!(index.contains("北纬"));
    assert!(index.contains("unit-01 ok"));

    let history = client
        .get(format!("{}/history/2019070111201", base))
        .send()
        .await
        .unwrap();
    assert_eq!(history.status(), 200);
    assert!(history.text().await.unwrap().contains("10:30:33"));
}

#[tokio::test]
async fn generates_a_request_id_when_the_header_is_absent() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "application/json")
        .body(valid_body())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let request_id = body["RequestId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn rejects_missing_fields() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "application/json")
        .body(r#"{"IdNumber":"1","Content":"A4","Time":"t","MessageId":"1","DeliveryCount":2}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Code"], "error");
    assert!(body["Message"].as_str().unwrap().contains("NetworkMode"));
}

#[tokio::test]
async fn rejects_wrong_content_type() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "text/plain")
        .body(valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["Message"]
        .as_str()
        .unwrap()
        .contains("application/json"));
}

#[tokio::test]
async fn rejects_empty_and_malformed_json() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;
    let client = reqwest::Client::new();

    for body in ["{}", "{not json"] {
        let response = client
            .post(format!("{}/api/receive", base))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "body {:?} was not rejected", body);
    }
}

#[tokio::test]
async fn rejects_oversized_content() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;

    let body = json!({
        "IdNumber": "1", "MessageId": "1", "Content": "F".repeat(3502),
        "Time": "t", "DeliveryCount": 1, "NetworkMode": "0",
    });

    let response = reqwest::Client::new()
        .post(format!("{}/api/receive", base))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let reply: Value = response.json().await.unwrap();
    assert!(reply["Message"].as_str().unwrap().contains("too long"));
}

#[tokio::test]
async fn stores_unparseable_content_and_still_acknowledges() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "application/json")
        .body(r#"{"IdNumber":"77","MessageId":"1","Content":"FF00AA","Time":"t","DeliveryCount":1,"NetworkMode":"0"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Code"], "ok");

    let history = client
        .get(format!("{}/history/77", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(history.contains("解析错误"));
}

#[tokio::test]
async fn unknown_terminal_history_is_404() {
    let dir = TempDir::new().unwrap();
    let base = spawn_gateway(dir.path().join("data_store.json")).await;

    let response = reqwest::Client::new()
        .get(format!("{}/history/nobody", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn messages_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data_store.json");

    let base = spawn_gateway(data_file.clone()).await;
    reqwest::Client::new()
        .post(format!("{}/api/receive", base))
        .header("Content-Type", "application/json")
        .body(valid_body())
        .send()
        .await
        .unwrap();

    // A fresh store loaded from the same file sees the message.
    let reloaded = TerminalStore::load(&data_file);
    let history = reloaded.history("2019070111201").unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].outcome.is_parsed());
}
