//! End-to-end tests: real reqwest transport against a mock backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_autolog::config::AutologConfig;
use http_autolog::http::{ReqwestTransport, Request, ResponseStatus};
use http_autolog::observability::{Level, LogEvent, MemorySink};
use http_autolog::AutologClient;
use serde_json::{json, Value};

mod common;

use common::MockReply;

fn client(config: AutologConfig, addr: std::net::SocketAddr, sink: Arc<MemorySink>) -> AutologClient<ReqwestTransport> {
    let transport = ReqwestTransport::from_client(
        reqwest::Client::builder().no_proxy().build().unwrap(),
    );
    AutologClient::with_configuration(transport, config)
        .base_url(format!("http://{}/api", addr).parse().unwrap())
        .sink(sink)
}

fn only_event(sink: &MemorySink) -> LogEvent {
    let events = sink.events();
    assert_eq!(events.len(), 1, "exactly one event per call");
    events.into_iter().next().unwrap()
}

fn captured(event: &LogEvent, name: &str) -> Value {
    event
        .property(name)
        .unwrap_or_else(|| panic!("missing property {name}"))
        .captured()
}

#[tokio::test]
async fn test_logs_successful_json_call() {
    let seen = Arc::new(Mutex::new(String::new()));
    let seen_by_backend = seen.clone();
    let addr = common::start_programmable_backend(move |request| {
        *seen_by_backend.lock().unwrap() = request.to_string();
        MockReply::json(201, r#"{"id":5,"tags":["a","b"]}"#)
            .with_header("X-Trace", "a")
            .with_header("X-Trace", "b")
    })
    .await;

    let sink = Arc::new(MemorySink::new());
    let config = AutologConfig {
        mask_fields: vec!["password".to_string()],
        properties_to_destructure: vec!["RequestBody".to_string(), "ResponseContent".to_string()],
        ..AutologConfig::default()
    };
    let client = client(config, addr, sink.clone());

    let request = Request::post("/users").json_body(json!({"user": "ana", "password": "secret"}));
    let response = client.execute(&request).await.unwrap();

    assert_eq!(response.status_code, 201);
    assert!(response.is_successful());
    assert!(seen.lock().unwrap().contains("secret"), "masking must not alter the wire body");

    let event = only_event(&sink);
    assert_eq!(event.level, Level::Info);
    assert_eq!(captured(&event, "Agent"), json!("reqwest"));
    assert_eq!(captured(&event, "Method"), json!("POST"));
    assert_eq!(captured(&event, "Url"), json!(format!("http://{}/api/users", addr)));
    assert_eq!(captured(&event, "Path"), json!("/api/users"));
    assert_eq!(captured(&event, "Port"), json!(addr.port()));
    assert_eq!(captured(&event, "RequestBody"), json!({"user": "ana", "password": "******"}));
    assert_eq!(captured(&event, "ResponseContent"), json!({"id": 5, "tags": ["a", "b"]}));
    assert_eq!(captured(&event, "StatusCodeFamily"), json!("2XX"));
    assert_eq!(captured(&event, "StatusDescription"), json!("Created"));
    assert_eq!(captured(&event, "ProtocolVersion"), json!("HTTP/1.1"));
    assert_eq!(captured(&event, "ContentType"), json!("application/json; charset=utf-8"));

    let headers: Value = serde_json::from_str(captured(&event, "ResponseHeaders").as_str().unwrap()).unwrap();
    assert_eq!(headers["x-trace"], json!("a,b"));
}

#[tokio::test]
async fn test_server_error_uses_error_template() {
    let addr = common::start_programmable_backend(|_| MockReply::text(500, "boom")).await;
    let sink = Arc::new(MemorySink::new());
    let config = AutologConfig {
        message_template_for_success: Some("ok {StatusCode}".to_string()),
        message_template_for_error: Some("failed {StatusCode}".to_string()),
        ..AutologConfig::default()
    };
    let client = client(config, addr, sink.clone());

    let response = client.execute(&Request::get("/health")).await.unwrap();
    assert_eq!(response.status_code, 500);
    assert_eq!(response.response_status, ResponseStatus::Completed);

    let event = only_event(&sink);
    assert_eq!(event.level, Level::Error);
    assert_eq!(event.message_template, "failed {StatusCode}");
    assert_eq!(event.render_message(), "failed 500");
    assert_eq!(captured(&event, "IsSuccessful"), json!(false));
    assert_eq!(captured(&event, "ResponseContent"), json!("boom"));
}

#[tokio::test]
async fn test_connection_failure_is_logged() {
    let addr = common::closed_port().await;
    let sink = Arc::new(MemorySink::new());
    let client = client(AutologConfig::default(), addr, sink.clone());

    let response = client.execute(&Request::get("/")).await.unwrap();
    assert_eq!(response.status_code, 0);
    assert_eq!(response.response_status, ResponseStatus::Error);
    assert!(response.error.is_some());

    let event = only_event(&sink);
    assert_eq!(event.level, Level::Error);
    assert_eq!(captured(&event, "StatusCodeFamily"), json!("0XX"));
    assert!(captured(&event, "ErrorMessage").is_string());

    let tree: Value = serde_json::from_str(captured(&event, "ErrorException").as_str().unwrap()).unwrap();
    assert!(tree["Message"].is_string());
    assert!(tree["InnerErrors"].is_array());
}

#[tokio::test]
async fn test_timeout_is_logged_as_timed_out() {
    let addr = common::start_programmable_backend(|_| {
        MockReply::json(200, "{}").with_delay(Duration::from_millis(1500))
    })
    .await;
    let sink = Arc::new(MemorySink::new());
    let client = client(AutologConfig::default(), addr, sink.clone());

    let request = Request::get("/slow").timeout(Duration::from_millis(100));
    let response = client.execute(&request).await.unwrap();
    assert_eq!(response.response_status, ResponseStatus::TimedOut);

    let event = only_event(&sink);
    assert_eq!(event.level, Level::Error);
    assert_eq!(captured(&event, "ResponseStatus"), json!("TimedOut"));
}

#[tokio::test]
async fn test_log_ignored_header() {
    let seen = Arc::new(Mutex::new(String::new()));
    let seen_by_backend = seen.clone();
    let addr = common::start_programmable_backend(move |request| {
        *seen_by_backend.lock().unwrap() = request.to_ascii_lowercase();
        MockReply::json(200, r#"{"token":"abc"}"#)
    })
    .await;
    let sink = Arc::new(MemorySink::new());
    let client = client(AutologConfig::default(), addr, sink.clone());

    let request = Request::get("/token").log_ignored(&["ResponseContent", "RequestHeaders"]);
    client.execute(&request).await.unwrap();

    let event = only_event(&sink);
    assert!(event.property("ResponseContent").is_none());
    assert!(event.property("RequestHeaders").is_none());
    assert!(event.property("StatusCode").is_some());
    assert!(seen.lock().unwrap().contains("logignored: responsecontent,requestheaders"));
}

#[tokio::test]
async fn test_additional_info_is_sent_and_logged() {
    let seen = Arc::new(Mutex::new(String::new()));
    let seen_by_backend = seen.clone();
    let addr = common::start_programmable_backend(move |request| {
        *seen_by_backend.lock().unwrap() = request.to_ascii_lowercase();
        MockReply::json(200, "[]")
    })
    .await;
    let sink = Arc::new(MemorySink::new());
    let mut client = client(AutologConfig::default(), addr, sink.clone());
    client.add_log_additional_info("Application", "billing");

    client.execute(&Request::get("/invoices").query("page", "2")).await.unwrap();

    let event = only_event(&sink);
    assert_eq!(event.property_names()[0], "Application");
    assert!(event
        .render_message()
        .starts_with(&format!("[billing] HTTP GET http://{}/api/invoices?page=2 responded 200 in", addr)));
    assert!(seen.lock().unwrap().contains("application: billing"));
}
