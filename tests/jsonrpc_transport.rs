//! Tests for the JSON-RPC over HTTP transport and card discovery against an
//! in-process axum agent.

mod common;

use std::time::Duration;

use a2a_task_client::builders::ClientBuilder;
use a2a_task_client::client::{
    A2AClient, CardResolver, JsonRpcTransport, StreamState, TaskQueryOptions, TaskSendOptions,
    Transport, TransportConfig,
};
use a2a_task_client::error::{A2AError, TASK_NOT_CANCELABLE};
use a2a_task_client::types::*;
use common::start_test_agent;
use serde_json::json;

fn request(method: &str, params: serde_json::Value) -> JsonRpcRequest {
    JsonRpcRequest::new("req-1", method, params)
}

/// A local port with nothing listening on it.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/rpc", addr)
}

// ============================================================================
// Synchronous calls
// ============================================================================

#[tokio::test]
async fn test_send_task_round_trip() -> anyhow::Result<()> {
    let (base_url, log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url))?;

    let task = client
        .send_task("ping", TaskSendOptions::default().with_id("t-42"))
        .await?;

    assert_eq!(task.id, "t-42");
    assert_eq!(task.status.state, TaskState::Completed);
    let artifacts = task.artifacts.unwrap_or_default();
    assert_eq!(artifacts[0].parts[0].as_text(), Some("Echo: ping"));
    assert_eq!(log.methods.lock().unwrap().as_slice(), ["tasks/send"]);
    Ok(())
}

#[tokio::test]
async fn test_get_task_round_trip() {
    let (base_url, _log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url)).unwrap();

    let task = client
        .get_task("t-1", TaskQueryOptions::default())
        .await
        .unwrap();
    assert_eq!(task.id, "t-1");
    assert_eq!(task.status.state, TaskState::Working);
}

#[tokio::test]
async fn test_json_rpc_error_over_http() {
    let (base_url, _log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url)).unwrap();

    let err = client.cancel_task("t-1", None).await.unwrap_err();
    assert_eq!(err.code(), Some(TASK_NOT_CANCELABLE));
}

#[tokio::test]
async fn test_transport_returns_response_verbatim() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/rpc", base_url));

    let response = transport
        .send(&request("tasks/unknown", json!({"id": "t1"})))
        .await
        .unwrap();
    assert_eq!(response.id, Some(JsonRpcId::from("req-1")));
    assert!(response.result.is_none());
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_http_error_status() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/fail", base_url));

    let err = transport
        .send(&request("tasks/get", json!({"id": "t1"})))
        .await
        .unwrap_err();
    match err {
        A2AError::Http {
            status,
            status_text,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_json_parse_error() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/garbage", base_url));

    let err = transport
        .send(&request("tasks/get", json!({"id": "t1"})))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::JsonParse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let transport = JsonRpcTransport::new(closed_port_url().await);

    let err = transport
        .send(&request("tasks/get", json!({"id": "t1"})))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Transport(_)));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let (base_url, log) = start_test_agent().await;
    let client = ClientBuilder::new(format!("{}/rpc", base_url))
        .with_header("X-Test-Header", "hello")
        .with_request_timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    client.get_task("t1", TaskQueryOptions::default()).await.unwrap();
    assert_eq!(
        log.custom_headers.lock().unwrap().as_slice(),
        [Some("hello".to_string())]
    );
}

// ============================================================================
// Streaming calls
// ============================================================================

#[tokio::test]
async fn test_stream_round_trip() {
    let (base_url, log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url)).unwrap();

    let mut stream = client
        .send_task_streaming("stream", TaskSendOptions::default().with_id("t-7"))
        .await
        .unwrap();

    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event.unwrap());
    }

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.task_id() == "t-7"));
    assert!(matches!(events[1], TaskEvent::Artifact(_)));
    assert!(events[2].is_final());
    assert_eq!(stream.state(), StreamState::Closed);

    assert_eq!(
        log.accept_headers.lock().unwrap().as_slice(),
        [Some("text/event-stream".to_string())]
    );
}

#[tokio::test]
async fn test_synchronous_call_does_not_ask_for_event_stream() {
    let (base_url, log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url)).unwrap();

    client.send_text("hi").await.unwrap();
    let accept = log.accept_headers.lock().unwrap()[0].clone();
    assert_ne!(accept.as_deref(), Some("text/event-stream"));
}

#[tokio::test]
async fn test_stream_http_error_fails_before_streaming() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/fail", base_url));

    let err = transport
        .send_stream(&request("tasks/send/stream", json!({"id": "t1"})))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_stream_answered_with_json_rpc_error() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/jsonerror", base_url));

    let err = transport
        .send_stream(&request("tasks/send/stream", json!({"id": "t1"})))
        .await
        .unwrap_err();
    match err {
        A2AError::Protocol { code, message, .. } => {
            assert_eq!(code, -32601);
            assert_eq!(message, "Method not found");
        }
        other => panic!("expected Protocol error, got {other:?}"),
    }

    let client = A2AClient::from_url(&format!("{}/jsonerror", base_url)).unwrap();
    let err = client.resubscribe_task("t1", None).await.unwrap_err();
    assert_eq!(err.code(), Some(-32601));
}

#[tokio::test]
async fn test_stream_answered_with_empty_json_rpc_response() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/jsonempty", base_url));

    let err = transport
        .send_stream(&request("tasks/send/stream", json!({"id": "t1"})))
        .await
        .unwrap_err();
    match err {
        A2AError::EmptyResult { request_id } => assert_eq!(request_id, "req-1"),
        other => panic!("expected EmptyResult, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stream_delivers_events_before_body_ends() {
    let (base_url, _log) = start_test_agent().await;
    let transport = JsonRpcTransport::new(format!("{}/slow", base_url));

    let mut stream = transport
        .send_stream(&request("tasks/send/stream", json!({"id": "t-slow"})))
        .await
        .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("first event should arrive while the body is still open")
        .unwrap()
        .unwrap();
    assert_eq!(first.task_id(), "t-slow");
    assert_eq!(stream.state(), StreamState::Streaming);

    stream.cancel();
    assert_eq!(stream.state(), StreamState::Canceled);
}

#[tokio::test]
async fn test_stream_timeout_surfaces_as_transport_error() {
    let (base_url, _log) = start_test_agent().await;
    let config = TransportConfig {
        stream_timeout: Some(Duration::from_millis(300)),
        ..Default::default()
    };
    let transport = JsonRpcTransport::with_config(format!("{}/slow", base_url), config).unwrap();

    let mut stream = transport
        .send_stream(&request("tasks/send/stream", json!({"id": "t-slow"})))
        .await
        .unwrap();

    assert!(stream.next().await.unwrap().is_ok());
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, A2AError::Transport(_)));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_resubscribe_round_trip() {
    let (base_url, log) = start_test_agent().await;
    let client = A2AClient::from_url(&format!("{}/rpc", base_url)).unwrap();

    let mut stream = client.resubscribe_task("t-3", None).await.unwrap();
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.task_id(), "t-3");
    assert_eq!(log.methods.lock().unwrap().as_slice(), ["tasks/resubscribe"]);
}

// ============================================================================
// Agent card discovery
// ============================================================================

#[tokio::test]
async fn test_resolve_card_and_client() {
    let (base_url, log) = start_test_agent().await;

    let card = CardResolver::new().resolve(&base_url).await.unwrap();
    assert_eq!(card.name, "Test Echo Agent");
    assert_eq!(card.url, format!("{}/rpc", base_url));
    assert_eq!(card.capabilities.unwrap().streaming, Some(true));

    let client = A2AClient::resolve(&format!("{}/", base_url)).await.unwrap();
    assert_eq!(client.url(), format!("{}/rpc", base_url));
    client.send_text("via card").await.unwrap();
    assert_eq!(log.methods.lock().unwrap().as_slice(), ["tasks/send"]);
}

#[tokio::test]
async fn test_resolve_missing_card_is_http_error() {
    let (base_url, _log) = start_test_agent().await;

    let err = CardResolver::new()
        .with_card_path("/nope.json")
        .resolve(&base_url)
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_builder_resolve_rejects_unusable_base_url() {
    for bad in ["", "   ", "/agent", "agent.local:8080", "ftp://agent.local"] {
        let err = ClientBuilder::new(bad).resolve().await.unwrap_err();
        assert!(
            matches!(err, A2AError::Configuration(_)),
            "{bad:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_builder_resolve_sends_configured_headers_to_card() {
    let (base_url, log) = start_test_agent().await;

    let client = ClientBuilder::new(&base_url)
        .with_header("X-Test-Header", "hello")
        .resolve()
        .await
        .unwrap();
    client.get_task("t1", TaskQueryOptions::default()).await.unwrap();

    assert_eq!(
        log.card_headers.lock().unwrap().as_slice(),
        [Some("hello".to_string())]
    );
    assert_eq!(
        log.custom_headers.lock().unwrap().as_slice(),
        [Some("hello".to_string())]
    );
}

#[tokio::test]
async fn test_builder_resolve() {
    let (base_url, _log) = start_test_agent().await;

    let client = ClientBuilder::new(&base_url)
        .with_connect_timeout(Duration::from_secs(5))
        .resolve()
        .await
        .unwrap();
    let task = client.send_text("hello").await.unwrap();
    assert_eq!(task.status.state, TaskState::Completed);
}
