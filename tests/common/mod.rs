//! Shared test utilities for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use a2a_task_client::builders::AgentCardBuilder;
use a2a_task_client::client::{TaskEventStream, Transport};
use a2a_task_client::error::{A2AError, A2AResult};
use a2a_task_client::types::*;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures::Stream;
use serde_json::{json, Value};

/// Route library logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Mock transport
// ============================================================================

/// In-memory SSE body that records how far it was read and when it was dropped.
pub struct MockBody {
    chunks: VecDeque<A2AResult<Bytes>>,
    chunks_read: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl MockBody {
    pub fn new(
        chunks: Vec<A2AResult<Bytes>>,
        chunks_read: Arc<AtomicUsize>,
        closed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            chunks: chunks.into(),
            chunks_read,
            closed,
        }
    }
}

impl Stream for MockBody {
    type Item = A2AResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let next = self.chunks.pop_front();
        if next.is_some() {
            self.chunks_read.fetch_add(1, Ordering::SeqCst);
        }
        Poll::Ready(next)
    }
}

impl Drop for MockBody {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Observation handles for a [`MockBody`].
#[derive(Clone, Default)]
pub struct BodyProbe {
    pub chunks_read: Arc<AtomicUsize>,
    pub closed: Arc<AtomicBool>,
}

impl BodyProbe {
    pub fn chunks_read(&self) -> usize {
        self.chunks_read.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Build a [`TaskEventStream`] over in-memory chunks, plus a probe to watch it.
pub fn mock_event_stream<I, B>(chunks: I) -> (TaskEventStream, BodyProbe)
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    let chunks = chunks.into_iter().map(|c| Ok(c.into())).collect();
    mock_event_stream_with_results(chunks)
}

/// Like [`mock_event_stream`], but chunks may be errors.
pub fn mock_event_stream_with_results(chunks: Vec<A2AResult<Bytes>>) -> (TaskEventStream, BodyProbe) {
    let probe = BodyProbe::default();
    let body = MockBody::new(chunks, probe.chunks_read.clone(), probe.closed.clone());
    (TaskEventStream::from_byte_stream(body), probe)
}

/// Records requests and returns preconfigured responses.
pub struct MockTransport {
    pub requests: Arc<Mutex<Vec<JsonRpcRequest>>>,
    response: JsonRpcResponse,
    stream_chunks: Vec<Bytes>,
    pub probe: BodyProbe,
}

impl MockTransport {
    pub fn with_response(response: JsonRpcResponse) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response,
            stream_chunks: Vec::new(),
            probe: BodyProbe::default(),
        }
    }

    pub fn with_result(result: Value) -> Self {
        Self::with_response(JsonRpcResponse::success("mock", result))
    }

    pub fn with_error(code: i64, message: &str) -> Self {
        Self::with_response(JsonRpcResponse::error(
            "mock",
            JsonRpcError {
                code,
                message: message.to_string(),
                data: None,
            },
        ))
    }

    /// A response carrying neither `result` nor `error`.
    pub fn empty() -> Self {
        Self::with_response(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: Some(JsonRpcId::from("mock")),
            result: None,
            error: None,
        })
    }

    pub fn with_stream<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let mut transport = Self::empty();
        transport.stream_chunks = chunks.into_iter().map(Into::into).collect();
        transport
    }

    pub fn recorder(&self) -> Arc<Mutex<Vec<JsonRpcRequest>>> {
        self.requests.clone()
    }

    fn record(&self, request: &JsonRpcRequest) {
        self.requests.lock().unwrap().push(request.clone());
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        self.record(request);
        Ok(self.response.clone())
    }

    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<TaskEventStream> {
        self.record(request);
        let chunks = self.stream_chunks.iter().cloned().map(Ok).collect();
        let body = MockBody::new(
            chunks,
            self.probe.chunks_read.clone(),
            self.probe.closed.clone(),
        );
        Ok(TaskEventStream::from_byte_stream(body))
    }
}

/// A transport that always fails at the network level.
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn send(&self, _request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        Err(A2AError::Transport("connection refused".to_string()))
    }

    async fn send_stream(&self, _request: &JsonRpcRequest) -> A2AResult<TaskEventStream> {
        Err(A2AError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn task_json(id: &str, state: &str) -> Value {
    json!({
        "id": id,
        "sessionId": "s1",
        "status": {"state": state, "timestamp": "2025-01-01T00:00:00.000Z"}
    })
}

/// An SSE frame carrying a status update wrapped in a JSON-RPC response.
pub fn status_frame(task_id: &str, state: &str, is_final: bool) -> String {
    sse_frame(&json!({
        "jsonrpc": "2.0",
        "id": "req-1",
        "result": {"id": task_id, "status": {"state": state}, "final": is_final}
    }))
}

/// An SSE frame carrying an artifact update with one text part.
pub fn artifact_frame(task_id: &str, text: &str) -> String {
    sse_frame(&json!({
        "jsonrpc": "2.0",
        "id": "req-1",
        "result": {
            "id": task_id,
            "artifact": {"name": "output", "parts": [{"type": "text", "text": text}], "index": 0}
        }
    }))
}

pub fn sse_frame(payload: &Value) -> String {
    format!("data: {}\n\n", payload)
}

// ============================================================================
// In-process HTTP agent
// ============================================================================

/// What the test agent saw, for assertions.
#[derive(Default)]
pub struct AgentLog {
    pub methods: Mutex<Vec<String>>,
    pub accept_headers: Mutex<Vec<Option<String>>>,
    pub custom_headers: Mutex<Vec<Option<String>>>,
    pub card_headers: Mutex<Vec<Option<String>>>,
}

pub fn test_agent_card(url: &str) -> AgentCard {
    AgentCardBuilder::new("Test Echo Agent", url, "0.1.0")
        .with_description("An echo agent for testing")
        .with_streaming(true)
        .with_skill("echo", "Echo", Some("Echoes back messages"))
        .build()
}

/// Start a test agent on a random port. Returns the base URL and the request log.
///
/// Routes:
/// - `POST /rpc`: answers task methods; streams for `tasks/send/stream` and
///   `tasks/resubscribe`
/// - `POST /slow`: streams one event, then stalls
/// - `POST /fail`: always 500
/// - `POST /garbage`: 200 with a non-JSON body
/// - `POST /jsonerror`: 200 `application/json` JSON-RPC error, whatever the method
/// - `POST /jsonempty`: 200 `application/json` response with neither result nor error
/// - `GET /.well-known/agent.json`: agent card pointing at `/rpc`
pub async fn start_test_agent() -> (String, Arc<AgentLog>) {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let log = Arc::new(AgentLog::default());
    let card = test_agent_card(&format!("{}/rpc", base_url));

    let app = Router::new()
        .route("/rpc", post(rpc_handler))
        .route("/slow", post(slow_stream_handler))
        .route("/fail", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/garbage", post(|| async { "this is not json" }))
        .route("/jsonerror", post(json_error_handler))
        .route(
            "/jsonempty",
            post(|Json(request): Json<JsonRpcRequest>| async move {
                Json(json!({"jsonrpc": "2.0", "id": request.id}))
            }),
        )
        .route(
            "/.well-known/agent.json",
            get(move |State(log): State<Arc<AgentLog>>, headers: HeaderMap| {
                let card = card.clone();
                async move {
                    log.card_headers.lock().unwrap().push(
                        headers
                            .get("x-test-header")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                    );
                    Json(card)
                }
            }),
        )
        .with_state(log.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, log)
}

async fn rpc_handler(
    State(log): State<Arc<AgentLog>>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    log.methods.lock().unwrap().push(request.method.clone());
    log.accept_headers
        .lock()
        .unwrap()
        .push(header_value(header::ACCEPT.as_str()));
    log.custom_headers
        .lock()
        .unwrap()
        .push(header_value("x-test-header"));

    let task_id = request.params["id"].as_str().unwrap_or("unknown").to_string();

    match request.method.as_str() {
        "tasks/send" => {
            let text = request.params["message"]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default();
            let mut task = task_json(&task_id, "completed");
            task["sessionId"] = request.params["sessionId"].clone();
            task["artifacts"] = json!([{
                "parts": [{"type": "text", "text": format!("Echo: {}", text)}]
            }]);
            Json(JsonRpcResponse::success(request.id, task)).into_response()
        }
        "tasks/get" => Json(JsonRpcResponse::success(
            request.id,
            task_json(&task_id, "working"),
        ))
        .into_response(),
        "tasks/cancel" => Json(JsonRpcResponse::error(
            request.id,
            JsonRpcError {
                code: -32002,
                message: "Task cannot be canceled".to_string(),
                data: None,
            },
        ))
        .into_response(),
        "tasks/send/stream" | "tasks/resubscribe" => {
            let body = [
                ": keep-alive\n\n".to_string(),
                status_frame(&task_id, "working", false),
                artifact_frame(&task_id, "partial"),
                status_frame(&task_id, "completed", true),
            ]
            .concat();
            ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        _ => Json(JsonRpcResponse::error(
            request.id,
            JsonRpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: None,
            },
        ))
        .into_response(),
    }
}

async fn json_error_handler(Json(request): Json<JsonRpcRequest>) -> Response {
    Json(JsonRpcResponse::error(
        request.id,
        JsonRpcError {
            code: -32601,
            message: "Method not found".to_string(),
            data: None,
        },
    ))
    .into_response()
}

async fn slow_stream_handler(Json(request): Json<JsonRpcRequest>) -> Response {
    let task_id = request.params["id"].as_str().unwrap_or("unknown").to_string();
    let body = async_stream::stream! {
        yield Ok::<_, std::convert::Infallible>(status_frame(&task_id, "working", false));
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        yield Ok(status_frame(&task_id, "completed", true));
    };
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        axum::body::Body::from_stream(body),
    )
        .into_response()
}
