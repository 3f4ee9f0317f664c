//! Transport layer for A2A client communication.
//!
//! Provides the `Transport` trait for abstracting over how JSON-RPC envelopes
//! reach the agent, and `JsonRpcTransport` for the standard binding: HTTP POST
//! to a single endpoint, with SSE for streamed responses.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcRequest, JsonRpcResponse};

use super::sse::TaskEventStream;

/// Transport abstraction for A2A communication.
///
/// Implementations deliver a JSON-RPC request and hand back either the
/// response envelope verbatim or a stream of task events. Interpreting
/// `result` / `error` is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON-RPC request and receive a JSON-RPC response.
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse>;

    /// Send a JSON-RPC request and receive a task event stream.
    ///
    /// Used for `tasks/send/stream` and `tasks/resubscribe`. Must fail with
    /// [`A2AError::Http`] before returning a stream if the server rejects
    /// the request, and with the agent's JSON-RPC error if it answers with
    /// a plain JSON-RPC response instead of an event stream.
    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<TaskEventStream>;
}

/// Configuration for [`JsonRpcTransport`].
///
/// Every timeout defaults to `None`, meaning no limit beyond what the
/// operating system imposes. A timeout that fires surfaces as
/// [`A2AError::Transport`]. Nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Upper bound on a whole synchronous call, from connect to body read.
    pub request_timeout: Option<Duration>,
    /// Upper bound on a whole streamed call, including the time spent
    /// reading events.
    pub stream_timeout: Option<Duration>,
    /// Upper bound on establishing the TCP/TLS connection.
    pub connect_timeout: Option<Duration>,
    /// Additional HTTP headers to include on every request.
    pub headers: HashMap<String, String>,
}

/// JSON-RPC over HTTP transport using `reqwest`.
///
/// Synchronous calls POST with `Content-Type: application/json` and parse the
/// body as a JSON-RPC response. Streaming calls additionally send
/// `Accept: text/event-stream` and expose the body as a [`TaskEventStream`].
///
/// # Example
///
/// ```no_run
/// use a2a_task_client::client::JsonRpcTransport;
///
/// let transport = JsonRpcTransport::new("http://localhost:10000");
/// assert_eq!(transport.url(), "http://localhost:10000");
/// ```
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    client: reqwest::Client,
    url: String,
    request_timeout: Option<Duration>,
    stream_timeout: Option<Duration>,
}

impl JsonRpcTransport {
    /// Create a new transport targeting the given endpoint URL, with default
    /// configuration.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a new transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Configuration`] if a header name or value is not
    /// valid HTTP, or if the HTTP client cannot be built.
    pub fn with_config(url: impl Into<String>, config: TransportConfig) -> A2AResult<Self> {
        let client = build_http_client(&config)?;

        Ok(Self {
            client,
            url: url.into(),
            request_timeout: config.request_timeout,
            stream_timeout: config.stream_timeout,
        })
    }

    /// Create a new transport with an existing `reqwest::Client`.
    ///
    /// Useful when you want to share a connection pool or configure TLS
    /// settings externally.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.into(),
            request_timeout: None,
            stream_timeout: None,
        }
    }

    /// Returns the URL this transport sends requests to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, request: &JsonRpcRequest) -> A2AResult<reqwest::RequestBuilder> {
        let body = serde_json::to_vec(request).map_err(|e| {
            A2AError::JsonParse(format!("failed to serialize JSON-RPC request: {e}"))
        })?;
        Ok(self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body))
    }
}

#[async_trait]
impl Transport for JsonRpcTransport {
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        let mut builder = self.post(request)?;
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(request_error)?;
        check_status(&response, &request.method)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| A2AError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            A2AError::JsonParse(format!("failed to parse JSON-RPC response: {e}"))
        })
    }

    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<TaskEventStream> {
        let mut builder = self.post(request)?.header(ACCEPT, "text/event-stream");
        if let Some(timeout) = self.stream_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(request_error)?;
        check_status(&response, &request.method)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(content_type) = content_type.filter(|ct| !is_event_stream(ct)) {
            return Err(non_stream_response(response, request, &content_type).await);
        }

        let body = response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| A2AError::Transport(format!("error reading SSE stream: {e}")))
        });
        Ok(TaskEventStream::from_byte_stream(body))
    }
}

/// Build a `reqwest::Client` carrying the configured default headers and
/// connect timeout. Per-call timeouts are applied on each request instead.
pub(crate) fn build_http_client(config: &TransportConfig) -> A2AResult<reqwest::Client> {
    let mut default_headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| A2AError::Configuration(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            A2AError::Configuration(format!("invalid value for header '{key}': {e}"))
        })?;
        default_headers.insert(name, value);
    }

    let mut builder = reqwest::Client::builder().default_headers(default_headers);
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    builder
        .build()
        .map_err(|e| A2AError::Configuration(format!("failed to build HTTP client: {e}")))
}

fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("text/event-stream"))
}

/// Turn a 2xx streamed call that came back without an event stream into an
/// error, surfacing any JSON-RPC error the agent sent instead.
async fn non_stream_response(
    response: reqwest::Response,
    request: &JsonRpcRequest,
    content_type: &str,
) -> A2AError {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return A2AError::Transport(format!("failed to read response body: {e}")),
    };
    let parsed: JsonRpcResponse = match serde_json::from_slice(&bytes) {
        Ok(parsed) => parsed,
        Err(e) => {
            return A2AError::JsonParse(format!(
                "expected text/event-stream, got '{content_type}' that is not JSON-RPC: {e}"
            ))
        }
    };

    tracing::debug!(
        method = %request.method,
        %content_type,
        "agent answered streamed call without an event stream"
    );
    match (parsed.error, parsed.result) {
        (Some(error), _) => error.into(),
        (None, None) => A2AError::EmptyResult {
            request_id: request.id.to_string(),
        },
        (None, Some(_)) => A2AError::JsonParse(format!(
            "expected text/event-stream, got a single JSON-RPC result as '{content_type}'"
        )),
    }
}

/// Map a failed `send()` to a transport error, keeping the cause.
fn request_error(e: reqwest::Error) -> A2AError {
    if e.is_timeout() {
        A2AError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        A2AError::Transport(format!("connection failed: {e}"))
    } else {
        A2AError::Transport(format!("HTTP request failed: {e}"))
    }
}

fn check_status(response: &reqwest::Response, method: &str) -> A2AResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    tracing::debug!(%method, status = status.as_u16(), "agent returned HTTP error");
    Err(A2AError::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    })
}
