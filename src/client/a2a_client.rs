//! High-level client for submitting tasks to a remote agent.
//!
//! Every operation targets the single endpoint URL the client was built
//! with, and goes through a [`Transport`].

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::error::{A2AError, A2AResult};
use crate::input::MessageInput;
use crate::types::{
    AgentCard, JsonRpcRequest, JsonRpcResponse, Metadata, Task, TaskIdParams, TaskQueryParams,
    TaskSendParams,
};
use crate::utils::constants::{
    METHOD_TASKS_CANCEL, METHOD_TASKS_GET, METHOD_TASKS_RESUBSCRIBE, METHOD_TASKS_SEND,
    METHOD_TASKS_SEND_STREAM,
};

use super::card_resolver::CardResolver;
use super::sse::TaskEventStream;
use super::transport::{build_http_client, JsonRpcTransport, Transport, TransportConfig};

/// Optional fields for `tasks/send` and `tasks/send/stream`.
///
/// Missing `id` / `session_id` are generated as fresh UUID v4 strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSendOptions {
    pub id: Option<String>,
    pub session_id: Option<String>,
    pub history_length: Option<u32>,
    pub metadata: Option<Metadata>,
}

impl TaskSendOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_history_length(mut self, history_length: u32) -> Self {
        self.history_length = Some(history_length);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Optional fields for `tasks/get`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQueryOptions {
    pub history_length: Option<u32>,
    pub metadata: Option<Metadata>,
}

impl TaskQueryOptions {
    pub fn with_history_length(mut self, history_length: u32) -> Self {
        self.history_length = Some(history_length);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Client for a single A2A agent endpoint.
///
/// Provides typed methods for the task methods of the protocol:
/// - `tasks/send`: submit a message and get the task snapshot back
/// - `tasks/send/stream`: submit a message and stream status/artifact events
/// - `tasks/get`: fetch a task snapshot
/// - `tasks/cancel`: ask the agent to cancel a task
/// - `tasks/resubscribe`: re-open the event stream of a running task
///
/// The client holds no task state. Calls are independent and the client can
/// be shared across tasks (`A2AClient: Send + Sync`).
///
/// # Construction
///
/// ```no_run
/// use a2a_task_client::client::{A2AClient, JsonRpcTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Straight to a known endpoint:
/// let client = A2AClient::from_url("http://localhost:10000")?;
///
/// // Via the agent card at /.well-known/agent.json:
/// let client = A2AClient::resolve("http://localhost:10000").await?;
///
/// // With a custom transport:
/// let transport = JsonRpcTransport::new("http://localhost:10000");
/// let client = A2AClient::with_transport("http://localhost:10000", Box::new(transport))?;
/// # Ok(())
/// # }
/// ```
pub struct A2AClient {
    transport: Box<dyn Transport>,
    url: String,
    last_request_id: Mutex<Option<String>>,
}

impl std::fmt::Debug for A2AClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("A2AClient")
            .field("url", &self.url)
            .field("last_request_id", &self.last_request_id())
            .finish_non_exhaustive()
    }
}

impl A2AClient {
    /// Create a client for an endpoint URL with the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Configuration`] if the URL is blank or is not an
    /// absolute `http`/`https` URL.
    pub fn from_url(url: &str) -> A2AResult<Self> {
        let url = validate_url(url)?;
        let transport = JsonRpcTransport::new(url.clone());
        Ok(Self::new_unchecked(url, Box::new(transport)))
    }

    /// Like [`from_url`](Self::from_url), with timeouts and default headers.
    pub fn from_url_with_config(url: &str, config: TransportConfig) -> A2AResult<Self> {
        let url = validate_url(url)?;
        let transport = JsonRpcTransport::with_config(url.clone(), config)?;
        Ok(Self::new_unchecked(url, Box::new(transport)))
    }

    /// Create a client for the endpoint advertised by an agent card.
    pub fn from_card(card: &AgentCard) -> A2AResult<Self> {
        Self::from_url(&card.url)
    }

    /// Fetch the agent card from `{base_url}/.well-known/agent.json` and
    /// build a client for the endpoint it advertises.
    ///
    /// # Errors
    ///
    /// Anything [`CardResolver::resolve`] returns, plus
    /// [`A2AError::Configuration`] if the card's URL is unusable.
    pub async fn resolve(base_url: &str) -> A2AResult<Self> {
        Self::resolve_with_config(base_url, TransportConfig::default()).await
    }

    /// Like [`resolve`](Self::resolve), with timeouts and default headers.
    ///
    /// The card is fetched with the same headers and connect timeout that
    /// the resulting client uses for task calls.
    pub async fn resolve_with_config(base_url: &str, config: TransportConfig) -> A2AResult<Self> {
        let base_url = validate_url(base_url)?;
        let resolver = CardResolver::with_client(build_http_client(&config)?);
        let card = resolver.resolve(&base_url).await?;
        Self::from_url_with_config(&card.url, config)
    }

    /// Create a client over a custom transport.
    ///
    /// `base_url` is still validated; it is what [`url`](Self::url) reports.
    pub fn with_transport(base_url: &str, transport: Box<dyn Transport>) -> A2AResult<Self> {
        let url = validate_url(base_url)?;
        Ok(Self::new_unchecked(url, transport))
    }

    fn new_unchecked(url: String, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            url,
            last_request_id: Mutex::new(None),
        }
    }

    /// The endpoint every operation targets.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// ID of the most recently issued JSON-RPC request, if any.
    ///
    /// Diagnostic only: under concurrent use it reflects whichever call
    /// generated its id last.
    pub fn last_request_id(&self) -> Option<String> {
        self.last_request_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ──────────────────────────────────────────────────
    // Task methods
    // ──────────────────────────────────────────────────

    /// Submit a message as a task (`tasks/send`) and return the task snapshot.
    ///
    /// # Errors
    ///
    /// - [`A2AError::Protocol`] if the agent answers with a JSON-RPC error
    /// - [`A2AError::EmptyResult`] if the answer has neither result nor error
    /// - transport, HTTP and parse errors from the transport
    pub async fn send_task(
        &self,
        message: impl Into<MessageInput>,
        options: TaskSendOptions,
    ) -> A2AResult<Task> {
        let params = send_params(message.into(), options);
        let (request, request_id) = self.build_request(METHOD_TASKS_SEND, &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response, &request_id)
    }

    /// Submit a message as a task and stream its events (`tasks/send/stream`).
    ///
    /// The stream ends when the agent closes the body; check
    /// [`TaskEvent::is_final`](crate::types::TaskEvent::is_final) to spot the
    /// last status update.
    pub async fn send_task_streaming(
        &self,
        message: impl Into<MessageInput>,
        options: TaskSendOptions,
    ) -> A2AResult<TaskEventStream> {
        let params = send_params(message.into(), options);
        let (request, _) = self.build_request(METHOD_TASKS_SEND_STREAM, &params)?;
        self.transport.send_stream(&request).await
    }

    /// Fetch a task snapshot (`tasks/get`).
    pub async fn get_task(&self, id: &str, options: TaskQueryOptions) -> A2AResult<Task> {
        let params = TaskQueryParams {
            id: id.to_string(),
            history_length: options.history_length,
            metadata: options.metadata,
        };
        let (request, request_id) = self.build_request(METHOD_TASKS_GET, &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response, &request_id)
    }

    /// Ask the agent to cancel a task (`tasks/cancel`).
    pub async fn cancel_task(&self, id: &str, metadata: Option<Metadata>) -> A2AResult<Task> {
        let params = TaskIdParams {
            id: id.to_string(),
            metadata,
        };
        let (request, request_id) = self.build_request(METHOD_TASKS_CANCEL, &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response, &request_id)
    }

    /// Re-open the event stream of an existing task (`tasks/resubscribe`).
    ///
    /// Streams are never reconnected automatically; this is the way back in
    /// after one drops.
    pub async fn resubscribe_task(
        &self,
        id: &str,
        metadata: Option<Metadata>,
    ) -> A2AResult<TaskEventStream> {
        let params = TaskIdParams {
            id: id.to_string(),
            metadata,
        };
        let (request, _) = self.build_request(METHOD_TASKS_RESUBSCRIBE, &params)?;
        self.transport.send_stream(&request).await
    }

    /// Convenience: send a text message as a new task.
    pub async fn send_text(&self, text: &str) -> A2AResult<Task> {
        self.send_task(text, TaskSendOptions::default()).await
    }

    /// Build a JSON-RPC request with a fresh UUID id and record that id.
    fn build_request(
        &self,
        method: &str,
        params: &impl Serialize,
    ) -> A2AResult<(JsonRpcRequest, String)> {
        let params = serde_json::to_value(params).map_err(|e| {
            A2AError::JsonParse(format!("failed to serialize request params: {e}"))
        })?;
        let request_id = new_id();
        *self
            .last_request_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request_id.clone());

        tracing::debug!(%method, %request_id, url = %self.url, "sending A2A request");
        Ok((
            JsonRpcRequest::new(request_id.as_str(), method, params),
            request_id,
        ))
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn send_params(message: MessageInput, options: TaskSendOptions) -> TaskSendParams {
    TaskSendParams {
        id: options.id.unwrap_or_else(new_id),
        session_id: options.session_id.unwrap_or_else(new_id),
        message: message.into_message(),
        history_length: options.history_length,
        metadata: options.metadata,
    }
}

/// Reject blank, relative and non-http(s) URLs.
fn validate_url(url: &str) -> A2AResult<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(A2AError::Configuration(
            "agent URL must not be empty".to_string(),
        ));
    }
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| A2AError::Configuration(format!("invalid agent URL '{trimmed}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(A2AError::Configuration(format!(
            "unsupported URL scheme '{other}' in '{trimmed}'"
        ))),
    }
}

/// Interpret a JSON-RPC response as the expected result type.
fn parse_result<T: serde::de::DeserializeOwned>(
    response: JsonRpcResponse,
    request_id: &str,
) -> A2AResult<T> {
    if let Some(error) = response.error {
        tracing::debug!(%request_id, code = error.code, "agent returned JSON-RPC error");
        return Err(error.into());
    }

    let result = response.result.ok_or_else(|| A2AError::EmptyResult {
        request_id: request_id.to_string(),
    })?;

    serde_json::from_value(result)
        .map_err(|e| A2AError::JsonParse(format!("failed to deserialize response result: {e}")))
}
