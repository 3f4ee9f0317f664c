//! A2A client error types: JSON-RPC error codes and the client error taxonomy.
//!
//! Every failure surfaced by this crate is an [`A2AError`]. The variants
//! separate local mistakes (construction, configuration, unsupported input)
//! from network failures (transport, HTTP status) and from protocol-level
//! failures (unparseable payloads, JSON-RPC errors, empty responses).

use crate::types::JsonRpcError;

// ---------------------------------------------------------------------------
// Standard JSON-RPC 2.0 error codes
// ---------------------------------------------------------------------------

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i64 = -32700;

/// The JSON sent is not a valid Request object.
pub const INVALID_REQUEST: i64 = -32600;

/// The method does not exist / is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Invalid method parameter(s).
pub const INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;

// ---------------------------------------------------------------------------
// A2A task protocol error codes
// ---------------------------------------------------------------------------

/// The requested task was not found.
pub const TASK_NOT_FOUND: i64 = -32001;

/// The task cannot be canceled in its current state.
pub const TASK_NOT_CANCELABLE: i64 = -32002;

/// Push notifications are not supported by this agent.
pub const PUSH_NOTIFICATION_NOT_SUPPORTED: i64 = -32003;

/// The requested operation is not supported.
pub const UNSUPPORTED_OPERATION: i64 = -32004;

// ---------------------------------------------------------------------------
// A2AError enum
// ---------------------------------------------------------------------------

/// Unified error type for the A2A client.
///
/// Nothing in the crate retries or swallows these: each one is returned to
/// the caller of the failing operation, or yielded as the last item of a
/// task event stream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum A2AError {
    // -- Local errors (raised before anything touches the network) --
    /// A builder was given invalid input (e.g. a file part with neither
    /// `bytes` nor `uri`).
    #[error("Construction error: {0}")]
    Construction(String),

    /// The client could not be configured with a usable endpoint URL.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A message input could not be normalized into a [`Message`](crate::types::Message).
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    // -- Network errors --
    /// Network-level failure: DNS, connection refused, timeout, or a stream
    /// aborted mid-read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    // -- Protocol errors --
    /// A response body or SSE frame payload was not valid JSON, or did not
    /// match the expected shape.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The JSON-RPC response carried an `error` object.
    #[error("JSON-RPC error {code}: {message}")]
    Protocol {
        /// JSON-RPC error code.
        code: i64,
        /// Error message supplied by the server.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    /// The JSON-RPC response carried neither `result` nor `error`.
    #[error("JSON-RPC response to request {request_id} has neither 'result' nor 'error'")]
    EmptyResult {
        /// ID of the request that received the empty response.
        request_id: String,
    },
}

/// Convenience result type for A2A operations.
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    /// Returns the JSON-RPC error code for [`A2AError::Protocol`] errors.
    pub fn code(&self) -> Option<i64> {
        match self {
            A2AError::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` for failures that happened below the JSON-RPC layer
    /// (network failures and non-success HTTP statuses).
    pub fn is_network(&self) -> bool {
        matches!(self, A2AError::Transport(_) | A2AError::Http { .. })
    }

    /// Returns a short, human-readable description of the error kind.
    pub fn default_message(&self) -> &str {
        match self {
            A2AError::Construction(_) => "Invalid builder input",
            A2AError::Configuration(_) => "Client is not configured with a usable URL",
            A2AError::UnsupportedInput(_) => "Unsupported message input",
            A2AError::Transport(_) => "Transport error",
            A2AError::Http { .. } => "HTTP error",
            A2AError::JsonParse(_) => "Invalid JSON",
            A2AError::Protocol { code, .. } => match *code {
                PARSE_ERROR => "Invalid JSON payload",
                INVALID_REQUEST => "Request payload validation error",
                METHOD_NOT_FOUND => "Method not found",
                INVALID_PARAMS => "Invalid parameters",
                INTERNAL_ERROR => "Internal error",
                TASK_NOT_FOUND => "Task not found",
                TASK_NOT_CANCELABLE => "Task cannot be canceled",
                PUSH_NOTIFICATION_NOT_SUPPORTED => "Push Notification is not supported",
                UNSUPPORTED_OPERATION => "This operation is not supported",
                _ => "JSON-RPC error",
            },
            A2AError::EmptyResult { .. } => "Empty JSON-RPC response",
        }
    }
}

impl From<JsonRpcError> for A2AError {
    fn from(err: JsonRpcError) -> Self {
        A2AError::Protocol {
            code: err.code,
            message: err.message,
            data: err.data,
        }
    }
}

impl From<serde_json::Error> for A2AError {
    fn from(err: serde_json::Error) -> Self {
        A2AError::JsonParse(err.to_string())
    }
}
