//! Well-known paths and JSON-RPC method names of the A2A task protocol.

/// The well-known path for the agent card.
pub const AGENT_CARD_WELL_KNOWN_PATH: &str = "/.well-known/agent.json";

/// Send a message, creating or continuing a task.
pub const METHOD_TASKS_SEND: &str = "tasks/send";

/// Send a message and stream task events back over SSE.
pub const METHOD_TASKS_SEND_STREAM: &str = "tasks/send/stream";

/// Fetch a task snapshot.
pub const METHOD_TASKS_GET: &str = "tasks/get";

/// Cancel a task.
pub const METHOD_TASKS_CANCEL: &str = "tasks/cancel";

/// Re-open the event stream of an existing task.
pub const METHOD_TASKS_RESUBSCRIBE: &str = "tasks/resubscribe";
