//! # a2a-task-client: Rust client for A2A task endpoints
//!
//! Submits tasks to remote agents speaking the Agent-to-Agent (A2A) task
//! protocol: JSON-RPC 2.0 over HTTP POST, with Server-Sent Events for
//! streamed task updates.
//!
//! This crate provides:
//! - **Wire types** for tasks, messages, parts, artifacts and streaming
//!   events ([`types`])
//! - **Helpers** to build and read those types ([`utils`])
//! - **Client** for calling a remote agent ([`client::A2AClient`])
//! - **Builders** for agent cards and configured clients ([`AgentCardBuilder`], [`ClientBuilder`])
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `client` | yes     | HTTP client for calling agents (reqwest + SSE) |
//!
//! Without `client`, only the types, helpers, errors and [`AgentCardBuilder`]
//! are compiled.
//!
//! ## Quick Start
//!
//! ```no_run
//! use a2a_task_client::client::{A2AClient, TaskSendOptions};
//! use a2a_task_client::types::TaskEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = A2AClient::from_url("http://localhost:10000")?;
//!
//!     let task = client.send_text("Write a haiku about Rust").await?;
//!     println!("Task: {} (status: {})", task.id, task.status.state);
//!
//!     let mut stream = client
//!         .send_task_streaming("Tell me a story", TaskSendOptions::default())
//!         .await?;
//!     while let Some(event) = stream.next().await {
//!         match event? {
//!             TaskEvent::Status(update) => println!("Status: {}", update.status.state),
//!             TaskEvent::Artifact(update) => println!("Artifact: {:?}", update.artifact.name),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Protocol
//!
//! Supported JSON-RPC methods:
//! - `tasks/send`: send a message and get the task back
//! - `tasks/send/stream`: send a message with SSE streaming
//! - `tasks/get`: retrieve a task by ID
//! - `tasks/cancel`: cancel a running task
//! - `tasks/resubscribe`: reopen a task's event stream
//!
//! Agent cards are discovered at `/.well-known/agent.json`.

pub mod builders;
pub mod error;
pub mod input;
pub mod types;
pub mod utils;

#[cfg(feature = "client")]
pub mod client;

/// Prelude module that re-exports commonly used types.
///
/// ```
/// use a2a_task_client::prelude::*;
///
/// let message = Message::user_text("hi");
/// assert_eq!(message.role, Role::User);
/// ```
pub mod prelude {
    pub use crate::types::{
        AgentCapabilities, AgentCard, AgentSkill, Artifact, FileContent, Message, Metadata, Part,
        Role, Task, TaskArtifactUpdateEvent, TaskEvent, TaskState, TaskStatus,
        TaskStatusUpdateEvent,
    };

    pub use crate::error::{A2AError, A2AResult};
    pub use crate::input::MessageInput;

    pub use crate::builders::AgentCardBuilder;

    #[cfg(feature = "client")]
    pub use crate::builders::ClientBuilder;

    #[cfg(feature = "client")]
    pub use crate::client::{A2AClient, TaskEventStream, TaskQueryOptions, TaskSendOptions};
}

pub use builders::AgentCardBuilder;
pub use error::{A2AError, A2AResult};
pub use input::MessageInput;
pub use types::*;

#[cfg(feature = "client")]
pub use builders::ClientBuilder;
