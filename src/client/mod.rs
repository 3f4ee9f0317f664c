//! A2A client: submit tasks to remote agents.
//!
//! - [`A2AClient`]: typed methods for the task operations (send, stream,
//!   get, cancel, resubscribe)
//! - [`CardResolver`]: discover agent cards via the well-known URL convention
//! - [`Transport`] / [`JsonRpcTransport`]: pluggable transport layer
//! - [`TaskEventStream`]: pull-driven stream of task events decoded from SSE
//!
//! # Quick Start
//!
//! ```no_run
//! use a2a_task_client::client::{A2AClient, TaskSendOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = A2AClient::from_url("http://localhost:10000")?;
//!
//! let task = client.send_task("Hello, agent!", TaskSendOptions::default()).await?;
//! println!("Task {}: {}", task.id, task.status.state);
//!
//! let mut stream = client
//!     .send_task_streaming("Write a haiku", TaskSendOptions::default())
//!     .await?;
//! while let Some(event) = stream.next().await {
//!     let event = event?;
//!     println!("{:?}", event);
//!     if event.is_final() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod a2a_client;
mod card_resolver;
mod sse;
mod transport;

pub use a2a_client::{A2AClient, TaskQueryOptions, TaskSendOptions};
pub use card_resolver::CardResolver;
pub use sse::{ByteStream, SseFrame, SseParser, StreamState, TaskEventStream, Utf8Decoder};
pub use transport::{JsonRpcTransport, Transport, TransportConfig};
