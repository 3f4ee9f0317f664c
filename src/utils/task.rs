//! Utility functions for task statuses.

use chrono::{SecondsFormat, Utc};

use crate::types::{Message, Task, TaskState, TaskStatus};
use crate::utils::message::get_message_text;

/// Creates a TaskStatus stamped with the current UTC time.
///
/// The timestamp is ISO-8601 / RFC 3339 with millisecond precision, e.g.
/// `2024-05-01T12:30:00.123Z`.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::TaskState;
/// use a2a_task_client::utils::new_task_status;
///
/// let status = new_task_status(TaskState::Working, None);
/// assert!(status.timestamp.is_some());
/// ```
pub fn new_task_status(state: TaskState, message: Option<Message>) -> TaskStatus {
    TaskStatus {
        state,
        message,
        timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

/// Joins the text of a status message, if the status carries one.
pub fn get_status_text(status: &TaskStatus, delimiter: &str) -> Option<String> {
    status
        .message
        .as_ref()
        .map(|message| get_message_text(message, delimiter))
}

/// Joins the text of every artifact of a task, in artifact order.
pub fn get_task_artifact_text(task: &Task, delimiter: &str) -> String {
    task.artifacts
        .iter()
        .flatten()
        .map(|artifact| crate::utils::get_artifact_text(artifact, delimiter))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}
