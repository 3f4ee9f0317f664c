//! Utility functions for creating and handling A2A Message objects.

use crate::types::{Message, Metadata, Part, Role};
use crate::utils::parts::get_text_parts;

/// Creates a new Message from a role and an ordered list of Parts.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::{Part, Role};
/// use a2a_task_client::utils::new_message;
///
/// let message = new_message(Role::User, vec![Part::text("Hi")], None);
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.parts.len(), 1);
/// ```
pub fn new_message(role: Role, parts: Vec<Part>, metadata: Option<Metadata>) -> Message {
    Message {
        role,
        parts,
        metadata,
    }
}

/// Creates a new user message containing a single text Part.
pub fn new_user_text_message(text: impl Into<String>) -> Message {
    new_message(Role::User, vec![Part::text(text)], None)
}

/// Creates a new agent message containing a single text Part.
///
/// # Example
///
/// ```
/// use a2a_task_client::utils::new_agent_text_message;
///
/// let message = new_agent_text_message("Hello, I'm an agent");
/// assert_eq!(message.role, a2a_task_client::types::Role::Agent);
/// ```
pub fn new_agent_text_message(text: impl Into<String>) -> Message {
    new_message(Role::Agent, vec![Part::text(text)], None)
}

/// Extracts and joins all text content from a Message's parts.
///
/// Returns an empty string if the message has no text parts.
///
/// # Example
///
/// ```
/// use a2a_task_client::utils::{new_agent_text_message, get_message_text};
///
/// let message = new_agent_text_message("Hello, world!");
/// assert_eq!(get_message_text(&message, "\n"), "Hello, world!");
/// ```
pub fn get_message_text(message: &Message, delimiter: &str) -> String {
    get_text_parts(&message.parts).join(delimiter)
}
