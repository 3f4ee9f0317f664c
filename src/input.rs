//! Normalization of the message argument accepted by task operations.
//!
//! Callers may hand a task a plain string, a fully formed [`Message`], or a
//! structured object. [`MessageInput`] captures exactly those three shapes;
//! anything else is rejected when converting from a JSON value.

use serde_json::Value;

use crate::error::{A2AError, A2AResult};
use crate::types::{Message, Metadata, Part, Role};

/// The accepted shapes of a task's input message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageInput {
    /// Sent as a user message with a single text part.
    Text(String),
    /// Sent unchanged.
    Message(Message),
    /// Sent as a user message with a single data part.
    Data(Metadata),
}

impl MessageInput {
    /// Convert into the canonical [`Message`] sent on the wire.
    pub fn into_message(self) -> Message {
        match self {
            MessageInput::Text(text) => Message {
                role: Role::User,
                parts: vec![Part::text(text)],
                metadata: None,
            },
            MessageInput::Message(message) => message,
            MessageInput::Data(data) => Message {
                role: Role::User,
                parts: vec![Part::data(data)],
                metadata: None,
            },
        }
    }
}

impl From<String> for MessageInput {
    fn from(text: String) -> Self {
        MessageInput::Text(text)
    }
}

impl From<&str> for MessageInput {
    fn from(text: &str) -> Self {
        MessageInput::Text(text.to_string())
    }
}

impl From<Message> for MessageInput {
    fn from(message: Message) -> Self {
        MessageInput::Message(message)
    }
}

impl From<Metadata> for MessageInput {
    fn from(data: Metadata) -> Self {
        MessageInput::Data(data)
    }
}

impl TryFrom<Value> for MessageInput {
    type Error = A2AError;

    /// Classify an arbitrary JSON value.
    ///
    /// - string → [`MessageInput::Text`]
    /// - object with both `role` and `parts` → [`MessageInput::Message`]
    /// - any other object → [`MessageInput::Data`]
    /// - number, boolean, null, array → [`A2AError::UnsupportedInput`]
    fn try_from(value: Value) -> A2AResult<Self> {
        match value {
            Value::String(text) => Ok(MessageInput::Text(text)),
            Value::Object(map) if map.contains_key("role") && map.contains_key("parts") => {
                let message = serde_json::from_value(Value::Object(map)).map_err(|e| {
                    A2AError::UnsupportedInput(format!("object looks like a message but is not one: {e}"))
                })?;
                Ok(MessageInput::Message(message))
            }
            Value::Object(map) => Ok(MessageInput::Data(map)),
            other => Err(A2AError::UnsupportedInput(format!(
                "cannot build a message from a JSON {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
