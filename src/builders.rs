//! Builder patterns for ergonomic construction of agent cards and clients.

use crate::types::*;

#[cfg(feature = "client")]
use std::collections::HashMap;
#[cfg(feature = "client")]
use std::time::Duration;

/// Builder for constructing an [`AgentCard`].
///
/// Mostly useful for tests and for agents that serve their own card.
///
/// # Example
///
/// ```
/// use a2a_task_client::builders::AgentCardBuilder;
///
/// let card = AgentCardBuilder::new("Echo", "http://localhost:10000", "1.0.0")
///     .with_description("Repeats what it hears")
///     .with_skill("echo", "Echo", Some("Echo the input"))
///     .with_streaming(true)
///     .build();
/// assert_eq!(card.url, "http://localhost:10000");
/// ```
#[derive(Debug, Clone)]
pub struct AgentCardBuilder {
    name: String,
    url: String,
    version: String,
    description: Option<String>,
    provider: Option<AgentProvider>,
    documentation_url: Option<String>,
    capabilities: Option<AgentCapabilities>,
    default_input_modes: Option<Vec<String>>,
    default_output_modes: Option<Vec<String>>,
    skills: Vec<AgentSkill>,
}

impl AgentCardBuilder {
    /// Create a new builder with the required fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Human-readable agent name
    /// * `url` - Endpoint that accepts JSON-RPC calls
    /// * `version` - Version string (e.g., "1.0.0")
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            version: version.into(),
            description: None,
            provider: None,
            documentation_url: None,
            capabilities: None,
            default_input_modes: None,
            default_output_modes: None,
            skills: Vec::new(),
        }
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the provider information.
    pub fn with_provider(mut self, organization: impl Into<String>, url: Option<String>) -> Self {
        self.provider = Some(AgentProvider {
            organization: organization.into(),
            url,
        });
        self
    }

    /// Set the URL of the agent's documentation.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Declare whether the agent supports `tasks/send/stream`.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.get_or_insert_with(Default::default).streaming = Some(enabled);
        self
    }

    /// Declare whether the agent supports push notifications.
    pub fn with_push_notifications(mut self, enabled: bool) -> Self {
        self.capabilities
            .get_or_insert_with(Default::default)
            .push_notifications = Some(enabled);
        self
    }

    /// Add a skill to the agent card.
    pub fn with_skill(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<&str>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.map(str::to_string),
            examples: None,
        });
        self
    }

    /// Set the default input MIME types.
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = Some(modes);
        self
    }

    /// Set the default output MIME types.
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = Some(modes);
        self
    }

    /// Build the [`AgentCard`].
    pub fn build(self) -> AgentCard {
        AgentCard {
            name: self.name,
            description: self.description,
            url: self.url,
            version: self.version,
            provider: self.provider,
            documentation_url: self.documentation_url,
            capabilities: self.capabilities,
            default_input_modes: self.default_input_modes,
            default_output_modes: self.default_output_modes,
            skills: self.skills,
        }
    }
}

/// Builder for [`crate::client::A2AClient`] with timeouts and headers.
///
/// # Example
///
/// ```no_run
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use a2a_task_client::builders::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new("http://localhost:10000")
///     .with_request_timeout(Duration::from_secs(30))
///     .with_header("X-Tenant", "acme")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "client")]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    request_timeout: Option<Duration>,
    stream_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

#[cfg(feature = "client")]
impl ClientBuilder {
    /// Start from an endpoint URL (or, for [`resolve`](Self::resolve), a base URL).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: None,
            stream_timeout: None,
            connect_timeout: None,
            headers: HashMap::new(),
        }
    }

    /// Start from the endpoint advertised by an agent card.
    pub fn from_card(card: &AgentCard) -> Self {
        Self::new(card.url.clone())
    }

    /// Limit synchronous calls (`tasks/send`, `tasks/get`, `tasks/cancel`).
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Limit streamed calls, including the time spent reading events.
    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = Some(timeout);
        self
    }

    /// Limit establishing the TCP/TLS connection, for every call.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Add a custom HTTP header sent on every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    fn transport_config(&self) -> crate::client::TransportConfig {
        crate::client::TransportConfig {
            request_timeout: self.request_timeout,
            stream_timeout: self.stream_timeout,
            connect_timeout: self.connect_timeout,
            headers: self.headers.clone(),
        }
    }

    /// Build a client that talks to the configured URL directly.
    pub fn build(self) -> crate::A2AResult<crate::client::A2AClient> {
        crate::client::A2AClient::from_url_with_config(&self.url, self.transport_config())
    }

    /// Treat the configured URL as a base URL, fetch its agent card, and build
    /// a client for the endpoint the card advertises.
    ///
    /// The card request carries the configured headers and connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`crate::A2AError::Configuration`] if the base URL is blank
    /// or not an absolute `http`/`https` URL, before any request is made.
    pub async fn resolve(self) -> crate::A2AResult<crate::client::A2AClient> {
        crate::client::A2AClient::resolve_with_config(&self.url, self.transport_config()).await
    }
}
