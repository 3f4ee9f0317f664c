//! Agent card discovery.
//!
//! Agents publish a JSON descriptor at a well-known path under their base
//! URL. The card names the agent and carries the endpoint URL that task
//! requests go to.

use crate::error::{A2AError, A2AResult};
use crate::types::AgentCard;
use crate::utils::constants::AGENT_CARD_WELL_KNOWN_PATH;

/// Resolves [`AgentCard`]s from agent base URLs.
///
/// Fetches `{base_url}/.well-known/agent.json` (or a custom path) with an
/// HTTP GET and deserializes the body.
///
/// # Example
///
/// ```no_run
/// use a2a_task_client::client::CardResolver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let card = CardResolver::new().resolve("http://localhost:10000").await?;
/// println!("Agent: {} v{} at {}", card.name, card.version, card.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardResolver {
    client: reqwest::Client,
    card_path: String,
}

impl CardResolver {
    /// Create a new resolver with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new resolver with an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            card_path: AGENT_CARD_WELL_KNOWN_PATH.to_string(),
        }
    }

    /// Override the agent card path. A missing leading `/` is added.
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.card_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }

    /// The path appended to base URLs.
    pub fn card_path(&self) -> &str {
        &self.card_path
    }

    /// Fetch and parse the agent card published under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Transport`] on connection failures, [`A2AError::Http`]
    /// on non-2xx responses, and [`A2AError::JsonParse`] if the body is not a
    /// valid card.
    pub async fn resolve(&self, base_url: &str) -> A2AResult<AgentCard> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), self.card_path);
        tracing::debug!(%url, "resolving agent card");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    A2AError::Transport(format!("failed to connect to agent at {url}: {e}"))
                } else if e.is_timeout() {
                    A2AError::Transport(format!("timed out fetching agent card from {url}: {e}"))
                } else {
                    A2AError::Transport(format!("failed to fetch agent card from {url}: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "agent card request failed");
            return Err(A2AError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| A2AError::Transport(format!("failed to read agent card response: {e}")))?;

        let card: AgentCard = serde_json::from_slice(&bytes)
            .map_err(|e| A2AError::JsonParse(format!("failed to parse agent card: {e}")))?;

        tracing::debug!(name = %card.name, version = %card.version, endpoint = %card.url, "resolved agent card");

        Ok(card)
    }
}

impl Default for CardResolver {
    fn default() -> Self {
        Self::new()
    }
}
