//! Utility functions for creating A2A Artifact objects.

use crate::types::{Artifact, Metadata, Part};
use crate::utils::parts::get_text_parts;

/// Creates a new Artifact.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::Part;
/// use a2a_task_client::utils::new_artifact;
///
/// let artifact = new_artifact(
///     vec![Part::text("Sample text")],
///     Some("My Artifact"),
///     Some("This is a test artifact."),
///     None,
/// );
/// assert_eq!(artifact.name.as_deref(), Some("My Artifact"));
/// ```
pub fn new_artifact(
    parts: Vec<Part>,
    name: Option<impl Into<String>>,
    description: Option<impl Into<String>>,
    metadata: Option<Metadata>,
) -> Artifact {
    Artifact {
        name: name.map(Into::into),
        description: description.map(Into::into),
        parts,
        metadata,
        index: None,
        append: None,
        last_chunk: None,
    }
}

/// Creates a new named Artifact containing a single text Part.
pub fn new_text_artifact(name: impl Into<String>, text: impl Into<String>) -> Artifact {
    new_artifact(vec![Part::text(text)], Some(name), None::<String>, None)
}

/// Creates a new named Artifact containing a single data Part.
pub fn new_data_artifact(name: impl Into<String>, data: Metadata) -> Artifact {
    new_artifact(vec![Part::data(data)], Some(name), None::<String>, None)
}

/// Extracts and joins all text content from an Artifact's parts.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::Part;
/// use a2a_task_client::utils::{new_artifact, get_artifact_text};
///
/// let parts = vec![Part::text("First line"), Part::text("Second line")];
/// let artifact = new_artifact(parts, Some("Multi-line"), None::<String>, None);
/// assert_eq!(get_artifact_text(&artifact, "\n"), "First line\nSecond line");
/// ```
pub fn get_artifact_text(artifact: &Artifact, delimiter: &str) -> String {
    get_text_parts(&artifact.parts).join(delimiter)
}
