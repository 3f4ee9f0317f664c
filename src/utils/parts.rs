//! Constructors and accessors for A2A [`Part`] values.

use crate::error::{A2AError, A2AResult};
use crate::types::{FileContent, Metadata, Part};

/// Creates a text Part.
///
/// # Example
///
/// ```
/// use a2a_task_client::utils::text_part;
///
/// let part = text_part("Hello", None);
/// assert_eq!(part.as_text(), Some("Hello"));
/// ```
pub fn text_part(text: impl Into<String>, metadata: Option<Metadata>) -> Part {
    Part::Text {
        text: text.into(),
        metadata,
    }
}

/// Creates a structured data Part.
///
/// # Example
///
/// ```
/// use a2a_task_client::utils::data_part;
/// use serde_json::json;
///
/// let data = json!({"node": "root"}).as_object().cloned().unwrap();
/// let part = data_part(data, None);
/// assert_eq!(serde_json::to_value(&part).unwrap()["type"], "data");
/// ```
pub fn data_part(data: Metadata, metadata: Option<Metadata>) -> Part {
    Part::Data { data, metadata }
}

/// Creates a file Part.
///
/// # Errors
///
/// Returns [`A2AError::Construction`] when the file carries neither `bytes`
/// nor `uri`.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::FileContent;
/// use a2a_task_client::utils::file_part;
///
/// assert!(file_part(FileContent::from_uri("https://example.com/a.png"), None).is_ok());
/// assert!(file_part(FileContent::default(), None).is_err());
/// ```
pub fn file_part(file: FileContent, metadata: Option<Metadata>) -> A2AResult<Part> {
    if file.bytes.is_none() && file.uri.is_none() {
        return Err(A2AError::Construction(
            "file part requires either 'bytes' or 'uri'".to_string(),
        ));
    }
    Ok(Part::File { file, metadata })
}

/// Extracts text content from all text Parts in a list, in order.
///
/// # Example
///
/// ```
/// use a2a_task_client::types::Part;
/// use a2a_task_client::utils::get_text_parts;
///
/// let parts = vec![Part::text("Hello"), Part::text("World")];
/// assert_eq!(get_text_parts(&parts), vec!["Hello", "World"]);
/// ```
pub fn get_text_parts(parts: &[Part]) -> Vec<String> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Extracts data payloads from all data Parts in a list, in order.
pub fn get_data_parts(parts: &[Part]) -> Vec<Metadata> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Data { data, .. } => Some(data.clone()),
            _ => None,
        })
        .collect()
}

/// Extracts file content from all file Parts in a list, in order.
pub fn get_file_parts(parts: &[Part]) -> Vec<FileContent> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::File { file, .. } => Some(file.clone()),
            _ => None,
        })
        .collect()
}
