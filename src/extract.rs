use thiserror::Error;

use crate::constants::MAX_EXTRACT_CHARS;

/// Opaque document handed to the extractor: a name (used to pick the
/// decoder and to label failures) plus raw bytes.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed for '{name}': {reason}")]
    Failed { name: String, reason: String },
}

/// Turns a document into bounded plain text. Extraction failures are not
/// transient, so implementations never retry.
pub trait ContentExtractor {
    fn extract(&self, document: &Document) -> Result<String, ExtractError>;
}

/// Extractor for plain-text and markdown documents.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl ContentExtractor for PlainTextExtractor {
    fn extract(&self, document: &Document) -> Result<String, ExtractError> {
        match document.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("txt") | Some("md") | Some("markdown") => {}
            Some(other) => return Err(ExtractError::UnsupportedFormat(other.to_string())),
            None => return Err(ExtractError::UnsupportedFormat("unknown".to_string())),
        }

        let text =
            std::str::from_utf8(&document.bytes).map_err(|_| ExtractError::Failed {
                name: document.name.clone(),
                reason: "document is not valid UTF-8".to_string(),
            })?;

        Ok(truncate_chars(text, MAX_EXTRACT_CHARS))
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
