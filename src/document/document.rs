use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::SourceVersion;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Extracted plain or Markdown text handed over by a content extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub source: String,
    pub version: SourceVersion,
    pub content: String,
}

impl Document {
    /// Ingest raw extractor output into a Document.
    ///
    /// Rejects invalid UTF-8 and computes the content version; the document
    /// is immutable afterwards.
    pub fn ingest(source: impl Into<String>, raw_content: Vec<u8>) -> Result<Self, DocumentError> {
        let content = String::from_utf8(raw_content)?;
        Ok(Self::from_text(source, content))
    }

    pub fn from_text(source: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let version = SourceVersion::from_content(content.as_bytes());

        Document {
            source: source.into(),
            version,
            content,
        }
    }
}
