pub mod document;

pub use crate::types::identifiers::SourceVersion;
pub use document::{Document, DocumentError};
