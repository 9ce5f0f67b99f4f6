//! Error types for the document model

use crate::model::Level;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Empty id at {0} level")]
    EmptyId(Level),
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e.to_string())
    }
}
