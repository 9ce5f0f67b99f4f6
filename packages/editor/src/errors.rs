//! Error types for the editor

use crate::store::StoreError;
use funnel_document::{DocumentError, MutationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Session has no document store")]
    NoStore,
}
