//! # Funnel Document
//!
//! The data the funnel builder edits: the chain → block tree, its seed
//! dataset, id generation, default-entity factories and the semantic
//! mutations applied to it.

pub mod error;
pub mod factory;
pub mod id_generator;
pub mod model;
pub mod mutations;
pub mod seed;

pub use error::DocumentError;
pub use id_generator::IdGenerator;
pub use model::{Block, Category, Chain, Document, Funnel, LandingPage, Level, Page, Subcategory};
pub use mutations::{Mutation, MutationError};
pub use seed::initial_document;
