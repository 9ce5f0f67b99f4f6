//! # Builder Mutations
//!
//! Semantic edits on the builder document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation names one builder action
//! 2. **Validated**: a mutation checks its targets before touching the tree,
//!    so a failed mutation leaves the document untouched
//! 3. **Subtree deletes**: removing an entity removes everything it owns
//!
//! Mutations operate on a plain `&mut Document`. Undo/redo is not their
//! concern: the editor applies them to a working copy and snapshots the result.

use crate::model::{Block, Document, Funnel, Level, Page};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Append a prebuilt funnel to a landing page
    InsertFunnel {
        landing_page_id: String,
        funnel: Funnel,
    },

    RenameFunnel {
        funnel_id: String,
        name: String,
    },

    /// Remove a funnel and all its pages
    DeleteFunnel {
        funnel_id: String,
    },

    /// Insert a page into a funnel (index is clamped)
    InsertPage {
        funnel_id: String,
        index: usize,
        page: Page,
    },

    RenamePage {
        page_id: String,
        name: String,
    },

    DeletePage {
        page_id: String,
    },

    /// Insert a block into a page (index is clamped)
    InsertBlock {
        page_id: String,
        index: usize,
        block: Block,
    },

    RemoveBlock {
        block_id: String,
    },

    /// Move a block to a page (possibly the same one) at index
    MoveBlock {
        block_id: String,
        page_id: String,
        index: usize,
    },

    SetBlockProp {
        block_id: String,
        key: String,
        value: Value,
    },

    RemoveBlockProp {
        block_id: String,
        key: String,
    },

    SetChainColor {
        chain_id: String,
        color: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("{level} not found: {id}")]
    NotFound { level: Level, id: String },

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Invalid {0} name")]
    InvalidName(Level),
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::InsertFunnel { landing_page_id, funnel } => {
                let lp = doc
                    .landing_page_mut(landing_page_id)
                    .ok_or_else(|| not_found(Level::LandingPage, landing_page_id))?;
                lp.funnels.push(funnel.clone());
            }

            Mutation::RenameFunnel { funnel_id, name } => {
                let funnel = doc
                    .funnel_mut(funnel_id)
                    .ok_or_else(|| not_found(Level::Funnel, funnel_id))?;
                funnel.name = name.trim().to_string();
            }

            Mutation::DeleteFunnel { funnel_id } => {
                let lp = doc
                    .landing_page_of_funnel_mut(funnel_id)
                    .ok_or_else(|| not_found(Level::Funnel, funnel_id))?;
                lp.funnels.retain(|f| f.id != *funnel_id);
            }

            Mutation::InsertPage { funnel_id, index, page } => {
                let funnel = doc
                    .funnel_mut(funnel_id)
                    .ok_or_else(|| not_found(Level::Funnel, funnel_id))?;
                let at = (*index).min(funnel.pages.len());
                funnel.pages.insert(at, page.clone());
            }

            Mutation::RenamePage { page_id, name } => {
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| not_found(Level::Page, page_id))?;
                page.name = name.trim().to_string();
            }

            Mutation::DeletePage { page_id } => {
                let funnel = doc
                    .funnel_of_page_mut(page_id)
                    .ok_or_else(|| not_found(Level::Page, page_id))?;
                funnel.pages.retain(|p| p.id != *page_id);
            }

            Mutation::InsertBlock { page_id, index, block } => {
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| not_found(Level::Page, page_id))?;
                let at = (*index).min(page.blocks.len());
                page.blocks.insert(at, block.clone());
            }

            Mutation::RemoveBlock { block_id } => {
                take_block(doc, block_id)?;
            }

            Mutation::MoveBlock { block_id, page_id, index } => {
                let block = take_block(doc, block_id)?;
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| not_found(Level::Page, page_id))?;
                let at = (*index).min(page.blocks.len());
                page.blocks.insert(at, block);
            }

            Mutation::SetBlockProp { block_id, key, value } => {
                let block = doc
                    .block_mut(block_id)
                    .ok_or_else(|| not_found(Level::Block, block_id))?;
                block.props.insert(key.clone(), value.clone());
            }

            Mutation::RemoveBlockProp { block_id, key } => {
                let block = doc
                    .block_mut(block_id)
                    .ok_or_else(|| not_found(Level::Block, block_id))?;
                block.props.remove(key);
            }

            Mutation::SetChainColor { chain_id, color } => {
                let chain = doc
                    .chains
                    .iter_mut()
                    .find(|c| c.id == *chain_id)
                    .ok_or_else(|| not_found(Level::Chain, chain_id))?;
                chain.primary_color = color.clone();
            }
        }

        Ok(())
    }

    /// Check targets exist and inserted entities bring fresh ids
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertFunnel { landing_page_id, funnel } => {
                require(doc.landing_page(landing_page_id).is_some(), Level::LandingPage, landing_page_id)?;
                require_name(&funnel.name, Level::Funnel)?;
                let mut ids = vec![funnel.id.as_str()];
                for page in &funnel.pages {
                    ids.push(&page.id);
                    ids.extend(page.blocks.iter().map(|b| b.id.as_str()));
                }
                require_fresh(doc, ids)
            }
            Mutation::RenameFunnel { funnel_id, name } => {
                require(doc.funnel(funnel_id).is_some(), Level::Funnel, funnel_id)?;
                require_name(name, Level::Funnel)
            }
            Mutation::DeleteFunnel { funnel_id } => {
                require(doc.funnel(funnel_id).is_some(), Level::Funnel, funnel_id)
            }
            Mutation::InsertPage { funnel_id, page, .. } => {
                require(doc.funnel(funnel_id).is_some(), Level::Funnel, funnel_id)?;
                require_name(&page.name, Level::Page)?;
                let mut ids = vec![page.id.as_str()];
                ids.extend(page.blocks.iter().map(|b| b.id.as_str()));
                require_fresh(doc, ids)
            }
            Mutation::RenamePage { page_id, name } => {
                require(doc.page(page_id).is_some(), Level::Page, page_id)?;
                require_name(name, Level::Page)
            }
            Mutation::DeletePage { page_id } => {
                require(doc.page(page_id).is_some(), Level::Page, page_id)
            }
            Mutation::InsertBlock { page_id, block, .. } => {
                require(doc.page(page_id).is_some(), Level::Page, page_id)?;
                require_fresh(doc, vec![block.id.as_str()])
            }
            Mutation::RemoveBlock { block_id }
            | Mutation::SetBlockProp { block_id, .. }
            | Mutation::RemoveBlockProp { block_id, .. } => {
                require(doc.block(block_id).is_some(), Level::Block, block_id)
            }
            Mutation::MoveBlock { block_id, page_id, .. } => {
                require(doc.block(block_id).is_some(), Level::Block, block_id)?;
                require(doc.page(page_id).is_some(), Level::Page, page_id)
            }
            Mutation::SetChainColor { chain_id, .. } => {
                require(doc.chain(chain_id).is_some(), Level::Chain, chain_id)
            }
        }
    }

    /// The entity this mutation removes from the tree, if any
    pub fn deleted(&self) -> Option<(Level, &str)> {
        match self {
            Mutation::DeleteFunnel { funnel_id } => Some((Level::Funnel, funnel_id)),
            Mutation::DeletePage { page_id } => Some((Level::Page, page_id)),
            Mutation::RemoveBlock { block_id } => Some((Level::Block, block_id)),
            _ => None,
        }
    }

    /// Short human-readable label, used for undo/redo descriptions
    pub fn label(&self) -> String {
        match self {
            Mutation::InsertFunnel { funnel, .. } => format!("Create funnel \"{}\"", funnel.name),
            Mutation::RenameFunnel { name, .. } => format!("Rename funnel to \"{}\"", name.trim()),
            Mutation::DeleteFunnel { .. } => "Delete funnel".to_string(),
            Mutation::InsertPage { page, .. } => format!("Add page \"{}\"", page.name),
            Mutation::RenamePage { name, .. } => format!("Rename page to \"{}\"", name.trim()),
            Mutation::DeletePage { .. } => "Delete page".to_string(),
            Mutation::InsertBlock { block, .. } => format!("Add {} block", block.kind),
            Mutation::RemoveBlock { .. } => "Remove block".to_string(),
            Mutation::MoveBlock { .. } => "Move block".to_string(),
            Mutation::SetBlockProp { key, .. } => format!("Set {}", key),
            Mutation::RemoveBlockProp { key, .. } => format!("Clear {}", key),
            Mutation::SetChainColor { .. } => "Change chain color".to_string(),
        }
    }
}

fn not_found(level: Level, id: &str) -> MutationError {
    MutationError::NotFound {
        level,
        id: id.to_string(),
    }
}

fn require(found: bool, level: Level, id: &str) -> Result<(), MutationError> {
    if found {
        Ok(())
    } else {
        Err(not_found(level, id))
    }
}

fn require_name(name: &str, level: Level) -> Result<(), MutationError> {
    if name.trim().is_empty() {
        Err(MutationError::InvalidName(level))
    } else {
        Ok(())
    }
}

fn require_fresh(doc: &Document, ids: Vec<&str>) -> Result<(), MutationError> {
    let existing: HashSet<&str> = doc.ids().into_iter().map(|(_, id)| id).collect();
    let mut incoming = HashSet::new();
    for id in ids {
        if existing.contains(id) || !incoming.insert(id) {
            return Err(MutationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

fn take_block(doc: &mut Document, block_id: &str) -> Result<Block, MutationError> {
    let page = doc
        .page_of_block_mut(block_id)
        .ok_or_else(|| not_found(Level::Block, block_id))?;
    let pos = page
        .blocks
        .iter()
        .position(|b| b.id == block_id)
        .ok_or_else(|| not_found(Level::Block, block_id))?;
    Ok(page.blocks.remove(pos))
}
