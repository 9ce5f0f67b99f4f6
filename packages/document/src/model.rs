//! # Document Model
//!
//! The tree the funnel builder edits:
//!
//! ```text
//! Chain → Category → Subcategory → LandingPage → Funnel → Page → Block
//! ```
//!
//! Every parent owns its children by value, so a child can never outlive its
//! parent or hang under two parents. The only invariant left to convention is
//! id uniqueness, which [`Document::validate`] checks.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Root of the builder document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub chains: Vec<Chain>,
}

/// Top-level tenant/brand grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub landing_pages: Vec<LandingPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub funnels: Vec<Funnel>,
}

/// Ordered sequence of pages a visitor walks through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Leaf content unit (hero, form, text, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Map<String, Value>,
}

/// Hierarchy levels, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Chain,
    Category,
    Subcategory,
    LandingPage,
    Funnel,
    Page,
    Block,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Chain,
        Level::Category,
        Level::Subcategory,
        Level::LandingPage,
        Level::Funnel,
        Level::Page,
        Level::Block,
    ];

    /// Position in the hierarchy (chain = 0)
    pub fn depth(self) -> usize {
        self as usize
    }

    /// This level and every level below it
    pub fn and_descendants(self) -> &'static [Level] {
        &Self::ALL[self.depth()..]
    }

    /// Every level strictly below this one
    pub fn descendants(self) -> &'static [Level] {
        &Self::ALL[self.depth() + 1..]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Chain => "chain",
            Level::Category => "category",
            Level::Subcategory => "subcategory",
            Level::LandingPage => "landing page",
            Level::Funnel => "funnel",
            Level::Page => "page",
            Level::Block => "block",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    pub fn new(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn landing_pages(&self) -> impl Iterator<Item = &LandingPage> {
        self.chains
            .iter()
            .flat_map(|c| &c.categories)
            .flat_map(|c| &c.subcategories)
            .flat_map(|s| &s.landing_pages)
    }

    fn landing_pages_mut(&mut self) -> impl Iterator<Item = &mut LandingPage> {
        self.chains
            .iter_mut()
            .flat_map(|c| &mut c.categories)
            .flat_map(|c| &mut c.subcategories)
            .flat_map(|s| &mut s.landing_pages)
    }

    pub fn funnels(&self) -> impl Iterator<Item = &Funnel> {
        self.landing_pages().flat_map(|lp| &lp.funnels)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.funnels().flat_map(|f| &f.pages)
    }

    pub fn landing_page(&self, id: &str) -> Option<&LandingPage> {
        self.landing_pages().find(|lp| lp.id == id)
    }

    pub fn landing_page_mut(&mut self, id: &str) -> Option<&mut LandingPage> {
        self.landing_pages_mut().find(|lp| lp.id == id)
    }

    pub fn funnel(&self, id: &str) -> Option<&Funnel> {
        self.funnels().find(|f| f.id == id)
    }

    pub fn funnel_mut(&mut self, id: &str) -> Option<&mut Funnel> {
        self.landing_pages_mut()
            .flat_map(|lp| &mut lp.funnels)
            .find(|f| f.id == id)
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.landing_pages_mut()
            .flat_map(|lp| &mut lp.funnels)
            .flat_map(|f| &mut f.pages)
            .find(|p| p.id == id)
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.pages().flat_map(|p| &p.blocks).find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.landing_pages_mut()
            .flat_map(|lp| &mut lp.funnels)
            .flat_map(|f| &mut f.pages)
            .flat_map(|p| &mut p.blocks)
            .find(|b| b.id == id)
    }

    /// Landing page that owns the given funnel
    pub fn landing_page_of_funnel_mut(&mut self, funnel_id: &str) -> Option<&mut LandingPage> {
        self.landing_pages_mut()
            .find(|lp| lp.funnels.iter().any(|f| f.id == funnel_id))
    }

    /// Funnel that owns the given page
    pub fn funnel_of_page_mut(&mut self, page_id: &str) -> Option<&mut Funnel> {
        self.landing_pages_mut()
            .flat_map(|lp| &mut lp.funnels)
            .find(|f| f.pages.iter().any(|p| p.id == page_id))
    }

    /// Page that owns the given block
    pub fn page_of_block_mut(&mut self, block_id: &str) -> Option<&mut Page> {
        self.landing_pages_mut()
            .flat_map(|lp| &mut lp.funnels)
            .flat_map(|f| &mut f.pages)
            .find(|p| p.blocks.iter().any(|b| b.id == block_id))
    }

    /// Every entity id in the tree, depth-first, tagged with its level
    pub fn ids(&self) -> Vec<(Level, &str)> {
        let mut out = Vec::new();
        for chain in &self.chains {
            out.push((Level::Chain, chain.id.as_str()));
            for cat in &chain.categories {
                out.push((Level::Category, cat.id.as_str()));
                for sub in &cat.subcategories {
                    out.push((Level::Subcategory, sub.id.as_str()));
                    for lp in &sub.landing_pages {
                        out.push((Level::LandingPage, lp.id.as_str()));
                        for funnel in &lp.funnels {
                            out.push((Level::Funnel, funnel.id.as_str()));
                            for page in &funnel.pages {
                                out.push((Level::Page, page.id.as_str()));
                                for block in &page.blocks {
                                    out.push((Level::Block, block.id.as_str()));
                                }
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// Ids from the chain down to `id` (inclusive), or `None` if absent
    pub fn path_to(&self, id: &str) -> Option<Vec<(Level, &str)>> {
        let mut path: Vec<(Level, &str)> = Vec::new();
        for (level, current) in self.ids() {
            path.truncate(level.depth());
            path.push((level, current));
            if current == id {
                return Some(path);
            }
        }
        None
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids().iter().any(|(_, existing)| *existing == id)
    }

    /// Check the tree invariants ownership alone cannot enforce
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for (level, id) in self.ids() {
            if id.trim().is_empty() {
                return Err(DocumentError::EmptyId(level));
            }
            if !seen.insert(id) {
                return Err(DocumentError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }
}

impl Block {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: Map::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}
