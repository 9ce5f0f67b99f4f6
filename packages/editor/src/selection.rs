//! # Selection & Derived View
//!
//! The active path through the tree (chain → ... → block) and the view
//! derived from it.
//!
//! Selection is plain state: setting one level never touches the others.
//! Call sites that want a reset (switching chains, deleting the selected
//! entity) use [`Selection::switch_chain`] / [`Selection::clear_from`].
//!
//! [`derive`] is a pure function of `(document, selection)`. An id is only
//! resolved inside the active entity one level up, so an id left behind by a
//! delete, an undo or a chain switch simply derives to `None`.

use funnel_document::{
    Block, Category, Chain, Document, Funnel, LandingPage, Level, Page, Subcategory,
};
use serde::{Deserialize, Serialize};

/// Active id per hierarchy level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub chain: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub landing_page: Option<String>,
    pub funnel: Option<String>,
    pub page: Option<String>,
    pub block: Option<String>,
}

impl Selection {
    pub fn get(&self, level: Level) -> Option<&str> {
        match level {
            Level::Chain => self.chain.as_deref(),
            Level::Category => self.category.as_deref(),
            Level::Subcategory => self.subcategory.as_deref(),
            Level::LandingPage => self.landing_page.as_deref(),
            Level::Funnel => self.funnel.as_deref(),
            Level::Page => self.page.as_deref(),
            Level::Block => self.block.as_deref(),
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut Option<String> {
        match level {
            Level::Chain => &mut self.chain,
            Level::Category => &mut self.category,
            Level::Subcategory => &mut self.subcategory,
            Level::LandingPage => &mut self.landing_page,
            Level::Funnel => &mut self.funnel,
            Level::Page => &mut self.page,
            Level::Block => &mut self.block,
        }
    }

    /// Set one level. Lower levels are left as they are.
    pub fn set(&mut self, level: Level, id: Option<String>) {
        *self.slot_mut(level) = id;
    }

    /// Clear `level` and every level below it
    pub fn clear_from(&mut self, level: Level) {
        for &l in level.and_descendants() {
            *self.slot_mut(l) = None;
        }
    }

    /// Select a chain and reset everything below it
    pub fn switch_chain(&mut self, id: Option<String>) {
        self.chain = id;
        self.clear_from(Level::Category);
    }

    /// Land on something sensible: when no chain is selected, walk the first
    /// child at each level until one has no children. Returns `true` if it ran.
    pub fn bootstrap(&mut self, doc: &Document) -> bool {
        if self.chain.is_some() {
            return false;
        }
        let Some(chain) = doc.chains.first() else {
            return false;
        };

        self.chain = Some(chain.id.clone());
        if let Some(cat) = chain.categories.first() {
            self.category = Some(cat.id.clone());
            if let Some(sub) = cat.subcategories.first() {
                self.subcategory = Some(sub.id.clone());
                if let Some(lp) = sub.landing_pages.first() {
                    self.landing_page = Some(lp.id.clone());
                    if let Some(funnel) = lp.funnels.first() {
                        self.funnel = Some(funnel.id.clone());
                        if let Some(page) = funnel.pages.first() {
                            self.page = Some(page.id.clone());
                        }
                    }
                }
            }
        }

        tracing::debug!(selection = ?self, "Bootstrapped selection");
        true
    }
}

/// Active entities and child lists derived from a selection
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub chain: Option<&'a Chain>,
    pub category: Option<&'a Category>,
    pub subcategory: Option<&'a Subcategory>,
    pub landing_page: Option<&'a LandingPage>,
    pub funnel: Option<&'a Funnel>,
    pub page: Option<&'a Page>,
    pub block: Option<&'a Block>,

    /// Children of the active entity one level up (empty when it is not active)
    pub categories: &'a [Category],
    pub subcategories: &'a [Subcategory],
    pub landing_pages: &'a [LandingPage],
    pub funnels: &'a [Funnel],
    pub pages: &'a [Page],
    pub blocks: &'a [Block],
}

impl<'a> View<'a> {
    /// `(level, id)` for each level that resolved, outermost first
    pub fn active_path(&self) -> Vec<(Level, &'a str)> {
        let ids = [
            (Level::Chain, self.chain.map(|e| e.id.as_str())),
            (Level::Category, self.category.map(|e| e.id.as_str())),
            (Level::Subcategory, self.subcategory.map(|e| e.id.as_str())),
            (Level::LandingPage, self.landing_page.map(|e| e.id.as_str())),
            (Level::Funnel, self.funnel.map(|e| e.id.as_str())),
            (Level::Page, self.page.map(|e| e.id.as_str())),
            (Level::Block, self.block.map(|e| e.id.as_str())),
        ];
        ids.into_iter()
            .filter_map(|(level, id)| id.map(|id| (level, id)))
            .collect()
    }
}

/// Resolve the selection against the document
pub fn derive<'a>(doc: &'a Document, selection: &Selection) -> View<'a> {
    fn find<'a, T>(
        items: &'a [T],
        id: Option<&str>,
        key: impl Fn(&T) -> &str,
    ) -> Option<&'a T> {
        let id = id?;
        items.iter().find(|item| key(item) == id)
    }

    let chain = find(doc.chains.as_slice(), selection.chain.as_deref(), |c| c.id.as_str());
    let categories = chain.map_or(&[][..], |c| c.categories.as_slice());

    let category = find(categories, selection.category.as_deref(), |c| c.id.as_str());
    let subcategories = category.map_or(&[][..], |c| c.subcategories.as_slice());

    let subcategory = find(subcategories, selection.subcategory.as_deref(), |s| s.id.as_str());
    let landing_pages = subcategory.map_or(&[][..], |s| s.landing_pages.as_slice());

    let landing_page = find(landing_pages, selection.landing_page.as_deref(), |lp| lp.id.as_str());
    let funnels = landing_page.map_or(&[][..], |lp| lp.funnels.as_slice());

    let funnel = find(funnels, selection.funnel.as_deref(), |f| f.id.as_str());
    let pages = funnel.map_or(&[][..], |f| f.pages.as_slice());

    let page = find(pages, selection.page.as_deref(), |p| p.id.as_str());
    let blocks = page.map_or(&[][..], |p| p.blocks.as_slice());

    let block = find(blocks, selection.block.as_deref(), |b| b.id.as_str());

    View {
        chain,
        category,
        subcategory,
        landing_page,
        funnel,
        page,
        block,
        categories,
        subcategories,
        landing_pages,
        funnels,
        pages,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_document::initial_document;

    fn bootstrapped(doc: &Document) -> Selection {
        let mut selection = Selection::default();
        selection.bootstrap(doc);
        selection
    }

    #[test]
    fn test_bootstrap_walks_first_children() {
        let doc = initial_document();
        let selection = bootstrapped(&doc);

        assert_eq!(selection.chain.as_deref(), Some("chain-sol"));
        assert_eq!(selection.category.as_deref(), Some("cat-hotels"));
        assert_eq!(selection.subcategory.as_deref(), Some("sub-beach"));
        assert_eq!(selection.landing_page.as_deref(), Some("lp-summer"));
        assert_eq!(selection.funnel.as_deref(), Some("funnel-early"));
        assert_eq!(selection.page.as_deref(), Some("page-early-home"));
        assert_eq!(selection.block, None);
    }

    #[test]
    fn test_bootstrap_stops_at_empty_level() {
        let mut doc = initial_document();
        doc.chains.swap(0, 1);
        let selection = bootstrapped(&doc);

        assert_eq!(selection.landing_page.as_deref(), Some("lp-inca"));
        assert_eq!(selection.funnel, None);
        assert_eq!(selection.page, None);
    }

    #[test]
    fn test_bootstrap_skips_when_chain_selected() {
        let doc = initial_document();
        let mut selection = Selection::default();
        selection.set(Level::Chain, Some("chain-andes".to_string()));

        assert!(!selection.bootstrap(&doc));
        assert_eq!(selection.category, None);
    }

    #[test]
    fn test_bootstrap_on_empty_document() {
        let mut selection = Selection::default();
        assert!(!selection.bootstrap(&Document::default()));
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_set_does_not_cascade() {
        let doc = initial_document();
        let mut selection = bootstrapped(&doc);

        selection.set(Level::Chain, Some("chain-andes".to_string()));
        assert_eq!(selection.funnel.as_deref(), Some("funnel-early"));

        // Lower ids are stale under the new chain and derive to nothing
        let view = derive(&doc, &selection);
        assert_eq!(view.chain.map(|c| c.name.as_str()), Some("Andes Travel"));
        assert!(view.category.is_none());
        assert!(view.funnel.is_none());
        assert!(view.subcategories.is_empty());
        assert_eq!(view.categories.len(), 1);
    }

    #[test]
    fn test_switch_chain_resets_lower_levels() {
        let doc = initial_document();
        let mut selection = bootstrapped(&doc);

        selection.switch_chain(Some("chain-andes".to_string()));
        assert_eq!(selection.chain.as_deref(), Some("chain-andes"));
        assert_eq!(selection.category, None);
        assert_eq!(selection.page, None);
        assert_eq!(selection.block, None);
    }

    #[test]
    fn test_clear_from_clears_descendants_only() {
        let doc = initial_document();
        let mut selection = bootstrapped(&doc);
        selection.clear_from(Level::Funnel);

        assert_eq!(selection.landing_page.as_deref(), Some("lp-summer"));
        assert_eq!(selection.funnel, None);
        assert_eq!(selection.page, None);
    }

    #[test]
    fn test_derive_lists_and_active_entities() {
        let doc = initial_document();
        let mut selection = bootstrapped(&doc);
        selection.set(Level::Block, Some("block-form".to_string()));

        let view = derive(&doc, &selection);
        assert_eq!(view.categories.len(), 2);
        assert_eq!(view.subcategories.len(), 2);
        assert_eq!(view.landing_pages.len(), 2);
        assert_eq!(view.funnels.len(), 1);
        assert_eq!(view.pages.len(), 2);
        assert_eq!(view.blocks.len(), 2);
        assert_eq!(view.block.map(|b| b.kind.as_str()), Some("form"));
        assert_eq!(view.active_path().len(), 7);
    }

    #[test]
    fn test_derive_without_parent_gives_empty_lists() {
        let doc = initial_document();
        let view = derive(&doc, &Selection::default());

        assert!(view.chain.is_none());
        assert!(view.categories.is_empty());
        assert!(view.blocks.is_empty());
        assert!(view.active_path().is_empty());
    }

    #[test]
    fn test_derive_is_pure() {
        let doc = initial_document();
        let selection = bootstrapped(&doc);

        assert_eq!(derive(&doc, &selection), derive(&doc, &selection));
    }

    #[test]
    fn test_stale_id_derives_to_none() {
        let mut doc = initial_document();
        let selection = bootstrapped(&doc);

        doc.chains[0].categories[0].subcategories[0].landing_pages[0]
            .funnels
            .clear();

        let view = derive(&doc, &selection);
        assert!(view.landing_page.is_some());
        assert!(view.funnel.is_none());
        assert!(view.page.is_none());
        assert!(view.funnels.is_empty());
    }
}
