//! Default entities produced by builder actions

use crate::id_generator::IdGenerator;
use crate::model::{Block, Document, Funnel, Page};

pub const DEFAULT_PAGE_NAME: &str = "Home";

/// Empty page with a fresh id
pub fn default_page(ids: &mut IdGenerator, doc: &Document, name: &str) -> Page {
    Page {
        id: ids.fresh_id("page", doc),
        name: name.to_string(),
        blocks: Vec::new(),
    }
}

/// New funnel holding a single empty default page
pub fn default_funnel(ids: &mut IdGenerator, doc: &Document, name: &str) -> Funnel {
    Funnel {
        id: ids.fresh_id("funnel", doc),
        name: name.to_string(),
        pages: vec![default_page(ids, doc, DEFAULT_PAGE_NAME)],
    }
}

/// Block of the given kind with no properties
pub fn default_block(ids: &mut IdGenerator, doc: &Document, kind: &str) -> Block {
    Block::new(ids.fresh_id("block", doc), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_funnel_has_one_empty_page() {
        let doc = Document::default();
        let mut ids = IdGenerator::new("test");

        let funnel = default_funnel(&mut ids, &doc, "Launch ");

        assert_eq!(funnel.name, "Launch ");
        assert_eq!(funnel.pages.len(), 1);
        assert_eq!(funnel.pages[0].name, DEFAULT_PAGE_NAME);
        assert!(funnel.pages[0].blocks.is_empty());
        assert_ne!(funnel.id, funnel.pages[0].id);
    }

    #[test]
    fn test_default_block_kind() {
        let doc = Document::default();
        let mut ids = IdGenerator::new("test");

        let block = default_block(&mut ids, &doc, "hero");
        assert_eq!(block.kind, "hero");
        assert!(block.props.is_empty());
    }
}
