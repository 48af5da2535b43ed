//! The block-graph index: an immutable id→block map plus a type→ids index
//! built once from the raw block list, and preserved for the lifetime of
//! the owning [`crate::document::Document`].

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use tracing::debug;

use crate::block::{Block, BlockType, RelationshipType};
use crate::error::{DocgraphError, Result};

/// Immutable lookup structure over a flat block list.
///
/// Construction fails only on a duplicate block id — every other anomaly
/// (unknown block type, dangling relationship target) is tolerated and
/// surfaces later as a debug-level skip event rather than a build error.
#[derive(Debug)]
pub struct BlockIndex {
    /// Preserves input order natively, so `ids_in_order` needs no separate
    /// tracking vector alongside the id→block map.
    by_id: IndexMap<String, Block>,
    ids_by_type: HashMap<BlockType, Vec<String>>,
}

impl BlockIndex {
    /// Builds the index from `blocks`, preserving the input order within
    /// each type's id list and overall.
    pub fn build(blocks: Vec<Block>) -> Result<Self> {
        let mut by_id = IndexMap::with_capacity(blocks.len());
        let mut ids_by_type: HashMap<BlockType, Vec<String>> = HashMap::new();

        for block in blocks {
            let id = block.id.clone();
            ids_by_type.entry(block.block_type).or_default().push(id.clone());
            if by_id.insert(id.clone(), block).is_some() {
                return Err(DocgraphError::CorruptInput(format!("duplicate block id {id}")));
            }
        }

        Ok(Self { by_id, ids_by_type })
    }

    /// All block ids, in input order.
    pub fn ids_in_order(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids of blocks of `block_type`, in input order. Empty slice if none.
    pub fn ids_of(&self, block_type: BlockType) -> &[String] {
        self.ids_by_type
            .get(&block_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolves `id` to a block, emitting a debug skip event and returning
    /// `None` when the id is dangling rather than propagating an error —
    /// a broken reference is tolerated input, not corrupt input.
    pub fn resolve(&self, id: &str) -> Option<&Block> {
        let found = self.by_id.get(id);
        if found.is_none() {
            debug!(block.id = id, reason = "dangling relationship target", "skip");
        }
        found
    }

    /// Breadth-first closure over CHILD relationships starting at
    /// `root_id`, including the root itself.
    pub fn child_closure(&self, root_id: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(root_id.to_string());
        queue.push_back(root_id.to_string());

        while let Some(current) = queue.pop_front() {
            let Some(block) = self.by_id.get(&current) else {
                continue;
            };
            for child_id in block.relationship_ids(RelationshipType::Child) {
                if seen.insert(child_id.to_string()) {
                    queue.push_back(child_id.to_string());
                }
            }
        }

        seen
    }

    /// For every PAGE block, in input order, the set of ids it transitively
    /// owns (including its own id). Used to partition the global indices
    /// per page.
    pub fn partition_pages(&self) -> Vec<(String, HashSet<String>)> {
        self.ids_of(BlockType::Page)
            .iter()
            .map(|page_id| (page_id.clone(), self.child_closure(page_id)))
            .collect()
    }

    /// `MetadataMismatch` if the number of materialized PAGE blocks differs
    /// from `declared`.
    pub fn verify_page_count(&self, declared: u32) -> Result<()> {
        let materialized = self.ids_of(BlockType::Page).len() as u32;
        if materialized != declared {
            return Err(DocgraphError::MetadataMismatch { declared, materialized });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Relationship, RelationshipType};

    fn block(id: &str, block_type: BlockType, children: &[&str]) -> Block {
        Block {
            block_type,
            id: id.to_string(),
            confidence: None,
            text: None,
            text_type: None,
            selection_status: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            entity_types: vec![],
            geometry: None,
            relationships: if children.is_empty() {
                vec![]
            } else {
                vec![Relationship {
                    kind: RelationshipType::Child,
                    ids: children.iter().map(|s| s.to_string()).collect(),
                }]
            },
            query: None,
        }
    }

    #[test]
    fn duplicate_id_is_corrupt_input() {
        let blocks = vec![
            block("a", BlockType::Line, &[]),
            block("a", BlockType::Word, &[]),
        ];
        let err = BlockIndex::build(blocks).unwrap_err();
        assert!(matches!(err, DocgraphError::CorruptInput(_)));
    }

    #[test]
    fn ids_of_preserves_input_order() {
        let blocks = vec![
            block("w2", BlockType::Word, &[]),
            block("w1", BlockType::Word, &[]),
            block("l1", BlockType::Line, &[]),
        ];
        let index = BlockIndex::build(blocks).unwrap();
        assert_eq!(index.ids_of(BlockType::Word), &["w2".to_string(), "w1".to_string()]);
    }

    #[test]
    fn child_closure_is_transitive() {
        let blocks = vec![
            block("page", BlockType::Page, &["line"]),
            block("line", BlockType::Line, &["word"]),
            block("word", BlockType::Word, &[]),
            block("other", BlockType::Line, &[]),
        ];
        let index = BlockIndex::build(blocks).unwrap();
        let closure = index.child_closure("page");
        assert!(closure.contains("page"));
        assert!(closure.contains("line"));
        assert!(closure.contains("word"));
        assert!(!closure.contains("other"));
    }

    #[test]
    fn partition_pages_tracks_each_page_independently() {
        let blocks = vec![
            block("p1", BlockType::Page, &["l1"]),
            block("p2", BlockType::Page, &["l2"]),
            block("l1", BlockType::Line, &[]),
            block("l2", BlockType::Line, &[]),
        ];
        let index = BlockIndex::build(blocks).unwrap();
        let pages = index.partition_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].0, "p1");
        assert!(pages[0].1.contains("l1"));
        assert!(!pages[0].1.contains("l2"));
    }

    #[test]
    fn verify_page_count_reports_mismatch() {
        let blocks = vec![block("p1", BlockType::Page, &[])];
        let index = BlockIndex::build(blocks).unwrap();
        assert!(index.verify_page_count(1).is_ok());
        let err = index.verify_page_count(2).unwrap_err();
        assert!(matches!(
            err,
            DocgraphError::MetadataMismatch { declared: 2, materialized: 1 }
        ));
    }

    #[test]
    fn resolve_missing_id_returns_none() {
        let index = BlockIndex::build(vec![]).unwrap();
        assert!(index.resolve("missing").is_none());
    }
}
