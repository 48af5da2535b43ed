//! A single page: the arenas for every entity materialized on it, plus the
//! set of block ids it owns.

use std::collections::HashSet;

use crate::error::{DocgraphError, Result};
use crate::geometry::BoundingBox;
use crate::model::keyvalue::{KeyValue, KeyValueIndex};
use crate::model::layout::{Layout, LayoutChild, LayoutIndex};
use crate::model::query::{Query, QueryIndex};
use crate::model::signature::{Signature, SignatureIndex};
use crate::model::table::{Table, TableIndex};
use crate::model::word::{Line, LineIndex, Word, WordIndex};

#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub number: u32,
    pub bounding_box: BoundingBox,
    pub words: Vec<Word>,
    pub lines: Vec<Line>,
    pub tables: Vec<Table>,
    pub key_values: Vec<KeyValue>,
    pub queries: Vec<Query>,
    pub signatures: Vec<Signature>,
    /// In reading order: input order for layouts parsed from LAYOUT
    /// blocks, or ascending (top, left) for synthesized ones. Built once
    /// and never reordered after construction.
    pub layouts: Vec<Layout>,
    /// Every block id this page transitively owns via CHILD relationships
    /// from its PAGE block, including the PAGE block's own id.
    pub owned_ids: HashSet<String>,
}

impl Page {
    pub fn word(&self, index: WordIndex) -> &Word {
        &self.words[index.0 as usize]
    }

    pub fn line(&self, index: LineIndex) -> &Line {
        &self.lines[index.0 as usize]
    }

    pub fn key_value(&self, index: KeyValueIndex) -> &KeyValue {
        &self.key_values[index.0 as usize]
    }

    pub fn table(&self, index: TableIndex) -> &Table {
        &self.tables[index.0 as usize]
    }

    pub fn table_at(&self, index: usize) -> Result<&Table> {
        self.tables.get(index).ok_or(DocgraphError::IndexOutOfRange {
            what: "table",
            index,
            len: self.tables.len(),
        })
    }

    pub fn query(&self, index: QueryIndex) -> &Query {
        &self.queries[index.0 as usize]
    }

    pub fn signature(&self, index: SignatureIndex) -> &Signature {
        &self.signatures[index.0 as usize]
    }

    pub fn layout(&self, index: LayoutIndex) -> &Layout {
        &self.layouts[index.0 as usize]
    }

    /// Words that make up `indices`, resolved through this page's arena.
    pub fn words_for(&self, indices: &[WordIndex]) -> Vec<&Word> {
        indices.iter().map(|i| self.word(*i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_at_out_of_range_is_typed_error() {
        let page = Page {
            id: "p1".into(),
            number: 1,
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            words: vec![],
            lines: vec![],
            tables: vec![],
            key_values: vec![],
            queries: vec![],
            signatures: vec![],
            layouts: vec![],
            owned_ids: HashSet::new(),
        };
        let err = page.table_at(0).unwrap_err();
        assert!(matches!(err, DocgraphError::IndexOutOfRange { what: "table", index: 0, len: 0 }));
    }
}
