//! The top-level parsed value: an ordered sequence of Pages plus the block
//! index every page was materialized from.

use crate::block::index::BlockIndex;
use crate::block::Block;
use crate::error::{DocgraphError, Result};
use crate::model::keyvalue::KeyValue;
use crate::model::page::Page;
use crate::model::query::Query;
use crate::model::signature::Signature;
use crate::model::table::Table;
use crate::model::word::{Line, Word};

/// An immutable, fully materialized document. The block index is the sole
/// authoritative owner of the raw blocks; every [`Page`] holds only value
/// copies of the fields it needs plus index-based back-references.
#[derive(Debug)]
pub struct Document {
    pub(crate) index: BlockIndex,
    pub(crate) pages: Vec<Page>,
}

impl Document {
    pub fn new(index: BlockIndex, pages: Vec<Page>) -> Self {
        Self { index, pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Result<&Page> {
        self.pages.get(index).ok_or(DocgraphError::IndexOutOfRange {
            what: "page",
            index,
            len: self.pages.len(),
        })
    }

    pub fn block_by_id(&self, id: &str) -> Option<&Block> {
        self.index.get(id)
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.pages.iter().flat_map(|p| p.words.iter())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }

    pub fn key_values(&self) -> impl Iterator<Item = &KeyValue> {
        self.pages.iter().flat_map(|p| p.key_values.iter())
    }

    pub fn queries(&self) -> impl Iterator<Item = &Query> {
        self.pages.iter().flat_map(|p| p.queries.iter())
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.pages.iter().flat_map(|p| p.signatures.iter())
    }
}
