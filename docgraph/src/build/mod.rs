//! Per-page construction: the block-graph assembler that turns a
//! [`BlockIndex`] into a fully materialized [`Document`].

mod keyvalues;
mod layouts;
mod queries;
pub mod rows;
mod reconcile;
mod tables;
mod words;

use std::collections::HashSet;

use crate::block::index::BlockIndex;
use crate::block::{Block, BlockType, RawDocument};
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::model::document::Document;
use crate::model::page::Page;
use crate::model::word::{Line, Word, WordIndex};

/// Shared per-page word cache, used by every builder that can reference a
/// WORD block so the same word id always resolves to the same [`Word`]
/// instance, regardless of whether it is first seen via a LINE, a CELL, or
/// a KEY/VALUE child list.
pub(crate) struct WordCache {
    pub words: Vec<Word>,
    pub lines: Vec<Line>,
    by_id: std::collections::HashMap<String, WordIndex>,
}

impl WordCache {
    fn new() -> Self {
        Self { words: Vec::new(), lines: Vec::new(), by_id: std::collections::HashMap::new() }
    }

    /// Resolves `word_id` to a [`WordIndex`], materializing the `Word` on
    /// first sight. Returns `None` (with a debug skip event already logged
    /// by the index) if `word_id` is dangling, or if it resolves to a block
    /// that is not a WORD.
    pub(crate) fn get_or_create(&mut self, index: &BlockIndex, word_id: &str) -> Option<WordIndex> {
        if let Some(&existing) = self.by_id.get(word_id) {
            return Some(existing);
        }
        let block = index.resolve(word_id)?;
        if block.block_type != BlockType::Word {
            tracing::debug!(block.id = word_id, reason = "expected WORD child", "skip");
            return None;
        }
        let geometry = block.geometry().unwrap_or_else(|| crate::geometry::Geometry {
            bounding_box: BoundingBox::new(0.0, 0.0, 0.0, 0.0),
            polygon: Vec::new(),
        });
        let word = Word {
            id: word_id.to_string(),
            text: block.text.clone().unwrap_or_default(),
            text_type: block.text_type,
            confidence: block.confidence,
            geometry,
            line: None,
            cell: None,
        };
        let word_index = WordIndex(self.words.len() as u32);
        self.words.push(word);
        self.by_id.insert(word_id.to_string(), word_index);
        Some(word_index)
    }
}

/// Parses a raw, deserialized document into the semantic [`Document`]
/// model. Fails only on a declared/materialized page-count mismatch or
/// corrupt input (duplicate block ids, caught earlier by the index);
/// everything else degrades to a skip event.
pub fn parse(raw: RawDocument) -> Result<Document> {
    let declared_pages = raw.document_metadata.pages;
    let index = BlockIndex::build(raw.blocks)?;
    index.verify_page_count(declared_pages)?;

    let mut pages = Vec::with_capacity(index.ids_of(BlockType::Page).len());
    for (page_number, (page_id, owned_ids)) in index.partition_pages().into_iter().enumerate() {
        pages.push(build_page(&index, &page_id, page_number as u32 + 1, owned_ids)?);
    }

    Ok(Document::new(index, pages))
}

/// Parses a flat block list that carries no PAGE block of its own — the
/// shape `IdentityDocuments`/`ExpenseDocuments` embed (§6) — into a
/// single-page [`Document`], reusing the same per-page builder pipeline
/// every ordinary page goes through. There is no metadata page count to
/// check here; the embedding document supplies its own block list already
/// scoped to one logical unit.
pub fn parse_embedded(blocks: Vec<Block>) -> Result<Document> {
    let index = BlockIndex::build(blocks)?;
    let owned_ids: HashSet<String> = index.ids_in_order().map(str::to_string).collect();
    let page = build_page(&index, "embedded", 1, owned_ids)?;
    Ok(Document::new(index, vec![page]))
}

fn build_page(index: &BlockIndex, page_id: &str, number: u32, owned_ids: HashSet<String>) -> Result<Page> {
    let bounding_box = index
        .get(page_id)
        .and_then(Block::geometry)
        .map(|g| g.bounding_box)
        .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 1.0, 1.0));

    let mut cache = WordCache::new();
    words::build_lines(index, &owned_ids, &mut cache);

    let key_values = keyvalues::build(index, &owned_ids, &mut cache);
    let tables = tables::build(index, &owned_ids, &mut cache);
    let queries = queries::build_queries(index, &owned_ids);
    let signatures = queries::build_signatures(index, &owned_ids);

    words::synthesize_remaining_lines(&mut cache);

    let mut layouts = layouts::build(index, &owned_ids, &cache, &key_values, &tables, &signatures);
    reconcile::run(&mut cache, &mut layouts, &key_values, &tables, &signatures);

    Ok(Page {
        id: page_id.to_string(),
        number,
        bounding_box,
        words: cache.words,
        lines: cache.lines,
        tables,
        key_values,
        queries,
        signatures,
        layouts,
        owned_ids,
    })
}

