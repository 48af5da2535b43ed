//! Word / Line builder (component §4.2 of the original design note).

use std::collections::HashSet;

use crate::block::index::BlockIndex;
use crate::block::{BlockType, RelationshipType};
use crate::geometry::{enclosing, BoundingBox};
use crate::model::word::{Line, LineIndex};

use super::WordCache;

/// Materializes a Line for every LINE block owned by this page, attaching
/// each CHILD word through the shared cache so a word referenced from both
/// a line and (later) a cell or key/value resolves to one instance.
pub(super) fn build_lines(index: &BlockIndex, owned_ids: &HashSet<String>, cache: &mut WordCache) {
    for line_id in index.ids_of(BlockType::Line) {
        if !owned_ids.contains(line_id) {
            continue;
        }
        let Some(block) = index.resolve(line_id) else { continue };

        let child_ids: Vec<String> = block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
        let mut word_indices = Vec::new();
        for child_id in &child_ids {
            if let Some(word_index) = cache.get_or_create(index, child_id) {
                word_indices.push(word_index);
            }
        }

        Line::sort_words(&mut word_indices, &cache.words);

        let line_index = LineIndex(cache.lines.len() as u32);
        for &wi in &word_indices {
            cache.words[wi.0 as usize].line = Some(line_index);
        }

        let bounding_box = enclosing(word_indices.iter().map(|wi| Some(&cache.words[wi.0 as usize].geometry.bounding_box)))
            .or_else(|| block.geometry().map(|g| g.bounding_box))
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));

        cache.lines.push(Line {
            id: line_id.clone(),
            words: word_indices,
            confidence: block.confidence,
            bounding_box,
            synthetic: false,
        });
    }
}

/// Fabricates a one-word synthetic Line for every word that never got
/// attached to a real Line (words reached only via a cell, key, or value
/// child list).
pub(super) fn synthesize_remaining_lines(cache: &mut WordCache) {
    let unattached: Vec<usize> = cache
        .words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.line.is_none())
        .map(|(i, _)| i)
        .collect();

    for word_position in unattached {
        let line_index = LineIndex(cache.lines.len() as u32);
        let (id, confidence, bounding_box) = {
            let word = &mut cache.words[word_position];
            word.line = Some(line_index);
            (word.id.clone(), word.confidence, word.geometry.bounding_box)
        };
        cache.lines.push(Line {
            id: format!("synthetic-line-{id}"),
            words: vec![crate::model::word::WordIndex(word_position as u32)],
            confidence,
            bounding_box,
            synthetic: true,
        });
    }
}
