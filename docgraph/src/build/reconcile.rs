//! Reconciliation pass (component §4.8): eliminates duplicate emission
//! once a line's words have also been claimed by a key-value or table in
//! the same layout, and merges synthetic key-value containers into
//! whichever real layout they overlap.

use std::collections::HashSet;

use crate::geometry::{enclosing, BoundingBox};
use crate::model::keyvalue::KeyValue;
use crate::model::layout::{Layout, LayoutChild, LayoutKind};
use crate::model::signature::Signature;
use crate::model::table::Table;
use crate::model::word::WordIndex;

use super::WordCache;

pub(super) fn run(
    cache: &mut WordCache,
    layouts: &mut Vec<Layout>,
    key_values: &[KeyValue],
    tables: &[Table],
    signatures: &[Signature],
) {
    merge_synthetic_key_value_layouts(layouts);
    strip_claimed_words(cache, layouts, key_values, tables);
    recompute_bounding_boxes(cache, layouts, key_values, tables, signatures);
}

/// Moves every synthetic LAYOUT_KEY_VALUE's sole KeyValue child into the
/// first other layout whose bounding box it overlaps, then empties the
/// synthetic container (it is never physically removed from the arena —
/// other layouts may hold a [`LayoutChild::Layout`] index into it — but an
/// empty layout renders as nothing and is skipped by reading-order walks).
fn merge_synthetic_key_value_layouts(layouts: &mut [Layout]) {
    let synthetic_positions: Vec<usize> = layouts
        .iter()
        .enumerate()
        .filter(|(_, l)| l.synthetic && l.kind == LayoutKind::KeyValue)
        .map(|(i, _)| i)
        .collect();

    for kv_layout_pos in synthetic_positions {
        let kv_box = layouts[kv_layout_pos].bounding_box;
        let Some(kv_child) = layouts[kv_layout_pos].children.first().copied() else { continue };

        let target = layouts
            .iter()
            .enumerate()
            .filter(|(i, l)| *i != kv_layout_pos && !(l.synthetic && l.kind == LayoutKind::KeyValue))
            .find(|(_, l)| l.bounding_box.intersection(&kv_box).is_some())
            .map(|(i, _)| i);

        if let Some(target) = target {
            layouts[target].children.push(kv_child);
            layouts[kv_layout_pos].children.clear();
        }
    }
}

/// For every layout, removes from its Line children any words also claimed
/// by a KeyValue or Table child of the same layout. A Line emptied this
/// way is dropped from the layout; a Line left non-empty gets its
/// bounding box recomputed as the enclosing box of its surviving words.
fn strip_claimed_words(cache: &mut WordCache, layouts: &mut [Layout], key_values: &[KeyValue], tables: &[Table]) {
    for layout in layouts.iter_mut() {
        let mut claimed: HashSet<WordIndex> = HashSet::new();
        for child in &layout.children {
            match child {
                LayoutChild::KeyValue(idx) => {
                    let kv = &key_values[idx.0 as usize];
                    claimed.extend(kv.key.words.iter().copied());
                    claimed.extend(kv.value.words.iter().copied());
                }
                LayoutChild::Table(idx) => {
                    let table = &tables[idx.0 as usize];
                    for cell in &table.cells {
                        claimed.extend(cell.words.iter().copied());
                    }
                }
                _ => {}
            }
        }
        if claimed.is_empty() {
            continue;
        }

        let mut retained = Vec::with_capacity(layout.children.len());
        for child in layout.children.drain(..) {
            match child {
                LayoutChild::Line(line_idx) => {
                    let had_claimed_words = cache.lines[line_idx.0 as usize].words.iter().any(|w| claimed.contains(w));
                    if !had_claimed_words {
                        retained.push(LayoutChild::Line(line_idx));
                        continue;
                    }

                    cache.lines[line_idx.0 as usize].words.retain(|w| !claimed.contains(w));
                    if cache.lines[line_idx.0 as usize].words.is_empty() {
                        continue;
                    }

                    let words = cache.lines[line_idx.0 as usize].words.clone();
                    let new_box = enclosing(words.iter().map(|w| Some(&cache.words[w.0 as usize].geometry.bounding_box)));
                    if let Some(new_box) = new_box {
                        cache.lines[line_idx.0 as usize].bounding_box = new_box;
                    }
                    retained.push(LayoutChild::Line(line_idx));
                }
                other => retained.push(other),
            }
        }
        layout.children = retained;
    }
}

/// Recomputes each non-empty layout's bounding box as the enclosing box of
/// its (possibly just-pruned) children.
fn recompute_bounding_boxes(
    cache: &WordCache,
    layouts: &mut [Layout],
    key_values: &[KeyValue],
    tables: &[Table],
    signatures: &[Signature],
) {
    let snapshot_boxes: Vec<BoundingBox> = layouts.iter().map(|l| l.bounding_box).collect();

    for layout in layouts.iter_mut() {
        if layout.children.is_empty() {
            continue;
        }
        let boxes: Vec<Option<&BoundingBox>> = layout
            .children
            .iter()
            .map(|child| match child {
                LayoutChild::Line(i) => Some(&cache.lines[i.0 as usize].bounding_box),
                LayoutChild::KeyValue(i) => Some(&key_values[i.0 as usize].bounding_box),
                LayoutChild::Table(i) => Some(&tables[i.0 as usize].bounding_box),
                LayoutChild::Signature(i) => Some(&signatures[i.0 as usize].geometry.bounding_box),
                LayoutChild::Layout(i) => snapshot_boxes.get(i.0 as usize),
            })
            .collect();
        if let Some(bbox) = enclosing(boxes) {
            layout.bounding_box = bbox;
        }
    }
}
