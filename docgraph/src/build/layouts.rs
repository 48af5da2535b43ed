//! Layout builder (component §4.6): constructs typed layout regions and
//! resolves their children, fabricating synthetic layouts where the input
//! did not request layout analysis or omitted a container for an entity
//! this crate still needs to surface.

use std::collections::{HashMap, HashSet};

use crate::block::index::BlockIndex;
use crate::block::RelationshipType;
use crate::geometry::BoundingBox;
use crate::model::keyvalue::{KeyValue, KeyValueIndex};
use crate::model::layout::{Layout, LayoutChild, LayoutIndex, LayoutKind};
use crate::model::signature::{Signature, SignatureIndex};
use crate::model::table::{Table, TableIndex};
use crate::model::word::{LineIndex, WordIndex};

use super::WordCache;

/// Design threshold (§4.6): a signature attaches to the surrounding layout
/// whose intersection area, as a fraction of the signature's own area,
/// exceeds this ratio — chosen so a signature attaches to its paragraph
/// rather than floating unclaimed.
const SIGNATURE_ATTACH_THRESHOLD: f64 = 0.8;

pub(super) fn build(
    index: &BlockIndex,
    owned_ids: &HashSet<String>,
    cache: &WordCache,
    key_values: &[KeyValue],
    tables: &[Table],
    signatures: &[Signature],
) -> Vec<Layout> {
    let layout_ids: Vec<String> = index
        .ids_in_order()
        .filter(|id| owned_ids.contains(*id))
        .filter(|id| index.get(id).map(|b| b.block_type.is_layout()).unwrap_or(false))
        .map(str::to_string)
        .collect();

    if layout_ids.is_empty() {
        return build_synthetic_layouts(cache, key_values, tables, signatures);
    }

    let mut layouts: Vec<Layout> = Vec::with_capacity(layout_ids.len());
    let mut layout_index_by_block_id: HashMap<String, LayoutIndex> = HashMap::new();

    for layout_id in &layout_ids {
        let block = index.get(layout_id).expect("filtered to existing ids above");
        let kind = LayoutKind::from_block_type(block.block_type).expect("filtered to layout types above");
        let bounding_box = block
            .geometry()
            .map(|g| g.bounding_box)
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));

        layout_index_by_block_id.insert(layout_id.clone(), LayoutIndex(layouts.len() as u32));
        layouts.push(Layout {
            id: layout_id.clone(),
            kind,
            bounding_box,
            children: Vec::new(),
            no_new_lines: kind.default_no_new_lines(),
            synthetic: false,
        });
    }

    let line_index_by_id: HashMap<&str, LineIndex> = cache
        .lines
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.synthetic)
        .map(|(i, l)| (l.id.as_str(), LineIndex(i as u32)))
        .collect();
    let table_index_by_id: HashMap<&str, TableIndex> =
        tables.iter().enumerate().map(|(i, t)| (t.id.as_str(), TableIndex(i as u32))).collect();
    let key_value_index_by_id: HashMap<&str, KeyValueIndex> =
        key_values.iter().enumerate().map(|(i, kv)| (kv.id.as_str(), KeyValueIndex(i as u32))).collect();

    for layout_id in &layout_ids {
        let block = index.get(layout_id).expect("filtered above");
        let child_ids: Vec<String> = block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
        let own_index = layout_index_by_block_id[layout_id];
        let is_list = layouts[own_index.0 as usize].kind == LayoutKind::List;

        let mut children = Vec::new();
        for child_id in &child_ids {
            if let Some(&nested) = layout_index_by_block_id.get(child_id) {
                if is_list {
                    layouts[nested.0 as usize].no_new_lines = true;
                }
                children.push(LayoutChild::Layout(nested));
            } else if let Some(&line_idx) = line_index_by_id.get(child_id.as_str()) {
                children.push(LayoutChild::Line(line_idx));
            } else if let Some(&table_idx) = table_index_by_id.get(child_id.as_str()) {
                children.push(LayoutChild::Table(table_idx));
            } else if let Some(&kv_idx) = key_value_index_by_id.get(child_id.as_str()) {
                children.push(LayoutChild::KeyValue(kv_idx));
            }
        }

        layouts[own_index.0 as usize].children = children;
    }

    attach_key_values(&mut layouts, key_values);
    attach_signatures(&mut layouts, signatures);

    layouts
}

/// Fabricates one LAYOUT_TEXT per line, in ascending (top, left) order,
/// for pages the service did not run layout analysis on. Key-values and
/// tables have no guaranteed container in this degraded mode either, so
/// [`attach_key_values`] and [`attach_tables`] run against the freshly
/// synthesized layouts right after. A line whose every word is already
/// claimed by a key-value or a table cell is skipped here entirely — it
/// will render through its claimant's own synthetic layout instead, so
/// giving it a standalone LAYOUT_TEXT too would duplicate its words in
/// the linearized output.
fn build_synthetic_layouts(
    cache: &WordCache,
    key_values: &[KeyValue],
    tables: &[Table],
    signatures: &[Signature],
) -> Vec<Layout> {
    let mut claimed: HashSet<u32> = HashSet::new();
    for kv in key_values {
        claimed.extend(kv.key.words.iter().map(|w| w.0));
        claimed.extend(kv.value.words.iter().map(|w| w.0));
    }
    for table in tables {
        for cell in &table.cells {
            claimed.extend(cell.words.iter().map(|w| w.0));
        }
    }

    let fully_claimed = |words: &[WordIndex]| !words.is_empty() && words.iter().all(|w| claimed.contains(&w.0));

    let mut order: Vec<usize> =
        (0..cache.lines.len()).filter(|&i| !fully_claimed(&cache.lines[i].words)).collect();
    order.sort_by(|&a, &b| {
        let la = &cache.lines[a].bounding_box;
        let lb = &cache.lines[b].bounding_box;
        la.top
            .partial_cmp(&lb.top)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| la.left.partial_cmp(&lb.left).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut layouts: Vec<Layout> = order
        .into_iter()
        .map(|i| {
            let line = &cache.lines[i];
            Layout {
                id: format!("synthetic-layout-{}", line.id),
                kind: LayoutKind::Text,
                bounding_box: line.bounding_box,
                children: vec![LayoutChild::Line(LineIndex(i as u32))],
                no_new_lines: LayoutKind::Text.default_no_new_lines(),
                synthetic: true,
            }
        })
        .collect();

    attach_key_values(&mut layouts, key_values);
    attach_tables(&mut layouts, tables);
    attach_signatures(&mut layouts, signatures);
    layouts
}

/// Wraps every KeyValue not already reachable through a real
/// LAYOUT_KEY_VALUE block in its own synthetic LAYOUT_KEY_VALUE. The
/// reconciliation pass later merges these into overlapping LAYOUT_TEXT
/// containers.
fn attach_key_values(layouts: &mut Vec<Layout>, key_values: &[KeyValue]) {
    let already_attached: HashSet<u32> = layouts
        .iter()
        .flat_map(|l| l.children.iter())
        .filter_map(|c| match c {
            LayoutChild::KeyValue(idx) => Some(idx.0),
            _ => None,
        })
        .collect();

    for (i, kv) in key_values.iter().enumerate() {
        if already_attached.contains(&(i as u32)) {
            continue;
        }
        layouts.push(Layout {
            id: format!("synthetic-layout-kv-{}", kv.id),
            kind: LayoutKind::KeyValue,
            bounding_box: kv.bounding_box,
            children: vec![LayoutChild::KeyValue(KeyValueIndex(i as u32))],
            no_new_lines: LayoutKind::KeyValue.default_no_new_lines(),
            synthetic: true,
        });
    }
}

/// Wraps every Table not already reachable through a real LAYOUT_TABLE
/// block in its own synthetic LAYOUT_TABLE. Mirrors [`attach_key_values`];
/// unlike key-values, a synthetic table layout is never merged into a
/// sibling during reconciliation, since a table's own cell words are
/// already excluded from standalone line layouts by
/// [`build_synthetic_layouts`].
fn attach_tables(layouts: &mut Vec<Layout>, tables: &[Table]) {
    let already_attached: HashSet<u32> = layouts
        .iter()
        .flat_map(|l| l.children.iter())
        .filter_map(|c| match c {
            LayoutChild::Table(idx) => Some(idx.0),
            _ => None,
        })
        .collect();

    for (i, table) in tables.iter().enumerate() {
        if already_attached.contains(&(i as u32)) {
            continue;
        }
        layouts.push(Layout {
            id: format!("synthetic-layout-table-{}", table.id),
            kind: LayoutKind::Table,
            bounding_box: table.bounding_box,
            children: vec![LayoutChild::Table(TableIndex(i as u32))],
            no_new_lines: LayoutKind::Table.default_no_new_lines(),
            synthetic: true,
        });
    }
}

/// For each signature, attaches it to the layout with the largest
/// intersection-area / signature-area ratio, when that ratio clears
/// [`SIGNATURE_ATTACH_THRESHOLD`]. A signature with no qualifying layout
/// is left unattached.
fn attach_signatures(layouts: &mut [Layout], signatures: &[Signature]) {
    for (i, signature) in signatures.iter().enumerate() {
        let signature_box = &signature.geometry.bounding_box;
        let signature_area = signature_box.area();
        if signature_area <= 0.0 {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (layout_position, layout) in layouts.iter().enumerate() {
            let Some(isect) = layout.bounding_box.intersection(signature_box) else { continue };
            let ratio = isect.area() / signature_area;
            if ratio > SIGNATURE_ATTACH_THRESHOLD && best.map(|(_, r)| ratio > r).unwrap_or(true) {
                best = Some((layout_position, ratio));
            }
        }

        if let Some((layout_position, _)) = best {
            layouts[layout_position].children.push(LayoutChild::Signature(SignatureIndex(i as u32)));
        }
    }
}
