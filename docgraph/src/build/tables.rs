//! Table builder (component §4.4).

use std::collections::HashSet;

use crate::block::index::BlockIndex;
use crate::block::{BlockType, RelationshipType, SelectionStatus};
use crate::geometry::{BoundingBox, Geometry};
use crate::model::table::{Caption, Cell, Table};

use super::WordCache;

pub(super) fn build(index: &BlockIndex, owned_ids: &HashSet<String>, cache: &mut WordCache) -> Vec<Table> {
    let mut tables = Vec::new();

    for table_id in index.ids_of(BlockType::Table) {
        if !owned_ids.contains(table_id) {
            continue;
        }
        let Some(table_block) = index.resolve(table_id) else { continue };
        let table_position = tables.len();

        let mut cells = Vec::new();
        let cell_ids: Vec<String> = table_block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
        for cell_id in &cell_ids {
            let Some(cell_block) = index.resolve(cell_id) else { continue };
            if cell_block.block_type != BlockType::Cell {
                // MERGED_CELL blocks are represented by row/column spans on
                // the constituent CELLs; see Table::merged_cells.
                continue;
            }

            let row_index = cell_block.row_index.unwrap_or(1);
            let column_index = cell_block.column_index.unwrap_or(1);
            let row_span = cell_block.row_span.unwrap_or(1);
            let column_span = cell_block.column_span.unwrap_or(1);
            let entity_types = cell_block.entity_types.clone();

            let cell_position = cells.len();
            let child_ids: Vec<String> = cell_block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
            let mut words = Vec::new();
            let mut selection_element = None;
            for child_id in &child_ids {
                let Some(child_block) = index.resolve(child_id) else { continue };
                match child_block.block_type {
                    BlockType::Word => {
                        if let Some(wi) = cache.get_or_create(index, child_id) {
                            cache.words[wi.0 as usize].cell = Some((table_position, cell_position));
                            words.push(wi);
                        }
                    }
                    BlockType::SelectionElement if selection_element.is_none() => {
                        selection_element = Some(crate::model::keyvalue::SelectionElement {
                            status: child_block.selection_status.unwrap_or(SelectionStatus::NotSelected),
                            geometry: child_block.geometry().unwrap_or_else(empty_geometry),
                            confidence: child_block.confidence,
                        });
                    }
                    _ => {}
                }
            }

            let bounding_box = cell_block
                .geometry()
                .map(|g| g.bounding_box)
                .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));

            cells.push(Cell {
                row_index,
                column_index,
                row_span,
                column_span,
                entity_types,
                words,
                selection_element,
                bounding_box,
            });
        }

        let title = table_block
            .relationship_ids(RelationshipType::TableTitle)
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter()
            // Open question (preserved, see DESIGN.md): multiple
            // TABLE_TITLE targets resolve to the last one written.
            .fold(None, |_, title_id| resolve_caption(index, cache, &title_id));

        let mut footers = Vec::new();
        let footer_ids: Vec<String> =
            table_block.relationship_ids(RelationshipType::TableFooter).map(str::to_string).collect();
        for footer_id in &footer_ids {
            if let Some(caption) = resolve_caption(index, cache, footer_id) {
                footers.push(caption);
            }
        }

        let bounding_box = table_block
            .geometry()
            .map(|g| g.bounding_box)
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));

        tables.push(Table { id: table_id.clone(), cells, title, footers, bounding_box });
    }

    tables
}

fn resolve_caption(index: &BlockIndex, cache: &mut WordCache, block_id: &str) -> Option<Caption> {
    let block = index.resolve(block_id)?;
    let word_ids: Vec<String> = block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
    let words = word_ids.iter().filter_map(|id| cache.get_or_create(index, id)).collect();
    Some(Caption { words })
}

fn empty_geometry() -> Geometry {
    Geometry { bounding_box: BoundingBox::new(0.0, 0.0, 0.0, 0.0), polygon: Vec::new() }
}
