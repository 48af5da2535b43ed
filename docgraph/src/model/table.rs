//! Tables: cells, rows, titles and footers, built from `TABLE` blocks.

use crate::block::EntityType;
use crate::geometry::BoundingBox;
use crate::model::keyvalue::SelectionElement;
use crate::model::word::WordIndex;

/// Index of a [`Table`] within its page's table arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableIndex(pub u32);

#[derive(Debug, Clone)]
pub struct Cell {
    pub row_index: u32,
    pub column_index: u32,
    pub row_span: u32,
    pub column_span: u32,
    pub entity_types: Vec<EntityType>,
    pub words: Vec<WordIndex>,
    pub selection_element: Option<SelectionElement>,
    pub bounding_box: BoundingBox,
}

impl Cell {
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.column_span > 1
    }

    pub fn is_column_header(&self) -> bool {
        self.entity_types.contains(&EntityType::ColumnHeader)
    }

    pub fn is_table_title(&self) -> bool {
        self.entity_types.contains(&EntityType::TableTitle)
    }

    pub fn is_table_footer(&self) -> bool {
        self.entity_types.contains(&EntityType::TableFooter)
    }

    pub fn is_table_summary(&self) -> bool {
        self.entity_types.contains(&EntityType::TableSummary)
    }

    pub fn is_table_section_title(&self) -> bool {
        self.entity_types.contains(&EntityType::TableSectionTitle)
    }
}

/// The words that make up a table title or footer caption.
#[derive(Debug, Clone)]
pub struct Caption {
    pub words: Vec<WordIndex>,
}

/// A materialized row: indices into [`Table::cells`], ordered by column.
#[derive(Debug, Clone)]
pub struct TableRow(pub Vec<usize>);

#[derive(Debug, Clone)]
pub struct Table {
    pub id: String,
    pub cells: Vec<Cell>,
    pub title: Option<Caption>,
    pub footers: Vec<Caption>,
    pub bounding_box: BoundingBox,
}

impl Table {
    pub fn max_row(&self) -> u32 {
        self.cells.iter().map(|c| c.row_index).max().unwrap_or(0)
    }

    pub fn max_column(&self) -> u32 {
        self.cells.iter().map(|c| c.column_index).max().unwrap_or(0)
    }

    /// Cells grouped by ascending row-index, each group sorted by ascending
    /// column-index. Groups are keyed by whatever `row_index` values are
    /// actually present, so a malformed `RowIndex: 0` lands in its own
    /// group instead of panicking.
    pub fn rows(&self) -> Vec<TableRow> {
        let mut by_row: std::collections::BTreeMap<u32, Vec<usize>> = std::collections::BTreeMap::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            by_row.entry(cell.row_index).or_default().push(idx);
        }
        for row in by_row.values_mut() {
            row.sort_by_key(|&idx| self.cells[idx].column_index);
        }
        by_row.into_values().map(TableRow).collect()
    }

    /// Cells whose row-span or column-span exceeds 1. Does not replace the
    /// constituent cells in `rows()`.
    pub fn merged_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.is_merged()).collect()
    }

    pub fn word_count(&self) -> usize {
        self.cells.iter().map(|c| c.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u32, col: u32) -> Cell {
        Cell {
            row_index: row,
            column_index: col,
            row_span: 1,
            column_span: 1,
            entity_types: vec![],
            words: vec![],
            selection_element: None,
            bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.1),
        }
    }

    #[test]
    fn rows_group_and_sort_cells() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(2, 1), cell(1, 2), cell(1, 1), cell(2, 2)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.len(), 2);
        assert_eq!(table.cells[rows[0].0[0]].column_index, 1);
        assert_eq!(table.cells[rows[0].0[1]].column_index, 2);
    }

    #[test]
    fn rows_tolerates_zero_row_index_instead_of_panicking() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(0, 1), cell(1, 1)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        let rows = table.rows();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn merged_detection_uses_spans() {
        let mut c = cell(1, 1);
        c.row_span = 2;
        assert!(c.is_merged());
        assert!(!cell(1, 1).is_merged());
    }
}
