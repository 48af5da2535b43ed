//! Expense document projection, grounded in `original_source/identity.go`'s
//! sibling expense handling and `form.go`'s aggregation style.

use crate::block::Block;
use crate::build::parse_embedded;
use crate::error::Result;
use crate::model::Document;

/// One flattened summary field (`AnalyzeExpense`'s `SummaryFields`),
/// rendered the same way [`crate::form::Form`] renders a key-value.
#[derive(Debug, Clone)]
pub struct ExpenseSummaryField {
    pub key: String,
    pub value: String,
    pub confidence: Option<f64>,
}

/// One row of a line-item table, as flat cell text in column order.
#[derive(Debug, Clone)]
pub struct ExpenseLineItem {
    pub cells: Vec<String>,
}

/// A single embedded expense document. Its `TABLE` blocks are the line
/// item groups (`AnalyzeExpense`'s `LineItemGroups`); its `KEY_VALUE_SET`
/// blocks are the summary fields — both reuse the same table/key-value
/// builders every ordinary page uses.
#[derive(Debug)]
pub struct ExpenseDocument {
    document: Document,
}

impl ExpenseDocument {
    pub fn parse(blocks: Vec<Block>) -> Result<Self> {
        Ok(Self { document: parse_embedded(blocks)? })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn summary_fields(&self) -> Vec<ExpenseSummaryField> {
        let page = &self.document.pages()[0];
        page.key_values
            .iter()
            .map(|kv| {
                let key = kv.key.words.iter().map(|&i| page.word(i).text.as_str()).collect::<Vec<_>>().join(" ");
                let value =
                    kv.value.words.iter().map(|&i| page.word(i).text.as_str()).collect::<Vec<_>>().join(" ");
                let confidences: Vec<f64> = kv
                    .key
                    .words
                    .iter()
                    .chain(kv.value.words.iter())
                    .filter_map(|&i| page.word(i).confidence)
                    .collect();
                let confidence = if confidences.is_empty() {
                    None
                } else {
                    Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
                };
                ExpenseSummaryField { key, value, confidence }
            })
            .collect()
    }

    /// One `Vec<ExpenseLineItem>` per `TABLE` block, each table's rows in
    /// row/column order exactly as [`crate::model::Table::rows`] produces.
    pub fn line_items(&self) -> Vec<Vec<ExpenseLineItem>> {
        let page = &self.document.pages()[0];
        page.tables
            .iter()
            .map(|table| {
                table
                    .rows()
                    .iter()
                    .map(|row| {
                        let cells = row
                            .0
                            .iter()
                            .map(|&idx| {
                                table.cells[idx]
                                    .words
                                    .iter()
                                    .map(|&wi| page.word(wi).text.as_str())
                                    .collect::<Vec<_>>()
                                    .join(" ")
                            })
                            .collect();
                        ExpenseLineItem { cells }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockType, Relationship, RelationshipType};

    fn word_block(id: &str, text: &str) -> Block {
        Block {
            block_type: BlockType::Word,
            id: id.to_string(),
            confidence: Some(97.0),
            text: Some(text.to_string()),
            text_type: None,
            selection_status: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            entity_types: vec![],
            geometry: None,
            relationships: vec![],
            query: None,
        }
    }

    fn cell_block(id: &str, row: u32, col: u32, word_id: &str) -> Block {
        Block {
            block_type: BlockType::Cell,
            id: id.to_string(),
            confidence: None,
            text: None,
            text_type: None,
            selection_status: None,
            row_index: Some(row),
            column_index: Some(col),
            row_span: None,
            column_span: None,
            entity_types: vec![],
            geometry: None,
            relationships: vec![Relationship { kind: RelationshipType::Child, ids: vec![word_id.to_string()] }],
            query: None,
        }
    }

    #[test]
    fn line_items_flatten_table_rows() {
        let blocks = vec![
            Block {
                block_type: BlockType::Table,
                id: "t1".into(),
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
                relationships: vec![Relationship {
                    kind: RelationshipType::Child,
                    ids: vec!["c1".into(), "c2".into()],
                }],
                query: None,
            },
            cell_block("c1", 1, 1, "w1"),
            cell_block("c2", 1, 2, "w2"),
            word_block("w1", "Widget"),
            word_block("w2", "9.99"),
        ];
        let expense = ExpenseDocument::parse(blocks).unwrap();
        let line_items = expense.line_items();
        assert_eq!(line_items.len(), 1);
        assert_eq!(line_items[0][0].cells, vec!["Widget".to_string(), "9.99".to_string()]);
    }

    #[test]
    fn summary_fields_empty_without_key_values() {
        let blocks = vec![word_block("w1", "stray")];
        let expense = ExpenseDocument::parse(blocks).unwrap();
        assert!(expense.summary_fields().is_empty());
    }
}
