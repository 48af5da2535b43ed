//! Table rendering (§4.9 step 6): plaintext grid, Markdown pipe table, or
//! — below [`LinearizationOptions::table_min_table_words`] — a flat,
//! word-by-word fallback.

use crate::model::page::Page;
use crate::model::table::{Cell, Table, TableRow};
use crate::model::word::EmittedWord;

use super::affix_word;
use super::options::{LinearizationOptions, TableLinearizationFormat};

pub(super) fn render_table(table: &Table, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    if !options.linearize_tables {
        return (String::new(), Vec::new());
    }
    if table.word_count() < options.table_min_table_words {
        return render_as_plain_words(table, page);
    }
    match options.table_linearization_format {
        TableLinearizationFormat::Plaintext => render_plaintext(table, page, options),
        TableLinearizationFormat::Markdown => render_markdown(table, page, options),
    }
}

fn render_cell(cell: &Cell, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    let mut words = Vec::new();
    let body = if let Some(selection) = &cell.selection_element {
        let marker =
            if selection.status.is_selected() { &options.selection_element_selected } else { &options.selection_element_not_selected };
        words.push(EmittedWord {
            id: String::new(),
            text: marker.clone(),
            text_type: None,
            confidence: selection.confidence,
            geometry: selection.geometry.clone(),
            synthetic: true,
        });
        marker.clone()
    } else {
        let parts: Vec<String> = cell
            .words
            .iter()
            .map(|&i| {
                let word = page.word(i);
                words.push(word.emit());
                word.text.clone()
            })
            .collect();
        parts.join(" ")
    };

    if let Some(word) = affix_word(&options.table_cell_prefix, options) {
        words.insert(0, word);
    }
    if let Some(word) = affix_word(&options.table_cell_suffix, options) {
        words.push(word);
    }

    (format!("{}{}{}", options.table_cell_prefix, body, options.table_cell_suffix), words)
}

fn visible_cell_indices(row: &TableRow, table: &Table, options: &LinearizationOptions) -> Vec<usize> {
    row.0
        .iter()
        .copied()
        .filter(|&i| !(options.table_remove_column_headers && table.cells[i].is_column_header()))
        .collect()
}

fn render_plaintext(table: &Table, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    let mut text = String::new();
    let mut words = Vec::new();

    for row in table.rows() {
        let indices = visible_cell_indices(&row, table, options);
        let mut rendered_cells = Vec::with_capacity(indices.len());
        for index in indices {
            let (cell_text, cell_words) = render_cell(&table.cells[index], page, options);
            rendered_cells.push(cell_text);
            words.extend(cell_words);
        }
        text.push_str(&rendered_cells.join(&options.table_column_separator));
        text.push_str(&options.table_row_separator);
    }

    (text, words)
}

/// Always treats the first row as the header row, whether or not its
/// cells carry `COLUMN_HEADER` entity tags — plenty of real tables never
/// tag headers at all. `table_remove_column_headers` only changes this
/// when the first row *is* tagged: then the header/separator lines are
/// dropped and that row renders as an ordinary body row instead.
fn render_markdown(table: &Table, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    let rows = table.rows();
    if rows.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut words = Vec::new();
    let mut rows = rows.into_iter();

    if let Some(header) = rows.next() {
        let indices = visible_cell_indices(&header, table, options);
        let header_is_tagged = header.0.iter().any(|&i| table.cells[i].is_column_header());
        let (row_text, row_words, column_count) = render_row_markdown(&indices, table, page, options);
        words.extend(row_words);
        lines.push(row_text);
        if !(options.table_remove_column_headers && header_is_tagged) {
            lines.push(format!("|{}", "---|".repeat(column_count)));
        }
    }

    for row in rows {
        let indices = visible_cell_indices(&row, table, options);
        let (row_text, row_words, _) = render_row_markdown(&indices, table, page, options);
        words.extend(row_words);
        lines.push(row_text);
    }

    (lines.join("\n"), words)
}

fn render_row_markdown(
    indices: &[usize],
    table: &Table,
    page: &Page,
    options: &LinearizationOptions,
) -> (String, Vec<EmittedWord>, usize) {
    let mut cells = Vec::with_capacity(indices.len());
    let mut words = Vec::new();
    for &index in indices {
        let (cell_text, cell_words) = render_cell(&table.cells[index], page, options);
        cells.push(cell_text);
        words.extend(cell_words);
    }
    let count = cells.len();
    (format!("| {} |", cells.join(" | ")), words, count)
}

/// Ignores row/column structure entirely: every cell's words, in cell
/// order, joined by a single space. Used only when the table's total word
/// count falls below `table_min_table_words`.
fn render_as_plain_words(table: &Table, page: &Page) -> (String, Vec<EmittedWord>) {
    let mut parts = Vec::new();
    let mut words = Vec::new();
    for cell in &table.cells {
        for &index in &cell.words {
            let word = page.word(index);
            parts.push(word.text.clone());
            words.push(word.emit());
        }
    }
    (parts.join(" "), words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::model::keyvalue::SelectionElement;
    use crate::model::word::{Line, Word, WordIndex};
    use std::collections::HashSet;

    fn word(id: &str, text: &str, left: f64) -> Word {
        Word {
            id: id.to_string(),
            text: text.to_string(),
            text_type: None,
            confidence: Some(99.0),
            geometry: crate::geometry::Geometry { bounding_box: BoundingBox::new(left, 0.0, 0.05, 0.03), polygon: vec![] },
            line: None,
            cell: None,
        }
    }

    fn cell(row: u32, col: u32, word_index: u32) -> Cell {
        Cell {
            row_index: row,
            column_index: col,
            row_span: 1,
            column_span: 1,
            entity_types: vec![],
            words: vec![WordIndex(word_index)],
            selection_element: None,
            bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.1),
        }
    }

    fn page_with_words(words: Vec<Word>, table: Table) -> Page {
        Page {
            id: "p1".into(),
            number: 1,
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            words,
            lines: Vec::<Line>::new(),
            tables: vec![table],
            key_values: vec![],
            queries: vec![],
            signatures: vec![],
            layouts: vec![],
            owned_ids: HashSet::new(),
        }
    }

    #[test]
    fn plaintext_joins_cells_with_tab_and_rows_with_newline() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(1, 1, 0), cell(1, 2, 1), cell(2, 1, 2), cell(2, 2, 3)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        let words = vec![word("w0", "A", 0.0), word("w1", "B", 0.1), word("w2", "C", 0.0), word("w3", "D", 0.1)];
        let page = page_with_words(words, table);
        let options = LinearizationOptions::default();
        let (text, emitted) = render_table(page.tables.first().unwrap(), &page, &options);
        assert_eq!(text, "A\tB\nC\tD\n");
        assert_eq!(emitted.len(), 4);
    }

    #[test]
    fn markdown_emits_header_separator_and_body() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(1, 1, 0), cell(1, 2, 1), cell(2, 1, 2), cell(2, 2, 3)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        let words = vec![word("w0", "A", 0.0), word("w1", "B", 0.1), word("w2", "C", 0.0), word("w3", "D", 0.1)];
        let page = page_with_words(words, table);
        let mut options = LinearizationOptions::default();
        options.table_linearization_format = TableLinearizationFormat::Markdown;
        let (text, _) = render_table(page.tables.first().unwrap(), &page, &options);
        assert_eq!(text, "| A | B |\n|---|---|\n| C | D |");
    }

    #[test]
    fn below_threshold_falls_back_to_plain_words() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(1, 1, 0), cell(1, 2, 1)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        let words = vec![word("w0", "A", 0.0), word("w1", "B", 0.1)];
        let page = page_with_words(words, table);
        let mut options = LinearizationOptions::default();
        options.table_min_table_words = 5;
        let (text, emitted) = render_table(page.tables.first().unwrap(), &page, &options);
        assert_eq!(text, "A B");
        assert_eq!(emitted.len(), 2);
    }

    #[test]
    fn disabled_tables_render_nothing() {
        let table = Table { id: "t1".into(), cells: vec![cell(1, 1, 0)], title: None, footers: vec![], bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.1) };
        let words = vec![word("w0", "A", 0.0)];
        let page = page_with_words(words, table);
        let mut options = LinearizationOptions::default();
        options.linearize_tables = false;
        let (text, emitted) = render_table(page.tables.first().unwrap(), &page, &options);
        assert!(text.is_empty());
        assert!(emitted.is_empty());
    }

    #[test]
    fn table_cell_affixes_emitted_as_words_when_flag_set() {
        let table = Table {
            id: "t1".into(),
            cells: vec![cell(1, 1, 0)],
            title: None,
            footers: vec![],
            bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.1),
        };
        let words = vec![word("w0", "A", 0.0)];
        let page = page_with_words(words, table);
        let mut options = LinearizationOptions::default();
        options.add_prefixes_and_suffixes_as_words = true;
        options.table_cell_prefix = "[".to_string();
        options.table_cell_suffix = "]".to_string();
        let (_, emitted) = render_table(page.tables.first().unwrap(), &page, &options);
        let affix_texts: Vec<&str> = emitted.iter().filter(|w| w.synthetic).map(|w| w.text.as_str()).collect();
        assert!(affix_texts.contains(&"["));
        assert!(affix_texts.contains(&"]"));
    }

    #[test]
    fn selection_element_cell_renders_marker() {
        let mut c = cell(1, 1, 0);
        c.words = vec![];
        c.selection_element = Some(SelectionElement {
            status: crate::block::SelectionStatus::Selected,
            geometry: crate::geometry::Geometry { bounding_box: BoundingBox::new(0.0, 0.0, 0.02, 0.02), polygon: vec![] },
            confidence: Some(95.0),
        });
        let table = Table { id: "t1".into(), cells: vec![c], title: None, footers: vec![], bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.1) };
        let page = page_with_words(vec![], table);
        let options = LinearizationOptions::default();
        let (text, emitted) = render_table(page.tables.first().unwrap(), &page, &options);
        assert_eq!(text, "[X]\n");
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].synthetic);
    }
}
