//! Scenario C: a 2x2 TABLE wrapped in a LAYOUT_TABLE renders as a
//! tab/newline grid by default, and as a Markdown pipe table when
//! requested.

mod common;

use common::*;
use docgraph::{LinearizationOptions, TableLinearizationFormat};

fn table_document() -> serde_json::Value {
    document(
        1,
        vec![
            page("page1", &["layout_table"]),
            layout("LAYOUT_TABLE", "layout_table", &["table1"], 0.0, 0.0, 1.0, 1.0),
            table("table1", &["c11", "c12", "c21", "c22"], 0.0, 0.0, 1.0, 0.3),
            cell("c11", 1, 1, &["w11"], 0.0, 0.0, 0.1, 0.05),
            cell("c12", 1, 2, &["w12"], 0.2, 0.0, 0.1, 0.05),
            cell("c21", 2, 1, &["w21"], 0.0, 0.1, 0.1, 0.05),
            cell("c22", 2, 2, &["w22"], 0.2, 0.1, 0.1, 0.05),
            word("w11", "Name", 0.0, 0.0, 0.1, 0.05),
            word("w12", "Amount", 0.2, 0.0, 0.1, 0.05),
            word("w21", "Widget", 0.0, 0.1, 0.1, 0.05),
            word("w22", "10", 0.2, 0.1, 0.1, 0.05),
        ],
    )
}

#[test]
fn plaintext_table_renders_tab_and_newline_grid() {
    let parsed = docgraph::parse(raw_document(table_document())).expect("parses");
    let text = parsed.text(&LinearizationOptions::default());
    assert_eq!(text, "Name\tAmount\nWidget\t10\n");
}

#[test]
fn markdown_table_renders_pipe_grid() {
    let mut options = LinearizationOptions::default();
    options.table_linearization_format = TableLinearizationFormat::Markdown;
    let parsed = docgraph::parse(raw_document(table_document())).expect("parses");
    let text = parsed.text(&options);
    assert_eq!(text, "| Name | Amount |\n|---|---|\n| Widget | 10 |");
}
