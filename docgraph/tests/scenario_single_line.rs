//! Scenario A: a page with a single LINE of two WORDs and no LAYOUT
//! blocks at all renders as plain space-joined text through a single
//! fabricated LAYOUT_TEXT.

mod common;

use common::*;
use docgraph::LinearizationOptions;

#[test]
fn single_line_two_words_renders_space_joined_text() {
    let doc = document(
        1,
        vec![
            page("page1", &["line1"]),
            line("line1", &["word1", "word2"], 0.1, 0.1, 0.3, 0.05),
            word("word1", "Hello", 0.1, 0.1, 0.1, 0.05),
            word("word2", "World", 0.25, 0.1, 0.1, 0.05),
        ],
    );

    let parsed = docgraph::parse(raw_document(doc)).expect("parses");
    let text = parsed.text(&LinearizationOptions::default());
    assert_eq!(text, "Hello World");

    let page = parsed.page(0).unwrap();
    assert_eq!(page.lines.len(), 1);
    assert_eq!(page.layouts.len(), 1);
    assert!(page.layouts[0].synthetic);
}
