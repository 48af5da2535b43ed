//! Scenario E: a LAYOUT_TEXT contains two Lines, L1 and L2. A
//! KEY_VALUE_SET separately claims L2's words directly as its key. After
//! reconciliation the LAYOUT_TEXT should contain L1 unchanged and the
//! KeyValue as a sibling; L2 must not survive as a standalone child, since
//! rendering it too would duplicate w3/w4 in the output.

mod common;

use common::*;
use docgraph::LayoutChild;

#[test]
fn claimed_line_is_dropped_from_its_layout_after_reconciliation() {
    let doc = document(
        1,
        vec![
            page("page1", &["layout_text", "kv_key"]),
            layout("LAYOUT_TEXT", "layout_text", &["l1", "l2"], 0.0, 0.0, 1.0, 1.0),
            line("l1", &["w1", "w2"], 0.0, 0.0, 0.2, 0.03),
            line("l2", &["w3", "w4"], 0.0, 0.2, 0.2, 0.03),
            word("w1", "Hello", 0.0, 0.0, 0.1, 0.03),
            word("w2", "World", 0.1, 0.0, 0.1, 0.03),
            word("w3", "Foo", 0.0, 0.2, 0.1, 0.03),
            word("w4", "Bar", 0.1, 0.2, 0.1, 0.03),
            key_only("kv_key", &["w3", "w4"]),
        ],
    );

    let parsed = docgraph::parse(raw_document(doc)).expect("parses");
    let page = parsed.page(0).unwrap();

    let layout = page.layouts.iter().find(|l| l.children.len() >= 2).expect("merged layout");
    assert_eq!(layout.children.len(), 2);

    match layout.children[0] {
        LayoutChild::Line(idx) => {
            let line = page.line(idx);
            let texts: Vec<&str> = line.words.iter().map(|&w| page.word(w).text.as_str()).collect();
            assert_eq!(texts, vec!["Hello", "World"]);
        }
        other => panic!("expected L1 as first child, got {other:?}"),
    }
    assert!(matches!(layout.children[1], LayoutChild::KeyValue(_)));

    let still_has_l2_as_child = page
        .layouts
        .iter()
        .flat_map(|l| l.children.iter())
        .any(|c| matches!(c, LayoutChild::Line(idx) if page.line(*idx).words.iter().any(|&w| page.word(w).text == "Foo")));
    assert!(!still_has_l2_as_child);
}
