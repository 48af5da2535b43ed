//! Text linearization (component §4.9): walks a [`Document`]'s reading
//! order and renders deterministic text, alongside a parallel stream of
//! the [`EmittedWord`]s that text was built from.
//!
//! Every entry point comes in a `text` / `text_and_words` pair; `text`
//! is always `text_and_words(..).0` and exists only for callers that do
//! not need the word stream.

mod table;

pub mod options;
pub use options::{LinearizationOptions, TableLinearizationFormat};

use crate::geometry::{BoundingBox, Geometry};
use crate::model::document::Document;
use crate::model::keyvalue::KeyValue;
use crate::model::layout::{Layout, LayoutChild, LayoutKind};
use crate::model::page::Page;
use crate::model::signature::Signature;
use crate::model::word::{EmittedWord, Line};

impl Document {
    pub fn text(&self, options: &LinearizationOptions) -> String {
        self.text_and_words(options).0
    }

    /// Joins every page's rendered text with `"\n"`.
    pub fn text_and_words(&self, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
        let mut texts = Vec::with_capacity(self.pages().len());
        let mut words = Vec::new();
        for page in self.pages() {
            let (text, page_words) = page.text_and_words(options);
            texts.push(text);
            words.extend(page_words);
        }
        (texts.join("\n"), words)
    }
}

impl Page {
    pub fn text(&self, options: &LinearizationOptions) -> String {
        self.text_and_words(options).0
    }

    /// Renders every layout on the page in reading order and joins the
    /// non-empty results with `layout_element_separator`. A layout that
    /// renders to nothing (hidden by an option, or emptied by
    /// reconciliation) contributes no separator either.
    pub fn text_and_words(&self, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
        let mut parts = Vec::new();
        let mut words = Vec::new();

        for layout in &self.layouts {
            let (text, layout_words) = render_layout(self, layout, options);
            if text.is_empty() && layout_words.is_empty() {
                continue;
            }
            parts.push(text);
            words.extend(layout_words);
        }

        (parts.join(&options.layout_element_separator), words)
    }

    /// Case-insensitive substring match of `key` against this page's
    /// key-value keys, returning the first match's value text. Mirrors
    /// the source service's key lookup: the match runs against the raw,
    /// untrimmed key text.
    pub fn search_value_by_key(&self, key: &str, options: &LinearizationOptions) -> Option<String> {
        let needle = key.to_lowercase();
        self.key_values.iter().find_map(|kv| {
            let key_text = kv.key.words.iter().map(|&i| self.word(i).text.as_str()).collect::<Vec<_>>().join(" ");
            if key_text.to_lowercase().contains(&needle) {
                Some(render_keyvalue(kv, self, options).0)
            } else {
                None
            }
        })
    }
}

impl Layout {
    pub fn text(&self, page: &Page, options: &LinearizationOptions) -> String {
        self.text_and_words(page, options).0
    }

    pub fn text_and_words(&self, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
        render_layout(page, self, options)
    }
}

fn is_hidden(kind: LayoutKind, options: &LinearizationOptions) -> bool {
    match kind {
        LayoutKind::Header => options.hide_header_layout,
        LayoutKind::Footer => options.hide_footer_layout,
        LayoutKind::Figure => options.hide_figure_layout,
        LayoutKind::PageNumber => options.hide_page_number_layout,
        _ => false,
    }
}

fn child_bounding_box(page: &Page, child: LayoutChild) -> BoundingBox {
    match child {
        LayoutChild::Line(i) => page.line(i).bounding_box,
        LayoutChild::KeyValue(i) => *page.key_value(i).bounding_box(),
        LayoutChild::Table(i) => page.table(i).bounding_box,
        LayoutChild::Signature(i) => page.signature(i).geometry.bounding_box,
        LayoutChild::Layout(i) => page.layout(i).bounding_box,
    }
}

/// "Same paragraph" heuristic (§4.8): two adjacent children belong to the
/// same paragraph when their left edges nearly line up and their tops are
/// close relative to the shorter of the two. Deliberately asymmetric —
/// `previous`'s width gates the left tolerance, never the narrower or
/// wider of the pair.
fn same_paragraph(previous: &BoundingBox, current: &BoundingBox, options: &LinearizationOptions) -> bool {
    let delta_left = (current.left - previous.left).abs();
    let delta_top = (current.top - previous.top).abs();
    delta_left <= options.heuristic_h_tolerance * previous.width
        && delta_top <= options.heuristic_overlap_ratio * previous.height.min(current.height)
}

fn render_layout(page: &Page, layout: &Layout, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    if is_hidden(layout.kind, options) {
        return (String::new(), Vec::new());
    }
    if layout.children.is_empty() {
        return (String::new(), Vec::new());
    }

    let boxes: Vec<BoundingBox> = layout.children.iter().map(|&c| child_bounding_box(page, c)).collect();
    let groups = super::build::rows::group_rows(&boxes, options.heuristic_overlap_ratio);
    let is_table_grid = layout.kind == LayoutKind::Table
        && layout.children.iter().all(|c| matches!(c, LayoutChild::Line(_)));

    let mut text = String::new();
    let mut words = Vec::new();
    let mut first_overall = true;
    let mut previous_box: Option<BoundingBox> = None;

    for group in &groups {
        for (position, &child_position) in group.iter().enumerate() {
            let child = layout.children[child_position];
            let (child_text, mut child_words) = render_child(page, child, options);
            if child_text.is_empty() && child_words.is_empty() {
                continue;
            }
            let child_box = boxes[child_position];

            match layout.kind {
                LayoutKind::List => {
                    if !first_overall {
                        text.push_str(&options.list_element_separator);
                    }
                    text.push_str(&options.list_element_prefix);
                    text.push_str(&child_text);
                    text.push_str(&options.list_element_suffix);
                    if let Some(word) = affix_word(&options.list_element_prefix, options) {
                        child_words.insert(0, word);
                    }
                    if let Some(word) = affix_word(&options.list_element_suffix, options) {
                        child_words.push(word);
                    }
                }
                LayoutKind::Table if is_table_grid => {
                    if position > 0 {
                        text.push_str(&options.table_column_separator);
                    }
                    text.push_str(&child_text);
                }
                _ => {
                    let separator = if first_overall {
                        ""
                    } else {
                        match previous_box {
                            Some(previous) if same_paragraph(&previous, &child_box, options) => {
                                options.same_paragraph_separator.as_str()
                            }
                            _ => options.layout_element_separator.as_str(),
                        }
                    };
                    text.push_str(separator);
                    text.push_str(&child_text);
                }
            }

            words.extend(child_words);
            first_overall = false;
            previous_box = Some(child_box);
        }

        if is_table_grid {
            text.push_str(&options.table_row_separator);
        }
    }

    text = apply_layout_wrapping(layout.kind, text, &mut words, options);

    if layout.no_new_lines && options.remove_new_lines_in_leaf_elements {
        text = collapse_whitespace_newlines(&text);
    }
    text = collapse_newline_runs(&text, options.max_number_of_consecutive_new_lines);

    (text, words)
}

fn apply_layout_wrapping(
    kind: LayoutKind,
    text: String,
    words: &mut Vec<EmittedWord>,
    options: &LinearizationOptions,
) -> String {
    if !options.add_prefixes_and_suffixes_in_text {
        return text;
    }
    let (prefix, suffix): (&str, &str) = match kind {
        LayoutKind::Title => (&options.title_prefix, &options.title_suffix),
        LayoutKind::SectionHeader => (&options.section_header_prefix, &options.section_header_suffix),
        LayoutKind::Text => (&options.text_prefix, &options.text_suffix),
        LayoutKind::PageNumber => (&options.page_number_prefix, &options.page_number_suffix),
        LayoutKind::List => (&options.list_layout_prefix, &options.list_layout_suffix),
        LayoutKind::Table => (&options.table_layout_prefix, &options.table_layout_suffix),
        LayoutKind::KeyValue => (&options.key_value_layout_prefix, &options.key_value_layout_suffix),
        LayoutKind::Header | LayoutKind::Footer | LayoutKind::Figure => ("", ""),
    };
    if let Some(word) = affix_word(prefix, options) {
        words.insert(0, word);
    }
    if let Some(word) = affix_word(suffix, options) {
        words.push(word);
    }
    format!("{prefix}{text}{suffix}")
}

fn render_child(page: &Page, child: LayoutChild, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    match child {
        LayoutChild::Line(idx) => render_line(page.line(idx), page),
        LayoutChild::KeyValue(idx) => {
            if !options.linearize_key_values {
                (String::new(), Vec::new())
            } else {
                render_keyvalue(page.key_value(idx), page, options)
            }
        }
        LayoutChild::Table(idx) => table::render_table(page.table(idx), page, options),
        LayoutChild::Signature(idx) => render_signature(page.signature(idx), options),
        LayoutChild::Layout(idx) => render_layout(page, page.layout(idx), options),
    }
}

fn render_line(line: &Line, page: &Page) -> (String, Vec<EmittedWord>) {
    let words: Vec<EmittedWord> = line.words.iter().map(|&i| page.word(i).emit()).collect();
    let text = words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
    (text, words)
}

/// When `Value` holds a [`crate::model::SelectionElement`], the selection
/// marker comes first (marker, then separator, then the key) — mirroring
/// the typical checkbox-left form layout — instead of the usual
/// key-then-value order.
fn render_keyvalue(kv: &KeyValue, page: &Page, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    let key_words: Vec<EmittedWord> = kv.key.words.iter().map(|&i| page.word(i).emit()).collect();
    let key_text: String = key_words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
    let key_rendered = wrap(&options.key_prefix, &key_text, &options.key_suffix);

    let mut words = Vec::new();
    let body = if let Some(selection) = &kv.value.selection_element {
        let marker = if selection.status.is_selected() {
            &options.selection_element_selected
        } else {
            &options.selection_element_not_selected
        };
        words.push(synthetic_word(marker, &selection.geometry, selection.confidence));
        words.extend(key_words);
        // Spec: selection branch is "marker + separator + keyText", not the
        // prefix/suffix-wrapped key — KeyPrefix/KeySuffix apply only to the
        // ordinary key/value order below.
        format!("{marker}{}{key_text}", options.same_paragraph_separator)
    } else {
        let value_words: Vec<EmittedWord> = kv.value.words.iter().map(|&i| page.word(i).emit()).collect();
        let value_text: String = value_words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
        let value_rendered = wrap(&options.value_prefix, &value_text, &options.value_suffix);

        if let Some(word) = affix_word(&options.key_prefix, options) {
            words.push(word);
        }
        words.extend(key_words);
        if let Some(word) = affix_word(&options.key_suffix, options) {
            words.push(word);
        }
        if let Some(word) = affix_word(&options.value_prefix, options) {
            words.push(word);
        }
        words.extend(value_words);
        if let Some(word) = affix_word(&options.value_suffix, options) {
            words.push(word);
        }
        format!("{key_rendered}{}{value_rendered}", options.same_paragraph_separator)
    };

    if let Some(word) = affix_word(&options.key_value_prefix, options) {
        words.insert(0, word);
    }
    if let Some(word) = affix_word(&options.key_value_suffix, options) {
        words.push(word);
    }

    (wrap(&options.key_value_prefix, &body, &options.key_value_suffix), words)
}

fn render_signature(signature: &Signature, options: &LinearizationOptions) -> (String, Vec<EmittedWord>) {
    let word = synthetic_word(&options.signature_token, &signature.geometry, None);
    (options.signature_token.clone(), vec![word])
}

fn wrap(prefix: &str, body: &str, suffix: &str) -> String {
    format!("{prefix}{body}{suffix}")
}

fn synthetic_word(text: &str, geometry: &Geometry, confidence: Option<f64>) -> EmittedWord {
    EmittedWord {
        id: String::new(),
        text: text.to_string(),
        text_type: None,
        confidence,
        geometry: geometry.clone(),
        synthetic: true,
    }
}

pub(super) fn affix_word(text: &str, options: &LinearizationOptions) -> Option<EmittedWord> {
    if !options.add_prefixes_and_suffixes_as_words || text.is_empty() {
        return None;
    }
    Some(EmittedWord {
        id: String::new(),
        text: text.to_string(),
        text_type: None,
        confidence: None,
        geometry: Geometry { bounding_box: BoundingBox::new(0.0, 0.0, 0.0, 0.0), polygon: Vec::new() },
        synthetic: true,
    })
}

/// Replaces `\n` with a space, then collapses runs of spaces to one.
fn collapse_whitespace_newlines(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut last_was_space = false;
    for ch in text.chars() {
        let ch = if ch == '\n' { ' ' } else { ch };
        if ch == ' ' {
            if last_was_space {
                continue;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }
        collapsed.push(ch);
    }
    collapsed
}

/// Collapses any run of more than `max` consecutive newlines down to
/// exactly `max`.
fn collapse_newline_runs(text: &str, max: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= max {
                result.push(ch);
            }
        } else {
            run = 0;
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_newline_runs_caps_at_max() {
        assert_eq!(collapse_newline_runs("a\n\n\n\nb", 2), "a\n\nb");
    }

    #[test]
    fn collapse_whitespace_newlines_joins_and_dedupes_spaces() {
        assert_eq!(collapse_whitespace_newlines("a\n \nb"), "a b");
    }

    #[test]
    fn same_paragraph_is_asymmetric_on_previous_width() {
        let previous = BoundingBox::new(0.0, 0.0, 0.5, 0.1);
        let current = BoundingBox::new(0.03, 0.01, 0.01, 0.1);
        let options = LinearizationOptions::default();
        assert!(same_paragraph(&previous, &current, &options));
        // swapping the operands changes the tolerance basis and can flip the result.
        assert!(!same_paragraph(&current, &previous, &options));
    }

    #[test]
    fn affix_word_is_none_unless_flag_set() {
        let mut options = LinearizationOptions::default();
        options.title_prefix = ">> ".to_string();
        assert!(affix_word(&options.title_prefix, &options).is_none());
        options.add_prefixes_and_suffixes_as_words = true;
        let word = affix_word(&options.title_prefix, &options).unwrap();
        assert!(word.synthetic);
        assert_eq!(word.text, ">> ");
    }

    fn page_with_word(text: &str) -> Page {
        use crate::model::word::Word;
        use std::collections::HashSet;
        let geometry = crate::geometry::Geometry { bounding_box: BoundingBox::new(0.0, 0.0, 0.1, 0.02), polygon: vec![] };
        Page {
            id: "p1".into(),
            number: 1,
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            words: vec![Word { id: "w1".into(), text: text.into(), text_type: None, confidence: Some(99.0), geometry, line: None, cell: None }],
            lines: vec![],
            tables: vec![],
            key_values: vec![],
            queries: vec![],
            signatures: vec![],
            layouts: vec![],
            owned_ids: HashSet::new(),
        }
    }

    #[test]
    fn render_keyvalue_emits_affix_words_when_flag_set() {
        use crate::model::keyvalue::{Key, KeyValue, Value};
        use crate::model::word::WordIndex;

        let page = page_with_word("Name");
        let kv = KeyValue {
            id: "kv1".into(),
            key: Key { words: vec![WordIndex(0)] },
            value: Value { words: vec![], selection_element: None },
            bounding_box: BoundingBox::new(0.0, 0.0, 0.2, 0.02),
        };

        let mut options = LinearizationOptions::default();
        options.add_prefixes_and_suffixes_as_words = true;
        options.key_value_prefix = "<".to_string();
        options.key_value_suffix = ">".to_string();

        let (_, words) = render_keyvalue(&kv, &page, &options);
        let affix_texts: Vec<&str> = words.iter().filter(|w| w.synthetic).map(|w| w.text.as_str()).collect();
        assert!(affix_texts.contains(&"<"));
        assert!(affix_texts.contains(&">"));
        assert!(affix_texts.contains(&options.key_suffix.as_str()));
        assert!(affix_texts.contains(&options.value_prefix.as_str()));
    }
}
