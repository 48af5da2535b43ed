//! Linearization options (component §4.9 / spec §6): every knob the
//! renderer consults, deserializable from a config file so callers can
//! override defaults without recompiling.

use serde::{Deserialize, Serialize};

/// How a [`crate::model::Table`] is rendered when it clears
/// [`LinearizationOptions::table_min_table_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLinearizationFormat {
    Plaintext,
    Markdown,
}

/// Bundled prefix/suffix/separator/threshold knobs for [`crate::model::Document::text_and_words`]
/// and friends. Every field has a default matching the service's own
/// linearization behavior; callers override only what they need to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearizationOptions {
    pub linearize_tables: bool,
    pub linearize_key_values: bool,
    pub remove_new_lines_in_leaf_elements: bool,
    pub max_number_of_consecutive_new_lines: usize,

    pub hide_header_layout: bool,
    pub hide_footer_layout: bool,
    pub hide_figure_layout: bool,
    pub hide_page_number_layout: bool,

    pub page_number_prefix: String,
    pub page_number_suffix: String,

    pub same_paragraph_separator: String,
    pub layout_element_separator: String,

    pub list_element_separator: String,
    pub list_layout_prefix: String,
    pub list_layout_suffix: String,
    pub list_element_prefix: String,
    pub list_element_suffix: String,

    pub title_prefix: String,
    pub title_suffix: String,
    pub section_header_prefix: String,
    pub section_header_suffix: String,
    pub text_prefix: String,
    pub text_suffix: String,

    pub table_layout_prefix: String,
    pub table_layout_suffix: String,
    pub table_remove_column_headers: bool,
    pub table_linearization_format: TableLinearizationFormat,
    /// Passed through to an eventual tabulate-style renderer; only the
    /// "github" pipe-table style is actually implemented today, so any
    /// other value renders identically to it.
    pub table_tabulate_format: String,
    pub table_min_table_words: usize,
    pub table_column_separator: String,
    pub table_row_separator: String,
    pub table_cell_prefix: String,
    pub table_cell_suffix: String,

    pub key_value_layout_prefix: String,
    pub key_value_layout_suffix: String,
    pub key_value_prefix: String,
    pub key_value_suffix: String,
    pub key_prefix: String,
    pub key_suffix: String,
    pub value_prefix: String,
    pub value_suffix: String,

    pub selection_element_selected: String,
    pub selection_element_not_selected: String,

    pub heuristic_h_tolerance: f64,
    pub heuristic_line_break_threshold: f64,
    pub heuristic_overlap_ratio: f64,

    pub signature_token: String,

    /// When set, every prefix and suffix also appears as its own
    /// synthetic, zero-geometry entry in the word stream. Separators
    /// (same-paragraph, layout-element, table column/row, list-element)
    /// never become words, regardless of this flag.
    pub add_prefixes_and_suffixes_as_words: bool,
    /// When unset, prefixes and suffixes are computed but not spliced
    /// into the rendered text — only [`Self::add_prefixes_and_suffixes_as_words`]
    /// can still surface them, in the word stream.
    pub add_prefixes_and_suffixes_in_text: bool,
}

impl Default for LinearizationOptions {
    fn default() -> Self {
        Self {
            linearize_tables: true,
            linearize_key_values: true,
            remove_new_lines_in_leaf_elements: true,
            max_number_of_consecutive_new_lines: 2,

            hide_header_layout: false,
            hide_footer_layout: false,
            hide_figure_layout: false,
            hide_page_number_layout: false,

            page_number_prefix: String::new(),
            page_number_suffix: String::new(),

            same_paragraph_separator: " ".to_string(),
            layout_element_separator: "\n\n".to_string(),

            list_element_separator: "\n".to_string(),
            list_layout_prefix: String::new(),
            list_layout_suffix: String::new(),
            list_element_prefix: "* ".to_string(),
            list_element_suffix: String::new(),

            title_prefix: String::new(),
            title_suffix: "\n".to_string(),
            section_header_prefix: String::new(),
            section_header_suffix: "\n".to_string(),
            text_prefix: String::new(),
            text_suffix: String::new(),

            table_layout_prefix: "\n\n".to_string(),
            table_layout_suffix: "\n".to_string(),
            table_remove_column_headers: false,
            table_linearization_format: TableLinearizationFormat::Plaintext,
            table_tabulate_format: "github".to_string(),
            table_min_table_words: 0,
            table_column_separator: "\t".to_string(),
            table_row_separator: "\n".to_string(),
            table_cell_prefix: String::new(),
            table_cell_suffix: String::new(),

            key_value_layout_prefix: String::new(),
            key_value_layout_suffix: String::new(),
            key_value_prefix: String::new(),
            key_value_suffix: String::new(),
            key_prefix: String::new(),
            key_suffix: ":".to_string(),
            value_prefix: " ".to_string(),
            value_suffix: String::new(),

            selection_element_selected: "[X]".to_string(),
            selection_element_not_selected: "[ ]".to_string(),

            heuristic_h_tolerance: 0.3,
            heuristic_line_break_threshold: 0.9,
            heuristic_overlap_ratio: 0.5,

            signature_token: "[SIGNATURE]".to_string(),

            add_prefixes_and_suffixes_as_words: false,
            add_prefixes_and_suffixes_in_text: false,
        }
    }
}
