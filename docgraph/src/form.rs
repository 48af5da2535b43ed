//! Form aggregator (component §4.3): flattens a page's key-values into a
//! map keyed by trimmed key text, grounded in `original_source/form.go`'s
//! `Form`/`Field` types.

use std::collections::HashMap;

use crate::linearize::LinearizationOptions;
use crate::model::{KeyValue, Page};

/// One flattened key/value pair, with the key/value text already rendered
/// through the linearizer (so a selection-element value surfaces as its
/// marker, same as `[X]`/`[ ]` in free-text rendering).
#[derive(Debug, Clone)]
pub struct Field {
    pub key: String,
    pub value: String,
    pub confidence: Option<f64>,
}

/// A page's key-values, deduplicated by trimmed key text. On a key
/// collision the existing field is kept unless the new one has strictly
/// greater confidence — ties keep the first-inserted, matching
/// `form.go`'s `Form.Add`.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: HashMap<String, Field>,
    order: Vec<String>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a Form from every KeyValue on `page`.
    pub fn from_page(page: &Page, options: &LinearizationOptions) -> Self {
        let mut form = Form::new();
        for kv in &page.key_values {
            form.add_field(field_from_key_value(kv, page, options));
        }
        form
    }

    pub fn add_field(&mut self, field: Field) {
        let key = field.key.trim().to_string();
        match self.fields.get(&key) {
            Some(existing) if field.confidence.unwrap_or(0.0) <= existing.confidence.unwrap_or(0.0) => {}
            Some(_) => {
                self.fields.insert(key, field);
            }
            None => {
                self.order.push(key.clone());
                self.fields.insert(key, field);
            }
        }
    }

    /// Looks up a field by its trimmed key text, compared case-sensitively.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key.trim())
    }

    /// Fields in first-insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.order.iter().filter_map(move |k| self.fields.get(k))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn field_from_key_value(kv: &KeyValue, page: &Page, options: &LinearizationOptions) -> Field {
    let key_text = kv.key.words.iter().map(|&i| page.word(i).text.as_str()).collect::<Vec<_>>().join(" ");

    let value_text = if let Some(selection) = &kv.value.selection_element {
        if selection.status.is_selected() {
            options.selection_element_selected.clone()
        } else {
            options.selection_element_not_selected.clone()
        }
    } else {
        kv.value.words.iter().map(|&i| page.word(i).text.as_str()).collect::<Vec<_>>().join(" ")
    };

    let confidences: Vec<f64> =
        kv.key.words.iter().chain(kv.value.words.iter()).filter_map(|&i| page.word(i).confidence).collect();
    let confidence =
        if confidences.is_empty() { None } else { Some(confidences.iter().sum::<f64>() / confidences.len() as f64) };

    Field { key: key_text, value: value_text, confidence }
}
