//! Identity document projection, grounded in `original_source/identity.go`.

use std::collections::HashMap;

use crate::block::Block;
use crate::build::parse_embedded;
use crate::error::Result;
use crate::model::Document;

/// Canonical identity field categories, classified by the rendered key
/// text rather than a dedicated wire tag — `original_source/identity.go`'s
/// field-type enum has no counterpart in the generic block schema this
/// crate parses, so classification falls back to the same
/// case-insensitive substring matching `Page::search_value_by_key` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityFieldType {
    FirstName,
    LastName,
    MiddleName,
    DocumentNumber,
    DateOfBirth,
    DateOfIssue,
    ExpirationDate,
    Address,
    PlaceOfBirth,
    Other,
}

impl IdentityFieldType {
    fn classify(key_text: &str) -> Self {
        let lower = key_text.to_lowercase();
        if lower.contains("first name") {
            IdentityFieldType::FirstName
        } else if lower.contains("last name") || lower.contains("surname") {
            IdentityFieldType::LastName
        } else if lower.contains("middle name") {
            IdentityFieldType::MiddleName
        } else if lower.contains("document number") || lower.contains("id number") || lower.contains("license number")
        {
            IdentityFieldType::DocumentNumber
        } else if lower.contains("date of birth") || lower.contains("dob") {
            IdentityFieldType::DateOfBirth
        } else if lower.contains("date of issue") || lower.contains("issue date") {
            IdentityFieldType::DateOfIssue
        } else if lower.contains("expiration") || lower.contains("expiry") {
            IdentityFieldType::ExpirationDate
        } else if lower.contains("address") {
            IdentityFieldType::Address
        } else if lower.contains("place of birth") || lower.contains("birthplace") {
            IdentityFieldType::PlaceOfBirth
        } else {
            IdentityFieldType::Other
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentityField {
    pub field_type: IdentityFieldType,
    pub key: String,
    pub value: String,
    pub confidence: Option<f64>,
}

/// A single embedded identity document: its own block graph, built and
/// materialized exactly as an ordinary page would be, just without layout
/// analysis — identity extraction never returns LAYOUT blocks, so every
/// key-value renders through the synthetic-layout path (§4.6).
#[derive(Debug)]
pub struct IdentityDocument {
    document: Document,
}

impl IdentityDocument {
    pub fn parse(blocks: Vec<Block>) -> Result<Self> {
        Ok(Self { document: parse_embedded(blocks)? })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Every key-value on the embedded document, flattened and classified.
    pub fn fields(&self) -> Vec<IdentityField> {
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
                IdentityField { field_type: IdentityFieldType::classify(&key), key, value, confidence }
            })
            .collect()
    }

    /// First field of each classified type, keeping the earliest in input
    /// order on a collision — mirrors [`crate::form::Form`]'s tie handling.
    pub fn fields_by_type(&self) -> HashMap<IdentityFieldType, IdentityField> {
        let mut map = HashMap::new();
        for field in self.fields() {
            map.entry(field.field_type).or_insert(field);
        }
        map
    }
}
