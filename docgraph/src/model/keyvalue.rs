//! Key-Value pairs, built from `KEY_VALUE_SET` blocks.

use crate::block::SelectionStatus;
use crate::geometry::{BoundingBox, Geometry};
use crate::model::word::WordIndex;

/// Index of a [`KeyValue`] within its page's key-value arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyValueIndex(pub u32);

/// A checkbox-like element: selected or not, with its own geometry.
#[derive(Debug, Clone)]
pub struct SelectionElement {
    pub status: SelectionStatus,
    pub geometry: Geometry,
    pub confidence: Option<f64>,
}

impl SelectionElement {
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.geometry.bounding_box
    }
}

#[derive(Debug, Clone, Default)]
pub struct Key {
    pub words: Vec<WordIndex>,
}

/// A Value holds either words or a selection element, never both — the
/// builder only populates one.
#[derive(Debug, Clone, Default)]
pub struct Value {
    pub words: Vec<WordIndex>,
    pub selection_element: Option<SelectionElement>,
}

#[derive(Debug, Clone)]
pub struct KeyValue {
    pub id: String,
    pub key: Key,
    pub value: Value,
    pub bounding_box: BoundingBox,
}

impl KeyValue {
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}
