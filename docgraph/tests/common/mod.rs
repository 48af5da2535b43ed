//! Shared JSON fixture builders for the integration tests under this
//! directory. Each helper mirrors the wire shape documented in
//! `docgraph::block`, built by hand rather than through `docgraph::parse`
//! so a test's geometry and relationships stay visible at the call site.

use serde_json::{json, Value};

pub fn bbox(left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BoundingBox": {"Left": left, "Top": top, "Width": width, "Height": height},
        "Polygon": []
    })
}

pub fn page(id: &str, children: &[&str]) -> Value {
    json!({
        "BlockType": "PAGE",
        "Id": id,
        "Geometry": bbox(0.0, 0.0, 1.0, 1.0),
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

pub fn word(id: &str, text: &str, left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BlockType": "WORD",
        "Id": id,
        "Text": text,
        "Confidence": 99.0,
        "Geometry": bbox(left, top, width, height)
    })
}

pub fn line(id: &str, children: &[&str], left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BlockType": "LINE",
        "Id": id,
        "Geometry": bbox(left, top, width, height),
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

/// A KEY_VALUE_SET tagged KEY, pointing at `value_id` through a VALUE
/// relationship in addition to its own CHILD (key word) list.
pub fn key_with_value(id: &str, children: &[&str], value_id: &str) -> Value {
    json!({
        "BlockType": "KEY_VALUE_SET",
        "Id": id,
        "EntityTypes": ["KEY"],
        "Relationships": [
            {"Type": "CHILD", "Ids": children},
            {"Type": "VALUE", "Ids": [value_id]}
        ]
    })
}

/// A KEY_VALUE_SET tagged KEY with no VALUE relationship at all.
pub fn key_only(id: &str, children: &[&str]) -> Value {
    json!({
        "BlockType": "KEY_VALUE_SET",
        "Id": id,
        "EntityTypes": ["KEY"],
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

pub fn value_set(id: &str, children: &[&str]) -> Value {
    json!({
        "BlockType": "KEY_VALUE_SET",
        "Id": id,
        "EntityTypes": ["VALUE"],
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

pub fn selection(id: &str, status: &str, left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BlockType": "SELECTION_ELEMENT",
        "Id": id,
        "SelectionStatus": status,
        "Confidence": 99.0,
        "Geometry": bbox(left, top, width, height)
    })
}

pub fn layout(block_type: &str, id: &str, children: &[&str], left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BlockType": block_type,
        "Id": id,
        "Geometry": bbox(left, top, width, height),
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

pub fn table(id: &str, children: &[&str], left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "BlockType": "TABLE",
        "Id": id,
        "Geometry": bbox(left, top, width, height),
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

#[allow(clippy::too_many_arguments)]
pub fn cell(
    id: &str,
    row: u32,
    col: u32,
    children: &[&str],
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Value {
    json!({
        "BlockType": "CELL",
        "Id": id,
        "RowIndex": row,
        "ColumnIndex": col,
        "RowSpan": 1,
        "ColumnSpan": 1,
        "Geometry": bbox(left, top, width, height),
        "Relationships": [{"Type": "CHILD", "Ids": children}]
    })
}

pub fn document(pages: u32, blocks: Vec<Value>) -> Value {
    json!({
        "DocumentMetadata": {"Pages": pages},
        "Blocks": blocks
    })
}

pub fn raw_document(doc: Value) -> docgraph::RawDocument {
    serde_json::from_value(doc).expect("fixture deserializes into RawDocument")
}
