//! Key-Value builder (component §4.3).

use std::collections::HashSet;

use crate::block::{BlockType, EntityType, RelationshipType, SelectionStatus};
use crate::block::index::BlockIndex;
use crate::geometry::enclosing;
use crate::model::keyvalue::{Key, KeyValue, SelectionElement, Value};

use super::WordCache;

pub(super) fn build(index: &BlockIndex, owned_ids: &HashSet<String>, cache: &mut WordCache) -> Vec<KeyValue> {
    let mut key_values = Vec::new();

    for kv_id in index.ids_of(BlockType::KeyValueSet) {
        if !owned_ids.contains(kv_id) {
            continue;
        }
        let Some(key_block) = index.resolve(kv_id) else { continue };
        if !key_block.has_entity_type(EntityType::Key) {
            continue;
        }

        let key_child_ids: Vec<String> = key_block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
        let mut key_words = Vec::new();
        for child_id in &key_child_ids {
            if let Some(wi) = cache.get_or_create(index, child_id) {
                key_words.push(wi);
            }
        }

        // Open question (preserved, see DESIGN.md): when VALUE points to
        // more than one VALUE-tagged block, keep the first.
        let value_target_id = key_block.relationship_ids(RelationshipType::Value).next().map(str::to_string);

        let mut value = Value::default();
        if let Some(value_id) = value_target_id {
            if let Some(value_block) = index.resolve(&value_id) {
                let value_child_ids: Vec<String> =
                    value_block.relationship_ids(RelationshipType::Child).map(str::to_string).collect();
                let mut selection = None;
                let mut value_words = Vec::new();
                for child_id in &value_child_ids {
                    let Some(child_block) = index.resolve(child_id) else { continue };
                    match child_block.block_type {
                        BlockType::Word => {
                            if let Some(wi) = cache.get_or_create(index, child_id) {
                                value_words.push(wi);
                            }
                        }
                        BlockType::SelectionElement if selection.is_none() => {
                            selection = Some(SelectionElement {
                                status: child_block.selection_status.unwrap_or(SelectionStatus::NotSelected),
                                geometry: child_block.geometry().unwrap_or_else(|| crate::geometry::Geometry {
                                    bounding_box: crate::geometry::BoundingBox::new(0.0, 0.0, 0.0, 0.0),
                                    polygon: Vec::new(),
                                }),
                                confidence: child_block.confidence,
                            });
                        }
                        _ => {}
                    }
                }
                value.words = value_words;
                value.selection_element = selection;
            }
        }

        let key_boxes: Vec<_> = key_words.iter().map(|wi| Some(&cache.words[wi.0 as usize].geometry.bounding_box)).collect();
        let value_boxes: Vec<_> = value.words.iter().map(|wi| Some(&cache.words[wi.0 as usize].geometry.bounding_box)).collect();
        let selection_box = value.selection_element.as_ref().map(SelectionElement::bounding_box);

        let bounding_box = enclosing(key_boxes.into_iter().chain(value_boxes).chain(std::iter::once(selection_box)))
            .or_else(|| key_block.geometry().map(|g| g.bounding_box))
            .unwrap_or_else(|| crate::geometry::BoundingBox::new(0.0, 0.0, 0.0, 0.0));

        key_values.push(KeyValue {
            id: kv_id.clone(),
            key: Key { words: key_words },
            value,
            bounding_box,
        });
    }

    key_values
}
