//! Query / Signature builder (component §4.5).

use std::collections::HashSet;

use crate::block::index::BlockIndex;
use crate::block::{BlockType, RelationshipType};
use crate::geometry::{BoundingBox, Geometry};
use crate::model::query::{Query, QueryResult};
use crate::model::signature::Signature;

pub(super) fn build_queries(index: &BlockIndex, owned_ids: &HashSet<String>) -> Vec<Query> {
    let mut queries = Vec::new();

    for query_id in index.ids_of(BlockType::Query) {
        if !owned_ids.contains(query_id) {
            continue;
        }
        let Some(block) = index.resolve(query_id) else { continue };
        let Some(query_field) = &block.query else { continue };

        let result_ids: Vec<String> = block.relationship_ids(RelationshipType::Answer).map(str::to_string).collect();
        let results = result_ids
            .iter()
            .filter_map(|id| index.resolve(id))
            .filter(|b| b.block_type == BlockType::QueryResult)
            .map(|b| QueryResult { text: b.text.clone().unwrap_or_default(), confidence: b.confidence })
            .collect();

        queries.push(Query {
            id: query_id.clone(),
            text: query_field.text.clone(),
            alias: query_field.alias.clone(),
            results,
        });
    }

    queries
}

pub(super) fn build_signatures(index: &BlockIndex, owned_ids: &HashSet<String>) -> Vec<Signature> {
    index
        .ids_of(BlockType::Signature)
        .iter()
        .filter(|id| owned_ids.contains(id.as_str()))
        .filter_map(|id| index.resolve(id).map(|block| (id, block)))
        .map(|(id, block)| Signature {
            id: id.clone(),
            geometry: block.geometry().unwrap_or_else(|| Geometry {
                bounding_box: BoundingBox::new(0.0, 0.0, 0.0, 0.0),
                polygon: Vec::new(),
            }),
        })
        .collect()
}
