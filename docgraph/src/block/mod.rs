//! The raw, as-received block schema: the JSON shape the document-analysis
//! service emits, deserialized almost verbatim. Nothing in this module
//! resolves relationships or builds the semantic model — that happens in
//! `build`, driven by [`index::BlockIndex`].

pub mod index;

use serde::Deserialize;

use crate::geometry::{BoundingBox, Geometry, Point};

/// The closed vocabulary of block tags this crate understands. Anything
/// else deserializes to `Unknown` and is skipped by the builders (with a
/// debug-level skip event), never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    KeyValueSet,
    SelectionElement,
    Table,
    Cell,
    MergedCell,
    TableTitle,
    TableFooter,
    Query,
    QueryResult,
    Signature,
    LayoutTitle,
    LayoutHeader,
    LayoutFooter,
    LayoutSectionHeader,
    LayoutPageNumber,
    LayoutList,
    LayoutFigure,
    LayoutTable,
    LayoutKeyValue,
    LayoutText,
    #[serde(other)]
    Unknown,
}

impl BlockType {
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            BlockType::LayoutTitle
                | BlockType::LayoutHeader
                | BlockType::LayoutFooter
                | BlockType::LayoutSectionHeader
                | BlockType::LayoutPageNumber
                | BlockType::LayoutList
                | BlockType::LayoutFigure
                | BlockType::LayoutTable
                | BlockType::LayoutKeyValue
                | BlockType::LayoutText
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextType {
    Printed,
    Handwriting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
}

impl SelectionStatus {
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionStatus::Selected)
    }
}

/// Entity-type tags. A `KEY_VALUE_SET` block carries `Key` or `Value`; a
/// table `CELL` block carries zero or more of the role tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Key,
    Value,
    ColumnHeader,
    TableTitle,
    TableFooter,
    TableSummary,
    TableSectionTitle,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    Value,
    Answer,
    TableTitle,
    TableFooter,
    MergedCell,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,
    #[serde(rename = "Ids")]
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawBoundingBox {
    #[serde(rename = "Left")]
    left: f64,
    #[serde(rename = "Top")]
    top: f64,
    #[serde(rename = "Width")]
    width: f64,
    #[serde(rename = "Height")]
    height: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPoint {
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "BoundingBox")]
    bounding_box: RawBoundingBox,
    #[serde(rename = "Polygon")]
    #[serde(default)]
    polygon: Vec<RawPoint>,
}

impl From<RawGeometry> for Geometry {
    fn from(raw: RawGeometry) -> Self {
        Geometry {
            bounding_box: BoundingBox::new(
                raw.bounding_box.left,
                raw.bounding_box.top,
                raw.bounding_box.width,
                raw.bounding_box.height,
            ),
            polygon: raw.polygon.into_iter().map(|p| Point { x: p.x, y: p.y }).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryField {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Alias")]
    pub alias: Option<String>,
    #[serde(rename = "Pages")]
    #[serde(default)]
    pub pages: Vec<u32>,
}

/// A raw block as received from the service, almost verbatim. Field names
/// mirror the wire schema; consumers downstream convert into the richer
/// `model` types.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(rename = "BlockType")]
    pub block_type: BlockType,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Confidence")]
    pub confidence: Option<f64>,
    #[serde(rename = "Text")]
    pub text: Option<String>,
    #[serde(rename = "TextType")]
    pub text_type: Option<TextType>,
    #[serde(rename = "SelectionStatus")]
    pub selection_status: Option<SelectionStatus>,
    #[serde(rename = "RowIndex")]
    pub row_index: Option<u32>,
    #[serde(rename = "ColumnIndex")]
    pub column_index: Option<u32>,
    #[serde(rename = "RowSpan")]
    pub row_span: Option<u32>,
    #[serde(rename = "ColumnSpan")]
    pub column_span: Option<u32>,
    #[serde(rename = "EntityTypes")]
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(rename = "Geometry")]
    pub geometry: Option<RawGeometry>,
    #[serde(rename = "Relationships")]
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(rename = "Query")]
    pub query: Option<QueryField>,
}

impl Block {
    pub fn has_entity_type(&self, entity: EntityType) -> bool {
        self.entity_types.contains(&entity)
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry.clone().map(Geometry::from)
    }

    /// Concatenation of target ids across every relationship of `kind`, in
    /// the order relationships and ids appear on the block.
    pub fn relationship_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(move |r| r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentMetadata {
    #[serde(rename = "Pages")]
    pub pages: u32,
}

/// Top-level document root for the primary `AnalyzeDocument`-shaped input.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "DocumentMetadata")]
    pub document_metadata: DocumentMetadata,
    #[serde(rename = "Blocks")]
    #[serde(default)]
    pub blocks: Vec<Block>,
}
