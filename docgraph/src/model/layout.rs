//! Layout regions: typed containers that own the reading-order tree.

use crate::block::BlockType;
use crate::geometry::BoundingBox;
use crate::model::keyvalue::KeyValueIndex;
use crate::model::signature::SignatureIndex;
use crate::model::table::TableIndex;
use crate::model::word::LineIndex;

/// Index of a [`Layout`] within its page's layout arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutIndex(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Title,
    SectionHeader,
    Text,
    PageNumber,
    Header,
    Footer,
    Figure,
    List,
    Table,
    KeyValue,
}

impl LayoutKind {
    pub fn from_block_type(block_type: BlockType) -> Option<Self> {
        Some(match block_type {
            BlockType::LayoutTitle => LayoutKind::Title,
            BlockType::LayoutSectionHeader => LayoutKind::SectionHeader,
            BlockType::LayoutText => LayoutKind::Text,
            BlockType::LayoutPageNumber => LayoutKind::PageNumber,
            BlockType::LayoutHeader => LayoutKind::Header,
            BlockType::LayoutFooter => LayoutKind::Footer,
            BlockType::LayoutFigure => LayoutKind::Figure,
            BlockType::LayoutList => LayoutKind::List,
            BlockType::LayoutTable => LayoutKind::Table,
            BlockType::LayoutKeyValue => LayoutKind::KeyValue,
            _ => return None,
        })
    }

    /// Default `no-new-lines` flag for freshly built layouts of this kind.
    /// title/section-header/text collapse internal newlines; every other
    /// subtype preserves them.
    pub fn default_no_new_lines(&self) -> bool {
        matches!(self, LayoutKind::Title | LayoutKind::SectionHeader | LayoutKind::Text)
    }
}

/// Anything that can appear directly inside a Layout. A closed sum type —
/// every variant is known at compile time, per the no-open-hierarchies
/// design note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChild {
    Line(LineIndex),
    KeyValue(KeyValueIndex),
    Table(TableIndex),
    Signature(SignatureIndex),
    Layout(LayoutIndex),
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub id: String,
    pub kind: LayoutKind,
    pub bounding_box: BoundingBox,
    pub children: Vec<LayoutChild>,
    pub no_new_lines: bool,
    /// True for layouts fabricated because the page carried no LAYOUT
    /// blocks at all (one synthetic LAYOUT_TEXT per Line).
    pub synthetic: bool,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
