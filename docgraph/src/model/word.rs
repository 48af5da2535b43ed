//! Words and Lines: the leaf text-bearing entities of a page.
//!
//! Both arenas live on [`crate::model::page::Page`] as contiguous `Vec`s;
//! cross-references between them are indices, never owning pointers, so
//! the word/line back-reference pair never forms a cycle.

use crate::block::TextType;
use crate::geometry::{BoundingBox, Geometry};

/// Index of a [`Word`] within its page's word arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordIndex(pub u32);

/// Index of a [`Line`] within its page's line arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineIndex(pub u32);

/// A single recognized word or one rendered selection-element marker.
#[derive(Debug, Clone)]
pub struct Word {
    pub id: String,
    pub text: String,
    pub text_type: Option<TextType>,
    pub confidence: Option<f64>,
    pub geometry: Geometry,
    /// The Line this word belongs to, set once the owning Line is built.
    pub line: Option<LineIndex>,
    /// Back-link to the table cell that claimed this word, as
    /// `(table_index_on_page, cell_index_in_table)`.
    pub cell: Option<(usize, usize)>,
}

impl Word {
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.geometry.bounding_box
    }

    /// Clones the fields the linearizer's word stream needs, decoupled
    /// from this word's arena index so the stream can carry synthetic
    /// entries (selection markers, affix words) alongside real ones.
    pub fn emit(&self) -> EmittedWord {
        EmittedWord {
            id: self.id.clone(),
            text: self.text.clone(),
            text_type: self.text_type,
            confidence: self.confidence,
            geometry: self.geometry.clone(),
            synthetic: false,
        }
    }
}

/// One word surfaced through the linearizer's parallel word stream: either
/// a real page [`Word`] or a value synthesized during rendering (a
/// selection-element marker, or an affix word when
/// `AddPrefixesAndSuffixesAsWords` is set). Carries value copies rather
/// than an index, since synthetic entries have no arena slot to index
/// into.
#[derive(Debug, Clone)]
pub struct EmittedWord {
    pub id: String,
    pub text: String,
    pub text_type: Option<TextType>,
    pub confidence: Option<f64>,
    pub geometry: Geometry,
    pub synthetic: bool,
}

/// An ordered run of Words read left-to-right.
///
/// May be synthetic: when a Word has no owning LINE block in the input
/// (e.g. a word that only appears inside a cell), the Word/Line builder
/// fabricates a Line wrapping exactly that one word.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: String,
    pub words: Vec<WordIndex>,
    pub confidence: Option<f64>,
    pub bounding_box: BoundingBox,
    pub synthetic: bool,
}

impl Line {
    /// Sorts `words` by ascending left coordinate, ties broken by ascending
    /// top. Must be called with access to the owning page's word arena.
    pub fn sort_words(indices: &mut [WordIndex], words: &[Word]) {
        indices.sort_by(|a, b| {
            let wa = &words[a.0 as usize];
            let wb = &words[b.0 as usize];
            wa.bounding_box()
                .left
                .partial_cmp(&wb.bounding_box().left)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    wa.bounding_box()
                        .top
                        .partial_cmp(&wb.bounding_box().top)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Geometry};

    fn word(id: &str, left: f64, top: f64) -> Word {
        Word {
            id: id.to_string(),
            text: id.to_string(),
            text_type: None,
            confidence: None,
            geometry: Geometry {
                bounding_box: BoundingBox::new(left, top, 0.1, 0.1),
                polygon: vec![],
            },
            line: None,
            cell: None,
        }
    }

    #[test]
    fn sort_words_orders_left_then_top() {
        let words = vec![word("a", 0.5, 0.0), word("b", 0.1, 0.9), word("c", 0.1, 0.1)];
        let mut indices = vec![WordIndex(0), WordIndex(1), WordIndex(2)];
        Line::sort_words(&mut indices, &words);
        let ids: Vec<&str> = indices.iter().map(|i| words[i.0 as usize].id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }
}
