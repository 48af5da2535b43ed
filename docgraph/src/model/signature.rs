//! Signatures: geometry-only blocks rendered through a configurable token.

use crate::geometry::Geometry;

/// Index of a [`Signature`] within its page's signature arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureIndex(pub u32);

#[derive(Debug, Clone)]
pub struct Signature {
    pub id: String,
    pub geometry: Geometry,
}
