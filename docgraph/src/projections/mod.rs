//! Identity and expense projections (component §4.10): thin, typed views
//! built over the same block-graph machinery the core document model uses,
//! for the `IdentityDocuments`/`ExpenseDocuments` root shapes (§6).
//!
//! Neither projection reimplements the assembler — both parse their
//! embedded `Blocks` array through [`crate::build::parse_embedded`], the
//! same per-page builder pipeline an ordinary page goes through, and then
//! read back a typed view over the resulting single-page [`Document`].

pub mod expense;
pub mod identity;

pub use expense::{ExpenseDocument, ExpenseLineItem, ExpenseSummaryField};
pub use identity::{IdentityDocument, IdentityField, IdentityFieldType};

use serde::Deserialize;

use crate::block::Block;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct RawEmbeddedBlocks {
    #[serde(rename = "Blocks")]
    #[serde(default)]
    blocks: Vec<Block>,
}

/// Root shape for an `AnalyzeID`-style input: `{ "IdentityDocuments": [...] }`.
#[derive(Debug, Deserialize)]
pub struct RawIdentityRoot {
    #[serde(rename = "IdentityDocuments")]
    #[serde(default)]
    identity_documents: Vec<RawEmbeddedBlocks>,
}

/// Root shape for an `AnalyzeExpense`-style input: `{ "ExpenseDocuments": [...] }`.
#[derive(Debug, Deserialize)]
pub struct RawExpenseRoot {
    #[serde(rename = "ExpenseDocuments")]
    #[serde(default)]
    expense_documents: Vec<RawEmbeddedBlocks>,
}

pub fn parse_identity_documents(raw: RawIdentityRoot) -> Result<Vec<IdentityDocument>> {
    raw.identity_documents.into_iter().map(|d| IdentityDocument::parse(d.blocks)).collect()
}

pub fn parse_expense_documents(raw: RawExpenseRoot) -> Result<Vec<ExpenseDocument>> {
    raw.expense_documents.into_iter().map(|d| ExpenseDocument::parse(d.blocks)).collect()
}
