//! # docgraph
//!
//! Reconstructs a typed page tree and deterministic reading-order text
//! from the flat, ID-linked block graph emitted by document-analysis
//! (OCR) services such as Amazon Textract.
//!
//! The pipeline is two stages:
//!
//! 1. [`parse`] turns a [`block::RawDocument`] into a [`model::Document`]:
//!    a page-by-page arena of Words, Lines, KeyValues, Tables, Queries,
//!    Signatures and Layouts, cross-referenced by index rather than by
//!    owning pointer.
//! 2. [`linearize`] walks that tree in reading order and renders text,
//!    alongside the parallel stream of words that text was built from.
//!
//! [`form::Form`] and [`projections`] build thin, read-only views over an
//! already-parsed [`model::Document`] for forms-style and identity/expense
//! analysis workloads.

pub mod block;
pub mod build;
pub mod config;
pub mod error;
pub mod form;
pub mod geometry;
pub mod linearize;
pub mod model;
pub mod projections;

pub use block::RawDocument;
pub use build::parse;
pub use config::DocgraphConfig;
pub use error::{DocgraphError, Result};
pub use form::Form;
pub use linearize::{LinearizationOptions, TableLinearizationFormat};
pub use model::{
    Caption, Cell, Document, EmittedWord, Key, KeyValue, KeyValueIndex, Layout, LayoutChild, LayoutIndex, LayoutKind,
    Line, LineIndex, Page, Query, QueryIndex, QueryResult, SelectionElement, Signature, SignatureIndex, Table,
    TableIndex, TableRow, Value, Word, WordIndex,
};
