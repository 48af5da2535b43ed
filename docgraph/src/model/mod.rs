//! The semantic document model: the typed tree the block-graph assembler
//! produces, frozen after `parse` returns.

pub mod document;
pub mod keyvalue;
pub mod layout;
pub mod page;
pub mod query;
pub mod signature;
pub mod table;
pub mod word;

pub use document::Document;
pub use keyvalue::{Key, KeyValue, KeyValueIndex, SelectionElement, Value};
pub use layout::{Layout, LayoutChild, LayoutIndex, LayoutKind};
pub use page::Page;
pub use query::{Query, QueryIndex, QueryResult};
pub use signature::{Signature, SignatureIndex};
pub use table::{Cell, Caption, Table, TableIndex, TableRow};
pub use word::{EmittedWord, Line, LineIndex, Word, WordIndex};
