//! CLI subcommands, one module per command.

pub mod render;
pub mod validate;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use docgraph::RawDocument;

/// Reads `file`, or all of stdin when `file` is `None`, and deserializes
/// it as a [`RawDocument`].
pub(crate) fn read_raw_document(file: &Option<PathBuf>) -> Result<RawDocument> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read input from stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("Failed to parse input as a block-graph document")
}
