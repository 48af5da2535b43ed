//! Render command - parse a block graph and print its linearized text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use docgraph::DocgraphConfig;
use serde_json::json;

use crate::OutputFormat;

pub fn run(file: Option<PathBuf>, format: OutputFormat, options: Option<PathBuf>) -> Result<()> {
    let raw = super::read_raw_document(&file)?;

    let mut config = match &options {
        Some(path) => DocgraphConfig::from_file(path)
            .with_context(|| format!("Failed to load options from '{}'", path.display()))?,
        None => DocgraphConfig::default(),
    };
    config.apply_env_overrides().context("Invalid DOCGRAPH_* environment variable override")?;

    let document = docgraph::parse(raw).context("Failed to parse block graph")?;
    let (text, words) = document.text_and_words(&config.default_options);

    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => {
            let output = json!({
                "text": text,
                "word_count": words.len(),
                "page_count": document.pages().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output).context("Failed to serialize render output")?);
        }
    }

    Ok(())
}
