//! Validate command - parse only, report success or the structured error.

use std::path::PathBuf;

use anyhow::Result;

pub fn run(file: Option<PathBuf>) -> Result<()> {
    let raw = super::read_raw_document(&file)?;

    match docgraph::parse(raw) {
        Ok(document) => {
            println!("OK: {} page(s), {} word(s)", document.pages().len(), document.words().count());
            Ok(())
        }
        Err(err) => {
            println!("INVALID: {err}");
            std::process::exit(1);
        }
    }
}
