//! Crate-level configuration: loads a [`LinearizationOptions`] bundle plus a
//! couple of top-level toggles from a config file, with environment
//! variable overrides layered on top.
//!
//! No config cache sits in front of this: the crate processes one document
//! per `parse` call and has no persistent state to invalidate (§5: no
//! persistent storage).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocgraphError, Result};
use crate::linearize::{LinearizationOptions, TableLinearizationFormat};

/// Top-level configuration: the linearizer's option bundle plus crate-level
/// toggles that apply to `parse` itself rather than to rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocgraphConfig {
    /// Options handed to `Document::text`/`text_and_words` when a caller
    /// asks this config to render for them.
    pub default_options: LinearizationOptions,
    /// When true (the default), a declared/materialized page-count mismatch
    /// is a hard `MetadataMismatch` error. When false, `parse` still runs
    /// the check but the crate's CLI (§6) reports it as a warning instead
    /// of aborting — there is no corresponding library-level bypass, since
    /// spec §7 requires `parse` to always surface the mismatch.
    pub strict_metadata: bool,
}

impl Default for DocgraphConfig {
    fn default() -> Self {
        Self {
            default_options: LinearizationOptions::default(),
            strict_metadata: true,
        }
    }
}

impl DocgraphConfig {
    /// Loads from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DocgraphError::Config(format!("invalid TOML in {}: {e}", path.display())))
    }

    /// Loads from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| DocgraphError::Config(format!("invalid YAML in {}: {e}", path.display())))
    }

    /// Loads from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DocgraphError::Config(format!("invalid JSON in {}: {e}", path.display())))
    }

    /// Loads from a file, auto-detecting format by extension
    /// (`.toml`, `.yaml`/`.yml`, `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| DocgraphError::Config(format!("no file extension on {}", path.display())))?;

        match extension.to_lowercase().as_str() {
            "toml" => Self::from_toml_file(path),
            "yaml" | "yml" => Self::from_yaml_file(path),
            "json" => Self::from_json_file(path),
            other => Err(DocgraphError::Config(format!("unsupported config format: .{other}"))),
        }
    }

    /// Applies environment variable overrides on top of whatever was
    /// already loaded. File config loses to env; both lose to a value a
    /// caller sets directly on the returned options before calling
    /// `text()`.
    ///
    /// Recognized variables: `DOCGRAPH_TABLE_FORMAT` (`plaintext` |
    /// `markdown`), `DOCGRAPH_MAX_CONSECUTIVE_NEWLINES` (non-negative
    /// integer), `DOCGRAPH_SIGNATURE_TOKEN` (literal string). Unset
    /// variables are silently ignored; an invalid value is a `Config` error.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(format) = std::env::var("DOCGRAPH_TABLE_FORMAT") {
            self.default_options.table_linearization_format = match format.to_lowercase().as_str() {
                "plaintext" => TableLinearizationFormat::Plaintext,
                "markdown" => TableLinearizationFormat::Markdown,
                other => {
                    return Err(DocgraphError::Config(format!(
                        "invalid DOCGRAPH_TABLE_FORMAT: '{other}'. Must be 'plaintext' or 'markdown'."
                    )))
                }
            };
        }

        if let Ok(raw) = std::env::var("DOCGRAPH_MAX_CONSECUTIVE_NEWLINES") {
            let parsed: usize = raw.parse().map_err(|_| {
                DocgraphError::Config(format!(
                    "invalid DOCGRAPH_MAX_CONSECUTIVE_NEWLINES: '{raw}'. Must be a non-negative integer."
                ))
            })?;
            self.default_options.max_number_of_consecutive_new_lines = parsed;
        }

        if let Ok(token) = std::env::var("DOCGRAPH_SIGNATURE_TOKEN") {
            self.default_options.signature_token = token;
        }

        Ok(())
    }
}
