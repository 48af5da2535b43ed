//! Command-line interface for the docgraph block-graph assembler and
//! linearizer — the "file-reading CLI example" the core library treats as
//! an external collaborator (spec §1). Exercises `docgraph` only through
//! its public API: read a file, call `parse`, call `text`/`text_and_words`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "docgraph", about = "Reconstruct reading-order text from an OCR block graph", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a block-graph JSON file and print its linearized text.
    Render {
        /// Path to the Textract-shaped JSON file. Reads stdin when omitted.
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Optional TOML/YAML/JSON file of `DocgraphConfig` overrides.
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Parse a block-graph JSON file and report success or the structured
    /// parse error, without rendering anything.
    Validate {
        /// Path to the Textract-shaped JSON file. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render { file, format, options } => commands::render::run(file, format, options),
        Command::Validate { file } => commands::validate::run(file),
    }
}
