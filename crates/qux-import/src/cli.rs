//! CLI definitions for qux-import.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qux-import",
    version,
    about = "Import a Figma file as a qux document",
    after_help = "Examples:\n  qux-import AbC123 --token $FIGMA_TOKEN\n  qux-import AbC123 --config qux-import.toml --output app.json --pretty\n  qux-import AbC123 --flat --scale 2"
)]
pub struct Cli {
    /// Figma file key (the id in the file URL).
    pub file_key: String,
    /// TOML file with an [import] table.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Personal access token. Falls back to FIGMA_TOKEN.
    #[arg(long)]
    pub token: Option<String>,
    /// Scale factor for rendered images.
    #[arg(long)]
    pub scale: Option<f64>,
    /// Skip the rendered image backfill.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_images: bool,
    /// Import screens as flat images instead of widget trees.
    #[arg(long, action = ArgAction::SetTrue)]
    pub flat: bool,
    /// Treat every element as a vector graphic.
    #[arg(long, action = ArgAction::SetTrue)]
    pub all_as_vector: bool,
    /// Node ids per image request.
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Source node types to skip (repeatable).
    #[arg(long = "ignore", value_name = "TYPE")]
    pub ignored_types: Vec<String>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
    /// Write the document here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long, action = ArgAction::SetTrue)]
    pub pretty: bool,
}
