//! qux-import CLI entry point.

mod cli;

use std::io::Write;

use anyhow::{bail, Context};
use clap::Parser;
use qux_figma::{ImportConfig, Importer};
use qux_model::Document;
use tracing::{info, warn};

use cli::Cli;

const TOKEN_ENV: &str = "FIGMA_TOKEN";

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    if let Err(err) = run(cli) {
        eprintln!("qux-import error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let importer = Importer::with_client(config).context("invalid import configuration")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    info!(key = %cli.file_key, "importing");
    let Some(doc) = runtime
        .block_on(importer.import(&cli.file_key))
        .with_context(|| format!("import of '{}' failed", cli.file_key))?
    else {
        bail!("file '{}' could not be translated", cli.file_key);
    };
    write_document(&cli, &doc)
}

/// Config file first, then `FIGMA_TOKEN`, then flags.
fn build_config(cli: &Cli) -> anyhow::Result<ImportConfig> {
    let mut config = match &cli.config {
        Some(path) => ImportConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ImportConfig::default(),
    };
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            config = config.with_access_token(token);
        }
    }
    if let Some(token) = &cli.token {
        config = config.with_access_token(token.clone());
    }
    if let Some(scale) = cli.scale {
        config = config.with_image_scale(scale);
    }
    if let Some(size) = cli.batch_size {
        config = config.with_batch_size(size);
    }
    if cli.no_images {
        config = config.with_download_vectors(false);
    }
    if cli.flat {
        config = config.with_import_children(false);
    }
    if cli.all_as_vector {
        config = config.with_all_as_vector(true);
    }
    if !cli.ignored_types.is_empty() {
        config = config.with_ignored_types(cli.ignored_types.iter().map(String::as_str));
    }
    if config.access_token.trim().is_empty() {
        warn!("no access token given; pass --token or set {TOKEN_ENV}");
    }
    Ok(config)
}

fn write_document(cli: &Cli, doc: &Document) -> anyhow::Result<()> {
    let json = if cli.pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    }
    .context("failed to serialize document")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "document written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "qux-import",
            "AbC123",
            "--token",
            "secret",
            "--scale",
            "2",
            "--flat",
            "--no-images",
            "--batch-size",
            "10",
            "--ignore",
            "GROUP",
            "--ignore",
            "INSTANCE",
        ]);
        let config = build_config(&cli).expect("config");
        assert_eq!(config.access_token, "secret");
        assert!((config.image_scale - 2.0).abs() < f64::EPSILON);
        assert!(!config.import_children);
        assert!(!config.download_vectors);
        assert_eq!(config.batch_size, 10);
        assert!(config.is_ignored_type("INSTANCE"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_keep_deep_import() {
        let cli = Cli::parse_from(["qux-import", "AbC123", "--token", "secret"]);
        let config = build_config(&cli).expect("config");
        assert!(config.import_children);
        assert!(config.download_vectors);
        assert_eq!(config.batch_size, 50);
        assert!(!cli.pretty);
    }
}
