//! One-shot import pipeline: fetch, translate, backfill.

use std::sync::Arc;

use qux_model::Document;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::backfill;
use crate::client::{FigmaApi, FigmaClient};
use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::node::FileResponse;
use crate::walker::build_document;

/// Holds the configuration and the remote API for one or more imports.
#[derive(Clone)]
pub struct Importer {
    config: ImportConfig,
    api: Arc<dyn FigmaApi>,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("api_base", &self.config.api_base)
            .field("batch_size", &self.config.batch_size)
            .finish_non_exhaustive()
    }
}

impl Importer {
    /// Validates `config` and wraps `api`.
    pub fn new(config: ImportConfig, api: Arc<dyn FigmaApi>) -> ImportResult<Self> {
        config.validate()?;
        Ok(Self { config, api })
    }

    /// Importer talking to the real service.
    pub fn with_client(config: ImportConfig) -> ImportResult<Self> {
        config.validate()?;
        let api = Arc::new(FigmaClient::new(&config));
        Ok(Self { config, api })
    }

    /// Settings used by every import.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Builds the model from a raw file payload without touching the network.
    ///
    /// A payload that does not decode as a file is logged and yields `None`.
    pub fn translate(&self, key: &str, raw: &Value) -> Option<Document> {
        let file = match FileResponse::deserialize(raw) {
            Ok(file) => file,
            Err(err) => {
                error!(key, %err, "document could not be translated");
                return None;
            }
        };
        Some(build_document(key, &file, &self.config))
    }

    /// Fetches rendered images for the document's vector widgets or screens.
    pub async fn backfill_images(&self, key: &str, doc: &mut Document) -> ImportResult<usize> {
        backfill::backfill_images(Arc::clone(&self.api), &self.config, key, doc).await
    }

    /// Runs the whole pipeline for `key`.
    ///
    /// Transport failures and image batch failures are errors; a payload that
    /// cannot be translated resolves to `Ok(None)`.
    pub async fn import(&self, key: &str) -> ImportResult<Option<Document>> {
        let api = Arc::clone(&self.api);
        let owned_key = key.to_string();
        let raw = tokio::task::spawn_blocking(move || api.fetch_document(&owned_key)).await??;

        let Some(mut doc) = self.translate(key, &raw) else {
            return Ok(None);
        };
        let images = self.backfill_images(key, &mut doc).await?;
        info!(
            key,
            screens = doc.screens.len(),
            widgets = doc.widgets.len(),
            lines = doc.lines.len(),
            images,
            "import finished"
        );
        Ok(Some(doc))
    }
}
