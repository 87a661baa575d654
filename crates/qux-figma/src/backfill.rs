//! Rendered image backfill for vector widgets and flat screens.

use std::sync::Arc;

use qux_model::Document;
use tracing::{debug, error};

use crate::client::{FigmaApi, ImageResponse};
use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};

/// Splits `ids` into consecutive batches of at most `size` ids.
pub fn partition(ids: &[String], size: usize) -> Vec<Vec<String>> {
    ids.chunks(size.max(1)).map(<[String]>::to_vec).collect()
}

/// Source ids that need a rendered image: vector widgets for deep imports,
/// every screen otherwise.
pub fn collect_targets(doc: &Document, import_children: bool) -> Vec<String> {
    if import_children {
        doc.widgets
            .values()
            .filter(|widget| widget.props.is_vector)
            .map(|widget| widget.figma_id.clone())
            .collect()
    } else {
        doc.screens
            .values()
            .map(|screen| screen.figma_id.clone())
            .collect()
    }
}

/// Requests every batch concurrently and merges the URLs into `doc`.
///
/// Returns the number of records that received an image. Batches that
/// succeed are merged even when another batch fails; the first failure is
/// returned after all batches have settled.
pub async fn backfill_images(
    api: Arc<dyn FigmaApi>,
    config: &ImportConfig,
    key: &str,
    doc: &mut Document,
) -> ImportResult<usize> {
    if !config.download_vectors {
        debug!("image download disabled, backfill skipped");
        return Ok(0);
    }
    let targets = collect_targets(doc, config.import_children);
    if targets.is_empty() {
        debug!("no image targets");
        return Ok(0);
    }
    let batches = partition(&targets, config.batch_size);
    debug!(targets = targets.len(), batches = batches.len(), "requesting images");

    let handles: Vec<_> = batches
        .into_iter()
        .map(|batch| {
            let api = Arc::clone(&api);
            let key = key.to_string();
            tokio::task::spawn_blocking(move || api.fetch_images(&key, &batch))
        })
        .collect();

    let mut applied = 0;
    let mut first_error = None;
    for (index, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(err) => Err(err.into()),
        };
        match outcome.and_then(|response| batch_images(index, response)) {
            Ok(response) => {
                let merged = merge_images(doc, config.import_children, &response);
                debug!(batch = index, merged, "image batch merged");
                applied += merged;
            }
            Err(err) => {
                error!(batch = index, %err, "could not get images");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(applied),
    }
}

fn batch_images(batch: usize, response: ImageResponse) -> ImportResult<ImageResponse> {
    match response.err.as_deref().filter(|message| !message.is_empty()) {
        Some(message) => Err(ImportError::ImageBatch {
            batch,
            message: message.into(),
        }),
        None => Ok(response),
    }
}

/// Sets `figmaImage` on every target whose id has a URL in `response`.
/// Ids missing from the response, or rendered as `null`, are left alone.
fn merge_images(doc: &mut Document, import_children: bool, response: &ImageResponse) -> usize {
    let mut merged = 0;
    let mut apply = |figma_id: &str, slot: &mut Option<String>| {
        if let Some(Some(url)) = response.images.get(figma_id) {
            *slot = Some(url.clone());
            merged += 1;
        }
    };
    if import_children {
        for widget in doc.widgets.values_mut().filter(|widget| widget.props.is_vector) {
            apply(&widget.figma_id, &mut widget.props.figma_image);
        }
    } else {
        for screen in doc.screens.values_mut() {
            apply(&screen.figma_id, &mut screen.props.figma_image);
        }
    }
    merged
}
