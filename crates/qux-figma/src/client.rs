//! Authenticated access to the design tool's REST API.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-Figma-Token";
const CONTENT_TYPE_JSON: &str = "application/json";
/// Largest response body accepted from the file endpoint.
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Body of the image endpoint. Node ids map to a rendered image URL, or to
/// `None` when the service could not render that node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageResponse {
    /// Service-side error for the whole request.
    pub err: Option<String>,
    /// Rendered image URL per requested node id.
    pub images: FxHashMap<String, Option<String>>,
}

impl ImageResponse {
    /// Error-only response, used for HTTP failures of the image endpoint.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            err: Some(message.into()),
            images: FxHashMap::default(),
        }
    }
}

/// Remote operations the importer needs.
///
/// Both calls block; the importer runs them on the blocking pool.
pub trait FigmaApi: Send + Sync {
    /// Full file with vector geometry and plugin data.
    fn fetch_document(&self, key: &str) -> ImportResult<Value>;

    /// Rendered image URLs for `ids`.
    ///
    /// An HTTP-level failure is reported through [`ImageResponse::err`]
    /// rather than as an `Err`, so one bad batch does not look like a
    /// transport outage.
    fn fetch_images(&self, key: &str, ids: &[String]) -> ImportResult<ImageResponse>;
}

/// [`FigmaApi`] over HTTPS.
pub struct FigmaClient {
    agent: ureq::Agent,
    api_base: String,
    access_token: String,
    plugin_id: String,
    image_scale: f64,
}

impl FigmaClient {
    /// Client with the token, endpoint and timeout from `config`.
    pub fn new(config: &ImportConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            api_base: config.api_base.clone(),
            access_token: config.access_token.clone(),
            plugin_id: config.plugin_id.clone(),
            image_scale: config.image_scale,
        }
    }

    /// File endpoint with vector geometry and the plugin's data.
    pub fn document_url(&self, key: &str) -> String {
        format!(
            "{}files/{}?geometry=paths&plugin_data={}",
            self.api_base,
            urlencoding::encode(key),
            urlencoding::encode(&self.plugin_id)
        )
    }

    /// Image endpoint rendering `ids` as PNG.
    pub fn images_url(&self, key: &str, ids: &[String]) -> String {
        format!(
            "{}images/{}?format=png&scale={}&ids={}",
            self.api_base,
            urlencoding::encode(key),
            self.image_scale,
            urlencoding::encode(&ids.join(","))
        )
    }

    /// Issues the GET and returns the status code with the body text.
    fn get(&self, url: &str) -> ImportResult<(u16, String)> {
        let mut response = self
            .agent
            .get(url)
            .header(TOKEN_HEADER, self.access_token.as_str())
            .header("Accept", CONTENT_TYPE_JSON)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .call()?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()?;
        Ok((status, body))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl FigmaApi for FigmaClient {
    fn fetch_document(&self, key: &str) -> ImportResult<Value> {
        debug!(key, "fetching document");
        let (status, body) = self.get(&self.document_url(key))?;
        document_body(status, &body)
    }

    fn fetch_images(&self, key: &str, ids: &[String]) -> ImportResult<ImageResponse> {
        debug!(key, count = ids.len(), "fetching images");
        let (status, body) = self.get(&self.images_url(key, ids))?;
        image_response(status, &body)
    }
}

/// Maps a file endpoint answer to the decoded payload or an `Http` error.
fn document_body(status: u16, body: &str) -> ImportResult<Value> {
    if !is_success(status) {
        return Err(ImportError::Http {
            status,
            message: error_message(body).into(),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Maps an image endpoint answer to an [`ImageResponse`]. A rejected request
/// keeps the body's own `err` when it has one.
fn image_response(status: u16, body: &str) -> ImportResult<ImageResponse> {
    if is_success(status) {
        return Ok(serde_json::from_str(body)?);
    }
    warn!(status, "image request rejected");
    let response = serde_json::from_str::<ImageResponse>(body)
        .ok()
        .filter(|response| response.err.is_some())
        .unwrap_or_else(|| ImageResponse::failed(format!("http status {status}")));
    Ok(response)
}

/// Pulls `err` or `message` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["err", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
