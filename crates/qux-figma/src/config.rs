//! Importer configuration.

use std::path::Path;

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::{ImportError, ImportResult};

/// REST endpoint of the design tool.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1/";
/// Plugin namespace that carries qux annotations in `pluginData`.
pub const DEFAULT_PLUGIN_ID: &str = "858477504263032980";
/// Node ids per image request.
pub const DEFAULT_BATCH_SIZE: usize = 50;
/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings consumed by the client, the walker and the image backfill.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Personal access token sent with every request.
    pub access_token: String,
    /// API base URL, with trailing slash.
    pub api_base: String,
    /// Plugin namespace for metadata overlays.
    pub plugin_id: String,
    /// Scale factor for rendered images.
    pub image_scale: f64,
    /// Fetch rendered images after the walk.
    pub download_vectors: bool,
    /// Import the full element tree. When off, screens are treated as flat images.
    pub import_children: bool,
    /// Classify every element as a vector graphic.
    pub all_as_vector: bool,
    /// Node ids per image request.
    pub batch_size: usize,
    /// Source node types that never become widgets.
    pub ignored_types: Vec<SmolStr>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            plugin_id: DEFAULT_PLUGIN_ID.to_string(),
            image_scale: 1.0,
            download_vectors: true,
            import_children: true,
            all_as_vector: false,
            batch_size: DEFAULT_BATCH_SIZE,
            ignored_types: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[allow(missing_docs)]
impl ImportConfig {
    /// Defaults with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    #[must_use]
    pub fn with_image_scale(mut self, factor: f64) -> Self {
        self.image_scale = factor;
        self
    }

    #[must_use]
    pub fn with_download_vectors(mut self, value: bool) -> Self {
        self.download_vectors = value;
        self
    }

    #[must_use]
    pub fn with_import_children(mut self, value: bool) -> Self {
        self.import_children = value;
        self
    }

    #[must_use]
    pub fn with_all_as_vector(mut self, value: bool) -> Self {
        self.all_as_vector = value;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    #[must_use]
    pub fn with_ignored_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.ignored_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true when nodes of `node_type` never become widgets.
    pub fn is_ignored_type(&self, node_type: &str) -> bool {
        self.ignored_types.iter().any(|ignored| ignored == node_type)
    }

    /// Rejects settings the client or the backfill cannot work with.
    pub fn validate(&self) -> ImportResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(ImportError::InvalidConfig(
                "import.access_token must not be empty".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ImportError::InvalidConfig(
                "import.batch_size must be at least 1".into(),
            ));
        }
        if !(self.image_scale.is_finite() && self.image_scale > 0.0) {
            return Err(ImportError::InvalidConfig(
                format!("import.image_scale must be positive, got {}", self.image_scale).into(),
            ));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ImportError::InvalidConfig(
                format!("import.api_base '{}' is not an http(s) url", self.api_base).into(),
            ));
        }
        Ok(())
    }

    /// Reads an `[import]` table. Missing keys keep their defaults; the token
    /// may stay empty so callers can fill it from elsewhere before validating.
    pub fn from_toml_str(text: &str) -> ImportResult<Self> {
        let parsed: ConfigFile = toml::from_str(text)
            .map_err(|err| ImportError::InvalidConfig(err.to_string().into()))?;
        Ok(parsed.import.into_config())
    }

    /// Reads the `[import]` table of a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            ImportError::InvalidConfig(format!("failed to read {}: {err}", path.display()).into())
        })?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    import: ImportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ImportSection {
    access_token: Option<String>,
    api_base: Option<String>,
    plugin_id: Option<String>,
    image_scale: Option<f64>,
    download_vectors: Option<bool>,
    import_children: Option<bool>,
    all_as_vector: Option<bool>,
    batch_size: Option<usize>,
    ignored_types: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

impl ImportSection {
    fn into_config(self) -> ImportConfig {
        let defaults = ImportConfig::default();
        ImportConfig {
            access_token: self.access_token.unwrap_or_default(),
            api_base: self.api_base.unwrap_or(defaults.api_base),
            plugin_id: self.plugin_id.unwrap_or(defaults.plugin_id),
            image_scale: self.image_scale.unwrap_or(defaults.image_scale),
            download_vectors: self.download_vectors.unwrap_or(defaults.download_vectors),
            import_children: self.import_children.unwrap_or(defaults.import_children),
            all_as_vector: self.all_as_vector.unwrap_or(defaults.all_as_vector),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            ignored_types: self
                .ignored_types
                .map(|types| types.into_iter().map(SmolStr::from).collect())
                .unwrap_or(defaults.ignored_types),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_settings() {
        let config = ImportConfig::new("token");
        assert_eq!(config.batch_size, 50);
        assert!((config.image_scale - 1.0).abs() < f64::EPSILON);
        assert!(config.download_vectors);
        assert!(config.import_children);
        assert!(!config.all_as_vector);
        assert!(config.ignored_types.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_section_overrides_defaults() {
        let config = ImportConfig::from_toml_str(
            r#"
[import]
image_scale = 2.0
batch_size = 20
download_vectors = false
ignored_types = ["GROUP", "INSTANCE"]
"#,
        )
        .expect("parse config");
        assert!(config.access_token.is_empty());
        assert_eq!(config.batch_size, 20);
        assert!(!config.download_vectors);
        assert!(config.is_ignored_type("GROUP"));
        assert!(!config.is_ignored_type("FRAME"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ImportConfig::from_toml_str("[import]\nbatchsize = 3\n").unwrap_err();
        assert!(matches!(err, ImportError::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(ImportConfig::default().validate().is_err());
        assert!(ImportConfig::new("t").with_batch_size(0).validate().is_err());
        assert!(ImportConfig::new("t").with_image_scale(0.0).validate().is_err());
    }
}
