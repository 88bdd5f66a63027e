//! Overlay configuration.
//!
//! The default configuration is embedded at compile time from
//! `config/default.toml`. A user config file only needs to list the keys it
//! changes; everything else falls back to the embedded defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geojson::FeatureCollection;
use redline_map_filter::{SAMPLE_DATASET, dataset};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::OverlayError;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Which [`OverlaySource`](crate::OverlaySource) implementation to use.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// Scan the in-memory dataset.
    Local,
    /// Ask the overlay query service.
    Remote,
}

/// Overlay engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Which source answers queries.
    pub source: SourceKind,
    /// Base URL of the overlay query service.
    pub base_url: String,
    /// Dataset file; `None` means the bundled sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
}

/// Keys a user config file may set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    source: Option<SourceKind>,
    base_url: Option<String>,
    dataset_path: Option<PathBuf>,
}

impl Default for OverlayConfig {
    /// The embedded defaults.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a compile-time constant,
    /// covered by tests).
    fn default() -> Self {
        toml::de::from_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse embedded overlay config: {e}"))
    }
}

impl OverlayConfig {
    /// Parses a config file's contents over the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Config`] if `contents` is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml(contents: &str) -> Result<Self, OverlayError> {
        let partial: PartialConfig = toml::de::from_str(contents)?;
        let mut config = Self::default();
        if let Some(source) = partial.source {
            config.source = source;
        }
        if let Some(base_url) = partial.base_url {
            config.base_url = base_url;
        }
        if partial.dataset_path.is_some() {
            config.dataset_path = partial.dataset_path;
        }
        Ok(config)
    }

    /// Reads a config file over the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, OverlayError> {
        log::debug!("Reading overlay config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads the configured dataset, or the bundled sample when no path is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Dataset`] if the dataset cannot be read or
    /// parsed.
    pub fn load_dataset(&self) -> Result<Arc<FeatureCollection>, OverlayError> {
        let collection = match &self.dataset_path {
            Some(path) => dataset::load_dataset(path)?,
            None => {
                log::info!("No dataset_path configured; using bundled sample dataset");
                dataset::parse_dataset(SAMPLE_DATASET)?
            }
        };
        Ok(Arc::new(collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = OverlayConfig::default();
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.base_url, redline_map_client::DEFAULT_BASE_URL);
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = OverlayConfig::from_toml("source = \"local\"").unwrap();
        assert_eq!(config.source, SourceKind::Local);
        assert_eq!(config.base_url, redline_map_client::DEFAULT_BASE_URL);

        let config = OverlayConfig::from_toml(
            "base_url = \"http://maps.internal:8080\"\ndataset_path = \"data/redlining.json\"",
        )
        .unwrap();
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.base_url, "http://maps.internal:8080");
        assert_eq!(
            config.dataset_path.as_deref(),
            Some(Path::new("data/redlining.json"))
        );
    }

    #[test]
    fn rejects_unknown_keys_and_sources() {
        assert!(matches!(
            OverlayConfig::from_toml("sauce = \"local\""),
            Err(OverlayError::Config(_))
        ));
        assert!(matches!(
            OverlayConfig::from_toml("source = \"carrier_pigeon\""),
            Err(OverlayError::Config(_))
        ));
    }

    #[test]
    fn source_kind_string_forms() {
        assert_eq!("local".parse::<SourceKind>().unwrap(), SourceKind::Local);
        assert_eq!(SourceKind::Remote.to_string(), "remote");
    }

    #[test]
    fn missing_dataset_path_uses_sample() {
        let dataset = OverlayConfig::default().load_dataset().unwrap();
        assert_eq!(dataset.features.len(), 10);
    }

    #[test]
    fn unreadable_dataset_is_an_error() {
        let config = OverlayConfig {
            dataset_path: Some(PathBuf::from("does/not/exist.json")),
            ..OverlayConfig::default()
        };
        assert!(matches!(
            config.load_dataset(),
            Err(OverlayError::Dataset(_))
        ));
    }
}
