#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overlay sources and per-session overlay state for the redlining map.
//!
//! An [`OverlaySource`] answers the two overlay queries (bounding box and
//! description keyword). Two implementations share the same semantics:
//! [`RemoteOverlaySource`] asks the overlay query service, and
//! [`LocalOverlaySource`] scans the in-memory dataset. Which one is used is
//! decided by [`config::OverlayConfig`], so callers (and tests) never need
//! to know.
//!
//! [`session::OverlaySession`] holds the two overlays a map renders: the
//! bound overlay (box queries, reset to the full dataset) and the search
//! overlay (keyword queries, reset to empty).

pub mod config;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use geojson::FeatureCollection;
use redline_map_client::{ClientError, RemoteClient};
use redline_map_filter::LocalFilter;
use redline_map_overlay_models::BoundingBox;
use thiserror::Error;

pub use config::{OverlayConfig, SourceKind};
pub use session::OverlaySession;

/// Errors from overlay queries and configuration.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The overlay query service could not be reached.
    #[error("Overlay service error: {0}")]
    Client(#[from] ClientError),

    /// The dataset could not be loaded.
    #[error("Dataset error: {0}")]
    Dataset(#[from] redline_map_filter::FilterError),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`OverlayConfig`].
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Something that can answer overlay queries.
#[async_trait]
pub trait OverlaySource: Send + Sync {
    /// Short identifier for logs (e.g. `"local"`).
    fn id(&self) -> &str;

    /// Features matching a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError`] if the query could not be completed.
    async fn by_box(&self, bbox: &BoundingBox) -> Result<FeatureCollection, OverlayError>;

    /// Features whose area descriptions contain `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError`] if the query could not be completed.
    async fn by_keyword(&self, keyword: &str) -> Result<FeatureCollection, OverlayError>;
}

/// Answers queries from the in-memory dataset. Never fails.
#[derive(Debug, Clone)]
pub struct LocalOverlaySource {
    filter: LocalFilter,
}

impl LocalOverlaySource {
    /// Creates a source over a shared dataset.
    #[must_use]
    pub const fn new(dataset: Arc<FeatureCollection>) -> Self {
        Self {
            filter: LocalFilter::new(dataset),
        }
    }
}

#[async_trait]
impl OverlaySource for LocalOverlaySource {
    fn id(&self) -> &str {
        "local"
    }

    async fn by_box(&self, bbox: &BoundingBox) -> Result<FeatureCollection, OverlayError> {
        Ok(self.filter.filter_by_box(bbox))
    }

    async fn by_keyword(&self, keyword: &str) -> Result<FeatureCollection, OverlayError> {
        Ok(self.filter.filter_by_keyword(keyword))
    }
}

/// Answers queries through the overlay query service.
#[derive(Debug, Clone)]
pub struct RemoteOverlaySource {
    client: RemoteClient,
}

impl RemoteOverlaySource {
    /// Creates a source backed by `client`.
    #[must_use]
    pub const fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OverlaySource for RemoteOverlaySource {
    fn id(&self) -> &str {
        "remote"
    }

    async fn by_box(&self, bbox: &BoundingBox) -> Result<FeatureCollection, OverlayError> {
        Ok(self.client.query_by_box(bbox).await?)
    }

    async fn by_keyword(&self, keyword: &str) -> Result<FeatureCollection, OverlayError> {
        Ok(self.client.query_by_keyword(keyword).await?)
    }
}

/// Creates the source selected by `config`.
#[must_use]
pub fn build_source(
    config: &OverlayConfig,
    dataset: Arc<FeatureCollection>,
) -> Arc<dyn OverlaySource> {
    match config.source {
        SourceKind::Local => Arc::new(LocalOverlaySource::new(dataset)),
        SourceKind::Remote => Arc::new(RemoteOverlaySource::new(RemoteClient::new(
            config.base_url.clone(),
        ))),
    }
}
