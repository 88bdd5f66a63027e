#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the redlining overlay query service.
//!
//! The service exposes two endpoints, both answering with the
//! [`ServerResponse`](redline_map_overlay_models::ServerResponse) envelope:
//!
//! - `GET /boundingBox?minLat=&maxLat=&minLng=&maxLng=`
//! - `GET /describedBy?keyword=`
//!
//! Each query issues exactly one request: no retry, no timeout, no caching.
//! Transport failures and non-JSON bodies are returned as errors; any JSON
//! body, whatever the HTTP status, goes through [`normalize()`] and comes
//! back as a (possibly empty) feature collection.

pub mod normalize;

pub use normalize::{normalize, normalize_envelope};

use geojson::FeatureCollection;
use redline_map_overlay_models::{
    BOUNDING_BOX_ENDPOINT, BoundingBox, KEYWORD_ENDPOINT, KEYWORD_PARAM,
};
use thiserror::Error;

/// Where the overlay query service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3232";

/// Errors from querying the overlay service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the overlay query service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Creates a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client that sends requests through an existing
    /// [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The service base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the bounding-box request without sending it.
    #[must_use]
    pub fn box_request(&self, bbox: &BoundingBox) -> reqwest::RequestBuilder {
        self.client
            .get(self.endpoint(BOUNDING_BOX_ENDPOINT))
            .query(&bbox.query_params())
    }

    /// Builds the keyword request without sending it.
    #[must_use]
    pub fn keyword_request(&self, keyword: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.endpoint(KEYWORD_ENDPOINT))
            .query(&[(KEYWORD_PARAM, keyword)])
    }

    /// Queries features matching `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not JSON.
    pub async fn query_by_box(&self, bbox: &BoundingBox) -> Result<FeatureCollection, ClientError> {
        self.fetch(self.box_request(bbox)).await
    }

    /// Queries features whose descriptions contain `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not JSON.
    pub async fn query_by_keyword(&self, keyword: &str) -> Result<FeatureCollection, ClientError> {
        self.fetch(self.keyword_request(keyword)).await
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    async fn fetch(&self, request: reqwest::RequestBuilder) -> Result<FeatureCollection, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("{} {status}", resp.url());

        let text = resp.text().await?;

        if !status.is_success() {
            log::warn!("Overlay service answered {status}; normalizing body anyway");
        }

        let body: serde_json::Value = serde_json::from_str(&text)?;
        Ok(normalize(&body))
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
