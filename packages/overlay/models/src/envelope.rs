//! Response envelope returned by the overlay query service.
//!
//! Both query endpoints wrap their payload the same way:
//!
//! ```json
//! {
//!   "result": "success",
//!   "data": { "featCollection": { "type": "FeatureCollection", "features": [] } },
//!   "paramsUsed": { "keyword": ["red mountain"] }
//! }
//! ```
//!
//! Failures carry a non-`"success"` `result` code and an `errorReason`.
//! The feature collection is deliberately kept as raw JSON here; checking
//! its shape is the normalizer's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SUCCESS_RESULT;

/// Envelope wrapping every overlay query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    /// `"success"` or one of the service's error codes
    /// (e.g. `"error_bad_request"`).
    pub result: String,
    /// Specific failure reason, present on errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    /// Payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMap>,
    /// Request parameters echoed back by the service.
    #[serde(default, alias = "paramsUsed")]
    pub params: BTreeMap<String, Vec<String>>,
}

impl ServerResponse {
    /// Whether the service reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS_RESULT
    }
}

/// Payload of a successful [`ServerResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMap {
    /// The filtered collection, still undecoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feat_collection: Option<serde_json::Value>,
}
