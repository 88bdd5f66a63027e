#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Redlining feature, bounding box, and server envelope types.
//!
//! The dataset itself is plain `GeoJSON`, so features and collections are
//! the [`geojson`] crate's types. This crate adds the typed views the
//! overlay engine needs on top of them: HOLC grades, the redlining property
//! schema, user-entered bounding boxes, and the response envelope spoken
//! by the overlay query service.

pub mod bbox;
pub mod envelope;

pub use bbox::{BoundingBox, Bounds, BoundsError};
pub use envelope::{DataMap, ServerResponse};
pub use geojson::{Feature, FeatureCollection, Geometry};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Path segment of the bounding-box query endpoint.
pub const BOUNDING_BOX_ENDPOINT: &str = "boundingBox";
/// Path segment of the description-keyword query endpoint.
pub const KEYWORD_ENDPOINT: &str = "describedBy";
/// Query parameter for the minimum latitude.
pub const MIN_LAT_PARAM: &str = "minLat";
/// Query parameter for the maximum latitude.
pub const MAX_LAT_PARAM: &str = "maxLat";
/// Query parameter for the minimum longitude.
pub const MIN_LNG_PARAM: &str = "minLng";
/// Query parameter for the maximum longitude.
pub const MAX_LNG_PARAM: &str = "maxLng";
/// Query parameter for the description keyword.
pub const KEYWORD_PARAM: &str = "keyword";
/// `result` value of a successful envelope.
pub const SUCCESS_RESULT: &str = "success";
/// Key of the feature collection inside an envelope's `data`.
pub const FEATURE_COLLECTION_KEY: &str = "featCollection";
/// Property holding the free-text area description mapping.
pub const AREA_DESCRIPTION_KEY: &str = "area_description_data";

/// Returns the canonical "no results" collection.
///
/// A collection with zero features is a normal outcome, never a missing
/// value.
#[must_use]
pub const fn empty_feature_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// HOLC (Home Owners' Loan Corporation) neighborhood grade.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum HolcGrade {
    /// "Best"
    A,
    /// "Still desirable"
    B,
    /// "Definitely declining"
    C,
    /// "Hazardous"
    D,
}

impl HolcGrade {
    /// All grades, best first.
    pub const ALL: &[Self] = &[Self::A, Self::B, Self::C, Self::D];
}

/// Typed view of a redlining feature's properties.
///
/// Every field is optional; the source data is not consistent about which
/// ones are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedliningProperties {
    /// State abbreviation.
    #[serde(default)]
    pub state: Option<String>,
    /// City name.
    #[serde(default)]
    pub city: Option<String>,
    /// Neighborhood name.
    #[serde(default)]
    pub name: Option<String>,
    /// HOLC area identifier (e.g. "D12").
    #[serde(default)]
    pub holc_id: Option<String>,
    /// Raw HOLC grade text.
    #[serde(default)]
    pub holc_grade: Option<String>,
    /// Dataset-wide neighborhood identifier.
    #[serde(default)]
    pub neighborhood_id: Option<i64>,
    /// Description category -> free text.
    #[serde(default)]
    pub area_description_data: Option<BTreeMap<String, Option<String>>>,
}

impl RedliningProperties {
    /// Reads the typed properties of `feature`.
    ///
    /// Features without properties, or whose properties don't fit the
    /// schema, yield the all-`None` default.
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Self {
        feature
            .properties
            .as_ref()
            .and_then(|props| {
                serde_json::from_value(serde_json::Value::Object(props.clone())).ok()
            })
            .unwrap_or_default()
    }

    /// The parsed HOLC grade, if present and recognized.
    #[must_use]
    pub fn grade(&self) -> Option<HolcGrade> {
        self.holc_grade.as_deref()?.trim().parse().ok()
    }
}

/// State, city and name of a feature, as shown when it is selected on the
/// map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    /// State abbreviation.
    pub state: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Neighborhood name.
    pub name: Option<String>,
}

impl From<&Feature> for LocationSummary {
    fn from(feature: &Feature) -> Self {
        let props = RedliningProperties::from_feature(feature);
        Self {
            state: props.state,
            city: props.city,
            name: props.name,
        }
    }
}

impl std::fmt::Display for LocationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} ({}, {})",
            or_dash(&self.name),
            or_dash(&self.city),
            or_dash(&self.state)
        )
    }
}
