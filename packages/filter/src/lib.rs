#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Local filtering over the redlining dataset.
//!
//! [`LocalFilter`] is the offline counterpart of the overlay query service:
//! given the same dataset it answers bounding box and keyword queries with
//! the same features, in dataset order, without any network access.

pub mod dataset;
pub mod keyword;

use std::collections::BTreeMap;
use std::sync::Arc;

use geojson::{Feature, FeatureCollection};
use redline_map_overlay_models::{
    BoundingBox, HolcGrade, RedliningProperties, empty_feature_collection,
};
use thiserror::Error;

/// Small bundled sample of the redlining dataset.
pub const SAMPLE_DATASET: &str = include_str!("../fixtures/redlining_sample.json");

/// Errors from loading the dataset.
#[derive(Debug, Error)]
pub enum FilterError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Answers overlay queries by scanning the full dataset.
#[derive(Debug, Clone)]
pub struct LocalFilter {
    dataset: Arc<FeatureCollection>,
}

impl LocalFilter {
    /// Creates a filter over a shared, read-only dataset.
    #[must_use]
    pub const fn new(dataset: Arc<FeatureCollection>) -> Self {
        Self { dataset }
    }

    /// The full, unfiltered dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Arc<FeatureCollection> {
        &self.dataset
    }

    /// Features whose geometry matches `bbox`.
    ///
    /// A box with an unparsable field, or with min > max on either axis,
    /// yields the empty collection.
    #[must_use]
    pub fn filter_by_box(&self, bbox: &BoundingBox) -> FeatureCollection {
        let bounds = match bbox.parse() {
            Ok(bounds) if bounds.is_ordered() => bounds,
            Ok(bounds) => {
                log::debug!("Inverted bounding box {bounds:?}; no features match");
                return empty_feature_collection();
            }
            Err(e) => {
                log::debug!("Unusable bounding box: {e}");
                return empty_feature_collection();
            }
        };

        self.collect_matching(|feature| redline_map_spatial::feature_matches(feature, &bounds))
    }

    /// Features with an area description containing `keyword`, ignoring
    /// case. An empty keyword yields the empty collection.
    #[must_use]
    pub fn filter_by_keyword(&self, keyword: &str) -> FeatureCollection {
        if keyword.is_empty() {
            return empty_feature_collection();
        }

        self.collect_matching(|feature| keyword::feature_matches(feature, keyword))
    }

    fn collect_matching(&self, predicate: impl Fn(&Feature) -> bool) -> FeatureCollection {
        let features: Vec<Feature> = self
            .dataset
            .features
            .iter()
            .filter(|feature| predicate(feature))
            .cloned()
            .collect();

        log::debug!(
            "{} of {} features matched",
            features.len(),
            self.dataset.features.len()
        );

        FeatureCollection {
            features,
            ..empty_feature_collection()
        }
    }
}

/// Number of features per HOLC grade. Features without a recognizable
/// grade are not counted.
#[must_use]
pub fn grade_breakdown(collection: &FeatureCollection) -> BTreeMap<HolcGrade, u64> {
    let mut counts = BTreeMap::new();
    for grade in collection
        .features
        .iter()
        .filter_map(|feature| RedliningProperties::from_feature(feature).grade())
    {
        *counts.entry(grade).or_insert(0) += 1;
    }
    counts
}
