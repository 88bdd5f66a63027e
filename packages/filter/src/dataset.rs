//! Loading the redlining dataset.
//!
//! The dataset is a single static `GeoJSON` document read once at startup
//! and shared read-only afterwards. A document that is valid `GeoJSON` but
//! not a `FeatureCollection` is replaced by the empty collection, so the
//! rest of the engine only ever sees a collection.

use std::path::Path;

use geojson::{FeatureCollection, GeoJson};
use redline_map_overlay_models::empty_feature_collection;

use crate::FilterError;

/// Parses a dataset document.
///
/// # Errors
///
/// Returns [`FilterError::GeoJson`] if `contents` is not valid `GeoJSON`.
pub fn parse_dataset(contents: &str) -> Result<FeatureCollection, FilterError> {
    match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => {
            log::warn!("Dataset is a single Feature, not a FeatureCollection; using empty dataset");
            Ok(empty_feature_collection())
        }
        GeoJson::Geometry(_) => {
            log::warn!("Dataset is a bare Geometry, not a FeatureCollection; using empty dataset");
            Ok(empty_feature_collection())
        }
    }
}

/// Reads and parses the dataset file at `path`.
///
/// # Errors
///
/// Returns [`FilterError::Io`] if the file cannot be read, or
/// [`FilterError::GeoJson`] if it is not valid `GeoJSON`.
pub fn load_dataset(path: &Path) -> Result<FeatureCollection, FilterError> {
    log::info!("Loading redlining dataset from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let collection = parse_dataset(&contents)?;
    log::info!("Loaded {} features", collection.features.len());
    Ok(collection)
}
