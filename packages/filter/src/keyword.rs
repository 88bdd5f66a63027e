//! Case-insensitive keyword search over area descriptions.
//!
//! Only the values of the `area_description_data` property are searched.
//! Category keys, other properties, and non-string values are ignored.

use geojson::Feature;
use redline_map_overlay_models::AREA_DESCRIPTION_KEY;

/// Whether any non-empty area description of `feature` contains `keyword`,
/// ignoring case.
///
/// An empty `keyword` is a substring of every non-empty description, so
/// callers that want "no keyword, no results" must check for it first.
#[must_use]
pub fn feature_matches(feature: &Feature, keyword: &str) -> bool {
    let Some(descriptions) = feature
        .property(AREA_DESCRIPTION_KEY)
        .and_then(serde_json::Value::as_object)
    else {
        return false;
    };

    let needle = keyword.to_lowercase();

    descriptions
        .values()
        .filter_map(serde_json::Value::as_str)
        .filter(|text| !text.is_empty())
        .any(|text| text.to_lowercase().contains(&needle))
}
