//! Plain-text rendering of overlay results.

use geojson::FeatureCollection;
use redline_map_filter::grade_breakdown;
use redline_map_overlay_models::{HolcGrade, LocationSummary, RedliningProperties};

/// How many features to list under a result summary.
const PREVIEW_LEN: usize = 10;

/// Prints the feature count, per-grade counts, and the first few features.
pub fn print_overlay(label: &str, collection: &FeatureCollection) {
    let total = collection.features.len();
    println!("{label}: {total} feature(s)");

    if total == 0 {
        return;
    }

    let counts = grade_breakdown(collection);
    let grades: Vec<String> = HolcGrade::ALL
        .iter()
        .map(|grade| format!("{grade}={}", counts.get(grade).copied().unwrap_or(0)))
        .collect();
    println!("  grades: {}", grades.join(" "));

    for feature in collection.features.iter().take(PREVIEW_LEN) {
        let props = RedliningProperties::from_feature(feature);
        println!(
            "  [{}] {}",
            props.holc_id.as_deref().unwrap_or("?"),
            LocationSummary::from(feature)
        );
    }

    if total > PREVIEW_LEN {
        println!("  ... and {} more", total - PREVIEW_LEN);
    }
}
