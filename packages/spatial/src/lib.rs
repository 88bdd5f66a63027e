#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bounding box containment for redlining polygons.
//!
//! This is a cheap representative-vertex test, not polygon clipping: each
//! polygon contributes one longitude sample and one latitude sample taken
//! from fixed vertex positions, and the feature matches when both samples
//! fall inside the box. Result fixtures for the bundled dataset are defined
//! against exactly this rule, including the axis each geometry type reads
//! its samples from:
//!
//! | Geometry       | Longitude sample           | Latitude sample            |
//! |----------------|----------------------------|----------------------------|
//! | `Polygon`      | `ring[0][1]` (any ring)    | `ring[1][0]` (same ring)   |
//! | `MultiPolygon` | `poly[0][0][0]` (any poly) | `poly[0][1][1]` (same poly)|
//!
//! Missing geometry, other geometry types, and coordinate arrays too short
//! to supply a sample are non-matches. Nothing here returns an error.

use geojson::{Feature, Geometry, PolygonType, Position, Value};
use redline_map_overlay_models::Bounds;

/// Whether `feature`'s geometry matches `bounds`.
#[must_use]
pub fn feature_matches(feature: &Feature, bounds: &Bounds) -> bool {
    geometry_matches(feature.geometry.as_ref(), bounds)
}

/// Whether `geometry` matches `bounds` under the sample-point rule.
#[must_use]
pub fn geometry_matches(geometry: Option<&Geometry>, bounds: &Bounds) -> bool {
    let Some(geometry) = geometry else {
        return false;
    };

    match &geometry.value {
        Value::Polygon(rings) => polygon_matches(rings, bounds),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .any(|polygon| multi_polygon_member_matches(polygon, bounds)),
        other => {
            log::trace!("Skipping unsupported geometry type {}", type_name(other));
            false
        }
    }
}

/// Any ring whose first vertex's y lies in the longitude range and whose
/// second vertex's x lies in the latitude range.
fn polygon_matches(rings: &PolygonType, bounds: &Bounds) -> bool {
    rings.iter().any(|ring| {
        let lng_sample = vertex_axis(ring, 0, 1);
        let lat_sample = vertex_axis(ring, 1, 0);
        lng_sample.is_some_and(|v| bounds.lng_contains(v))
            && lat_sample.is_some_and(|v| bounds.lat_contains(v))
    })
}

/// First ring only: first vertex's x against longitude, second vertex's y
/// against latitude.
fn multi_polygon_member_matches(polygon: &PolygonType, bounds: &Bounds) -> bool {
    let Some(ring) = polygon.first() else {
        return false;
    };
    let lng_sample = vertex_axis(ring, 0, 0);
    let lat_sample = vertex_axis(ring, 1, 1);
    lng_sample.is_some_and(|v| bounds.lng_contains(v))
        && lat_sample.is_some_and(|v| bounds.lat_contains(v))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn vertex_axis(ring: &[Position], vertex: usize, axis: usize) -> Option<f64> {
    ring.get(vertex)?.get(axis).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn geometry(value: serde_json::Value) -> Geometry {
        serde_json::from_value(value).unwrap()
    }

    /// A polygon ring whose first vertex has y = `lng_sample` and whose
    /// second vertex has x = `lat_sample`.
    fn sampled_polygon(lat_sample: f64, lng_sample: f64) -> Geometry {
        geometry(json!({
            "type": "Polygon",
            "coordinates": [[
                [0.0, lng_sample],
                [lat_sample, 0.0],
                [1.0, 1.0],
                [0.0, lng_sample]
            ]]
        }))
    }

    #[test]
    fn null_geometry_never_matches() {
        let bounds = Bounds::new(-90.0, 90.0, -180.0, 180.0);
        assert!(!geometry_matches(None, &bounds));
    }

    #[test]
    fn polygon_reads_samples_from_fixed_axes() {
        let geom = sampled_polygon(33.5, -86.8);
        assert!(geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -87.0, -86.0)
        ));
        // Same vertices, box built from the "natural" [lng, lat] reading.
        assert!(!geometry_matches(
            Some(&geom),
            &Bounds::new(-1.0, 0.5, -1.0, 0.5)
        ));
    }

    #[test]
    fn polygon_needs_both_samples_inside() {
        let geom = sampled_polygon(33.5, -86.8);
        assert!(!geometry_matches(
            Some(&geom),
            &Bounds::new(34.0, 35.0, -87.0, -86.0)
        ));
        assert!(!geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -86.0, -85.0)
        ));
    }

    #[test]
    fn polygon_matches_on_any_ring() {
        let geom = geometry(json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [0.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
                [[0.0, -86.8], [33.5, 0.0], [1.0, 1.0], [0.0, -86.8]]
            ]
        }));
        assert!(geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -87.0, -86.0)
        ));
    }

    #[test]
    fn polygon_samples_come_from_the_same_ring() {
        let geom = geometry(json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, -86.8], [0.0, 0.0], [1.0, 1.0], [0.0, -86.8]],
                [[0.0, 0.0], [33.5, 0.0], [1.0, 1.0], [0.0, 0.0]]
            ]
        }));
        assert!(!geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -87.0, -86.0)
        ));
    }

    #[test]
    fn multipolygon_reads_lng_then_lat() {
        let geom = geometry(json!({
            "type": "MultiPolygon",
            "coordinates": [[[
                [-86.8, 0.0],
                [0.0, 33.5],
                [1.0, 1.0],
                [-86.8, 0.0]
            ]]]
        }));
        assert!(geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -87.0, -86.0)
        ));
        assert!(!geometry_matches(
            Some(&geom),
            &Bounds::new(-87.0, -86.0, 33.0, 34.0)
        ));
    }

    #[test]
    fn multipolygon_matches_on_any_member() {
        let geom = geometry(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[10.0, 10.0], [10.0, 10.0], [11.0, 11.0], [10.0, 10.0]]],
                [[[-86.8, 0.0], [0.0, 33.5], [1.0, 1.0], [-86.8, 0.0]]]
            ]
        }));
        assert!(geometry_matches(
            Some(&geom),
            &Bounds::new(33.0, 34.0, -87.0, -86.0)
        ));
    }

    #[test]
    fn short_coordinate_arrays_do_not_match() {
        let bounds = Bounds::new(-90.0, 90.0, -180.0, 180.0);
        for geom in [
            json!({ "type": "Polygon", "coordinates": [] }),
            json!({ "type": "Polygon", "coordinates": [[]] }),
            json!({ "type": "Polygon", "coordinates": [[[0.0, 0.0]]] }),
            json!({ "type": "MultiPolygon", "coordinates": [] }),
            json!({ "type": "MultiPolygon", "coordinates": [[]] }),
            json!({ "type": "MultiPolygon", "coordinates": [[[[0.0, 0.0]]]] }),
        ] {
            assert!(
                !geometry_matches(Some(&geometry(geom.clone())), &bounds),
                "expected no match for {geom}"
            );
        }
    }

    #[test]
    fn other_geometry_types_do_not_match() {
        let bounds = Bounds::new(-90.0, 90.0, -180.0, 180.0);
        let point = geometry(json!({ "type": "Point", "coordinates": [0.0, 0.0] }));
        let line = geometry(json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0], [1.0, 1.0]]
        }));
        assert!(!geometry_matches(Some(&point), &bounds));
        assert!(!geometry_matches(Some(&line), &bounds));
    }

    #[test]
    fn feature_without_geometry_does_not_match() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": null,
            "properties": {}
        }))
        .unwrap();
        assert!(!feature_matches(
            &feature,
            &Bounds::new(-90.0, 90.0, -180.0, 180.0)
        ));
    }
}
