//! Unwrapping service envelopes into feature collections.
//!
//! Every way a response can go wrong ends in the canonical empty
//! collection; only a successful envelope carrying a well-formed, non-empty
//! `FeatureCollection` is passed through. A successful query that
//! legitimately matched nothing is therefore indistinguishable from a
//! successful envelope with a missing or broken payload.

use geojson::FeatureCollection;
use redline_map_overlay_models::{
    FEATURE_COLLECTION_KEY, SUCCESS_RESULT, ServerResponse, empty_feature_collection,
};

/// Normalizes a raw decoded response body.
#[must_use]
pub fn normalize(body: &serde_json::Value) -> FeatureCollection {
    let Some(envelope) = body.as_object() else {
        log::error!("Error: response body is not an object");
        return empty_feature_collection();
    };

    if envelope.get("result").and_then(serde_json::Value::as_str) != Some(SUCCESS_RESULT) {
        log_failure(
            envelope
                .get("errorReason")
                .and_then(serde_json::Value::as_str),
        );
        return empty_feature_collection();
    }

    let Some(collection) = envelope
        .get("data")
        .and_then(|data| data.get(FEATURE_COLLECTION_KEY))
    else {
        log::debug!("Successful response without {FEATURE_COLLECTION_KEY}");
        return empty_feature_collection();
    };

    decode_collection(collection)
}

/// Normalizes an already-decoded envelope.
#[must_use]
pub fn normalize_envelope(envelope: ServerResponse) -> FeatureCollection {
    if !envelope.is_success() {
        log_failure(envelope.error_reason.as_deref());
        return empty_feature_collection();
    }

    match envelope.data.and_then(|data| data.feat_collection) {
        Some(collection) => decode_collection(&collection),
        None => {
            log::debug!("Successful response without {FEATURE_COLLECTION_KEY}");
            empty_feature_collection()
        }
    }
}

fn log_failure(reason: Option<&str>) {
    log::error!("Error: {}", reason.unwrap_or("undefined"));
}

fn decode_collection(value: &serde_json::Value) -> FeatureCollection {
    if value.get("type").and_then(serde_json::Value::as_str) != Some("FeatureCollection") {
        log::debug!("{FEATURE_COLLECTION_KEY} is not a FeatureCollection");
        return empty_feature_collection();
    }

    match serde_json::from_value::<FeatureCollection>(value.clone()) {
        Ok(collection) if !collection.features.is_empty() => collection,
        Ok(_) => empty_feature_collection(),
        Err(e) => {
            log::debug!("Malformed {FEATURE_COLLECTION_KEY}: {e}");
            empty_feature_collection()
        }
    }
}
