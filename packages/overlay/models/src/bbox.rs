//! Bounding box input types.
//!
//! A [`BoundingBox`] holds the four coordinate fields exactly as the user
//! typed them. Parsing into numeric [`Bounds`] happens at evaluation time so
//! that an incomplete or garbled box can be rejected without ever touching
//! the dataset.

use serde::{Deserialize, Serialize};

use crate::{MAX_LAT_PARAM, MAX_LNG_PARAM, MIN_LAT_PARAM, MIN_LNG_PARAM};

/// Errors from parsing a [`BoundingBox`] into [`Bounds`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// A field was empty.
    #[error("Missing bounding box field: {field}")]
    Missing {
        /// Wire name of the empty field.
        field: &'static str,
    },

    /// A field could not be parsed as a decimal number.
    #[error("Invalid bounding box field {field}: {value:?}")]
    Invalid {
        /// Wire name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A field parsed to infinity or NaN.
    #[error("Non-finite bounding box field {field}: {value:?}")]
    NonFinite {
        /// Wire name of the offending field.
        field: &'static str,
        /// The raw text that parsed to a non-finite value.
        value: String,
    },
}

/// A latitude/longitude box as entered by the user, one string per field.
///
/// No ordering is enforced between the min and max fields: an inverted or
/// degenerate box is a valid input that simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Minimum latitude text.
    pub min_lat: String,
    /// Maximum latitude text.
    pub max_lat: String,
    /// Minimum longitude text.
    pub min_lng: String,
    /// Maximum longitude text.
    pub max_lng: String,
}

impl BoundingBox {
    /// Creates a bounding box from the four raw field values.
    #[must_use]
    pub fn new(
        min_lat: impl Into<String>,
        max_lat: impl Into<String>,
        min_lng: impl Into<String>,
        max_lng: impl Into<String>,
    ) -> Self {
        Self {
            min_lat: min_lat.into(),
            max_lat: max_lat.into(),
            min_lng: min_lng.into(),
            max_lng: max_lng.into(),
        }
    }

    /// Whether all four fields are non-empty. Whitespace counts as filled
    /// in; such a box is queried and simply fails to parse.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, v)| !v.is_empty())
    }

    /// The `(name, value)` query parameters in wire order.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, &str); 4] {
        self.fields()
    }

    /// Parses every field into a finite `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] naming the first field that is empty, is not a
    /// decimal number, or is not finite.
    pub fn parse(&self) -> Result<Bounds, BoundsError> {
        Ok(Bounds {
            min_lat: parse_field(MIN_LAT_PARAM, &self.min_lat)?,
            max_lat: parse_field(MAX_LAT_PARAM, &self.max_lat)?,
            min_lng: parse_field(MIN_LNG_PARAM, &self.min_lng)?,
            max_lng: parse_field(MAX_LNG_PARAM, &self.max_lng)?,
        })
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            (MIN_LAT_PARAM, self.min_lat.as_str()),
            (MAX_LAT_PARAM, self.max_lat.as_str()),
            (MIN_LNG_PARAM, self.min_lng.as_str()),
            (MAX_LNG_PARAM, self.max_lng.as_str()),
        ]
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, BoundsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoundsError::Missing { field });
    }

    let value: f64 = trimmed.parse().map_err(|_| BoundsError::Invalid {
        field,
        value: raw.to_string(),
    })?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(BoundsError::NonFinite {
            field,
            value: raw.to_string(),
        })
    }
}

/// A parsed bounding box. Range checks are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum latitude.
    pub min_lat: f64,
    /// Maximum latitude.
    pub max_lat: f64,
    /// Minimum longitude.
    pub min_lng: f64,
    /// Maximum longitude.
    pub max_lng: f64,
}

impl Bounds {
    /// Creates bounds from already-parsed values.
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Whether min <= max on both axes.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_lng <= self.max_lng
    }

    /// Whether `value` lies in `[min_lat, max_lat]`.
    #[must_use]
    pub fn lat_contains(&self, value: f64) -> bool {
        self.min_lat <= value && value <= self.max_lat
    }

    /// Whether `value` lies in `[min_lng, max_lng]`.
    #[must_use]
    pub fn lng_contains(&self, value: f64) -> bool {
        self.min_lng <= value && value <= self.max_lng
    }
}
