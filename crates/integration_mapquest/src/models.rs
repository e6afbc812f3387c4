//! Geocoding data models
//!
//! Typed subset of the MapQuest geocoding response schema, plus the
//! `info` block shared by every MapQuest endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point with latitude and longitude
///
/// Values are taken from the provider as-is and are not range checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Returned by the geocoding calls when the provider found no match
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this is the `(0, 0)` "no match" value
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// A location described by its address and coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    /// Street address
    pub street: String,
    /// City
    #[serde(rename = "adminArea5")]
    pub city: String,
    /// State or region
    #[serde(rename = "adminArea3")]
    pub state: String,
    /// Postal code
    pub postal_code: String,
    /// County
    #[serde(rename = "adminArea4")]
    pub county: String,
    /// Country code
    #[serde(rename = "adminArea1")]
    pub country_code: String,
    /// Routing coordinate of the location
    pub lat_lng: LatLng,
    /// Coordinate used for display, may differ from `lat_lng`
    pub display_lat_lng: Option<LatLng>,
    /// `s` for stop, `v` for via
    #[serde(rename = "type")]
    pub location_type: String,
    /// Whether the point was dragged by a user
    pub drag_point: bool,
    /// Granularity of the match (`POINT`, `ADDRESS`, `CITY`, ...)
    pub geocode_quality: String,
    /// Five character quality code, e.g. `P1AAX`
    pub geocode_quality_code: String,
    /// `L`, `R`, `M` or `N`
    pub side_of_street: String,
    /// Identifier of the nearest road link
    pub link_id: u64,
}

/// Copyright block attached to every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Copyright {
    /// e.g. "© 2014 MapQuest, Inc."
    pub text: String,
    /// Logo URL
    pub image_url: String,
    /// Logo alt text
    pub image_alt_text: String,
}

/// Provider status information
///
/// A non-zero `statuscode` means the provider rejected the request; the
/// value is then surfaced as [`MapQuestError::Provider`](crate::MapQuestError::Provider).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// Provider status code, `0` on success
    pub statuscode: i32,
    /// Human-readable messages
    pub messages: Vec<String>,
    /// Copyright notice
    pub copyright: Copyright,
}

impl Info {
    /// Build an error info with the given code and messages
    #[must_use]
    pub fn new(statuscode: i32, messages: Vec<String>) -> Self {
        Self {
            statuscode,
            messages,
            copyright: Copyright::default(),
        }
    }

    /// Whether the provider reported success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.statuscode == 0
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return f.write_str("No error");
        }
        write!(f, "Error {}: {}", self.statuscode, self.messages.join("; "))
    }
}

impl std::error::Error for Info {}

/// A response envelope carrying an [`Info`] block
pub(crate) trait ProviderResponse {
    fn info(&self) -> &Info;
}

/// The location string or point that was submitted for one result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvidedLocation {
    /// Free-text query as echoed by the provider
    pub location: Option<String>,
    /// Point as echoed by the provider for reverse lookups
    pub lat_lng: Option<LatLng>,
}

/// Candidate matches for one submitted location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeocodingResult {
    /// What was submitted
    pub provided_location: ProvidedLocation,
    /// Candidates, best first
    pub locations: Vec<Location>,
}

impl GeocodingResult {
    /// The best candidate, if any
    #[must_use]
    pub fn best_match(&self) -> Option<&Location> {
        self.locations.first()
    }

    /// Coordinate of the best candidate, or [`LatLng::ZERO`]
    #[must_use]
    pub fn best_lat_lng(&self) -> LatLng {
        self.best_match().map_or(LatLng::ZERO, |l| l.lat_lng)
    }
}

/// Options echoed back by the geocoding endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeocodingOptions {
    /// Maximum candidates per location (`-1` = provider default)
    pub max_results: i32,
    /// Whether thumbnail maps were requested
    pub thumb_maps: bool,
    /// Whether lat/lng input was ignored
    pub ignore_lat_lng_input: bool,
}

/// Complete response of a geocoding call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingResponse {
    /// Provider status
    pub info: Info,
    /// Echoed options
    pub options: GeocodingOptions,
    /// One entry per submitted location
    pub results: Vec<GeocodingResult>,
}

impl GeocodingResponse {
    /// Best candidate of the first submitted location
    #[must_use]
    pub fn best_match(&self) -> Option<&Location> {
        self.results.first().and_then(GeocodingResult::best_match)
    }
}

impl ProviderResponse for GeocodingResponse {
    fn info(&self) -> &Info {
        &self.info
    }
}
