//! MapQuest geocoding operations
//!
//! Forward, reverse and batch geocoding against the `geocoding/v1`
//! endpoints. Single lookups answer with the best candidate only; use
//! [`GeocodingClient::full_geocode`] to see every candidate.

use std::ops::Range;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::client::{MapQuestClient, decode};
use crate::config::BATCH_LIMIT;
use crate::error::MapQuestError;
use crate::models::{GeocodingResponse, GeocodingResult, LatLng, Location};

const ADDRESS_PATH: &str = "geocoding/v1/address";
const REVERSE_PATH: &str = "geocoding/v1/reverse";
const BATCH_PATH: &str = "geocoding/v1/batch";

/// Trait for geocoding clients
///
/// A lookup without any match is not an error: [`geocode`](Self::geocode)
/// then yields [`LatLng::ZERO`] and [`reverse_geocode`](Self::reverse_geocode)
/// an empty [`Location`].
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Coordinates of the best match for a free-form address
    async fn geocode(&self, address: &str) -> Result<LatLng, MapQuestError>;

    /// Best matching address for a point
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Location, MapQuestError>;

    /// Complete provider response for a free-form address
    async fn full_geocode(&self, address: &str) -> Result<GeocodingResponse, MapQuestError>;

    /// Coordinates for many addresses, aligned with the input
    ///
    /// Addresses are sent in chunks of at most [`BATCH_LIMIT`]. The first
    /// failing chunk fails the whole call.
    async fn batch_geocode(&self, addresses: &[String]) -> Result<Vec<LatLng>, MapQuestError>;
}

/// JSON body of a batch request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchGeocodeRequest<'a> {
    locations: &'a [String],
    max_results: u8,
    thumb_maps: bool,
}

impl<'a> BatchGeocodeRequest<'a> {
    const fn new(locations: &'a [String]) -> Self {
        Self {
            locations,
            max_results: 1,
            thumb_maps: false,
        }
    }
}

/// Split `len` items into consecutive ranges of at most `size` items
///
/// `size` is clamped to `1..=BATCH_LIMIT`. Yields `ceil(len / size)` ranges
/// and nothing at all for `len == 0`.
pub fn batch_ranges(len: usize, size: usize) -> impl Iterator<Item = Range<usize>> {
    let size = size.clamp(1, BATCH_LIMIT);
    (0..len)
        .step_by(size)
        .map(move |start| start..len.min(start + size))
}

impl MapQuestClient {
    fn address_params(&self, address: &str) -> Vec<(&'static str, String)> {
        vec![
            self.key_param(),
            ("inFormat", "kvp".to_string()),
            ("outFormat", "json".to_string()),
            ("location", address.to_string()),
        ]
    }

    fn reverse_params(&self, point: LatLng) -> Vec<(&'static str, String)> {
        vec![self.key_param(), ("location", point.to_string())]
    }
}

fn require_address(address: &str) -> Result<(), MapQuestError> {
    if address.trim().is_empty() {
        return Err(MapQuestError::InvalidRequest(
            "address must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl GeocodingClient for MapQuestClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<LatLng, MapQuestError> {
        let response = self.full_geocode(address).await?;

        let Some(location) = response.best_match() else {
            warn!("No geocoding match");
            return Ok(LatLng::ZERO);
        };

        debug!(lat = location.lat_lng.lat, lng = location.lat_lng.lng, "Address geocoded");
        Ok(location.lat_lng)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Location, MapQuestError> {
        let body = self
            .get_query(
                &self.config().endpoint(REVERSE_PATH),
                &self.reverse_params(LatLng::new(lat, lng)),
            )
            .await?;
        let response: GeocodingResponse = decode(&body)?;

        let Some(location) = response.best_match() else {
            warn!("No reverse geocoding match");
            return Ok(Location::default());
        };

        debug!(city = %location.city, "Point reverse geocoded");
        Ok(location.clone())
    }

    #[instrument(skip(self))]
    async fn full_geocode(&self, address: &str) -> Result<GeocodingResponse, MapQuestError> {
        require_address(address)?;

        let body = self
            .get_query(
                &self.config().endpoint(ADDRESS_PATH),
                &self.address_params(address),
            )
            .await?;
        let response: GeocodingResponse = decode(&body)?;

        debug!(
            candidates = response.results.first().map_or(0, |r| r.locations.len()),
            "Geocoding response received"
        );
        Ok(response)
    }

    #[instrument(skip(self, addresses), fields(count = addresses.len()))]
    async fn batch_geocode(&self, addresses: &[String]) -> Result<Vec<LatLng>, MapQuestError> {
        let url = self.config().endpoint(BATCH_PATH);
        let params = [self.key_param()];
        let mut coordinates = Vec::with_capacity(addresses.len());

        for (chunk, range) in batch_ranges(addresses.len(), self.config().batch_size).enumerate() {
            let locations = &addresses[range];

            let body = self
                .post_json(&url, &params, &BatchGeocodeRequest::new(locations))
                .await?;
            let response: GeocodingResponse = decode(&body)?;

            if response.results.len() != locations.len() {
                warn!(
                    chunk,
                    sent = locations.len(),
                    received = response.results.len(),
                    "Batch result count mismatch"
                );
            }

            coordinates.extend((0..locations.len()).map(|i| {
                response
                    .results
                    .get(i)
                    .map_or(LatLng::ZERO, GeocodingResult::best_lat_lng)
            }));

            debug!(chunk, size = locations.len(), "Batch chunk geocoded");
        }

        Ok(coordinates)
    }
}
