//! MapQuest HTTP client and directions operations
//!
//! [`MapQuestClient`] owns the HTTP connection pool and configuration and
//! implements both [`DirectionsClient`] and
//! [`GeocodingClient`](crate::GeocodingClient).

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::MapQuestConfig;
use crate::directions::{Directions, DistanceUnit, OutputFormat};
use crate::error::MapQuestError;
use crate::models::{Info, ProviderResponse};
use crate::route::{DirectionsResponse, DistanceResponse};

/// Trait for routing clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// URL that would be requested for `directions`, including the API key
    fn directions_url(&self, directions: &Directions, format: OutputFormat) -> String;

    /// Fetch the raw route payload without decoding it
    async fn dump(
        &self,
        directions: &Directions,
        format: OutputFormat,
    ) -> Result<Bytes, MapQuestError>;

    /// Total route distance in `unit`
    ///
    /// Maps and narrative are switched off for the lookup; `directions`
    /// itself is left as it is.
    async fn distance(
        &self,
        directions: &Directions,
        unit: DistanceUnit,
    ) -> Result<f64, MapQuestError>;

    /// Fetch and decode the complete route
    async fn route(&self, directions: &Directions) -> Result<DirectionsResponse, MapQuestError>;
}

/// MapQuest client for geocoding and directions
///
/// Requests are issued one at a time; the client holds no mutable state and
/// can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MapQuestClient {
    client: Client,
    config: MapQuestConfig,
}

impl MapQuestClient {
    /// Create a new MapQuest client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &MapQuestConfig) -> Result<Self, MapQuestError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| MapQuestError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &MapQuestConfig {
        &self.config
    }

    /// The `key` query parameter
    pub(crate) fn key_param(&self) -> (&'static str, String) {
        ("key", self.config.api_key_str().to_string())
    }

    /// GET a fully built `url` and return the body of a successful response
    pub(crate) async fn get_bytes(&self, url: &str) -> Result<Bytes, MapQuestError> {
        debug!(url = %redact(url), "GET");
        self.send(self.client.get(url)).await
    }

    /// GET `url` with `params` appended as query string
    pub(crate) async fn get_query(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Bytes, MapQuestError> {
        debug!(?url, "GET");
        self.send(self.client.get(url).query(params)).await
    }

    /// POST `body` as JSON to `url` and return the body of a successful response
    pub(crate) async fn post_json<B>(
        &self,
        url: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<Bytes, MapQuestError>
    where
        B: serde::Serialize + Sync + ?Sized,
    {
        debug!(?url, "POST");
        self.send(self.client.post(url).query(params).json(body))
            .await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Bytes, MapQuestError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(response).await);
        }

        response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))
    }

    /// Turn a non-2xx response into a provider or transport error
    async fn status_error(&self, response: Response) -> MapQuestError {
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return self.transport_error(&e),
        };

        // MapQuest reports most failures inside a regular envelope
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&body) {
            if !envelope.info.is_success() {
                warn!(%status, code = envelope.info.statuscode, "MapQuest rejected request");
                return MapQuestError::Provider(envelope.info);
            }
        }

        warn!(%status, "MapQuest request failed");
        let text = String::from_utf8_lossy(&body);
        let text = text.trim();
        if text.is_empty() {
            MapQuestError::RequestFailed(format!("HTTP {status}"))
        } else {
            MapQuestError::RequestFailed(format!("HTTP {status}: {text}"))
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> MapQuestError {
        if e.is_timeout() {
            MapQuestError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            MapQuestError::ConnectionFailed(e.to_string())
        }
    }
}

/// `url` with the value of its `key` parameter masked, for logging
fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("key=") {
                "key=[REDACTED]"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{query}")
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    info: Info,
}

/// Decode a response and reject it if the provider reported an error
pub(crate) fn decode<T>(body: &[u8]) -> Result<T, MapQuestError>
where
    T: DeserializeOwned + ProviderResponse,
{
    let response: T = serde_json::from_slice(body)?;

    let info = response.info();
    if !info.is_success() {
        warn!(code = info.statuscode, "MapQuest returned an error status");
        return Err(MapQuestError::Provider(info.clone()));
    }

    Ok(response)
}

#[async_trait]
impl DirectionsClient for MapQuestClient {
    fn directions_url(&self, directions: &Directions, format: OutputFormat) -> String {
        directions.url(&self.config, format)
    }

    #[instrument(skip(self, directions), fields(from = %directions.from, stops = directions.to.len()))]
    async fn dump(
        &self,
        directions: &Directions,
        format: OutputFormat,
    ) -> Result<Bytes, MapQuestError> {
        directions.validate()?;

        let body = self
            .get_bytes(&self.directions_url(directions, format))
            .await?;

        debug!(size = body.len(), "Route payload received");
        Ok(body)
    }

    #[instrument(skip(self, directions), fields(from = %directions.from, stops = directions.to.len()))]
    async fn distance(
        &self,
        directions: &Directions,
        unit: DistanceUnit,
    ) -> Result<f64, MapQuestError> {
        directions.validate()?;

        let lookup = directions.for_distance(unit);
        let body = self
            .get_bytes(&self.directions_url(&lookup, OutputFormat::Json))
            .await?;
        let response: DistanceResponse = decode(&body)?;

        debug!(distance = response.route.distance, "Distance calculated");
        Ok(response.route.distance)
    }

    #[instrument(skip(self, directions), fields(from = %directions.from, stops = directions.to.len()))]
    async fn route(&self, directions: &Directions) -> Result<DirectionsResponse, MapQuestError> {
        directions.validate()?;

        let body = self
            .get_bytes(&self.directions_url(directions, OutputFormat::Json))
            .await?;
        let response: DirectionsResponse = decode(&body)?;

        debug!(
            legs = response.route.legs.len(),
            maneuvers = response.route.maneuver_count(),
            "Route calculated"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeocodingResponse;

    #[test]
    fn test_client_creation() {
        let client = MapQuestClient::new(&MapQuestConfig::for_testing());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = MapQuestConfig {
            batch_size: 0,
            ..MapQuestConfig::for_testing()
        };
        let err = MapQuestClient::new(&config).unwrap_err();
        assert!(matches!(err, MapQuestError::ConfigurationError(_)));
    }

    #[test]
    fn test_redact_hides_key() {
        let client = MapQuestClient::new(&MapQuestConfig::default()).unwrap();
        let url = Directions::new("A", ["B"]).url(client.config(), OutputFormat::Json);

        let redacted = redact(&url);
        assert!(redacted.contains("key=[REDACTED]&"));
        assert!(!redacted.contains("Fmjtd"));
    }

    #[test]
    fn test_redact_only_touches_key_param() {
        let config = MapQuestConfig::with_api_key("k");
        let url = Directions::new("kvp", ["k"]).url(&config, OutputFormat::Json);

        let redacted = redact(&url);
        assert!(redacted.contains("?key=[REDACTED]&inFormat=kvp&"));
        assert!(redacted.contains("&from=kvp&to=k&"));
        assert_eq!(redacted.matches("[REDACTED]").count(), 1);

        assert_eq!(redact("http://localhost/path"), "http://localhost/path");
    }

    #[test]
    fn test_directions_url_uses_config() {
        let mut config = MapQuestConfig::with_api_key("abc");
        config.base_url = "http://localhost:1234".to_string();
        let client = MapQuestClient::new(&config).unwrap();

        let url = client.directions_url(&Directions::new("A", ["B"]), OutputFormat::Xml);
        assert!(url.starts_with("http://localhost:1234/directions/v2/route?key=abc&"));
        assert!(url.contains("&outFormat=xml&"));
    }

    #[test]
    fn test_decode_provider_error() {
        let body = br#"{"info": {"statuscode": 400, "messages": ["Illegal argument from request: Insufficient info for location"]}, "results": []}"#;

        let err = decode::<GeocodingResponse>(body).unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(
            err.to_string(),
            "Error 400: Illegal argument from request: Insufficient info for location"
        );
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode::<GeocodingResponse>(b"<html>").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_success() {
        let response = decode::<GeocodingResponse>(br#"{"info": {"statuscode": 0}}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
