#![forbid(unsafe_code)]
//! MapQuest integration
//!
//! Forward, reverse and batch geocoding plus turn-by-turn directions via the
//! [MapQuest](https://developer.mapquest.com) web services. All computation
//! happens on the MapQuest side; this crate builds requests, performs one
//! HTTP round trip per call and decodes the answer into typed results.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`GeocodingClient`] and
//! [`DirectionsClient`] define the operations, both implemented by
//! [`MapQuestClient`]. Requests for directions are described by
//! [`Directions`], which carries MapQuest's defaults and serializes to a
//! deterministic URL. Failures are reported as [`MapQuestError`], keeping
//! transport, decode and provider errors apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_mapquest::{
//!     Directions, DirectionsClient, DistanceUnit, GeocodingClient, MapQuestClient,
//!     MapQuestConfig,
//! };
//!
//! let config = MapQuestConfig::load()?;
//! let client = MapQuestClient::new(&config)?;
//!
//! let seattle = client.geocode("Seattle WA").await?;
//!
//! let trip = Directions::new("Amsterdam,Netherlands", ["Antwerp,Belgium"]);
//! let km = client.distance(&trip, DistanceUnit::Kilometers).await?;
//! let route = client.route(&trip).await?.route;
//! for maneuver in route.maneuvers() {
//!     println!("{}", maneuver.narrative);
//! }
//! ```

mod client;
mod config;
mod directions;
mod error;
mod geocoding;
mod models;
mod route;
mod urlencoding;

pub use client::{DirectionsClient, MapQuestClient};
pub use config::{BATCH_LIMIT, MapQuestConfig};
pub use directions::{
    Directions, DistanceUnit, DrivingStyle, NarrativeType, OutputFormat, ROUTE_PATH,
    RoadGradeStrategy, RouteAvoid, RouteType,
};
pub use error::MapQuestError;
pub use geocoding::{GeocodingClient, batch_ranges};
pub use models::{
    Copyright, GeocodingOptions, GeocodingResponse, GeocodingResult, Info, LatLng, Location,
    ProvidedLocation,
};
pub use route::{
    BoundingBox, CompassDirection, DirectionsResponse, Leg, Maneuver, ManeuverAttribute,
    Route, RouteError, Sign, TurnType,
};
