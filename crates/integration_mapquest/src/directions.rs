//! Directions request builder
//!
//! [`Directions`] holds every routing option MapQuest understands, filled
//! with the provider's defaults, and serializes itself into a
//! `directions/v2/route` URL. Serialization is deterministic: the same
//! request always yields the same bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MapQuestConfig;
use crate::error::MapQuestError;
use crate::urlencoding;

/// Path of the route endpoint below the base URL
pub const ROUTE_PATH: &str = "directions/v2/route";

macro_rules! provider_code {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            /// Value as sent to MapQuest
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MapQuestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok(Self::$variant), )+
                    _ => Err(MapQuestError::InvalidRequest(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        s
                    ))),
                }
            }
        }
    };
}

provider_code! {
    /// Response format of the route endpoint
    OutputFormat {
        /// JSON
        Json => "json",
        /// XML
        Xml => "xml",
    }
}

provider_code! {
    /// Unit of all distances in the response
    DistanceUnit {
        /// Miles
        Miles => "m",
        /// Kilometers
        Kilometers => "k",
    }
}

provider_code! {
    /// Routing strategy
    RouteType {
        /// Quickest drive time
        Fastest => "fastest",
        /// Shortest driving distance
        Shortest => "shortest",
        /// Walking only
        Pedestrian => "pedestrian",
        /// Walking plus mass transit
        Multimodal => "multimodal",
        /// Bicycle
        Bicycle => "bicycle",
    }
}

provider_code! {
    /// Format of maneuver narratives
    NarrativeType {
        /// No narrative
        None => "none",
        /// Plain text
        Text => "text",
        /// HTML
        Html => "html",
        /// HTML with microformat tags
        Microformat => "microformat",
    }
}

provider_code! {
    /// Road features to avoid
    RouteAvoid {
        /// Highways
        LimitedAccess => "Limited Access",
        /// Toll roads
        TollRoad => "Toll Road",
        /// Ferries
        Ferry => "Ferry",
        /// Unpaved roads
        Unpaved => "Unpaved",
        /// Roads with seasonal closures
        SeasonalClosure => "Seasonal Closure",
        /// Border crossings
        CountryCrossing => "Country Crossing",
    }
}

provider_code! {
    /// Hill preference for bicycle and pedestrian routes
    RoadGradeStrategy {
        /// No preference
        DefaultStrategy => "DEFAULT_STRATEGY",
        /// Avoid uphill
        AvoidUpHill => "AVOID_UP_HILL",
        /// Avoid downhill
        AvoidDownHill => "AVOID_DOWN_HILL",
        /// Avoid all hills
        AvoidAllHills => "AVOID_ALL_HILLS",
        /// Favor uphill
        FavorUpHill => "FAVOR_UP_HILL",
        /// Favor downhill
        FavorDownHill => "FAVOR_DOWN_HILL",
        /// Favor all hills
        FavorAllHills => "FAVOR_ALL_HILLS",
    }
}

provider_code! {
    /// Driving style used for fuel estimates
    DrivingStyle {
        /// Cautious
        Cautious => "cautious",
        /// Normal
        Normal => "normal",
        /// Aggressive
        Aggressive => "aggressive",
    }
}

/// A directions request from one location to one or more others
///
/// Defaults match MapQuest's own defaults. The value is never modified by
/// the client, so one request can be sent any number of times.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directions {
    /// Starting location
    pub from: String,
    /// Destinations in visiting order, at least one
    pub to: Vec<String>,
    /// Unit of distances (default miles)
    pub unit: DistanceUnit,
    /// Routing strategy (default fastest)
    pub route_type: RouteType,
    /// Reverse geocode lat/lng input too (default true)
    pub do_reverse_geocode: bool,
    /// Narrative format (default text)
    pub narrative_type: NarrativeType,
    /// Add intersection advice to the narrative (default false)
    pub enhanced_narrative: bool,
    /// Link ids returned per maneuver (default 0)
    pub max_link_id: u32,
    /// Narrative locale, e.g. `en_US`, `de_DE`, `fr_CA`
    pub locale: String,
    /// Road features to avoid
    pub avoids: Vec<RouteAvoid>,
    /// Link ids to avoid at all cost; can make routing fail
    pub must_avoid_link_ids: Vec<u64>,
    /// Link ids to avoid if possible
    pub try_avoid_link_ids: Vec<u64>,
    /// Show state boundary crossings in the narrative (default true)
    pub state_boundary_display: bool,
    /// Show country boundary crossings in the narrative (default true)
    pub country_boundary_display: bool,
    /// Show the final "End at" maneuver (default true)
    pub destination_maneuver_display: bool,
    /// Return the route shape without a map state (default false)
    pub full_shape: bool,
    /// Below 1 favors roads without bike lanes, 0.1 to 100 (default 1)
    pub cycling_road_factor: f64,
    /// Hill preference
    pub road_grade_strategy: RoadGradeStrategy,
    /// Driving style (default normal)
    pub driving_style: DrivingStyle,
    /// Fuel efficiency in miles per gallon, 0 to 235 (default 22)
    pub highway_efficiency: f64,
    /// Static map per maneuver (default true)
    pub man_maps: bool,
    /// Walking speed in miles per hour regardless of `unit`; provider
    /// default (2.5) when `None`
    pub walking_speed: Option<f64>,
    /// Session to reuse, empty for a new one
    pub session_id: String,
}

impl Default for Directions {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: Vec::new(),
            unit: DistanceUnit::Miles,
            route_type: RouteType::Fastest,
            do_reverse_geocode: true,
            narrative_type: NarrativeType::Text,
            enhanced_narrative: false,
            max_link_id: 0,
            locale: "en_US".to_string(),
            avoids: Vec::new(),
            must_avoid_link_ids: Vec::new(),
            try_avoid_link_ids: Vec::new(),
            state_boundary_display: true,
            country_boundary_display: true,
            destination_maneuver_display: true,
            full_shape: false,
            cycling_road_factor: 1.0,
            road_grade_strategy: RoadGradeStrategy::DefaultStrategy,
            driving_style: DrivingStyle::Normal,
            highway_efficiency: 22.0,
            man_maps: true,
            walking_speed: None,
            session_id: String::new(),
        }
    }
}

impl Directions {
    /// Create a request with MapQuest defaults
    #[must_use]
    pub fn new<I, S>(from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the distance unit
    #[must_use]
    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the routing strategy
    #[must_use]
    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = route_type;
        self
    }

    /// Set the narrative format
    #[must_use]
    pub fn with_narrative_type(mut self, narrative_type: NarrativeType) -> Self {
        self.narrative_type = narrative_type;
        self
    }

    /// Set the narrative locale
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Add a road feature to avoid
    #[must_use]
    pub fn avoid(mut self, feature: RouteAvoid) -> Self {
        if !self.avoids.contains(&feature) {
            self.avoids.push(feature);
        }
        self
    }

    /// Set the walking speed in miles per hour
    #[must_use]
    pub fn with_walking_speed(mut self, mph: f64) -> Self {
        self.walking_speed = Some(mph);
        self
    }

    /// Reuse a provider session, see [`Route::session_id`](crate::Route::session_id)
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Disable per-maneuver static maps
    #[must_use]
    pub fn without_maps(mut self) -> Self {
        self.man_maps = false;
        self
    }

    /// Copy trimmed down to what a distance lookup needs
    #[must_use]
    pub fn for_distance(&self, unit: DistanceUnit) -> Self {
        Self {
            unit,
            narrative_type: NarrativeType::None,
            man_maps: false,
            ..self.clone()
        }
    }

    /// Check that the request can be routed at all
    ///
    /// # Errors
    ///
    /// Returns an error if the origin or every destination is missing, or if
    /// a numeric option is not a finite number.
    pub fn validate(&self) -> Result<(), MapQuestError> {
        if self.from.trim().is_empty() {
            return Err(MapQuestError::InvalidRequest(
                "origin must not be empty".to_string(),
            ));
        }

        if self.to.is_empty() {
            return Err(MapQuestError::InvalidRequest(
                "at least one destination is required".to_string(),
            ));
        }

        if self.to.iter().any(|to| to.trim().is_empty()) {
            return Err(MapQuestError::InvalidRequest(
                "destinations must not be empty".to_string(),
            ));
        }

        let numbers = [
            ("cycling_road_factor", Some(self.cycling_road_factor)),
            ("highway_efficiency", Some(self.highway_efficiency)),
            ("walking_speed", self.walking_speed),
        ];
        for (name, value) in numbers {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(MapQuestError::InvalidRequest(format!(
                    "{name} must be a finite number"
                )));
            }
        }

        Ok(())
    }

    /// Query parameters in wire order, values already percent-encoded
    ///
    /// Parameters whose value means "use the provider default" (empty lists,
    /// empty locale, no walking speed, no session) are left out.
    #[must_use]
    pub fn query_pairs(&self, api_key: &str, format: OutputFormat) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![
            ("key", urlencoding::encode(api_key)),
            ("inFormat", "kvp".to_string()),
            ("outFormat", format.as_str().to_string()),
            ("from", urlencoding::encode(&self.from)),
        ];

        for to in &self.to {
            params.push(("to", urlencoding::encode(to)));
        }

        params.extend([
            ("unit", self.unit.as_str().to_string()),
            ("routeType", self.route_type.as_str().to_string()),
            ("doReverseGeocode", self.do_reverse_geocode.to_string()),
            ("narrativeType", self.narrative_type.as_str().to_string()),
            ("enhancedNarrative", self.enhanced_narrative.to_string()),
            ("maxLinkId", self.max_link_id.to_string()),
        ]);

        if !self.locale.is_empty() {
            params.push(("locale", urlencoding::encode(&self.locale)));
        }

        if !self.avoids.is_empty() {
            params.push((
                "avoids",
                urlencoding::encode_list(self.avoids.iter().map(|a| a.as_str())),
            ));
        }

        if !self.must_avoid_link_ids.is_empty() {
            params.push(("mustAvoidLinkIds", join_ids(&self.must_avoid_link_ids)));
        }

        if !self.try_avoid_link_ids.is_empty() {
            params.push(("tryAvoidLinkIds", join_ids(&self.try_avoid_link_ids)));
        }

        params.extend([
            ("stateBoundaryDisplay", self.state_boundary_display.to_string()),
            ("countryBoundaryDisplay", self.country_boundary_display.to_string()),
            (
                "destinationManeuverDisplay",
                self.destination_maneuver_display.to_string(),
            ),
            ("fullShape", self.full_shape.to_string()),
            ("cyclingRoadFactor", self.cycling_road_factor.to_string()),
            ("roadGradeStrategy", self.road_grade_strategy.as_str().to_string()),
            ("drivingStyle", self.driving_style.as_str().to_string()),
            ("highwayEfficiency", self.highway_efficiency.to_string()),
            ("manMaps", self.man_maps.to_string()),
        ]);

        if let Some(speed) = self.walking_speed {
            params.push(("walkingSpeed", speed.to_string()));
        }

        if !self.session_id.is_empty() {
            params.push(("sessionId", urlencoding::encode(&self.session_id)));
        }

        params
    }

    /// Fully qualified route URL for this request
    #[must_use]
    pub fn url(&self, config: &MapQuestConfig, format: OutputFormat) -> String {
        let query = self
            .query_pairs(config.api_key_str(), format)
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{query}", config.endpoint(ROUTE_PATH))
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
