//! Directions data models
//!
//! Typed subset of the MapQuest `directions/v2/route` response: a route made
//! of legs, each leg made of maneuvers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Info, LatLng, Location, ProviderResponse};

/// Response of a directions call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsResponse {
    /// The computed route
    pub route: Route,
    /// Provider status
    pub info: Info,
}

impl ProviderResponse for DirectionsResponse {
    fn info(&self) -> &Info {
        &self.info
    }
}

/// Minimal envelope used when only the total distance is needed
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DistanceResponse {
    pub route: DistanceOnly,
    pub info: Info,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DistanceOnly {
    pub distance: f64,
}

impl ProviderResponse for DistanceResponse {
    fn info(&self) -> &Info {
        &self.info
    }
}

/// Upper-left / lower-right rectangle enclosing all route points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    /// Upper left corner
    pub ul: LatLng,
    /// Lower right corner
    pub lr: LatLng,
}

/// Error block the router attaches to a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteError {
    /// Router message
    pub message: String,
    /// Router error code
    pub error_code: i32,
}

/// How to get from one location to one or more others
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Route {
    /// At least one leg contains a toll road
    pub has_toll_road: bool,
    /// At least one leg contains a limited access highway
    pub has_highway: bool,
    /// At least one leg contains a seasonal closure
    pub has_seasonal_closure: bool,
    /// At least one leg contains an unpaved road
    pub has_unpaved: bool,
    /// At least one leg crosses a country border
    pub has_country_cross: bool,
    /// Rectangle of all points
    #[serde(alias = "BoundingBox")]
    pub bounding_box: BoundingBox,
    /// Elapsed time in seconds
    pub time: i64,
    /// Elapsed time as `HH:MM:SS`
    pub formatted_time: String,
    /// Time with traffic in seconds, `-1` when unavailable
    pub real_time: i64,
    /// Distance in the requested unit
    pub distance: f64,
    /// Estimated fuel used
    pub fuel_used: f64,
    /// One leg per consecutive pair of locations
    pub legs: Vec<Leg>,
    /// Router error report
    pub route_error: RouteError,
    /// Locations of the request, geocoded
    pub locations: Vec<Location>,
    /// Order in which the locations are visited
    pub location_sequence: Vec<i64>,
    /// Session identifier, reusable via `Directions::with_session_id`
    pub session_id: String,
}

impl Route {
    /// All maneuvers of all legs, in driving order
    pub fn maneuvers(&self) -> impl Iterator<Item = &Maneuver> {
        self.legs.iter().flat_map(|leg| leg.maneuvers.iter())
    }

    /// Total number of maneuvers across legs
    #[must_use]
    pub fn maneuver_count(&self) -> usize {
        self.legs.iter().map(|leg| leg.maneuvers.len()).sum()
    }
}

/// One origin-to-destination segment of a route
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Leg {
    /// Shape point index where this leg starts
    pub index: i64,
    /// At least one maneuver contains a toll road
    pub has_toll_road: bool,
    /// At least one maneuver contains a limited access highway
    pub has_highway: bool,
    /// At least one maneuver contains a seasonal closure
    pub has_seasonal_closure: bool,
    /// At least one maneuver contains an unpaved road
    pub has_unpaved: bool,
    /// At least one maneuver crosses a country border
    pub has_country_cross: bool,
    /// Elapsed time in seconds
    pub time: i64,
    /// Elapsed time as `HH:MM:SS`
    pub formatted_time: String,
    /// Distance in the requested unit
    pub distance: f64,
    /// Driving instructions
    pub maneuvers: Vec<Maneuver>,
    /// Road grade strategies applied per maneuver
    pub road_grade_strategy: Vec<Vec<i64>>,

    // Collapsed narrative for drivers familiar with the area.
    /// Index of the first non-collapsed maneuver, `-1` if not collapsed
    pub orig_index: i64,
    /// Rephrased narrative for `orig_index`
    pub orig_narrative: String,
    /// Index of the last non-collapsed maneuver, `-1` if not collapsed
    pub dest_index: i64,
    /// Rephrased narrative for the destination maneuver
    pub dest_narrative: String,
}

/// A single step of a route narrative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Maneuver {
    /// Position within the leg
    pub index: i64,
    /// Elapsed time in seconds
    pub time: i64,
    /// Elapsed time as `HH:MM:SS`
    pub formatted_time: String,
    /// Distance in the requested unit
    pub distance: f64,
    /// Road signs
    pub signs: Vec<Sign>,
    /// Static map of the maneuver, requires `man_maps`
    pub map_url: String,
    /// Textual instruction
    pub narrative: String,
    /// Compass direction code, see [`Maneuver::compass`]
    pub direction: i32,
    /// Compass direction as text
    pub direction_name: String,
    /// Street names the maneuver applies to
    pub streets: Vec<String>,
    /// Bit mask, see [`Maneuver::has_attribute`]
    pub attributes: u32,
    /// Turn type code, see [`Maneuver::turn`]
    pub turn_type: i32,
    /// First shape point of the maneuver
    pub start_point: LatLng,
    /// Turn icon
    pub icon_url: String,
    /// `AUTO`, `WALKING`, `BICYCLE`, ...
    pub transport_mode: String,
    /// Link ids of the roads travelled
    pub link_ids: Vec<u64>,
}

impl Maneuver {
    /// Decoded compass direction, `None` for unknown codes
    #[must_use]
    pub const fn compass(&self) -> Option<CompassDirection> {
        CompassDirection::from_code(self.direction)
    }

    /// Decoded turn type, `None` for unknown codes
    #[must_use]
    pub const fn turn(&self) -> Option<TurnType> {
        TurnType::from_code(self.turn_type)
    }

    /// Whether the attribute bit is set
    #[must_use]
    pub const fn has_attribute(&self, attribute: ManeuverAttribute) -> bool {
        self.attributes & attribute.bit() != 0
    }
}

/// Road sign attached to a maneuver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sign {
    /// Sign text, e.g. a road number
    pub text: String,
    /// Additional text
    pub extra_text: String,
    /// Compass direction code
    pub direction: i32,
    /// Road shield type
    #[serde(rename = "type")]
    pub sign_type: i32,
    /// Shield image
    pub url: String,
}

/// Compass direction of a maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    /// No direction
    None,
    /// North
    North,
    /// Northwest
    Northwest,
    /// Northeast
    Northeast,
    /// South
    South,
    /// Southeast
    Southeast,
    /// Southwest
    Southwest,
    /// West
    West,
    /// East
    East,
}

impl CompassDirection {
    /// Map a provider code to a direction
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::None,
            1 => Self::North,
            2 => Self::Northwest,
            3 => Self::Northeast,
            4 => Self::South,
            5 => Self::Southeast,
            6 => Self::Southwest,
            7 => Self::West,
            8 => Self::East,
            _ => return None,
        })
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::North => "north",
            Self::Northwest => "northwest",
            Self::Northeast => "northeast",
            Self::South => "south",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Turn type of a maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnType {
    /// Straight
    Straight,
    /// Slight right
    SlightRight,
    /// Right
    Right,
    /// Sharp right
    SharpRight,
    /// Reverse
    Reverse,
    /// Sharp left
    SharpLeft,
    /// Left
    Left,
    /// Slight left
    SlightLeft,
    /// Right U-turn
    RightUTurn,
    /// Left U-turn
    LeftUTurn,
    /// Right merge
    RightMerge,
    /// Left merge
    LeftMerge,
    /// Right on ramp
    RightOnRamp,
    /// Left on ramp
    LeftOnRamp,
    /// Right off ramp
    RightOffRamp,
    /// Left off ramp
    LeftOffRamp,
    /// Right fork
    RightFork,
    /// Left fork
    LeftFork,
    /// Straight fork
    StraightFork,
}

impl TurnType {
    /// Map a provider code to a turn type
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Straight,
            1 => Self::SlightRight,
            2 => Self::Right,
            3 => Self::SharpRight,
            4 => Self::Reverse,
            5 => Self::SharpLeft,
            6 => Self::Left,
            7 => Self::SlightLeft,
            8 => Self::RightUTurn,
            9 => Self::LeftUTurn,
            10 => Self::RightMerge,
            11 => Self::LeftMerge,
            12 => Self::RightOnRamp,
            13 => Self::LeftOnRamp,
            14 => Self::RightOffRamp,
            15 => Self::LeftOffRamp,
            16 => Self::RightFork,
            17 => Self::LeftFork,
            18 => Self::StraightFork,
            _ => return None,
        })
    }
}

/// Flags carried in [`Maneuver::attributes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverAttribute {
    /// Portions toll
    Toll,
    /// Portions unpaved
    Unpaved,
    /// Possible seasonal road closure
    SeasonalClosure,
    /// Gate
    Gate,
    /// Ferry
    Ferry,
    /// Avoided link id
    AvoidId,
    /// Country crossing
    CountryCrossing,
    /// Limited access (highway)
    LimitedAccess,
}

impl ManeuverAttribute {
    /// Bit of this attribute in the mask
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Toll => 1,
            Self::Unpaved => 2,
            Self::SeasonalClosure => 4,
            Self::Gate => 8,
            Self::Ferry => 16,
            Self::AvoidId => 32,
            Self::CountryCrossing => 64,
            Self::LimitedAccess => 128,
        }
    }
}
