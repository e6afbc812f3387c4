//! Property-based tests for request building and batch chunking

use integration_mapquest::{
    Directions, DistanceUnit, DrivingStyle, MapQuestConfig, NarrativeType, OutputFormat,
    RoadGradeStrategy, RouteAvoid, RouteType, batch_ranges,
};
use proptest::prelude::*;
use proptest::sample::subsequence;
use url::Url;

// ============================================================================
// Strategies
// ============================================================================

fn distance_unit() -> impl Strategy<Value = DistanceUnit> {
    prop_oneof![Just(DistanceUnit::Miles), Just(DistanceUnit::Kilometers)]
}

fn route_type() -> impl Strategy<Value = RouteType> {
    prop_oneof![
        Just(RouteType::Fastest),
        Just(RouteType::Shortest),
        Just(RouteType::Pedestrian),
        Just(RouteType::Multimodal),
        Just(RouteType::Bicycle),
    ]
}

fn narrative_type() -> impl Strategy<Value = NarrativeType> {
    prop_oneof![
        Just(NarrativeType::None),
        Just(NarrativeType::Text),
        Just(NarrativeType::Html),
        Just(NarrativeType::Microformat),
    ]
}

fn road_grade_strategy() -> impl Strategy<Value = RoadGradeStrategy> {
    prop_oneof![
        Just(RoadGradeStrategy::DefaultStrategy),
        Just(RoadGradeStrategy::AvoidUpHill),
        Just(RoadGradeStrategy::AvoidDownHill),
        Just(RoadGradeStrategy::AvoidAllHills),
        Just(RoadGradeStrategy::FavorUpHill),
        Just(RoadGradeStrategy::FavorDownHill),
        Just(RoadGradeStrategy::FavorAllHills),
    ]
}

fn driving_style() -> impl Strategy<Value = DrivingStyle> {
    prop_oneof![
        Just(DrivingStyle::Cautious),
        Just(DrivingStyle::Normal),
        Just(DrivingStyle::Aggressive),
    ]
}

fn avoids() -> impl Strategy<Value = Vec<RouteAvoid>> {
    subsequence(
        vec![
            RouteAvoid::LimitedAccess,
            RouteAvoid::TollRoad,
            RouteAvoid::Ferry,
            RouteAvoid::Unpaved,
            RouteAvoid::SeasonalClosure,
            RouteAvoid::CountryCrossing,
        ],
        0..=6,
    )
}

prop_compose! {
    fn directions()(
        from in "\\PC{1,24}",
        to in prop::collection::vec("\\PC{1,24}", 1..4),
        unit in distance_unit(),
        route_type in route_type(),
        narrative_type in narrative_type(),
        locale in prop_oneof![Just("en_US"), Just("de_DE"), Just("fr_CA")],
        avoids in avoids(),
        must_avoid_link_ids in prop::collection::vec(any::<u64>(), 0..4),
        try_avoid_link_ids in prop::collection::vec(any::<u64>(), 0..4),
        road_grade_strategy in road_grade_strategy(),
        driving_style in driving_style(),
        flags in any::<[bool; 7]>(),
        cycling_road_factor in 0.1f64..100.0,
        highway_efficiency in 0.0f64..235.0,
        max_link_id in 0u32..1000,
        walking_speed in prop::option::of(0.5f64..10.0),
        session_id in "[A-Za-z0-9 -]{0,16}",
    ) -> Directions {
        Directions {
            from,
            to,
            unit,
            route_type,
            do_reverse_geocode: flags[0],
            narrative_type,
            enhanced_narrative: flags[1],
            max_link_id,
            locale: locale.to_string(),
            avoids,
            must_avoid_link_ids,
            try_avoid_link_ids,
            state_boundary_display: flags[2],
            country_boundary_display: flags[3],
            destination_maneuver_display: flags[4],
            full_shape: flags[5],
            cycling_road_factor,
            road_grade_strategy,
            driving_style,
            highway_efficiency,
            man_maps: flags[6],
            walking_speed,
            session_id,
        }
    }
}

fn values<'a>(pairs: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .collect()
}

fn single<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    match values(pairs, name).as_slice() {
        [value] => Some(*value),
        _ => None,
    }
}

fn split_ids(value: Option<&str>) -> Vec<u64> {
    value
        .map(|v| v.split(',').map(|id| id.parse().unwrap()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Directions URL Property Tests
// ============================================================================

mod directions_url_tests {
    use super::*;

    proptest! {
        #[test]
        fn url_round_trips_field_values(
            directions in directions(),
            key in "[ -~]{1,32}",
        ) {
            let config = MapQuestConfig::with_api_key(key.clone());
            let url = Url::parse(&directions.url(&config, OutputFormat::Json)).unwrap();
            prop_assert_eq!(url.path(), "/directions/v2/route");

            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

            prop_assert_eq!(single(&pairs, "key"), Some(key.as_str()));
            prop_assert_eq!(single(&pairs, "from"), Some(directions.from.as_str()));
            prop_assert_eq!(values(&pairs, "to"), directions.to.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(single(&pairs, "unit"), Some(directions.unit.as_str()));
            prop_assert_eq!(single(&pairs, "routeType"), Some(directions.route_type.as_str()));
            prop_assert_eq!(single(&pairs, "narrativeType"), Some(directions.narrative_type.as_str()));
            prop_assert_eq!(single(&pairs, "locale"), Some(directions.locale.as_str()));
            prop_assert_eq!(single(&pairs, "maxLinkId").map(str::parse::<u32>), Some(Ok(directions.max_link_id)));
            prop_assert_eq!(single(&pairs, "manMaps"), Some(if directions.man_maps { "true" } else { "false" }));
            prop_assert_eq!(single(&pairs, "drivingStyle"), Some(directions.driving_style.as_str()));
            prop_assert_eq!(single(&pairs, "roadGradeStrategy"), Some(directions.road_grade_strategy.as_str()));

            let cycling: f64 = single(&pairs, "cyclingRoadFactor").unwrap().parse().unwrap();
            prop_assert_eq!(cycling.to_bits(), directions.cycling_road_factor.to_bits());
            let efficiency: f64 = single(&pairs, "highwayEfficiency").unwrap().parse().unwrap();
            prop_assert_eq!(efficiency.to_bits(), directions.highway_efficiency.to_bits());

            let walking = single(&pairs, "walkingSpeed").map(|v| v.parse::<f64>().unwrap());
            prop_assert_eq!(walking.map(f64::to_bits), directions.walking_speed.map(f64::to_bits));

            let avoided: Vec<RouteAvoid> = single(&pairs, "avoids")
                .map(|v| v.split(',').map(|a| a.parse().unwrap()).collect())
                .unwrap_or_default();
            prop_assert_eq!(avoided, directions.avoids.clone());

            prop_assert_eq!(split_ids(single(&pairs, "mustAvoidLinkIds")), directions.must_avoid_link_ids.clone());
            prop_assert_eq!(split_ids(single(&pairs, "tryAvoidLinkIds")), directions.try_avoid_link_ids.clone());

            let session = single(&pairs, "sessionId").unwrap_or_default();
            prop_assert_eq!(session, directions.session_id.as_str());
        }

        #[test]
        fn url_is_deterministic(directions in directions()) {
            let config = MapQuestConfig::default();
            let copy = directions.clone();
            prop_assert_eq!(
                directions.url(&config, OutputFormat::Xml),
                copy.url(&config, OutputFormat::Xml)
            );
        }

        #[test]
        fn query_uses_only_safe_characters(directions in directions()) {
            let url = directions.url(&MapQuestConfig::default(), OutputFormat::Json);
            let (_, query) = url.split_once('?').unwrap();

            prop_assert!(
                query.chars().all(|c| c.is_ascii_alphanumeric() || "-_.~+%=&,".contains(c)),
                "unexpected character in {}", query
            );
        }

        #[test]
        fn distance_lookup_keeps_route_fields(
            directions in directions(),
            unit in distance_unit(),
        ) {
            let lookup = directions.for_distance(unit);

            prop_assert_eq!(lookup.unit, unit);
            prop_assert_eq!(lookup.narrative_type, NarrativeType::None);
            prop_assert!(!lookup.man_maps);
            prop_assert_eq!(&lookup.from, &directions.from);
            prop_assert_eq!(&lookup.to, &directions.to);
            prop_assert_eq!(&lookup.avoids, &directions.avoids);
        }
    }
}

// ============================================================================
// Batch Chunking Property Tests
// ============================================================================

mod batch_chunking_tests {
    use super::*;

    proptest! {
        #[test]
        fn chunks_cover_input_in_order(len in 0usize..=1000, size in 1usize..=100) {
            let ranges: Vec<_> = batch_ranges(len, size).collect();

            prop_assert_eq!(ranges.len(), len.div_ceil(size));

            let covered: Vec<usize> = ranges.iter().cloned().flatten().collect();
            prop_assert_eq!(covered, (0..len).collect::<Vec<_>>());

            for range in &ranges {
                prop_assert!(!range.is_empty());
                prop_assert!(range.len() <= size);
            }
        }
    }
}
