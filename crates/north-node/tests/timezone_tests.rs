use north_node::ephemeris::GeoLocation;
use north_node::time::{
    to_ut, CivilDateTime, ResolutionSource, RuleSet, TimezoneResolution, TimezoneResolver,
};
use north_node::NodeError;

const HARTFORD: GeoLocation = GeoLocation { lat: 41.7759301, lon: -72.5215008 };

fn civil(y: i32, m: u32, d: u32, h: f64) -> CivilDateTime {
    CivilDateTime::new(y, m, d, h).unwrap()
}

fn fixed(offset: f64) -> TimezoneResolution {
    TimezoneResolution {
        identifier: "FIXED".to_string(),
        utc_offset_hours: offset,
        is_dst: false,
        source: ResolutionSource::Explicit,
    }
}

#[test]
fn test_eastern_2023_second_sunday_of_march() {
    for use_database in [false, true] {
        let resolver = TimezoneResolver::new(use_database);
        let on = resolver.resolve(&HARTFORD, &civil(2023, 3, 12, 12.0), None).unwrap();
        let before = resolver.resolve(&HARTFORD, &civil(2023, 3, 11, 12.0), None).unwrap();
        assert!(on.is_dst, "database: {use_database}");
        assert!(!before.is_dst, "database: {use_database}");
    }
}

#[test]
fn test_rule_table_transition_days() {
    let date = |m, d| chrono::NaiveDate::from_ymd_opt(2023, m, d).unwrap();
    assert!(RuleSet::UnitedStates.is_dst(date(3, 12)));
    assert!(!RuleSet::UnitedStates.is_dst(date(3, 11)));
    assert!(!RuleSet::UnitedStates.is_dst(date(11, 5)));
}

#[test]
fn test_explicit_offset_ignores_coordinates() {
    let resolver = TimezoneResolver::default();
    let places = [
        HARTFORD,
        GeoLocation { lat: 51.5, lon: -0.1 },
        GeoLocation { lat: -33.9, lon: 151.2 },
        GeoLocation { lat: 0.0, lon: 0.0 },
    ];
    for place in places {
        for when in [civil(1960, 1, 1, 0.0), civil(2023, 7, 1, 12.0), civil(2023, 3, 12, 2.5)] {
            let res = resolver.resolve(&place, &when, Some("UTC+5:30")).unwrap();
            assert_eq!(res.utc_offset_hours, 5.5);
            assert_eq!(res.source, ResolutionSource::Explicit);
            assert!(!res.is_dst);
        }
    }
}

#[test]
fn test_unparseable_offset_never_defaults_to_utc() {
    let err = TimezoneResolver::default()
        .resolve(&HARTFORD, &civil(2023, 7, 1, 12.0), Some("Eastern"))
        .unwrap_err();
    assert!(matches!(err, NodeError::TimezoneParse { .. }));
    assert_eq!(err.kind(), "TimezoneParseError");
    assert!(err.is_client_error());
}

#[test]
fn test_european_zone_uses_european_rules() {
    let london = GeoLocation { lat: 51.5074, lon: -0.1278 };
    let resolver = TimezoneResolver::new(false);
    // 2023: last Sunday of March is the 26th, last Sunday of October the 29th
    assert!(!resolver.resolve(&london, &civil(2023, 3, 25, 12.0), None).unwrap().is_dst);
    let summer = resolver.resolve(&london, &civil(2023, 3, 26, 12.0), None).unwrap();
    assert!(summer.is_dst);
    assert_eq!(summer.utc_offset_hours, 1.0);
    // 1990 ended in September
    assert!(!resolver.resolve(&london, &civil(1990, 10, 10, 12.0), None).unwrap().is_dst);
}

#[test]
fn test_ut_examples() {
    let ut = to_ut(&civil(2023, 1, 1, 2.0), &fixed(5.0));
    assert_eq!((ut.year(), ut.month(), ut.day(), ut.hour()), (2022, 12, 31, 21.0));

    let ut = to_ut(&civil(2023, 12, 31, 22.0), &fixed(-5.0));
    assert_eq!((ut.year(), ut.month(), ut.day(), ut.hour()), (2024, 1, 1, 3.0));
}

#[test]
fn test_ut_round_trip_over_the_whole_day() {
    let offsets = [-12.0, -9.5, -5.0, -3.5, 0.0, 1.0, 5.0, 5.5, 9.0, 14.0];
    let dates = [(2023, 1, 1), (2024, 2, 29), (2023, 12, 31), (1971, 4, 18)];
    for (y, m, d) in dates {
        for step in 0..96 {
            let hour = step as f64 * 0.25;
            let original = civil(y, m, d, hour);
            for offset in offsets {
                let ut = to_ut(&original, &fixed(offset));
                assert!((0.0..24.0).contains(&ut.hour()));
                let back = ut.to_local(offset);
                assert_eq!((back.year(), back.month(), back.day()), (y, m, d), "{original:?} @ {offset}");
                assert!((back.hour() - hour).abs() < 1e-9, "{original:?} @ {offset}");
            }
        }
    }
}
