//! Resolution of a civil time and place to a UTC offset.
//!
//! Precedence, first match wins:
//! 1. an explicit offset supplied by the caller;
//! 2. the IANA zone database (`chrono-tz`), when enabled;
//! 3. the built-in rule table in [`crate::time::rules`].

use crate::ephemeris::GeoLocation;
use crate::error::NodeError;
use crate::time::civil::CivilDateTime;
use crate::time::offset::parse_explicit_offset;
use crate::time::zones::{zone_for, ZoneInfo};
use chrono::{Duration, LocalResult, Offset, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};

/// Which step of the precedence chain produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Explicit,
    ZoneDatabase,
    RuleTable,
    /// The local time does not exist in the zone; standard time was used
    StandardFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneResolution {
    pub identifier: String,
    /// Hours added to UTC to get local time
    pub utc_offset_hours: f64,
    pub is_dst: bool,
    pub source: ResolutionSource,
}

#[derive(Debug, Clone)]
pub struct TimezoneResolver {
    use_zone_database: bool,
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self { use_zone_database: true }
    }
}

impl TimezoneResolver {
    pub fn new(use_zone_database: bool) -> Self {
        Self { use_zone_database }
    }

    pub fn resolve(
        &self,
        location: &GeoLocation,
        civil: &CivilDateTime,
        explicit: Option<&str>,
    ) -> Result<TimezoneResolution, NodeError> {
        if let Some(text) = explicit.filter(|t| !t.trim().is_empty()) {
            let parsed = parse_explicit_offset(text)?;
            log::debug!("explicit offset {:?} -> {:+}h", text, parsed.hours);
            return Ok(TimezoneResolution {
                identifier: parsed.identifier,
                utc_offset_hours: parsed.hours,
                is_dst: false,
                source: ResolutionSource::Explicit,
            });
        }

        let zone = zone_for(location);
        let from_rules = resolve_with_rules(zone, civil);

        if self.use_zone_database {
            if let Some(from_database) = resolve_with_database(zone, civil) {
                if from_database.source == ResolutionSource::ZoneDatabase
                    && (from_database.utc_offset_hours != from_rules.utc_offset_hours
                        || from_database.is_dst != from_rules.is_dst)
                {
                    log::debug!(
                        "{}: zone database gives {:+}h (dst {}), rule table {:+}h (dst {}); using database",
                        zone.identifier,
                        from_database.utc_offset_hours,
                        from_database.is_dst,
                        from_rules.utc_offset_hours,
                        from_rules.is_dst
                    );
                }
                return Ok(from_database);
            }
            log::debug!("{} unknown to the zone database; using rule table", zone.identifier);
        }

        Ok(from_rules)
    }
}

/// Rule-table resolution: standard offset plus one hour inside the DST window
pub fn resolve_with_rules(zone: &ZoneInfo, civil: &CivilDateTime) -> TimezoneResolution {
    let is_dst = zone.rules.is_dst(civil.date());
    TimezoneResolution {
        identifier: zone.identifier.to_string(),
        utc_offset_hours: zone.standard_offset_hours + if is_dst { 1.0 } else { 0.0 },
        is_dst,
        source: ResolutionSource::RuleTable,
    }
}

/// Zone-database resolution. `None` when the identifier is not in the database.
pub fn resolve_with_database(zone: &ZoneInfo, civil: &CivilDateTime) -> Option<TimezoneResolution> {
    let tz: Tz = zone.identifier.parse().ok()?;
    let naive = civil.naive();

    let resolution = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => TimezoneResolution {
            identifier: zone.identifier.to_string(),
            utc_offset_hours: hours(dt.offset().fix().local_minus_utc()),
            is_dst: dt.offset().dst_offset() != Duration::zero(),
            source: ResolutionSource::ZoneDatabase,
        },
        // Repeated hour: take the first occurrence, still on the old offset
        LocalResult::Ambiguous(earliest, _) => TimezoneResolution {
            identifier: zone.identifier.to_string(),
            utc_offset_hours: hours(earliest.offset().fix().local_minus_utc()),
            is_dst: earliest.offset().dst_offset() != Duration::zero(),
            source: ResolutionSource::ZoneDatabase,
        },
        // Skipped hour: reading the wall clock in standard time lands on the
        // first valid instant after the gap
        LocalResult::None => {
            let standard = tz.offset_from_utc_datetime(&naive).base_utc_offset();
            log::warn!(
                "{} has no local time {}; using standard offset {:+}h",
                zone.identifier,
                naive,
                standard.num_seconds() as f64 / 3600.0
            );
            TimezoneResolution {
                identifier: zone.identifier.to_string(),
                utc_offset_hours: standard.num_seconds() as f64 / 3600.0,
                is_dst: false,
                source: ResolutionSource::StandardFallback,
            }
        }
    };
    Some(resolution)
}

fn hours(seconds: i32) -> f64 {
    seconds as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARTFORD: GeoLocation = GeoLocation { lat: 41.7759301, lon: -72.5215008 };

    fn civil(y: i32, m: u32, d: u32, h: f64) -> CivilDateTime {
        CivilDateTime::new(y, m, d, h).unwrap()
    }

    #[test]
    fn test_explicit_offset_wins() {
        let resolver = TimezoneResolver::default();
        // A +9 offset makes no sense for Connecticut; it must be used anyway.
        let res = resolver.resolve(&HARTFORD, &civil(2023, 7, 1, 12.0), Some("JST+9")).unwrap();
        assert_eq!(res.utc_offset_hours, 9.0);
        assert_eq!(res.identifier, "JST");
        assert!(!res.is_dst);
        assert_eq!(res.source, ResolutionSource::Explicit);
    }

    #[test]
    fn test_blank_explicit_offset_is_absent() {
        let res = TimezoneResolver::default()
            .resolve(&HARTFORD, &civil(2023, 1, 10, 12.0), Some("  "))
            .unwrap();
        assert_eq!(res.identifier, "America/New_York");
    }

    #[test]
    fn test_bad_explicit_offset_is_fatal() {
        let err = TimezoneResolver::default()
            .resolve(&HARTFORD, &civil(2023, 7, 1, 12.0), Some("GMT plus five"))
            .unwrap_err();
        assert!(matches!(err, NodeError::TimezoneParse { .. }));
    }

    #[test]
    fn test_rule_table_1971_before_last_sunday_of_april() {
        let res = TimezoneResolver::new(false).resolve(&HARTFORD, &civil(1971, 4, 18, 5.25), None).unwrap();
        assert_eq!(res.identifier, "America/New_York");
        assert_eq!(res.utc_offset_hours, -5.0);
        assert!(!res.is_dst);
        assert_eq!(res.source, ResolutionSource::RuleTable);
    }

    #[test]
    fn test_rule_table_2023_spring_boundary() {
        let resolver = TimezoneResolver::new(false);
        let before = resolver.resolve(&HARTFORD, &civil(2023, 3, 11, 12.0), None).unwrap();
        let on = resolver.resolve(&HARTFORD, &civil(2023, 3, 12, 12.0), None).unwrap();
        assert!(!before.is_dst);
        assert_eq!(before.utc_offset_hours, -5.0);
        assert!(on.is_dst);
        assert_eq!(on.utc_offset_hours, -4.0);
    }

    #[test]
    fn test_database_agrees_on_1971() {
        let res = TimezoneResolver::default().resolve(&HARTFORD, &civil(1971, 4, 18, 5.25), None).unwrap();
        assert_eq!(res.source, ResolutionSource::ZoneDatabase);
        assert_eq!(res.utc_offset_hours, -5.0);
        assert!(!res.is_dst);
    }

    #[test]
    fn test_database_summer_time() {
        let res = TimezoneResolver::default().resolve(&HARTFORD, &civil(2023, 7, 4, 12.0), None).unwrap();
        assert_eq!(res.utc_offset_hours, -4.0);
        assert!(res.is_dst);
    }

    #[test]
    fn test_ambiguous_hour_takes_earlier_occurrence() {
        // 2023-11-05 01:30 happens twice in New York: first in EDT, then EST
        let res = TimezoneResolver::default().resolve(&HARTFORD, &civil(2023, 11, 5, 1.5), None).unwrap();
        assert_eq!(res.utc_offset_hours, -4.0);
        assert!(res.is_dst);
        assert_eq!(res.source, ResolutionSource::ZoneDatabase);
    }

    #[test]
    fn test_skipped_hour_falls_back_to_standard_time() {
        // 2023-03-12 02:30 never happened in New York
        let res = TimezoneResolver::default().resolve(&HARTFORD, &civil(2023, 3, 12, 2.5), None).unwrap();
        assert_eq!(res.utc_offset_hours, -5.0);
        assert!(!res.is_dst);
        assert_eq!(res.source, ResolutionSource::StandardFallback);
    }

    #[test]
    fn test_open_ocean_is_utc() {
        let ocean = GeoLocation { lat: -40.0, lon: -30.0 };
        let res = TimezoneResolver::default().resolve(&ocean, &civil(2023, 7, 1, 12.0), None).unwrap();
        assert_eq!(res.identifier, "UTC");
        assert_eq!(res.utc_offset_hours, 0.0);
    }
}
