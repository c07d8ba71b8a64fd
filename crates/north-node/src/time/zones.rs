//! Approximate coordinate to timezone mapping.
//!
//! Rectangles are consulted first, then longitude bands within a latitude
//! range. Everything else is UTC. The table is coarse: it exists to pick a
//! rule set for birth places, not to reproduce political borders.

use crate::ephemeris::GeoLocation;
use crate::time::rules::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneInfo {
    /// IANA identifier, or `UTC`
    pub identifier: &'static str,
    pub standard_offset_hours: f64,
    pub rules: RuleSet,
}

const fn zone(identifier: &'static str, standard_offset_hours: f64, rules: RuleSet) -> ZoneInfo {
    ZoneInfo { identifier, standard_offset_hours, rules }
}

pub const UTC: ZoneInfo = zone("UTC", 0.0, RuleSet::None);

const ATLANTIC: ZoneInfo = zone("America/Halifax", -4.0, RuleSet::UnitedStates);
const EASTERN: ZoneInfo = zone("America/New_York", -5.0, RuleSet::UnitedStates);
const CENTRAL: ZoneInfo = zone("America/Chicago", -6.0, RuleSet::UnitedStates);
const MOUNTAIN: ZoneInfo = zone("America/Denver", -7.0, RuleSet::UnitedStates);
const ARIZONA: ZoneInfo = zone("America/Phoenix", -7.0, RuleSet::None);
const PACIFIC: ZoneInfo = zone("America/Los_Angeles", -8.0, RuleSet::UnitedStates);
const ALASKA: ZoneInfo = zone("America/Anchorage", -9.0, RuleSet::UnitedStates);
const HAWAII: ZoneInfo = zone("Pacific/Honolulu", -10.0, RuleSet::None);
const BRITISH: ZoneInfo = zone("Europe/London", 0.0, RuleSet::European);
const PORTUGAL: ZoneInfo = zone("Europe/Lisbon", 0.0, RuleSet::European);
const CENTRAL_EUROPE: ZoneInfo = zone("Europe/Berlin", 1.0, RuleSet::European);
const EASTERN_EUROPE: ZoneInfo = zone("Europe/Athens", 2.0, RuleSet::European);

/// Inclusive lat/lon box
#[derive(Debug, Clone, Copy)]
struct Rect {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Rect {
    fn contains(&self, loc: &GeoLocation) -> bool {
        loc.lat >= self.min_lat
            && loc.lat <= self.max_lat
            && loc.lon >= self.min_lon
            && loc.lon <= self.max_lon
    }
}

/// Regions whose zone differs from their longitude band, checked in order
const SPECIAL_REGIONS: &[(Rect, ZoneInfo)] = &[
    (Rect { min_lat: 31.3, max_lat: 37.0, min_lon: -114.8, max_lon: -109.05 }, ARIZONA),
    (Rect { min_lat: 18.5, max_lat: 22.5, min_lon: -161.0, max_lon: -154.5 }, HAWAII),
    (Rect { min_lat: 49.8, max_lat: 61.0, min_lon: -11.0, max_lon: 1.8 }, BRITISH),
    (Rect { min_lat: 36.9, max_lat: 42.2, min_lon: -9.6, max_lon: -6.2 }, PORTUGAL),
];

/// A latitude range split into half-open longitude bands `[from, to)`
struct Region {
    min_lat: f64,
    max_lat: f64,
    bands: &'static [(f64, f64, ZoneInfo)],
}

const REGIONS: &[Region] = &[
    // North America
    Region {
        min_lat: 14.0,
        max_lat: 72.0,
        bands: &[
            (-170.0, -130.0, ALASKA),
            (-130.0, -114.5, PACIFIC),
            (-114.5, -102.0, MOUNTAIN),
            (-102.0, -86.5, CENTRAL),
            (-86.5, -67.0, EASTERN),
            (-67.0, -52.0, ATLANTIC),
        ],
    },
    // Europe
    Region {
        min_lat: 35.0,
        max_lat: 71.5,
        bands: &[
            (-10.0, 22.5, CENTRAL_EUROPE),
            (22.5, 40.0, EASTERN_EUROPE),
        ],
    },
];

/// Map a coordinate to exactly one zone. Never fails; unknown areas are UTC.
pub fn zone_for(location: &GeoLocation) -> &'static ZoneInfo {
    if let Some((_, zone)) = SPECIAL_REGIONS.iter().find(|(rect, _)| rect.contains(location)) {
        return zone;
    }

    REGIONS
        .iter()
        .filter(|region| location.lat >= region.min_lat && location.lat <= region.max_lat)
        .flat_map(|region| region.bands.iter())
        .find(|(from, to, _)| location.lon >= *from && location.lon < *to)
        .map(|(_, _, zone)| zone)
        .unwrap_or(&UTC)
}
