use crate::ephemeris::HousePositions;
use serde::{Deserialize, Serialize};

/// Twelve cusp longitudes in [0, 360), index 0 = house 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspSet([f64; 12]);

impl HouseCuspSet {
    pub fn new(cusps: [f64; 12]) -> Self {
        Self(cusps.map(normalize))
    }

    pub fn cusps(&self) -> &[f64; 12] {
        &self.0
    }

    /// Start and end of the house at `index` (0-based)
    pub fn span(&self, index: usize) -> (f64, f64) {
        (self.0[index % 12], self.0[(index + 1) % 12])
    }
}

impl From<&HousePositions> for HouseCuspSet {
    fn from(houses: &HousePositions) -> Self {
        HouseCuspSet::new(houses.cusps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseAssignment {
    /// 1..=12
    pub house: u8,
    /// No span contained the longitude and house 1 was returned instead
    pub fallback: bool,
}

/// Find the house whose span contains `longitude`.
///
/// Spans are half-open `[start, end)`; a span whose end is below its start
/// crosses 0° Aries. Houses are tried 1 through 12 and the first match wins.
pub fn classify(longitude: f64, cusps: &HouseCuspSet) -> HouseAssignment {
    let lon = normalize(longitude);

    for i in 0..12 {
        let (start, end) = cusps.span(i);
        let inside = if end < start {
            lon >= start || lon < end
        } else {
            start <= lon && lon < end
        };
        if inside {
            return HouseAssignment { house: i as u8 + 1, fallback: false };
        }
    }

    log::warn!(
        "longitude {:.4} matched no house span in {:?}; defaulting to house 1",
        lon,
        cusps.cusps()
    );
    HouseAssignment { house: 1, fallback: true }
}

fn normalize(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
