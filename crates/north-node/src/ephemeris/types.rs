use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Build a location, rejecting coordinates outside the globe
    pub fn new(lat: f64, lon: f64) -> Result<Self, NodeError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(NodeError::invalid("lat", format!("{} is outside [-90, 90]", lat)));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(NodeError::invalid("lon", format!("{} is outside [-180, 180]", lon)));
        }
        Ok(Self { lat, lon })
    }
}

/// Lunar node position data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodePosition {
    /// Ecliptic longitude in degrees (0-360)
    pub lon: f64,
    /// Ecliptic latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the node is moving backwards through the zodiac
    pub retrograde: bool,
}

/// House cusps and angles for one chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePositions {
    pub system: HouseSystem,
    /// Cusp longitudes, index 0 = house 1
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Which lunar node the ephemeris should compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    True,
    Mean,
}

impl NodeKind {
    /// Swiss Ephemeris body id
    pub fn body_id(self) -> i32 {
        match self {
            NodeKind::True => 11,
            NodeKind::Mean => 10,
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "true_node" => Ok(NodeKind::True),
            "mean" | "mean_node" => Ok(NodeKind::Mean),
            other => Err(format!("unknown node kind: {other} (expected `true` or `mean`)")),
        }
    }
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("whole_sign", HouseSystem::WholeSign),
    ("equal", HouseSystem::Equal),
    ("regiomontanus", HouseSystem::Regiomontanus),
    ("campanus", HouseSystem::Campanus),
    ("alcabitius", HouseSystem::Alcabitius),
    ("morinus", HouseSystem::Morinus),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    WholeSign,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    /// Single-letter selector understood by Swiss Ephemeris
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Equal => b'E',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'A',
            HouseSystem::Morinus => b'M',
        }
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system)| *system == self)
            .map(|(name, _)| *name)
            .unwrap_or("placidus")
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, system)| *system)
            .ok_or_else(|| {
                format!(
                    "unknown house system: {}. Valid systems: {:?}",
                    s,
                    HouseSystem::valid_names()
                )
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
