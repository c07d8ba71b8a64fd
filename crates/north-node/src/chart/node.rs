//! The north node pipeline: civil time -> UT -> ephemeris -> house -> text.

use crate::chart::request::ChartRequest;
use crate::ephemeris::{EphemerisError, EphemerisProvider, HouseSystem, NodeKind};
use crate::error::NodeError;
use crate::houses::{classify, HouseCuspSet};
use crate::time::{TimezoneResolution, TimezoneResolver, UtInstant};
use crate::western::{ordinal, ZodiacPosition, ZodiacSign};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SouthNode {
    pub sign: ZodiacSign,
    pub degree: u8,
    pub minute: u8,
    pub longitude: f64,
}

/// Computed north node placement, ready to serialize
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeChart {
    pub sign: ZodiacSign,
    pub degree: u8,
    pub minute: u8,
    pub longitude: f64,
    pub house: u8,
    pub summary: String,
    pub latitude: f64,
    pub retrograde: bool,
    pub south_node: SouthNode,
    pub house_fallback: bool,
    pub house_system: HouseSystem,
    pub node_kind: NodeKind,
    pub ascendant: f64,
    pub midheaven: f64,
    pub cusps: [f64; 12],
    pub julian_day: f64,
    pub universal_time: UtInstant,
    pub timezone: TimezoneResolution,
}

/// Stateless per request; share one instance across workers
#[derive(Clone)]
pub struct NodeChartService {
    ephemeris: Arc<dyn EphemerisProvider>,
    resolver: TimezoneResolver,
    house_system: HouseSystem,
    node_kind: NodeKind,
}

impl NodeChartService {
    pub fn new(
        ephemeris: Arc<dyn EphemerisProvider>,
        resolver: TimezoneResolver,
        house_system: HouseSystem,
        node_kind: NodeKind,
    ) -> Self {
        Self { ephemeris, resolver, house_system, node_kind }
    }

    pub fn compute(&self, request: &ChartRequest) -> Result<NodeChart, NodeError> {
        let timezone = self.resolver.resolve(
            &request.location,
            &request.civil,
            request.explicit_offset.as_deref(),
        )?;
        let ut = request.civil.to_ut(&timezone);
        let jd = ut.julian_day();
        let house_system = request.house_system.unwrap_or(self.house_system);

        let node = self.ephemeris.lunar_node(jd, self.node_kind)?;
        if !node.lon.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: "north node".to_string(),
                jd,
                message: "no usable longitude returned".to_string(),
            }
            .into());
        }
        let houses = self.ephemeris.houses(jd, &request.location, house_system)?;

        let cusps = HouseCuspSet::from(&houses);
        let assignment = classify(node.lon, &cusps);
        let position = ZodiacPosition::from_longitude(node.lon);
        let south = ZodiacPosition::from_longitude(node.lon + 180.0);

        log::info!(
            "north node {} in house {} (jd {:.5}, {} {:+}h)",
            position,
            assignment.house,
            jd,
            timezone.identifier,
            timezone.utc_offset_hours
        );

        Ok(NodeChart {
            sign: position.sign,
            degree: position.degree,
            minute: position.minute,
            longitude: position.longitude,
            house: assignment.house,
            summary: summary(&position, assignment.house),
            latitude: node.lat,
            retrograde: node.retrograde,
            south_node: SouthNode {
                sign: south.sign,
                degree: south.degree,
                minute: south.minute,
                longitude: south.longitude,
            },
            house_fallback: assignment.fallback,
            house_system,
            node_kind: self.node_kind,
            ascendant: houses.ascendant,
            midheaven: houses.midheaven,
            cusps: *cusps.cusps(),
            julian_day: jd,
            universal_time: ut,
            timezone,
        })
    }
}

/// e.g. `North Node at 24°07' Aries in the 5th house`
pub fn summary(position: &ZodiacPosition, house: u8) -> String {
    format!("North Node at {} in the {} house", position, ordinal(house as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        let position = ZodiacPosition::from_longitude(24.12);
        assert_eq!(summary(&position, 5), "North Node at 24°07' Aries in the 5th house");
        assert_eq!(
            summary(&ZodiacPosition::from_longitude(300.0), 11),
            "North Node at 0°00' Aquarius in the 11th house"
        );
    }
}
