use crate::ephemeris::{GeoLocation, HouseSystem};
use crate::error::NodeError;
use crate::time::CivilDateTime;
use serde::Deserialize;
use std::str::FromStr;

/// Raw query parameters, exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub tz: Option<String>,
    pub house_system: Option<String>,
}

/// A validated chart request
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub civil: CivilDateTime,
    pub location: GeoLocation,
    pub explicit_offset: Option<String>,
    /// `None` uses the service default
    pub house_system: Option<HouseSystem>,
}

impl NodeQuery {
    pub fn validate(&self) -> Result<ChartRequest, NodeError> {
        let year: i32 = required(&self.year, "year")?;
        let month: u32 = required(&self.month, "month")?;
        let day: u32 = required(&self.day, "day")?;
        let hour: f64 = required(&self.hour, "hour")?;
        let lat: f64 = required(&self.lat, "lat")?;
        let lon: f64 = required(&self.lon, "lon")?;

        let civil = CivilDateTime::new(year, month, day, hour)?;
        let location = GeoLocation::new(lat, lon)?;

        let house_system = match present(&self.house_system) {
            Some(name) => Some(
                name.parse::<HouseSystem>()
                    .map_err(|message| NodeError::invalid("house_system", message))?,
            ),
            None => None,
        };

        Ok(ChartRequest {
            civil,
            location,
            explicit_offset: present(&self.tz).map(str::to_string),
            house_system,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<T: FromStr>(value: &Option<String>, field: &str) -> Result<T, NodeError> {
    let raw = present(value).ok_or_else(|| NodeError::missing(field))?;
    raw.parse::<T>()
        .map_err(|_| NodeError::invalid(field, format!("cannot parse {:?}", raw)))
}
