//! Zodiac signs and degree/minute positions within them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

/// Get sign index (0-11) from longitude
pub fn get_sign_index(longitude: f64) -> u8 {
    let normalized = longitude.rem_euclid(360.0);
    ((normalized / 30.0) as u8) % 12
}

impl ZodiacSign {
    pub fn from_index(index: u8) -> Self {
        SIGN_ORDER[(index % 12) as usize]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        Self::from_index(get_sign_index(longitude))
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A longitude expressed as sign, whole degree and whole arc-minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// 0..=29
    pub degree: u8,
    /// 0..=59
    pub minute: u8,
    pub longitude: f64,
}

impl ZodiacPosition {
    /// Truncates to the arc-minute so a position never rolls into the next sign
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = longitude.rem_euclid(360.0);
        let sign_index = get_sign_index(lon);
        let in_sign = (lon - sign_index as f64 * 30.0).clamp(0.0, 30.0);
        let total_minutes = ((in_sign * 60.0).floor() as u32).min(30 * 60 - 1);

        Self {
            sign: ZodiacSign::from_index(sign_index),
            degree: (total_minutes / 60) as u8,
            minute: (total_minutes % 60) as u8,
            longitude: lon,
        }
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}' {}", self.degree, self.minute, self.sign)
    }
}
