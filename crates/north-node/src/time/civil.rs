//! Civil (wall-clock) time and its conversion to Universal Time.

use crate::ephemeris::julian_day;
use crate::error::NodeError;
use crate::time::resolver::TimezoneResolution;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Local wall-clock date and decimal hour, with no timezone attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilDateTime {
    date: NaiveDate,
    /// Decimal hour in [0, 24)
    hour: f64,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: f64) -> Result<Self, NodeError> {
        if !(1..=12).contains(&month) {
            return Err(NodeError::invalid("month", format!("{} is outside 1-12", month)));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            NodeError::invalid(
                "day",
                format!("{}-{:02}-{:02} is not a calendar date", year, month, day),
            )
        })?;
        if !hour.is_finite() || !(0.0..24.0).contains(&hour) {
            return Err(NodeError::invalid("hour", format!("{} is outside [0, 24)", hour)));
        }
        Ok(Self { date, hour })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Wall-clock time truncated to whole seconds
    pub fn naive(&self) -> NaiveDateTime {
        let total = (self.hour * 3600.0).floor().clamp(0.0, 86_399.0) as u32;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(total, 0).unwrap_or_default();
        self.date.and_time(time)
    }

    /// Convert to Universal Time using a resolved offset
    pub fn to_ut(&self, resolution: &TimezoneResolution) -> UtInstant {
        to_ut(self, resolution)
    }
}

/// A Universal Time instant: valid Gregorian date plus decimal hour in [0, 24)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "DateHour")]
pub struct UtInstant {
    date: NaiveDate,
    hour: f64,
}

/// Wire shape of [`UtInstant`]
#[derive(Serialize)]
struct DateHour {
    year: i32,
    month: u32,
    day: u32,
    hour: f64,
}

impl From<UtInstant> for DateHour {
    fn from(ut: UtInstant) -> Self {
        Self { year: ut.year(), month: ut.month(), day: ut.day(), hour: ut.hour }
    }
}

impl UtInstant {
    /// `None` for an impossible date or an hour outside [0, 24)
    pub fn new(year: i32, month: u32, day: u32, hour: f64) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        (hour.is_finite() && (0.0..24.0).contains(&hour)).then_some(Self { date, hour })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    pub fn julian_day(&self) -> f64 {
        julian_day(self)
    }

    /// Reverse of [`to_ut`]: add `offset_hours` back and re-normalise
    pub fn to_local(&self, offset_hours: f64) -> CivilDateTime {
        let (hour, date) = shift(self.date, self.hour + offset_hours);
        CivilDateTime { date, hour }
    }
}

/// Subtract the resolved UTC offset from a civil time.
///
/// The hour is folded back into [0, 24) and the calendar date moves by the
/// number of whole days folded.
pub fn to_ut(civil: &CivilDateTime, resolution: &TimezoneResolution) -> UtInstant {
    let (hour, date) = shift(civil.date, civil.hour - resolution.utc_offset_hours);
    let ut = UtInstant { date, hour };
    log::debug!(
        "civil {} {:.4}h at {:+} -> UT {} {:.4}h",
        civil.date, civil.hour, resolution.utc_offset_hours, ut.date, ut.hour
    );
    ut
}

fn shift(date: NaiveDate, mut hour: f64) -> (f64, NaiveDate) {
    let mut days: i64 = 0;
    while hour < 0.0 {
        hour += 24.0;
        days -= 1;
    }
    while hour >= 24.0 {
        hour -= 24.0;
        days += 1;
    }
    let shifted = date.checked_add_signed(Duration::days(days)).unwrap_or(date);
    (hour, shifted)
}
