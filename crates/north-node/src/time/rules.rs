//! Historical daylight-saving rule tables.
//!
//! Each rule set is a list of eras. Within an era DST runs from the start
//! day (inclusive) to the end day (exclusive): the start day is already
//! summer time and the end day is already standard time.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Which occurrence of a weekday within a month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// 1-based: `Nth(2)` is the second occurrence
    Nth(u8),
    Last,
}

/// Day-of-month of the nth (or last) `weekday` in `month`.
///
/// Returns `None` for an invalid month or when the month has fewer than `n`
/// occurrences.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    occurrence: Occurrence,
) -> Option<u32> {
    match occurrence {
        Occurrence::Nth(n) => {
            if n == 0 {
                return None;
            }
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let lead = (7 + weekday.num_days_from_monday() as i64
                - first.weekday().num_days_from_monday() as i64)
                % 7;
            let date = first.checked_add_signed(Duration::days(lead + 7 * (n as i64 - 1)))?;
            (date.month() == month).then(|| date.day())
        }
        Occurrence::Last => {
            let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
            let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
            let back = (7 + last.weekday().num_days_from_monday() as i64
                - weekday.num_days_from_monday() as i64)
                % 7;
            Some(last.day() - back as u32)
        }
    }
}

/// A transition boundary expressed as "the nth Sunday of month"
#[derive(Debug, Clone, Copy)]
struct Boundary {
    month: u32,
    occurrence: Occurrence,
}

#[derive(Debug, Clone, Copy)]
struct Era {
    first_year: i32,
    /// Inclusive; `None` means the era is still in force
    last_year: Option<i32>,
    start: Boundary,
    end: Boundary,
}

const fn sunday(month: u32, occurrence: Occurrence) -> Boundary {
    Boundary { month, occurrence }
}

/// United States (Uniform Time Act and its amendments)
const US_ERAS: &[Era] = &[
    Era {
        first_year: 1966,
        last_year: Some(1986),
        start: sunday(4, Occurrence::Last),
        end: sunday(10, Occurrence::Last),
    },
    Era {
        first_year: 1987,
        last_year: Some(2006),
        start: sunday(4, Occurrence::Nth(1)),
        end: sunday(10, Occurrence::Last),
    },
    Era {
        first_year: 2007,
        last_year: None,
        start: sunday(3, Occurrence::Nth(2)),
        end: sunday(11, Occurrence::Nth(1)),
    },
];

/// European summer time directives
const EU_ERAS: &[Era] = &[
    Era {
        first_year: 1981,
        last_year: Some(1995),
        start: sunday(3, Occurrence::Last),
        end: sunday(9, Occurrence::Last),
    },
    Era {
        first_year: 1996,
        last_year: None,
        start: sunday(3, Occurrence::Last),
        end: sunday(10, Occurrence::Last),
    },
];

/// Daylight-saving regime attached to a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Standard time all year
    #[default]
    None,
    UnitedStates,
    European,
}

impl RuleSet {
    fn eras(self) -> &'static [Era] {
        match self {
            RuleSet::None => &[],
            RuleSet::UnitedStates => US_ERAS,
            RuleSet::European => EU_ERAS,
        }
    }

    /// First and end day of the DST period in `year`, if any
    pub fn dst_window(self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let era = self.eras().iter().find(|era| {
            year >= era.first_year && era.last_year.map_or(true, |last| year <= last)
        })?;
        let start_day = nth_weekday_of_month(year, era.start.month, Weekday::Sun, era.start.occurrence)?;
        let end_day = nth_weekday_of_month(year, era.end.month, Weekday::Sun, era.end.occurrence)?;
        Some((
            NaiveDate::from_ymd_opt(year, era.start.month, start_day)?,
            NaiveDate::from_ymd_opt(year, era.end.month, end_day)?,
        ))
    }

    pub fn is_dst(self, date: NaiveDate) -> bool {
        match self.dst_window(date.year()) {
            Some((start, end)) => start <= date && date < end,
            None => false,
        }
    }
}
