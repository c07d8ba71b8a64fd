//! Parsing of caller-supplied UTC offsets such as `UTC+5:00`, `EST-5` or `-7`.

use crate::error::NodeError;
use regex::Regex;

lazy_static::lazy_static! {
    // Optional alphabetic code glued to a signed hour with optional `:mm`,
    // or a bare unsigned hour.
    static ref OFFSET_PATTERN: Regex =
        Regex::new(r"^(?:([A-Za-z]{1,8})?([+-])(\d{1,2})(?::(\d{2}))?|(\d{1,2}))$").expect("static offset pattern");
}

/// Largest offsets in use anywhere
const MIN_OFFSET_HOURS: f64 = -12.0;
const MAX_OFFSET_HOURS: f64 = 14.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitOffset {
    /// Upper-cased code, or a synthetic `UTC±HH:MM` label
    pub identifier: String,
    pub hours: f64,
}

/// Parse an explicit offset. Any text that is not one of the accepted shapes
/// is an error; nothing falls back to UTC.
pub fn parse_explicit_offset(text: &str) -> Result<ExplicitOffset, NodeError> {
    let trimmed = text.trim();
    let fail = || NodeError::TimezoneParse { input: text.to_string() };

    let caps = OFFSET_PATTERN.captures(trimmed).ok_or_else(fail)?;
    let code = caps.get(1).map(|m| m.as_str().to_uppercase());
    let negative = caps.get(2).map_or(false, |m| m.as_str() == "-");
    let whole: u32 = caps
        .get(3)
        .or_else(|| caps.get(5))
        .ok_or_else(fail)?
        .as_str()
        .parse()
        .map_err(|_| fail())?;
    let minutes: u32 = match caps.get(4) {
        Some(m) => m.as_str().parse().map_err(|_| fail())?,
        None => 0,
    };
    if minutes >= 60 {
        return Err(fail());
    }

    let magnitude = whole as f64 + minutes as f64 / 60.0;
    let hours = if negative { -magnitude } else { magnitude };
    if !(MIN_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&hours) {
        return Err(fail());
    }

    let identifier = code.unwrap_or_else(|| {
        format!("UTC{}{:02}:{:02}", if negative { '-' } else { '+' }, whole, minutes)
    });
    Ok(ExplicitOffset { identifier, hours })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(text: &str) -> f64 {
        parse_explicit_offset(text).unwrap().hours
    }

    #[test]
    fn test_code_with_hours_and_minutes() {
        let parsed = parse_explicit_offset("utc+5:00").unwrap();
        assert_eq!(parsed.identifier, "UTC");
        assert_eq!(parsed.hours, 5.0);

        assert_eq!(hours("EST-5"), -5.0);
        assert_eq!(hours("IST+5:30"), 5.5);
        assert_eq!(hours("NST-3:30"), -3.5);
        assert_eq!(hours("+05:30"), 5.5);
    }

    #[test]
    fn test_bare_integers() {
        assert_eq!(hours("5"), 5.0);
        assert_eq!(hours("-7"), -7.0);
        assert_eq!(hours("+3"), 3.0);
        assert_eq!(hours(" 0 "), 0.0);
        assert_eq!(parse_explicit_offset("-7").unwrap().identifier, "UTC-07:00");
    }

    #[test]
    fn test_rejects_everything_else() {
        for bad in ["", "UTC", "five", "+5:7", "5:75", "+15", "-13", "UTC+5:00x", "America/New_York", "5.5", "UTC5", "UTC +5", "5:30"] {
            let err = parse_explicit_offset(bad).unwrap_err();
            assert!(matches!(err, NodeError::TimezoneParse { .. }), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_extreme_offsets() {
        assert_eq!(hours("+14"), 14.0);
        assert_eq!(hours("-12"), -12.0);
    }
}
