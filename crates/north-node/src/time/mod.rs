pub mod civil;
pub mod offset;
pub mod resolver;
pub mod rules;
pub mod zones;

pub use civil::{to_ut, CivilDateTime, UtInstant};
pub use offset::{parse_explicit_offset, ExplicitOffset};
pub use resolver::{ResolutionSource, TimezoneResolution, TimezoneResolver};
pub use rules::{nth_weekday_of_month, Occurrence, RuleSet};
pub use zones::{zone_for, ZoneInfo};
