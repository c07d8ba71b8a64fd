pub mod adapter;
pub mod types;

pub use adapter::{julian_day, EphemerisError, EphemerisProvider, SwissEphemerisAdapter};
pub use types::{GeoLocation, HousePositions, HouseSystem, NodeKind, NodePosition};
