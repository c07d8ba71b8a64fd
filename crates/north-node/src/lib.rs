//! Natal lunar node placement: resolves a birth time and place to Universal
//! Time, asks the ephemeris for the node and house cusps, and assigns the
//! node to a house.

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod time;
pub mod western;

pub use chart::{NodeChart, NodeChartService, NodeQuery};
pub use ephemeris::{EphemerisProvider, SwissEphemerisAdapter};
pub use error::NodeError;
