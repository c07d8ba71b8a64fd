pub mod node;
pub mod request;

pub use node::{summary, NodeChart, NodeChartService, SouthNode};
pub use request::{ChartRequest, NodeQuery};
