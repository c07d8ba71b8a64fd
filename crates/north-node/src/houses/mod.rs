pub mod classifier;

pub use classifier::{classify, HouseAssignment, HouseCuspSet};
