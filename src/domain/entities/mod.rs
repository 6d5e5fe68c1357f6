//! Domain entities - Objects with identity that live for the whole process

mod region_state;

pub use region_state::{RegionState, ResetHandler};
