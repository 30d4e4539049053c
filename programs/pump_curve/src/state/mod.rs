pub mod bonding_curve;
pub mod global_state;

pub use bonding_curve::*;
pub use global_state::*;
