//! # Eyeball control module
//!
//! Each eyeball carries two servos, one for vertical and one for horizontal
//! movement. The degree ranges of the two eyes differ, and the direction of
//! increasing angle is mirrored between sides for the vertical servos but
//! shared for the horizontal ones - a property of how the prototype's
//! linkages are installed. All of that asymmetry lives in the per-side
//! calibration tables; the state machines derive their travel directions
//! from the tables.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod eye;
mod eyes;
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use eye::*;
pub use eyes::*;
pub use params::*;
