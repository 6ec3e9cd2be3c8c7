//! # Neck control module
//!
//! The neck is the only limb with sensor feedback in the loop: the left and
//! right tilt servos and the rotation servo each carry a position feedback
//! potentiometer. A goal is approached by syncing the commanded angle to the
//! measured position at the start of a sequence, then issuing corrective
//! increments whenever the remaining error exceeds a tolerance band.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod neck;
mod params;
mod side;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use neck::*;
pub use params::*;
pub use side::*;
