//! # Jaw control module
//!
//! The jaw rides on four servos: one vertical (hinge) and one horizontal
//! (thrust) linkage per side, with opposite directions of increasing angle
//! between sides. Aperture and thrust are expressed as percentages of the
//! calibrated travel. On top of the percent model sit timed open/close and
//! thrust cyclers with cycle counting, and a stepped open/close for slow
//! dazed talking.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod half;
mod jaw;
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use half::*;
pub use jaw::*;
pub use params::*;
