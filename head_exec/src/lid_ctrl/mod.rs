//! # Eyelid control module
//!
//! Each eyelid carries a top and a bottom servo. Lid aperture is expressed
//! as a percentage - 0 is fully closed, 100 fully open - interpolated onto
//! each servo's calibrated open/closed angles, so the mirrored linkage
//! directions live entirely in the calibration tables.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod lid;
mod lids;
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use lid::*;
pub use lids::*;
pub use params::*;
