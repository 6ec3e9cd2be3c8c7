//! # Sensor adapters
//!
//! Discretising adapters over the raw equipment inputs: force readings into
//! five buckets, the microphone into a dead-band excursion predicate, the
//! camera into an optional tracked block, and the pulse solenoids into a
//! BPM-driven beat machine.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod cam;
mod force;
mod mic;
mod params;
mod pulse;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use cam::*;
pub use force::*;
pub use mic::*;
pub use params::*;
pub use pulse::*;
