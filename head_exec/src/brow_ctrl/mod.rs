//! # Eyebrow control module
//!
//! Each eyebrow carries a medial and a lateral servo with four tested poses:
//! neutral, furrow, regular raise and slight raise. The brows move between
//! poses directly; the two-pose timed cyclers on the pair give the face its
//! expressive background motion.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod brow;
mod brows;
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use brow::*;
pub use brows::*;
pub use params::*;
