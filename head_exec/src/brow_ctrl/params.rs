//! Parameters structure for the eyebrow control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::servo_ctrl::ServoFamily;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the eyebrow pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Servo family fitted to all four brow channels.
    pub family: ServoFamily,

    /// Hold time of the furrow in the raise-and-furrow cycle.
    ///
    /// Units: milliseconds
    pub furrow_pause_ms: u64,

    /// Hold time of the slight raise in the raise-and-slight-raise cycle.
    ///
    /// Units: milliseconds
    pub slight_pause_ms: u64,

    /// Time spent raised between furrows.
    ///
    /// Units: milliseconds
    pub time_between_furrow_ms: u64,

    /// Left eyebrow calibration.
    pub left: BrowConfig,

    /// Right eyebrow calibration.
    pub right: BrowConfig,
}

/// Calibration of a single eyebrow.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct BrowConfig {
    /// Global channel of the medial servo.
    pub medial_channel: usize,

    /// Global channel of the lateral servo.
    pub lateral_channel: usize,

    /// Neutral pose, (medial, lateral) angles.
    pub neutral_deg: (f64, f64),

    /// Furrow pose, (medial, lateral) angles.
    pub furrow_deg: (f64, f64),

    /// Regular raise pose, (medial, lateral) angles.
    pub reg_raise_deg: (f64, f64),

    /// Slight raise pose, (medial, lateral) angles.
    pub slight_raise_deg: (f64, f64),
}
