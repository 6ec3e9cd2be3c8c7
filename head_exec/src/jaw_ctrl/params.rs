//! Parameters structure for the jaw control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::servo_ctrl::ServoFamily;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the jaw.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Servo family fitted to all four jaw channels.
    pub family: ServoFamily,

    /// Minimum time between command increments while stepping.
    ///
    /// Units: milliseconds
    pub step_interval_ms: u64,

    /// Hold time at each end of the even talking cycle.
    ///
    /// Units: milliseconds
    pub time_between_even_talk_ms: u64,

    /// Hold time at each end of the fast talking cycle.
    ///
    /// Units: milliseconds
    pub time_between_fast_talk_ms: u64,

    /// Aperture of the neutral (resting) mouth.
    ///
    /// Units: percent
    pub neutral_open_percent: f64,

    /// Thrust held while the mouth is fully open.
    ///
    /// Units: percent
    pub open_thrust_percent: f64,

    /// Left jaw half calibration.
    pub left: JawHalfConfig,

    /// Right jaw half calibration.
    pub right: JawHalfConfig,
}

/// Calibration of one jaw half.
///
/// The left vertical servo closes at a higher angle than it opens; the right
/// one is mirrored. Likewise for the horizontal thrust linkages.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct JawHalfConfig {
    /// Global channel of the vertical (hinge) servo.
    pub vert_channel: usize,

    /// Global channel of the horizontal (thrust) servo.
    pub hor_channel: usize,

    /// Vertical angle with the mouth closed.
    pub vert_close_deg: f64,

    /// Vertical angle with the mouth fully open.
    pub vert_open_deg: f64,

    /// Horizontal angle with the jaw retracted.
    pub hor_back_deg: f64,

    /// Horizontal angle with the jaw thrust forward.
    pub hor_forward_deg: f64,
}
