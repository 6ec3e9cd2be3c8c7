//! Parameters structure for the eyeball control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::servo_ctrl::ServoFamily;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the eyeball pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Servo family fitted to all four eye channels.
    pub family: ServoFamily,

    /// Minimum time between command increments while stepping.
    ///
    /// Units: milliseconds
    pub step_interval_ms: u64,

    /// How long a glance holds the target direction.
    ///
    /// Units: milliseconds
    pub glance_pause_ms: u64,

    /// Time spent at neutral between glances.
    ///
    /// Units: milliseconds
    pub time_between_glance_ms: u64,

    /// Hold time at each limit of the look-left-and-right cycle.
    ///
    /// Units: milliseconds
    pub time_between_look_ms: u64,

    /// Degree increment used by the eye roll.
    ///
    /// Units: degrees
    pub roll_increment_deg: f64,

    /// Left eye calibration.
    pub left: EyeConfig,

    /// Right eye calibration.
    pub right: EyeConfig,
}

/// Calibration of a single eyeball.
///
/// All positions are servo angles in degrees. The vertical up/down limits
/// are mirrored between sides (up is a higher angle than down on the left
/// eye, lower on the right), while the horizontal limits increase toward the
/// right on both sides.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct EyeConfig {
    /// Global channel of the vertical servo.
    pub vert_channel: usize,

    /// Global channel of the horizontal servo.
    pub hor_channel: usize,

    /// Vertical angle looking straight ahead.
    pub neutral_vert_deg: f64,

    /// Horizontal angle looking straight ahead.
    pub neutral_hor_deg: f64,

    /// Vertical angle at the upper limit.
    pub up_vert_deg: f64,

    /// Vertical angle at the lower limit.
    pub down_vert_deg: f64,

    /// Horizontal angle at the left limit.
    pub left_hor_deg: f64,

    /// Horizontal angle at the right limit.
    pub right_hor_deg: f64,
}
