//! Parameters structure for the eyelid control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::servo_ctrl::ServoFamily;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the eyelid pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Servo family fitted to all four lid channels.
    pub family: ServoFamily,

    /// Minimum time between command increments while stepping.
    ///
    /// Units: milliseconds
    pub step_interval_ms: u64,

    /// Time the lids stay closed during a regular blink.
    ///
    /// Units: milliseconds
    pub blink_pause_ms: u64,

    /// Time between regular blinks.
    ///
    /// Units: milliseconds
    pub time_between_blink_ms: u64,

    /// Closed time of the lazy blink.
    ///
    /// Units: milliseconds
    pub lazy_blink_pause_ms: u64,

    /// Time between lazy blinks.
    ///
    /// Units: milliseconds
    pub time_between_lazy_blink_ms: u64,

    /// Closed time of the fast blink.
    ///
    /// Units: milliseconds
    pub fast_blink_pause_ms: u64,

    /// Time between fast blinks.
    ///
    /// Units: milliseconds
    pub time_between_fast_blink_ms: u64,

    /// Open and closed hold time of the long close.
    ///
    /// Units: milliseconds
    pub long_close_ms: u64,

    /// Bounds of the random interval between idle blinks.
    ///
    /// Units: milliseconds
    pub idle_blink_min_ms: u64,
    pub idle_blink_max_ms: u64,

    /// Left eyelid calibration.
    pub left: LidConfig,

    /// Right eyelid calibration.
    pub right: LidConfig,
}

/// Calibration of a single eyelid.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct LidConfig {
    /// Global channel of the top lid servo.
    pub top_channel: usize,

    /// Global channel of the bottom lid servo.
    pub bot_channel: usize,

    /// Top servo angle with the lid closed.
    pub top_close_deg: f64,

    /// Top servo angle with the lid fully open.
    pub top_open_deg: f64,

    /// Bottom servo angle with the lid closed.
    pub bot_close_deg: f64,

    /// Bottom servo angle with the lid fully open.
    pub bot_open_deg: f64,
}
