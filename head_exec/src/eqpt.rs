//! # Equipment bundle
//!
//! The set of collaborators the control modules drive each tick. The servo
//! controller is concrete (it owns the mapping logic); the rest are trait
//! objects behind the `eqpt_if` contracts, so the bench rig and the
//! simulated equipment are interchangeable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{AnalogReader, AudioPlayer, CameraClient, SolenoidDriver};

use crate::servo_ctrl::ServoCtrl;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// All equipment attached to the head.
pub struct Equipment {
    /// The servo driver boards behind the position mapper.
    pub servo: ServoCtrl,

    /// The audio playback equipment.
    pub audio: Box<dyn AudioPlayer>,

    /// The block tracking camera.
    pub camera: Box<dyn CameraClient>,

    /// The analog inputs (force sensors, microphone, neck feedback).
    pub analog: Box<dyn AnalogReader>,

    /// The pulse solenoids.
    pub sols: Box<dyn SolenoidDriver>,
}
