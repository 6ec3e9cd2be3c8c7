//! # Analog Input Contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Maximum raw reading of the 10 bit ADC.
pub const ADC_MAX: u16 = 1023;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The analog input channels fitted to the head.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum AnalogChannel {
    /// Large force sensitive resistor on the forehead.
    ForeheadForce,

    /// Large force sensitive resistor on the neck.
    NeckForce,

    /// Small force sensitive resistor on the chin.
    ChinForce,

    /// Small force sensitive resistor on the left jaw.
    JawLeftForce,

    /// Small force sensitive resistor on the right jaw.
    JawRightForce,

    /// Electret microphone behind the left ear.
    Microphone,

    /// Position feedback potentiometer on the right neck servo.
    NeckFeedbackRight,

    /// Position feedback potentiometer on the left neck servo.
    NeckFeedbackLeft,

    /// Position feedback potentiometer on the neck rotation servo.
    NeckFeedbackRot,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing a unified API for the head's analog inputs.
pub trait AnalogReader {
    /// Read the raw ADC value (`0..=ADC_MAX`) on the given channel.
    fn read(&mut self, channel: AnalogChannel) -> u16;
}
