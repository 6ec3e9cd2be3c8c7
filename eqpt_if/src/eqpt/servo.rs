//! # Servo Driver Board Contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of channels provided by a single driver board.
pub const CHANNELS_PER_BOARD: usize = 16;

/// Maximum pulse length count the boards accept (12 bits of resolution).
pub const MAX_PULSE_COUNT: u16 = 4095;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing a unified API for a 16 channel servo driver board.
pub trait ServoDriver {
    /// Set the pulse length count on one of the board's channels.
    ///
    /// ## Arguments
    /// - `channel` - The board-local channel, `0..16`
    /// - `pulse_count` - The tick at which the signal transitions from high
    ///   to low, `0..=4095`
    fn set_pulse(&mut self, channel: u8, pulse_count: u16) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible errors raised by a servo driver board.
#[derive(Debug, Error)]
pub enum ServoError {
    #[error("Channel {0} is not valid for a 16 channel board")]
    InvalidChannel(u8),

    #[error("Pulse count {0} exceeds the board's 4095 count range")]
    InvalidPulseCount(u16),

    #[error("An I2C error occured")]
    I2c,
}
