//! # Equipment Interface Library
//!
//! This library defines the contracts between the head control software and
//! the equipment it drives: servo driver boards, the audio player, the block
//! tracking camera, the analog inputs, and the pulse solenoids.
//!
//! The real bench hardware (PCA9685 boards over I2C, the Teensy audio shield,
//! the Pixy2 camera) lives behind these traits in its own executables. The
//! [`sim`] module provides in-memory implementations used for bench-top
//! development and unit testing.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod eqpt;
pub mod sim;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use eqpt::analog::{AnalogChannel, AnalogReader, ADC_MAX};
pub use eqpt::audio::{AudioClip, AudioPlayer};
pub use eqpt::cam::{CamBlock, CameraClient, FRAME_MAX_X, FRAME_MAX_Y};
pub use eqpt::servo::{ServoDriver, ServoError, CHANNELS_PER_BOARD, MAX_PULSE_COUNT};
pub use eqpt::sol::{SolenoidDriver, SolenoidId};
