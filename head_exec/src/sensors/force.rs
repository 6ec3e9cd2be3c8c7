//! Force sensitive resistor adapter

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::ForceParams;

use eqpt_if::{AnalogChannel, AnalogReader};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Discretised force level on one sensor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum ForceLevel {
    NoPressure,
    VeryLight,
    Light,
    Medium,
    Big,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One force sensitive resistor, read through the bucket thresholds.
pub struct ForceSensor {
    channel: AnalogChannel,
    params: ForceParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ForceSensor {
    pub fn new(channel: AnalogChannel, params: ForceParams) -> Self {
        Self { channel, params }
    }

    /// Read the raw sensor value.
    pub fn read_raw(&self, analog: &mut dyn AnalogReader) -> u16 {
        analog.read(self.channel)
    }

    /// Read the sensor and bucket the value into a force level.
    pub fn level(&self, analog: &mut dyn AnalogReader) -> ForceLevel {
        let reading = self.read_raw(analog);
        let level = self.params.bucket(reading);
        trace!("{:?} reads {} -> {:?}", self.channel, reading, level);
        level
    }
}

impl ForceParams {
    /// Bucket a raw reading. Thresholds are half-open: a reading equal to a
    /// threshold lands in the bucket the threshold opens.
    pub fn bucket(&self, reading: u16) -> ForceLevel {
        if reading < self.very_light_count {
            ForceLevel::NoPressure
        } else if reading < self.light_count {
            ForceLevel::VeryLight
        } else if reading < self.medium_count {
            ForceLevel::Light
        } else if reading < self.big_count {
            ForceLevel::Medium
        } else {
            ForceLevel::Big
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
