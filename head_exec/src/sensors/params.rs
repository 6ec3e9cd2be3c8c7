//! Parameters structure for the sensor adapters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the sensor adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Force bucket thresholds.
    pub force: ForceParams,

    /// Microphone filtering.
    pub mic: MicParams,

    /// Pulse solenoid timing.
    pub pulse: PulseParams,
}

/// Raw-count thresholds of the force buckets.
///
/// A reading below `very_light_count` is no pressure; each threshold opens
/// the next bucket (half-open intervals). These values are provisional and
/// will need recalibrating once the sensors sit under the skin.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct ForceParams {
    pub very_light_count: u16,
    pub light_count: u16,
    pub medium_count: u16,
    pub big_count: u16,
}

/// Microphone filtering parameters.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct MicParams {
    /// Raw count subtracted from every reading to centre the signal. The
    /// microphone trim pot may need adjusting before each use to keep this
    /// valid.
    pub offset_count: i32,

    /// Dead band half-width: trimmed readings beyond it count as speech.
    pub range_count: i32,
}

/// Pulse solenoid timing parameters.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct PulseParams {
    /// Width of the off pulse between beats.
    ///
    /// Units: milliseconds
    pub off_pulse_ms: u64,
}
