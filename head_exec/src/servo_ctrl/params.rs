//! Parameters structure for ServoCtrl

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the actuator position mapper.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    /// Pulse range for the small Turnigy servos (eyes, lids, brows).
    pub turnigy: PulseRange,

    /// Pulse range for the TowerPro servos (jaw linkages).
    pub towerpro: PulseRange,

    /// Pulse range for the Datan servos (neck).
    pub datan: PulseRange,
}

/// Calibrated pulse length count range of one servo family.
///
/// These want to be as small/large as possible without hitting the hard
/// stops; they were found by sweeping each family on the bench.
#[derive(Debug, Default, Copy, Clone, Deserialize)]
pub struct PulseRange {
    /// Pulse length count commanding the 0 degree end stop.
    pub min_count: u16,

    /// Pulse length count commanding the 180 degree end stop.
    pub max_count: u16,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The families of servo hardware fitted to the head.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ServoFamily {
    /// Small black servos.
    Turnigy,

    /// Blue servos.
    #[serde(rename = "towerpro")]
    TowerPro,

    /// Black and red JX servos.
    Datan,
}
