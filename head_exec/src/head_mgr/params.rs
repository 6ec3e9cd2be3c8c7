//! Parameters structure for the head manager

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the head manager and its behaviour scripts.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Continuous quiet time required before the head treats the speaker as
    /// finished.
    ///
    /// Units: milliseconds
    pub quiet_period_ms: u64,

    /// Spoken exchanges in the standard script before the dialogue is
    /// considered finished.
    pub dialogue_responses: u8,

    /// Ticks the camera track age may sit unchanged before the hand counts
    /// as lost.
    pub hand_lost_ticks: u32,

    /// Gaze offset applied while a verbal-response patient follows the
    /// hand, making the gaze sit slightly off target.
    ///
    /// Units: degrees
    pub verbal_gaze_offset_deg: f64,

    /// Corrective increment of the neck rotation while following the hand.
    ///
    /// Units: degrees
    pub neck_follow_increment_deg: f64,
}
