//! # Block Tracking Camera Contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Rightmost pixel column of the camera frame. Directions are from the
/// camera's point of view, with (0, 0) in the top left corner.
pub const FRAME_MAX_X: u16 = 316;

/// Bottom pixel row of the camera frame.
pub const FRAME_MAX_Y: u16 = 208;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One tracked block reported by the camera firmware.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CamBlock {
    /// Centre pixel column, `0..=FRAME_MAX_X`.
    pub x: u16,

    /// Centre pixel row, `0..=FRAME_MAX_Y`.
    pub y: u16,

    /// Block width in pixels.
    pub width: u16,

    /// Block height in pixels.
    pub height: u16,

    /// Block angle, colour-code blocks only.
    pub angle: i16,

    /// Tracking index assigned by the firmware.
    pub index: u8,

    /// Number of frames the block has been tracked for (saturating).
    pub age: u8,

    /// Colour signature of the block, `1..=7`.
    pub signature: u8,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing a unified API for the block tracking camera.
pub trait CameraClient {
    /// Fetch the blocks detected in the most recent frame.
    ///
    /// The detection firmware owns tracking and signature matching; this
    /// call only transfers its latest results.
    fn get_blocks(&mut self) -> Vec<CamBlock>;
}
