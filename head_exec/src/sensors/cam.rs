//! Block camera adapter

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::warn;

use eqpt_if::{CamBlock, CameraClient};

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Fetch the single tracked block from the camera, if there is one.
///
/// An empty frame yields `None` (no update this tick). More than one block
/// means the camera settings or the background need adjusting; the frame is
/// logged and skipped rather than guessing which block is the hand.
pub fn tracked_block(camera: &mut dyn CameraClient) -> Option<CamBlock> {
    let blocks = camera.get_blocks();

    match blocks.len() {
        0 => None,
        1 => Some(blocks[0]),
        n => {
            warn!(
                "{} blocks detected, adjust camera settings or eliminate excessive background",
                n
            );
            None
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
