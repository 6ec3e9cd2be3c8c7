//! # Audio Player Contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The canned audio clips available to the behaviour scripts.
///
/// Clips are WAV recordings stored on the player's SD card, named in upper
/// case with a `.WAV` extension.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum AudioClip {
    /// Greeting and a brief description of the medical problem.
    HiBus,

    /// Agreement to follow the examiner's hand.
    YesFollow,

    /// Pain yell, also the dazed verbal greeting.
    Ahhh,

    /// Placeholder clip for responses not yet recorded.
    SdTest1,

    /// Plain greeting, used by the bench checkout routine.
    Hello,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing a unified API for the audio playback equipment.
pub trait AudioPlayer {
    /// Start playing the given clip. Fire and forget: playback continues
    /// while the control loop keeps running.
    fn play(&mut self, clip: AudioClip);

    /// Returns true while a clip is still playing.
    fn is_playing(&self) -> bool;

    /// Cyclic update hook. Real players ignore this; simulated players use
    /// it to advance playback against the session clock.
    fn update(&mut self, _now_ms: u64) {}
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AudioClip {
    /// The file name of the clip on the player's SD card.
    pub fn file_name(&self) -> &'static str {
        match self {
            AudioClip::HiBus => "HIBUS.WAV",
            AudioClip::YesFollow => "YESFOLOW.WAV",
            AudioClip::Ahhh => "AHHH.WAV",
            AudioClip::SdTest1 => "SDTEST1.WAV",
            AudioClip::Hello => "HELLO.WAV",
        }
    }
}
