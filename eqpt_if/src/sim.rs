//! # Simulated Equipment
//!
//! In-memory implementations of the equipment contracts, used when running
//! the software without the bench rig attached and by the unit tests. Each
//! simulation records the demands issued to it so tests can assert on the
//! exact commands a state machine produced.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use crate::eqpt::analog::{AnalogChannel, AnalogReader};
use crate::eqpt::audio::{AudioClip, AudioPlayer};
use crate::eqpt::cam::{CamBlock, CameraClient};
use crate::eqpt::servo::{ServoDriver, ServoError, CHANNELS_PER_BOARD, MAX_PULSE_COUNT};
use crate::eqpt::sol::{SolenoidDriver, SolenoidId};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A simulated 16 channel servo driver board which records the last pulse
/// count commanded on each channel.
#[derive(Debug, Default)]
pub struct SimServoBoard {
    pulses: [Option<u16>; CHANNELS_PER_BOARD],
}

/// A simulated audio player.
///
/// Playback length is counted in calls to [`AudioPlayer::update`], so tests
/// control exactly how many ticks a clip "plays" for.
#[derive(Debug)]
pub struct SimAudioPlayer {
    current: Option<AudioClip>,
    remaining_updates: u32,
    clip_updates: u32,
    history: Vec<AudioClip>,
}

/// A simulated set of analog inputs with scriptable values.
#[derive(Debug, Default)]
pub struct SimAnalog {
    values: HashMap<AnalogChannel, u16>,
}

/// A simulated block camera reporting a scriptable set of blocks.
#[derive(Debug, Default)]
pub struct SimCamera {
    blocks: Vec<CamBlock>,
}

/// A simulated pair of pulse solenoids.
#[derive(Debug, Default)]
pub struct SimSolenoids {
    states: HashMap<SolenoidId, bool>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimServoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last pulse count commanded on the given channel, or `None` if the
    /// channel has never been driven.
    pub fn pulse(&self, channel: u8) -> Option<u16> {
        self.pulses.get(channel as usize).copied().flatten()
    }
}

impl ServoDriver for SimServoBoard {
    fn set_pulse(&mut self, channel: u8, pulse_count: u16) -> Result<(), ServoError> {
        if channel as usize >= CHANNELS_PER_BOARD {
            return Err(ServoError::InvalidChannel(channel));
        }
        if pulse_count > MAX_PULSE_COUNT {
            return Err(ServoError::InvalidPulseCount(pulse_count));
        }

        self.pulses[channel as usize] = Some(pulse_count);
        Ok(())
    }
}

impl SimAudioPlayer {
    /// Create a player whose clips play for `clip_updates` update calls.
    pub fn new(clip_updates: u32) -> Self {
        Self {
            current: None,
            remaining_updates: 0,
            clip_updates,
            history: Vec::new(),
        }
    }

    /// Stop the current clip immediately.
    pub fn finish(&mut self) {
        self.current = None;
        self.remaining_updates = 0;
    }

    /// Every clip started since construction, oldest first.
    pub fn history(&self) -> &[AudioClip] {
        &self.history
    }
}

impl Default for SimAudioPlayer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl AudioPlayer for SimAudioPlayer {
    fn play(&mut self, clip: AudioClip) {
        self.current = Some(clip);
        self.remaining_updates = self.clip_updates;
        self.history.push(clip);
    }

    fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    fn update(&mut self, _now_ms: u64) {
        if self.current.is_some() {
            if self.remaining_updates == 0 {
                self.current = None;
            } else {
                self.remaining_updates -= 1;
            }
        }
    }
}

impl SimAnalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the value returned by subsequent reads of the channel.
    pub fn set(&mut self, channel: AnalogChannel, value: u16) {
        self.values.insert(channel, value);
    }
}

impl AnalogReader for SimAnalog {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        self.values.get(&channel).copied().unwrap_or(0)
    }
}

impl SimCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the blocks reported by subsequent frames.
    pub fn set_blocks(&mut self, blocks: Vec<CamBlock>) {
        self.blocks = blocks;
    }

    /// Report an empty frame from now on.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

impl CameraClient for SimCamera {
    fn get_blocks(&mut self) -> Vec<CamBlock> {
        self.blocks.clone()
    }
}

impl SimSolenoids {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the given solenoid is currently energised.
    pub fn is_on(&self, id: SolenoidId) -> bool {
        self.states.get(&id).copied().unwrap_or(false)
    }
}

impl SolenoidDriver for SimSolenoids {
    fn set(&mut self, id: SolenoidId, energised: bool) {
        self.states.insert(id, energised);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sim_board_records_pulses() {
        let mut board = SimServoBoard::new();
        assert_eq!(board.pulse(3), None);

        board.set_pulse(3, 350).unwrap();
        assert_eq!(board.pulse(3), Some(350));

        assert!(matches!(
            board.set_pulse(16, 100),
            Err(ServoError::InvalidChannel(16))
        ));
        assert!(matches!(
            board.set_pulse(0, 4096),
            Err(ServoError::InvalidPulseCount(4096))
        ));
    }

    #[test]
    fn test_sim_audio_lifecycle() {
        let mut audio = SimAudioPlayer::new(2);
        assert!(!audio.is_playing());

        audio.play(AudioClip::Hello);
        assert!(audio.is_playing());

        audio.update(0);
        audio.update(0);
        assert!(audio.is_playing());
        audio.update(0);
        assert!(!audio.is_playing());

        assert_eq!(audio.history(), &[AudioClip::Hello]);
    }
}
