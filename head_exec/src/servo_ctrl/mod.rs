//! # Actuator position mapper
//!
//! Converts a logical servo angle into a pulse length count for the fitted
//! driver boards. Each mechanical channel is identified by a global index;
//! indices are routed to boards in groups of sixteen. The angle to pulse map
//! is linear, with the pulse range depending on which family of servo is
//! fitted to the channel.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::warn;

// Internal
pub use params::*;

use eqpt_if::{ServoDriver, CHANNELS_PER_BOARD};
use util::maths::{clamp, lin_map};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Total number of global servo channels across all fitted boards.
pub const NUM_CHANNELS: usize = 64;

/// Logical angle range of every servo, in degrees.
pub const ANGLE_RANGE_DEG: (f64, f64) = (0.0, 180.0);

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The servo controller: owns the driver boards and maps logical angles onto
/// them.
///
/// The last commanded angle of every channel is retained so that callers
/// (and tests) can observe what each mechanism was last told to do.
pub struct ServoCtrl {
    params: Params,

    boards: Vec<Box<dyn ServoDriver>>,

    last_cmd_deg: [Option<f64>; NUM_CHANNELS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ServoCtrl {
    /// Create a new servo controller over the given boards.
    ///
    /// Board `n` serves global channels `16 * n ..= 16 * n + 15`.
    pub fn new(params: Params, boards: Vec<Box<dyn ServoDriver>>) -> Self {
        Self {
            params,
            boards,
            last_cmd_deg: [None; NUM_CHANNELS],
        }
    }

    /// Drive a global channel to the given logical angle.
    ///
    /// Angles outside 0..=180 degrees are clamped to the calibrated range
    /// before mapping. Driver errors are logged and swallowed: a missing
    /// board must never halt the control loop.
    pub fn drive(&mut self, channel: usize, angle_deg: f64, family: ServoFamily) {
        let pulse = self.params.to_pulse(angle_deg, family);

        let board_idx = channel / CHANNELS_PER_BOARD;
        let board_channel = (channel % CHANNELS_PER_BOARD) as u8;

        match self.boards.get_mut(board_idx) {
            Some(board) => {
                if let Err(e) = board.set_pulse(board_channel, pulse) {
                    warn!("Couldn't drive channel {}: {}", channel, e);
                    return;
                }
            }
            None => {
                warn!(
                    "Couldn't drive channel {}: no board fitted at index {}",
                    channel, board_idx
                );
                return;
            }
        }

        if channel < NUM_CHANNELS {
            self.last_cmd_deg[channel] = Some(angle_deg);
        }
    }

    /// The last angle commanded on the given channel, or `None` if the
    /// channel has never been driven.
    pub fn last_cmd_deg(&self, channel: usize) -> Option<f64> {
        self.last_cmd_deg.get(channel).copied().flatten()
    }
}

impl Params {
    /// Convert a logical angle into a pulse length count for the given servo
    /// family.
    ///
    /// The input is clamped to the logical angle range, so out of range
    /// demands saturate at the calibrated end stops.
    pub fn to_pulse(&self, angle_deg: f64, family: ServoFamily) -> u16 {
        let range = self.pulse_range(family);

        let angle = clamp(&angle_deg, &ANGLE_RANGE_DEG.0, &ANGLE_RANGE_DEG.1);

        lin_map(
            ANGLE_RANGE_DEG,
            (range.min_count as f64, range.max_count as f64),
            angle,
        )
        .round() as u16
    }

    /// The calibrated pulse count range of a servo family.
    pub fn pulse_range(&self, family: ServoFamily) -> PulseRange {
        match family {
            ServoFamily::Turnigy => self.turnigy,
            ServoFamily::TowerPro => self.towerpro,
            ServoFamily::Datan => self.datan,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::sim::SimServoBoard;

    fn test_params() -> Params {
        Params {
            turnigy: PulseRange {
                min_count: 100,
                max_count: 600,
            },
            towerpro: PulseRange {
                min_count: 250,
                max_count: 450,
            },
            datan: PulseRange {
                min_count: 90,
                max_count: 500,
            },
        }
    }

    fn test_ctrl(num_boards: usize) -> ServoCtrl {
        let boards: Vec<Box<dyn ServoDriver>> = (0..num_boards)
            .map(|_| Box::new(SimServoBoard::new()) as Box<dyn ServoDriver>)
            .collect();
        ServoCtrl::new(test_params(), boards)
    }

    #[test]
    fn test_to_pulse_linear() {
        let params = test_params();

        assert_eq!(params.to_pulse(0.0, ServoFamily::Turnigy), 100);
        assert_eq!(params.to_pulse(180.0, ServoFamily::Turnigy), 600);
        assert_eq!(params.to_pulse(90.0, ServoFamily::Turnigy), 350);

        assert_eq!(params.to_pulse(0.0, ServoFamily::TowerPro), 250);
        assert_eq!(params.to_pulse(180.0, ServoFamily::TowerPro), 450);

        assert_eq!(params.to_pulse(0.0, ServoFamily::Datan), 90);
        assert_eq!(params.to_pulse(180.0, ServoFamily::Datan), 500);
    }

    #[test]
    fn test_to_pulse_clamps_out_of_range() {
        let params = test_params();

        assert_eq!(params.to_pulse(-20.0, ServoFamily::Turnigy), 100);
        assert_eq!(params.to_pulse(200.0, ServoFamily::Turnigy), 600);
    }

    #[test]
    fn test_drive_records_command() {
        let mut ctrl = test_ctrl(2);

        ctrl.drive(5, 79.0, ServoFamily::Turnigy);
        assert_eq!(ctrl.last_cmd_deg(5), Some(79.0));
        assert_eq!(ctrl.last_cmd_deg(6), None);

        // Channels on the second board route there without error
        ctrl.drive(17, 100.0, ServoFamily::Datan);
        assert_eq!(ctrl.last_cmd_deg(17), Some(100.0));
    }

    #[test]
    fn test_drive_missing_board_is_non_fatal() {
        let mut ctrl = test_ctrl(1);

        // Board 3 is not fitted, the demand is dropped
        ctrl.drive(48, 90.0, ServoFamily::Turnigy);
        assert_eq!(ctrl.last_cmd_deg(48), None);
    }
}
