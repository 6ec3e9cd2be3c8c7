//! Paired eyebrow coordinator

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::{Eyebrow, Params};
use crate::motion::Side;
use crate::servo_ctrl::ServoCtrl;

use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of the two-pose brow cycles.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BrowCyclePhase {
    Raised,
    Lowered,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Both eyebrows, driven as one unit.
pub struct Eyebrows {
    params: Params,

    brow_l: Eyebrow,
    brow_r: Eyebrow,

    cycle_phase: BrowCyclePhase,
    cycle_last_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eyebrows {
    /// Initialise the eyebrow pair from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::new(util::params::load(params_path)?))
    }

    pub fn new(params: Params) -> Self {
        let brow_l = Eyebrow::new(Side::Left, params.left, params.family);
        let brow_r = Eyebrow::new(Side::Right, params.right, params.family);

        Self {
            params,
            brow_l,
            brow_r,
            cycle_phase: BrowCyclePhase::Raised,
            cycle_last_ms: 0,
        }
    }

    // ---- SETPOINT MOVES ----

    /// Lower both brows to neutral.
    pub fn neutral_both(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.neutral(servo);
        self.brow_l.neutral(servo);
    }

    /// Raise both brows the regular height.
    pub fn reg_raise_both(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.reg_raise(servo);
        self.brow_l.reg_raise(servo);
    }

    /// Raise both brows a little.
    pub fn slight_raise_both(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.slight_raise(servo);
        self.brow_l.slight_raise(servo);
    }

    /// Furrow both brows.
    pub fn furrow_both(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.furrow(servo);
        self.brow_l.furrow(servo);
    }

    /// Raise the left brow, furrow the right.
    pub fn raise_left_furrow_right(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.furrow(servo);
        self.brow_l.reg_raise(servo);
    }

    /// Raise the right brow, furrow the left.
    pub fn raise_right_furrow_left(&mut self, servo: &mut ServoCtrl) {
        self.brow_r.reg_raise(servo);
        self.brow_l.furrow(servo);
    }

    // ---- TIMED COMBOS ----

    /// Hold the regular raise, dip into a furrow, return.
    pub fn raise_and_furrow(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        match self.cycle_phase {
            BrowCyclePhase::Raised => {
                self.reg_raise_both(servo);
                if now_ms > self.cycle_last_ms + self.params.time_between_furrow_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = BrowCyclePhase::Lowered;
                }
            }
            BrowCyclePhase::Lowered => {
                self.furrow_both(servo);
                if now_ms > self.cycle_last_ms + self.params.furrow_pause_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = BrowCyclePhase::Raised;
                }
            }
        }
    }

    /// Hold the regular raise, settle to the slight raise, return.
    pub fn raise_and_slight_raise(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        match self.cycle_phase {
            BrowCyclePhase::Raised => {
                self.reg_raise_both(servo);
                if now_ms > self.cycle_last_ms + self.params.time_between_furrow_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = BrowCyclePhase::Lowered;
                }
            }
            BrowCyclePhase::Lowered => {
                self.slight_raise_both(servo);
                if now_ms > self.cycle_last_ms + self.params.slight_pause_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = BrowCyclePhase::Raised;
                }
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::brow_ctrl::BrowConfig;
    use crate::servo_ctrl::{Params as ServoParams, PulseRange, ServoFamily};
    use eqpt_if::sim::SimServoBoard;
    use eqpt_if::ServoDriver;

    fn test_servo_ctrl() -> ServoCtrl {
        let boards: Vec<Box<dyn ServoDriver>> = vec![Box::new(SimServoBoard::new())];
        ServoCtrl::new(
            ServoParams {
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
            },
            boards,
        )
    }

    pub(crate) fn test_params() -> Params {
        Params {
            family: ServoFamily::Turnigy,
            furrow_pause_ms: 250,
            slight_pause_ms: 550,
            time_between_furrow_ms: 4000,
            left: BrowConfig {
                medial_channel: 8,
                lateral_channel: 9,
                neutral_deg: (72.0, 144.0),
                furrow_deg: (85.0, 140.0),
                reg_raise_deg: (0.0, 108.0),
                slight_raise_deg: (37.0, 132.0),
            },
            right: BrowConfig {
                medial_channel: 10,
                lateral_channel: 11,
                neutral_deg: (50.0, 10.0),
                furrow_deg: (37.0, 14.0),
                reg_raise_deg: (112.0, 46.0),
                slight_raise_deg: (85.0, 22.0),
            },
        }
    }

    #[test]
    fn test_asymmetric_poses() {
        let mut servo = test_servo_ctrl();
        let mut brows = Eyebrows::new(test_params());

        brows.raise_right_furrow_left(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(85.0)); // left medial furrow
        assert_eq!(servo.last_cmd_deg(10), Some(112.0)); // right medial raise

        brows.raise_left_furrow_right(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(0.0)); // left medial raise
        assert_eq!(servo.last_cmd_deg(10), Some(37.0)); // right medial furrow
    }

    #[test]
    fn test_raise_and_furrow_cycle() {
        let mut servo = test_servo_ctrl();
        let mut brows = Eyebrows::new(test_params());

        brows.raise_and_furrow(100, &mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(0.0));

        // Past the raised hold: furrow
        brows.raise_and_furrow(4101, &mut servo);
        brows.raise_and_furrow(4102, &mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(85.0));

        // Past the furrow pause: raised again
        brows.raise_and_furrow(4353, &mut servo);
        brows.raise_and_furrow(4354, &mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(0.0));
    }
}
