//! Single eyebrow state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::BrowConfig;
use crate::motion::Side;
use crate::servo_ctrl::{ServoCtrl, ServoFamily};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The calibrated poses of an eyebrow.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BrowPose {
    Neutral,
    Furrow,
    RegRaise,
    SlightRaise,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One eyebrow: a medial and a lateral servo.
pub struct Eyebrow {
    side: Side,

    cfg: BrowConfig,
    family: ServoFamily,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eyebrow {
    pub fn new(side: Side, cfg: BrowConfig, family: ServoFamily) -> Self {
        Self { side, cfg, family }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Move the brow to one of its calibrated poses.
    pub fn pose(&mut self, pose: BrowPose, servo: &mut ServoCtrl) {
        let (medial, lateral) = match pose {
            BrowPose::Neutral => self.cfg.neutral_deg,
            BrowPose::Furrow => self.cfg.furrow_deg,
            BrowPose::RegRaise => self.cfg.reg_raise_deg,
            BrowPose::SlightRaise => self.cfg.slight_raise_deg,
        };

        servo.drive(self.cfg.medial_channel, medial, self.family);
        servo.drive(self.cfg.lateral_channel, lateral, self.family);
    }

    /// Lower the brow to neutral.
    pub fn neutral(&mut self, servo: &mut ServoCtrl) {
        self.pose(BrowPose::Neutral, servo);
    }

    /// Furrow the brow.
    pub fn furrow(&mut self, servo: &mut ServoCtrl) {
        self.pose(BrowPose::Furrow, servo);
    }

    /// Raise the brow the regular height.
    pub fn reg_raise(&mut self, servo: &mut ServoCtrl) {
        self.pose(BrowPose::RegRaise, servo);
    }

    /// Raise the brow a little.
    pub fn slight_raise(&mut self, servo: &mut ServoCtrl) {
        self.pose(BrowPose::SlightRaise, servo);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::servo_ctrl::{Params as ServoParams, PulseRange};
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

    #[test]
    fn test_poses_drive_both_servos() {
        let mut servo = test_servo_ctrl();
        let cfg = BrowConfig {
            medial_channel: 8,
            lateral_channel: 9,
            neutral_deg: (72.0, 144.0),
            furrow_deg: (85.0, 140.0),
            reg_raise_deg: (0.0, 108.0),
            slight_raise_deg: (37.0, 132.0),
        };
        let mut brow = Eyebrow::new(Side::Left, cfg, ServoFamily::Turnigy);

        brow.neutral(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(72.0));
        assert_eq!(servo.last_cmd_deg(9), Some(144.0));

        brow.furrow(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(85.0));
        assert_eq!(servo.last_cmd_deg(9), Some(140.0));

        brow.reg_raise(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(0.0));

        brow.slight_raise(&mut servo);
        assert_eq!(servo.last_cmd_deg(8), Some(37.0));
    }
}
