//! Single jaw half state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::JawHalfConfig;
use crate::motion::{dir_toward, reached, Side, StepState};
use crate::servo_ctrl::{ServoCtrl, ServoFamily};

use util::maths::{clamp, lin_map};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Limits the vertical stepping primitives travel toward.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum JawStepTarget {
    Open,
    Closed,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One side of the jaw: a vertical hinge servo and a horizontal thrust
/// servo.
pub struct JawHalf {
    side: Side,

    cfg: JawHalfConfig,
    family: ServoFamily,

    /// Vertical stepping command, degrees.
    cmd_vert_deg: f64,
    step: StepState<JawStepTarget>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JawHalf {
    pub fn new(side: Side, cfg: JawHalfConfig, family: ServoFamily) -> Self {
        Self {
            side,
            cfg,
            family,
            cmd_vert_deg: cfg.vert_close_deg,
            step: StepState::Uninitialised,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Move the vertical servo to the given angle.
    pub fn move_vert_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.vert_channel, deg, self.family);
    }

    /// Move the horizontal servo to the given angle.
    pub fn move_hor_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.hor_channel, deg, self.family);
    }

    /// Open this half to the given percentage of the calibrated aperture.
    pub fn open_percent(&mut self, percent: f64, servo: &mut ServoCtrl) {
        let percent = clamp(&percent, &0.0, &100.0);
        let deg = lin_map(
            (0.0, 100.0),
            (self.cfg.vert_close_deg, self.cfg.vert_open_deg),
            percent,
        );
        self.move_vert_to(deg, servo);
    }

    /// Thrust this half forward by the given percentage of the calibrated
    /// travel.
    pub fn thrust_percent(&mut self, percent: f64, servo: &mut ServoCtrl) {
        let percent = clamp(&percent, &0.0, &100.0);
        let deg = lin_map(
            (0.0, 100.0),
            (self.cfg.hor_back_deg, self.cfg.hor_forward_deg),
            percent,
        );
        self.move_hor_to(deg, servo);
    }

    /// Step the hinge toward the open limit. True once the command has
    /// reached or passed it.
    pub fn step_vert_open(
        &mut self,
        incr_deg: f64,
        min_interval_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(JawStepTarget::Open, incr_deg, min_interval_ms, now_ms, servo)
    }

    /// Step the hinge toward the closed limit.
    pub fn step_vert_close(
        &mut self,
        incr_deg: f64,
        min_interval_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(
            JawStepTarget::Closed,
            incr_deg,
            min_interval_ms,
            now_ms,
            servo,
        )
    }

    fn step_toward(
        &mut self,
        target: JawStepTarget,
        incr_deg: f64,
        min_interval_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        match self.step {
            StepState::Uninitialised => {
                // A sequence is assumed to begin at the far end of travel
                self.cmd_vert_deg = self.limit(target.opposite());
                self.step.retarget(target, now_ms);
            }
            StepState::SteppingToward { target: current, .. } if current != target => {
                debug_assert!(
                    self.arrived(current),
                    "jaw stepping retargeted before the previous sequence arrived"
                );
                self.step.retarget(target, now_ms);
            }
            _ => (),
        }

        let cmd = self.cmd_vert_deg;
        self.move_vert_to(cmd, servo);

        if self.arrived(target) {
            return true;
        }

        if self.step.due(now_ms, min_interval_ms) {
            self.cmd_vert_deg += self.dir(target) * incr_deg;
            self.step.mark(now_ms);
        }

        false
    }

    fn arrived(&self, target: JawStepTarget) -> bool {
        reached(self.cmd_vert_deg, self.limit(target), self.dir(target))
    }

    fn limit(&self, target: JawStepTarget) -> f64 {
        match target {
            JawStepTarget::Open => self.cfg.vert_open_deg,
            JawStepTarget::Closed => self.cfg.vert_close_deg,
        }
    }

    /// Direction of vertical travel toward a target, derived from the
    /// calibration (the sides are mirrored).
    fn dir(&self, target: JawStepTarget) -> f64 {
        dir_toward(self.limit(target.opposite()), self.limit(target))
    }
}

impl JawStepTarget {
    /// The limit a sequence toward this target is assumed to start from.
    pub fn opposite(self) -> JawStepTarget {
        match self {
            JawStepTarget::Open => JawStepTarget::Closed,
            JawStepTarget::Closed => JawStepTarget::Open,
        }
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

    fn left_cfg() -> JawHalfConfig {
        JawHalfConfig {
            vert_channel: 12,
            hor_channel: 14,
            vert_close_deg: 165.0,
            vert_open_deg: 130.0,
            hor_back_deg: 120.0,
            hor_forward_deg: 80.0,
        }
    }

    fn right_cfg() -> JawHalfConfig {
        JawHalfConfig {
            vert_channel: 13,
            hor_channel: 15,
            vert_close_deg: 34.0,
            vert_open_deg: 80.0,
            hor_back_deg: 60.0,
            hor_forward_deg: 102.0,
        }
    }

    #[test]
    fn test_open_percent_mirrored_sides() {
        let mut servo = test_servo_ctrl();
        let mut left = JawHalf::new(Side::Left, left_cfg(), ServoFamily::TowerPro);
        let mut right = JawHalf::new(Side::Right, right_cfg(), ServoFamily::TowerPro);

        // Opening lowers the left angle and raises the right one
        left.open_percent(0.0, &mut servo);
        right.open_percent(0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(12), Some(165.0));
        assert_eq!(servo.last_cmd_deg(13), Some(34.0));

        left.open_percent(100.0, &mut servo);
        right.open_percent(100.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(12), Some(130.0));
        assert_eq!(servo.last_cmd_deg(13), Some(80.0));
    }

    #[test]
    fn test_thrust_percent() {
        let mut servo = test_servo_ctrl();
        let mut left = JawHalf::new(Side::Left, left_cfg(), ServoFamily::TowerPro);

        left.thrust_percent(0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(14), Some(120.0));

        left.thrust_percent(50.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(14), Some(100.0));

        left.thrust_percent(100.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(14), Some(80.0));
    }

    #[test]
    fn test_step_open_arrives() {
        let mut servo = test_servo_ctrl();
        let mut left = JawHalf::new(Side::Left, left_cfg(), ServoFamily::TowerPro);

        let mut now = 0;
        let mut done = false;
        // 35 degrees of travel at 3 degrees per 100ms step
        for _ in 0..20 {
            now += 110;
            done = left.step_vert_open(3.0, 100, now, &mut servo);
        }

        assert!(done);
        let cmd = servo.last_cmd_deg(12).unwrap();
        assert!(cmd <= 130.0);
    }
}
