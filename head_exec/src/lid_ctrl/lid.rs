//! Single eyelid state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::LidConfig;
use crate::motion::{Side, StepState};
use crate::servo_ctrl::{ServoCtrl, ServoFamily};

use util::maths::{clamp, lin_map};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Direction of the lid stepping cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LidStepTarget {
    Opening,
    Closing,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One eyelid: a top and a bottom servo driven from a single aperture
/// percentage.
pub struct Eyelid {
    side: Side,

    cfg: LidConfig,
    family: ServoFamily,

    /// Aperture command for the stepping cycle, percent.
    cmd_percent: f64,
    step: StepState<LidStepTarget>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eyelid {
    pub fn new(side: Side, cfg: LidConfig, family: ServoFamily) -> Self {
        Self {
            side,
            cfg,
            family,
            cmd_percent: 0.0,
            step: StepState::Uninitialised,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Move the top lid servo to the given angle.
    pub fn move_top_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.top_channel, deg, self.family);
    }

    /// Move the bottom lid servo to the given angle.
    pub fn move_bot_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.bot_channel, deg, self.family);
    }

    /// Open the lid to the given percentage of its calibrated aperture.
    ///
    /// The percentage is clamped to 0..=100 and interpolated onto each
    /// servo's closed/open angles.
    pub fn open_percent(&mut self, percent: f64, servo: &mut ServoCtrl) {
        let percent = clamp(&percent, &0.0, &100.0);

        let top = lin_map(
            (0.0, 100.0),
            (self.cfg.top_close_deg, self.cfg.top_open_deg),
            percent,
        );
        let bot = lin_map(
            (0.0, 100.0),
            (self.cfg.bot_close_deg, self.cfg.bot_open_deg),
            percent,
        );

        self.move_top_to(top, servo);
        self.move_bot_to(bot, servo);
    }

    /// Close the lid fully.
    pub fn close(&mut self, servo: &mut ServoCtrl) {
        let (t, b) = (self.cfg.top_close_deg, self.cfg.bot_close_deg);
        self.move_top_to(t, servo);
        self.move_bot_to(b, servo);
    }

    /// Open the lid fully.
    pub fn open(&mut self, servo: &mut ServoCtrl) {
        let (t, b) = (self.cfg.top_open_deg, self.cfg.bot_open_deg);
        self.move_top_to(t, servo);
        self.move_bot_to(b, servo);
    }

    /// Slowly cycle the lid between closed and `open_percent`, advancing by
    /// `incr_open` while opening and `incr_close` while closing.
    pub fn step_open_close(
        &mut self,
        open_percent: f64,
        incr_open: f64,
        incr_close: f64,
        min_interval_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        if let StepState::Uninitialised = self.step {
            // The cycle is assumed to begin with the lid closed
            self.cmd_percent = 0.0;
            self.step.retarget(LidStepTarget::Opening, now_ms);
        }

        let cmd = self.cmd_percent;
        self.open_percent(cmd, servo);

        let target = match self.step.target() {
            Some(t) => t,
            None => return,
        };

        match target {
            LidStepTarget::Opening => {
                if self.cmd_percent >= open_percent {
                    self.step.retarget(LidStepTarget::Closing, now_ms);
                } else if self.step.due(now_ms, min_interval_ms) {
                    self.cmd_percent += incr_open;
                    self.step.mark(now_ms);
                }
            }
            LidStepTarget::Closing => {
                if self.cmd_percent <= 0.0 {
                    self.step.retarget(LidStepTarget::Opening, now_ms);
                } else if self.step.due(now_ms, min_interval_ms) {
                    self.cmd_percent -= incr_close;
                    self.step.mark(now_ms);
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

    fn left_cfg() -> LidConfig {
        LidConfig {
            top_channel: 1,
            bot_channel: 0,
            top_close_deg: 135.0,
            top_open_deg: 75.0,
            bot_close_deg: 97.0,
            bot_open_deg: 113.0,
        }
    }

    fn right_cfg() -> LidConfig {
        LidConfig {
            top_channel: 3,
            bot_channel: 2,
            top_close_deg: 60.0,
            top_open_deg: 125.0,
            bot_close_deg: 133.0,
            bot_open_deg: 115.0,
        }
    }

    #[test]
    fn test_open_percent_endpoints() {
        let mut servo = test_servo_ctrl();
        let mut left = Eyelid::new(Side::Left, left_cfg(), ServoFamily::Turnigy);
        let mut right = Eyelid::new(Side::Right, right_cfg(), ServoFamily::Turnigy);

        left.open_percent(0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(135.0));
        assert_eq!(servo.last_cmd_deg(0), Some(97.0));

        left.open_percent(100.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(75.0));
        assert_eq!(servo.last_cmd_deg(0), Some(113.0));

        right.open_percent(0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(3), Some(60.0));
        assert_eq!(servo.last_cmd_deg(2), Some(133.0));

        right.open_percent(100.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(3), Some(125.0));
        assert_eq!(servo.last_cmd_deg(2), Some(115.0));
    }

    #[test]
    fn test_open_percent_clamps() {
        let mut servo = test_servo_ctrl();
        let mut left = Eyelid::new(Side::Left, left_cfg(), ServoFamily::Turnigy);

        left.open_percent(150.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(75.0));

        left.open_percent(-10.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(135.0));
    }

    #[test]
    fn test_step_cycle_reverses_at_limits() {
        let mut servo = test_servo_ctrl();
        let mut left = Eyelid::new(Side::Left, left_cfg(), ServoFamily::Turnigy);

        let mut now = 0;
        let mut reached_open = false;
        let mut closed_after_open = false;

        for _ in 0..100 {
            now += 10;
            left.step_open_close(60.0, 10.0, 10.0, 5, now, &mut servo);

            if left.cmd_percent >= 60.0 {
                reached_open = true;
            }
            if reached_open && left.cmd_percent <= 0.0 {
                closed_after_open = true;
            }
        }

        assert!(reached_open);
        assert!(closed_after_open);
    }
}
