//! Paired eyelid coordinator

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{Eyelid, Params};
use crate::motion::Side;
use crate::servo_ctrl::ServoCtrl;

use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of the blink/wink cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BlinkPhase {
    Open,
    Closed,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Both eyelids, driven as one unit.
pub struct Eyelids {
    params: Params,

    lid_l: Eyelid,
    lid_r: Eyelid,

    blink_phase: BlinkPhase,
    blink_last_ms: u64,

    /// Interval to the next idle blink, redrawn after every blink.
    idle_interval_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eyelids {
    /// Initialise the eyelid pair from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::new(util::params::load(params_path)?))
    }

    pub fn new(params: Params) -> Self {
        let lid_l = Eyelid::new(Side::Left, params.left, params.family);
        let lid_r = Eyelid::new(Side::Right, params.right, params.family);
        let idle_interval_ms = Self::random_idle_interval(&params);

        Self {
            params,
            lid_l,
            lid_r,
            blink_phase: BlinkPhase::Open,
            blink_last_ms: 0,
            idle_interval_ms,
        }
    }

    // ---- SETPOINT MOVES ----

    /// Open both lids to the given percentage.
    pub fn open_percent_both(&mut self, percent: f64, servo: &mut ServoCtrl) {
        self.lid_r.open_percent(percent, servo);
        self.lid_l.open_percent(percent, servo);
    }

    /// Fully open both lids.
    pub fn open_both(&mut self, servo: &mut ServoCtrl) {
        self.lid_r.open(servo);
        self.lid_l.open(servo);
    }

    /// Fully close both lids.
    pub fn close_both(&mut self, servo: &mut ServoCtrl) {
        self.lid_r.close(servo);
        self.lid_l.close(servo);
    }

    /// Close the lid on the given side, fully open the other.
    pub fn wince(&mut self, side: Side, servo: &mut ServoCtrl) {
        match side {
            Side::Left => {
                self.lid_r.open(servo);
                self.lid_l.close(servo);
            }
            Side::Right => {
                self.lid_r.close(servo);
                self.lid_l.open(servo);
            }
        }
    }

    // ---- BLINKING ----

    /// Generic blink: hold `percent_open` for `time_btwn_blink_ms`, close
    /// for `pause_ms`, repeat.
    pub fn blink(
        &mut self,
        time_btwn_blink_ms: u64,
        pause_ms: u64,
        percent_open: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        match self.blink_phase {
            BlinkPhase::Open => {
                self.open_percent_both(percent_open, servo);
                if now_ms > self.blink_last_ms + time_btwn_blink_ms {
                    self.blink_last_ms = now_ms;
                    self.blink_phase = BlinkPhase::Closed;
                }
            }
            BlinkPhase::Closed => {
                self.open_percent_both(0.0, servo);
                if now_ms > self.blink_last_ms + pause_ms {
                    self.blink_last_ms = now_ms;
                    // Redraw the idle interval so idle blinking never looks
                    // periodic
                    self.idle_interval_ms = Self::random_idle_interval(&self.params);
                    self.blink_phase = BlinkPhase::Open;
                }
            }
        }
    }

    /// Average blink for an alert patient, fully open.
    pub fn blink_eyes(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_blink_ms, self.params.blink_pause_ms);
        self.blink(t, p, 100.0, now_ms, servo);
    }

    /// Slow blink at half aperture, for a patient in a haze.
    pub fn lazy_blink_eyes(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (
            self.params.time_between_lazy_blink_ms,
            self.params.lazy_blink_pause_ms,
        );
        self.blink(t, p, 50.0, now_ms, servo);
    }

    /// Long even hold at open and closed, for a dazed patient.
    pub fn long_close(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let t = self.params.long_close_ms;
        self.blink(t, t, 100.0, now_ms, servo);
    }

    /// Quick blinks wide open, for a nervous or hyper alert patient.
    pub fn fast_blink(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (
            self.params.time_between_fast_blink_ms,
            self.params.fast_blink_pause_ms,
        );
        self.blink(t, p, 100.0, now_ms, servo);
    }

    /// Blink with a random interval between blinks, the closest to how a
    /// real alert human blinks.
    pub fn idle_blink(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let interval = self.idle_interval_ms;
        trace!("idle blink interval: {} ms", interval);
        let pause = self.params.blink_pause_ms;
        self.blink(interval, pause, 100.0, now_ms, servo);
    }

    // ---- WINKING ----

    /// Generic wink: as blink, but only the given side's lid closes.
    pub fn wink(
        &mut self,
        side: Side,
        time_btwn_blink_ms: u64,
        pause_ms: u64,
        percent_open: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        match self.blink_phase {
            BlinkPhase::Open => {
                self.open_percent_both(percent_open, servo);
                if now_ms > self.blink_last_ms + time_btwn_blink_ms {
                    self.blink_last_ms = now_ms;
                    self.blink_phase = BlinkPhase::Closed;
                }
            }
            BlinkPhase::Closed => {
                match side {
                    Side::Left => self.lid_l.close(servo),
                    Side::Right => self.lid_r.close(servo),
                }
                if now_ms > self.blink_last_ms + pause_ms {
                    self.blink_last_ms = now_ms;
                    self.blink_phase = BlinkPhase::Open;
                }
            }
        }
    }

    /// Wink the left eye on the standard blink timing.
    pub fn wink_left(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_blink_ms, self.params.blink_pause_ms);
        self.wink(Side::Left, t, p, 100.0, now_ms, servo);
    }

    /// Wink the right eye on the standard blink timing.
    pub fn wink_right(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_blink_ms, self.params.blink_pause_ms);
        self.wink(Side::Right, t, p, 100.0, now_ms, servo);
    }

    // ---- STEPPING ----

    /// Step both lids through an open/close cycle.
    pub fn step_lids_open_close(
        &mut self,
        percent: f64,
        incr_open: f64,
        incr_close: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        let interval = self.params.step_interval_ms;
        self.lid_r
            .step_open_close(percent, incr_open, incr_close, interval, now_ms, servo);
        self.lid_l
            .step_open_close(percent, incr_open, incr_close, interval, now_ms, servo);
    }

    /// Slowest possible lid cycle, opening to 60 percent. For levels of
    /// consciousness below alert.
    pub fn step_lids_very_slow(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        self.step_lids_open_close(60.0, 1.0, 1.0, now_ms, servo);
    }

    /// Sleepy lid cycle: opens quickly to fully open, drifts closed slowly.
    pub fn step_lids_sleepy(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        self.step_lids_open_close(100.0, 10.0, 1.0, now_ms, servo);
    }

    // ---- PRIVATE ----

    fn random_idle_interval(params: &Params) -> u64 {
        rand::random_range(params.idle_blink_min_ms..params.idle_blink_max_ms)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::lid_ctrl::LidConfig;
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
            step_interval_ms: 5,
            blink_pause_ms: 150,
            time_between_blink_ms: 5000,
            lazy_blink_pause_ms: 350,
            time_between_lazy_blink_ms: 3000,
            fast_blink_pause_ms: 100,
            time_between_fast_blink_ms: 1500,
            long_close_ms: 2000,
            idle_blink_min_ms: 250,
            idle_blink_max_ms: 5000,
            left: LidConfig {
                top_channel: 1,
                bot_channel: 0,
                top_close_deg: 135.0,
                top_open_deg: 75.0,
                bot_close_deg: 97.0,
                bot_open_deg: 113.0,
            },
            right: LidConfig {
                top_channel: 3,
                bot_channel: 2,
                top_close_deg: 60.0,
                top_open_deg: 125.0,
                bot_close_deg: 133.0,
                bot_open_deg: 115.0,
            },
        }
    }

    #[test]
    fn test_blink_cycle() {
        let mut servo = test_servo_ctrl();
        let mut lids = Eyelids::new(test_params());

        // Open phase holds the requested aperture
        lids.blink(1000, 150, 100.0, 500, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(75.0));

        // Past the interval: transition, then the next tick drives closed
        lids.blink(1000, 150, 100.0, 1001, &mut servo);
        lids.blink(1000, 150, 100.0, 1002, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(135.0));

        // Past the pause: back open
        lids.blink(1000, 150, 100.0, 1153, &mut servo);
        lids.blink(1000, 150, 100.0, 1154, &mut servo);
        assert_eq!(servo.last_cmd_deg(1), Some(75.0));
    }

    #[test]
    fn test_idle_blink_interval_in_bounds() {
        let params = test_params();
        for _ in 0..50 {
            let interval = Eyelids::random_idle_interval(&params);
            assert!(interval >= params.idle_blink_min_ms);
            assert!(interval < params.idle_blink_max_ms);
        }
    }

    #[test]
    fn test_wince_left() {
        let mut servo = test_servo_ctrl();
        let mut lids = Eyelids::new(test_params());

        lids.wince(Side::Left, &mut servo);

        // Left lid closed, right lid open
        assert_eq!(servo.last_cmd_deg(1), Some(135.0));
        assert_eq!(servo.last_cmd_deg(0), Some(97.0));
        assert_eq!(servo.last_cmd_deg(3), Some(125.0));
        assert_eq!(servo.last_cmd_deg(2), Some(115.0));
    }

    #[test]
    fn test_wink_left_closes_only_left() {
        let mut servo = test_servo_ctrl();
        let mut lids = Eyelids::new(test_params());

        // Get into the closed phase of the wink
        lids.wink(Side::Left, 100, 500, 100.0, 50, &mut servo);
        lids.wink(Side::Left, 100, 500, 100.0, 151, &mut servo);
        lids.wink(Side::Left, 100, 500, 100.0, 152, &mut servo);

        // Left closed, right still at the open aperture
        assert_eq!(servo.last_cmd_deg(1), Some(135.0));
        assert_eq!(servo.last_cmd_deg(3), Some(125.0));
    }
}
