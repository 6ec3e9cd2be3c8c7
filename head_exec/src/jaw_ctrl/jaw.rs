//! Paired jaw coordinator

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{JawHalf, Params};
use crate::motion::Side;
use crate::servo_ctrl::ServoCtrl;

use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of the open/close and thrust/retract cycles.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum JawCyclePhase {
    Out,
    In,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The whole jaw, both halves driven in lockstep.
pub struct Jaw {
    params: Params,

    half_l: JawHalf,
    half_r: JawHalf,

    cycle_phase: JawCyclePhase,
    cycle_last_ms: u64,

    /// Completed open/close cycles of the counted hinge cyclers.
    hinge_cycle_count: u32,

    /// Completed forward/back cycles of the counted thrust cycler.
    thrust_cycle_count: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Jaw {
    /// Initialise the jaw from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::new(util::params::load(params_path)?))
    }

    pub fn new(params: Params) -> Self {
        let half_l = JawHalf::new(Side::Left, params.left, params.family);
        let half_r = JawHalf::new(Side::Right, params.right, params.family);

        Self {
            params,
            half_l,
            half_r,
            cycle_phase: JawCyclePhase::Out,
            cycle_last_ms: 0,
            hinge_cycle_count: 0,
            thrust_cycle_count: 0,
        }
    }

    // ---- SETPOINT MOVES ----

    /// Open the whole jaw to the given percentage.
    pub fn open_percent(&mut self, percent: f64, servo: &mut ServoCtrl) {
        self.half_l.open_percent(percent, servo);
        self.half_r.open_percent(percent, servo);
    }

    /// Thrust the whole jaw forward by the given percentage.
    pub fn thrust_percent(&mut self, percent: f64, servo: &mut ServoCtrl) {
        self.half_l.thrust_percent(percent, servo);
        self.half_r.thrust_percent(percent, servo);
    }

    /// Resting mouth: slightly open, no thrust.
    pub fn neutral_mouth(&mut self, servo: &mut ServoCtrl) {
        let p = self.params.neutral_open_percent;
        self.open_percent(p, servo);
        self.thrust_percent(0.0, servo);
    }

    /// Mouth fully closed, no thrust.
    pub fn close_mouth(&mut self, servo: &mut ServoCtrl) {
        self.open_percent(0.0, servo);
        self.thrust_percent(0.0, servo);
    }

    /// Mouth fully open with a little thrust.
    pub fn open_mouth(&mut self, servo: &mut ServoCtrl) {
        let t = self.params.open_thrust_percent;
        self.open_percent(100.0, servo);
        self.thrust_percent(t, servo);
    }

    // ---- TIMED CYCLERS ----

    /// Open and close the mouth between the full setpoints, `num_cycles`
    /// times. Returns true on the call after the final cycle completes and
    /// resets the counter, so the cycler is reusable.
    pub fn open_and_close(
        &mut self,
        time_open_ms: u64,
        time_close_ms: u64,
        num_cycles: u32,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        if self.hinge_cycle_count >= num_cycles {
            self.hinge_cycle_count = 0;
            return true;
        }

        match self.cycle_phase {
            JawCyclePhase::Out => {
                self.open_mouth(servo);
                if now_ms > self.cycle_last_ms + time_open_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = JawCyclePhase::In;
                }
            }
            JawCyclePhase::In => {
                self.close_mouth(servo);
                if now_ms > self.cycle_last_ms + time_close_ms {
                    self.cycle_last_ms = now_ms;
                    self.hinge_cycle_count += 1;
                    self.cycle_phase = JawCyclePhase::Out;
                }
            }
        }

        false
    }

    /// Even-paced talking motion, three cycles.
    pub fn reg_open_and_close(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let t = self.params.time_between_even_talk_ms;
        self.open_and_close(t, t, 3, now_ms, servo);
    }

    /// Two even open/close cycles, the mouth shape of a short greeting.
    pub fn hello(&mut self, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let t = self.params.time_between_even_talk_ms;
        self.open_and_close(t, t, 2, now_ms, servo)
    }

    /// Thrust forward and retract, `num_cycles` times.
    pub fn thrust_and_retract(
        &mut self,
        time_fwd_ms: u64,
        time_back_ms: u64,
        num_cycles: u32,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        if self.thrust_cycle_count >= num_cycles {
            self.thrust_cycle_count = 0;
            return true;
        }

        match self.cycle_phase {
            JawCyclePhase::Out => {
                self.thrust_percent(100.0, servo);
                if now_ms > self.cycle_last_ms + time_fwd_ms {
                    self.cycle_last_ms = now_ms;
                    self.cycle_phase = JawCyclePhase::In;
                }
            }
            JawCyclePhase::In => {
                self.thrust_percent(0.0, servo);
                if now_ms > self.cycle_last_ms + time_back_ms {
                    self.cycle_last_ms = now_ms;
                    self.thrust_cycle_count += 1;
                    self.cycle_phase = JawCyclePhase::Out;
                }
            }
        }

        false
    }

    // ---- STEPPING ----

    /// Step both halves toward open. True only once both have arrived.
    pub fn step_vert_open(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let left_set = self.half_l.step_vert_open(incr_deg, interval, now_ms, servo);
        let right_set = self.half_r.step_vert_open(incr_deg, interval, now_ms, servo);
        left_set && right_set
    }

    /// Step both halves toward closed. True only once both have arrived.
    pub fn step_vert_close(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let left_set = self.half_l.step_vert_close(incr_deg, interval, now_ms, servo);
        let right_set = self.half_r.step_vert_close(incr_deg, interval, now_ms, servo);
        left_set && right_set
    }

    /// Slowly open and close the mouth, counting completed cycles. Returns
    /// true on the call after the final cycle and resets the counter.
    pub fn step_vert_open_close(
        &mut self,
        incr_deg: f64,
        num_cycles: u32,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        if self.hinge_cycle_count >= num_cycles {
            self.hinge_cycle_count = 0;
            return true;
        }

        match self.cycle_phase {
            JawCyclePhase::Out => {
                trace!("opening jaw");
                if self.step_vert_open(incr_deg, now_ms, servo) {
                    self.cycle_phase = JawCyclePhase::In;
                }
            }
            JawCyclePhase::In => {
                trace!("closing jaw");
                if self.step_vert_close(incr_deg, now_ms, servo) {
                    self.hinge_cycle_count += 1;
                    self.cycle_phase = JawCyclePhase::Out;
                }
            }
        }

        false
    }

    /// Two slow open/close cycles, the dazed version of [`Jaw::hello`].
    pub fn hello_slow(&mut self, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        self.step_vert_open_close(3.0, 2, now_ms, servo)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::jaw_ctrl::JawHalfConfig;
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
            family: ServoFamily::TowerPro,
            step_interval_ms: 100,
            time_between_even_talk_ms: 250,
            time_between_fast_talk_ms: 150,
            neutral_open_percent: 20.0,
            open_thrust_percent: 20.0,
            left: JawHalfConfig {
                vert_channel: 12,
                hor_channel: 14,
                vert_close_deg: 165.0,
                vert_open_deg: 130.0,
                hor_back_deg: 120.0,
                hor_forward_deg: 80.0,
            },
            right: JawHalfConfig {
                vert_channel: 13,
                hor_channel: 15,
                vert_close_deg: 34.0,
                vert_open_deg: 80.0,
                hor_back_deg: 60.0,
                hor_forward_deg: 102.0,
            },
        }
    }

    #[test]
    fn test_open_and_close_counts_cycles() {
        let mut servo = test_servo_ctrl();
        let mut jaw = Jaw::new(test_params());

        let mut now = 0;
        let mut done_at = None;

        for tick in 0..100 {
            now += 100;
            if jaw.open_and_close(250, 250, 2, now, &mut servo) {
                done_at = Some(tick);
                break;
            }
        }

        // Two cycles at roughly 600ms each complete well before the cap
        let done_at = done_at.expect("cycles never completed");
        assert!(done_at >= 10);

        // The counter reset: a fresh run is not immediately done
        assert!(!jaw.open_and_close(250, 250, 2, now + 100, &mut servo));
    }

    #[test]
    fn test_step_open_close_and_join() {
        let mut servo = test_servo_ctrl();
        let mut jaw = Jaw::new(test_params());

        let mut now = 0;
        let mut done = false;

        // Left travel is 35 degrees, right is 46: the cycle must wait for
        // the right half before reversing
        for _ in 0..200 {
            now += 110;
            done = jaw.step_vert_open_close(3.0, 1, now, &mut servo);
            if done {
                break;
            }
        }

        assert!(done);
        // Both halves back at (or past) their closed limits
        assert!(servo.last_cmd_deg(12).unwrap() >= 165.0);
        assert!(servo.last_cmd_deg(13).unwrap() <= 34.0);
    }

    #[test]
    fn test_thrust_and_retract_counts_cycles() {
        let mut servo = test_servo_ctrl();
        let mut jaw = Jaw::new(test_params());

        let mut now = 0;
        let mut done = false;

        for _ in 0..100 {
            now += 100;
            done = jaw.thrust_and_retract(250, 250, 2, now, &mut servo);
            if done {
                break;
            }
        }

        assert!(done);
        // Retracted at the end of the final cycle
        assert_eq!(servo.last_cmd_deg(14), Some(120.0));
        assert_eq!(servo.last_cmd_deg(15), Some(60.0));
    }

    #[test]
    fn test_hello_is_reusable() {
        let mut servo = test_servo_ctrl();
        let mut jaw = Jaw::new(test_params());

        let mut now = 0;
        let mut completions = 0;

        for _ in 0..300 {
            now += 100;
            if jaw.hello(now, &mut servo) {
                completions += 1;
            }
        }

        // The greeting completes, resets, and completes again
        assert!(completions >= 2);
    }
}
