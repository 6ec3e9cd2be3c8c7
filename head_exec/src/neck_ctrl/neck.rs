//! Neck coordinator

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{NeckServo, Params};
use crate::motion::Side;
use crate::servo_ctrl::ServoCtrl;

use eqpt_if::AnalogReader;
use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of a two point motion cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum TwoPointPhase {
    First,
    Second,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The whole neck: left and right tilt servos plus the rotation servo.
pub struct Neck {
    params: Params,

    side_r: NeckServo,
    side_l: NeckServo,
    rot: NeckServo,

    move_phase: TwoPointPhase,
    rot_move_phase: TwoPointPhase,

    nod_count: u32,
    tilt_count: u32,

    /// Non-blocking pause between counted nod/tilt cycles.
    cycle_pause_until_ms: Option<u64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Neck {
    /// Initialise the neck from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::new(util::params::load(params_path)?))
    }

    pub fn new(params: Params) -> Self {
        let side_r = NeckServo::new(params.right, params.family, params.feedback, false);
        let side_l = NeckServo::new(params.left, params.family, params.feedback, false);
        let rot = NeckServo::new(params.rot, params.family, params.feedback, true);

        Self {
            params,
            side_r,
            side_l,
            rot,
            move_phase: TwoPointPhase::First,
            rot_move_phase: TwoPointPhase::First,
            nod_count: 0,
            tilt_count: 0,
            cycle_pause_until_ms: None,
        }
    }

    /// The rotation limit toward the left, used by hand following.
    pub fn rot_left_max_deg(&self) -> f64 {
        self.params.rot_left_max_deg
    }

    /// The rotation limit toward the right, used by hand following.
    pub fn rot_right_min_deg(&self) -> f64 {
        self.params.rot_right_min_deg
    }

    /// Convert a right tilt servo angle into the matching left servo angle.
    ///
    /// The offset was found empirically - without it the left servo does
    /// not line up with the right.
    fn r_deg_to_l_deg(&self, deg: f64) -> f64 {
        (self.params.feedback.max_deg - deg - self.params.left_link_offset_deg).abs()
    }

    // ---- CLOSED LOOP MOVES ----

    /// Step both tilt servos toward a goal given as a right servo angle.
    ///
    /// With `move_together` the left goal is the linkage-converted mirror of
    /// the right one (nodding); without it both servos head for the same
    /// angle (tilting). True only when both servos are inside tolerance.
    pub fn move_to_deg(
        &mut self,
        goal_deg: f64,
        move_together: bool,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let left_goal_deg = if move_together {
            self.r_deg_to_l_deg(goal_deg)
        } else {
            goal_deg
        };

        let (tol, interval) = (self.params.tolerance_deg, self.params.step_interval_ms);

        let right_set =
            self.side_r
                .step_to_deg(goal_deg, incr_deg, tol, interval, now_ms, servo, analog);
        let left_set =
            self.side_l
                .step_to_deg(left_goal_deg, incr_deg, tol, interval, now_ms, servo, analog);

        right_set && left_set
    }

    /// Step the rotation servo toward a goal.
    pub fn rot_to_deg(
        &mut self,
        goal_deg: f64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let (tol, interval) = (self.params.tolerance_deg, self.params.step_interval_ms);
        self.rot
            .step_to_deg(goal_deg, incr_deg, tol, interval, now_ms, servo, analog)
    }

    /// Move the tilt servos between two points, one goal at a time. True on
    /// the tick the second point is reached.
    pub fn move_btwn_pts(
        &mut self,
        start_deg: f64,
        goal_deg: f64,
        move_together: bool,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let incr = self.params.step_increment_deg;
        match self.move_phase {
            TwoPointPhase::First => {
                if self.move_to_deg(start_deg, move_together, incr, now_ms, servo, analog) {
                    self.move_phase = TwoPointPhase::Second;
                }
                false
            }
            TwoPointPhase::Second => {
                if self.move_to_deg(goal_deg, move_together, incr, now_ms, servo, analog) {
                    self.move_phase = TwoPointPhase::First;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Rotate between two points, one goal at a time.
    pub fn rot_btwn_pts(
        &mut self,
        start_deg: f64,
        goal_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let incr = self.params.step_increment_deg;
        match self.rot_move_phase {
            TwoPointPhase::First => {
                if self.rot_to_deg(start_deg, incr, now_ms, servo, analog) {
                    self.rot_move_phase = TwoPointPhase::Second;
                }
                false
            }
            TwoPointPhase::Second => {
                if self.rot_to_deg(goal_deg, incr, now_ms, servo, analog) {
                    self.rot_move_phase = TwoPointPhase::First;
                    true
                } else {
                    false
                }
            }
        }
    }

    // ---- COMPOSITE MOVES ----

    /// Level the head: tilt servos to neutral, rotation to centre. True
    /// once both are inside tolerance.
    pub fn neutral(
        &mut self,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let incr = self.params.step_increment_deg;
        let (neutral, center) = (self.params.neutral_deg, self.params.rot_center_deg);

        let side_set = self.move_to_deg(neutral, true, incr, now_ms, servo, analog);
        let rot_set = self.rot_to_deg(center, incr, now_ms, servo, analog);

        side_set && rot_set
    }

    /// Endless nod between the forward and back limits.
    pub fn nod(&mut self, now_ms: u64, servo: &mut ServoCtrl, analog: &mut dyn AnalogReader) {
        let (fwd, back) = (self.params.nod_fwd_deg, self.params.nod_back_deg);
        self.move_btwn_pts(fwd, back, true, now_ms, servo, analog);
    }

    /// Endless tilt between the left and right limits.
    pub fn tilt(&mut self, now_ms: u64, servo: &mut ServoCtrl, analog: &mut dyn AnalogReader) {
        let (left, right) = (self.params.tilt_left_deg, self.params.tilt_right_deg);
        self.move_btwn_pts(left, right, false, now_ms, servo, analog);
    }

    /// Bend the neck toward the given side while re-centring the rotation.
    /// True once the tilt has arrived.
    pub fn wince(
        &mut self,
        side: Side,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        let goal = match side {
            Side::Left => self.params.tilt_left_deg,
            Side::Right => self.params.tilt_right_deg,
        };
        let incr = self.params.wince_increment_deg;

        let result = self.move_to_deg(goal, false, incr, now_ms, servo, analog);
        let center = self.params.rot_center_deg;
        let rot_incr = self.params.step_increment_deg;
        self.rot_to_deg(center, rot_incr, now_ms, servo, analog);

        result
    }

    /// Nod `num_nods` times with a pause between cycles. True on the call
    /// after the final nod; the counter resets so the cycler is reusable.
    pub fn nod_times(
        &mut self,
        num_nods: u32,
        pause_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        if self.paused(now_ms) {
            return false;
        }

        if self.nod_count < num_nods {
            let (fwd, back) = (self.params.nod_fwd_deg, self.params.nod_back_deg);
            if self.move_btwn_pts(fwd, back, true, now_ms, servo, analog) {
                self.nod_count += 1;
                self.cycle_pause_until_ms = Some(now_ms + pause_ms);
            }
            false
        } else {
            debug!("finished nodding {} times", num_nods);
            self.nod_count = 0;
            true
        }
    }

    /// Tilt `num_tilts` times with a pause between cycles.
    pub fn tilt_times(
        &mut self,
        num_tilts: u32,
        pause_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        if self.paused(now_ms) {
            return false;
        }

        if self.tilt_count < num_tilts {
            let (right, left) = (self.params.tilt_right_deg, self.params.tilt_left_deg);
            if self.move_btwn_pts(right, left, false, now_ms, servo, analog) {
                self.tilt_count += 1;
                self.cycle_pause_until_ms = Some(now_ms + pause_ms);
            }
            false
        } else {
            debug!("finished tilting {} times", num_tilts);
            self.tilt_count = 0;
            true
        }
    }

    // ---- PRIVATE ----

    /// True while an inter-cycle pause is running.
    fn paused(&mut self, now_ms: u64) -> bool {
        match self.cycle_pause_until_ms {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.cycle_pause_until_ms = None;
                false
            }
            None => false,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::neck_ctrl::{FeedbackCal, NeckChannelConfig};
    use crate::servo_ctrl::{Params as ServoParams, PulseRange, ServoFamily};
    use eqpt_if::sim::{SimAnalog, SimServoBoard};
    use eqpt_if::{AnalogChannel, ServoDriver};

    fn test_servo_ctrl() -> ServoCtrl {
        let boards: Vec<Box<dyn ServoDriver>> = vec![
            Box::new(SimServoBoard::new()),
            Box::new(SimServoBoard::new()),
        ];
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
            family: ServoFamily::Datan,
            step_interval_ms: 20,
            tolerance_deg: 2.0,
            step_increment_deg: 2.0,
            wince_increment_deg: 5.0,
            left_link_offset_deg: 60.0,
            feedback: FeedbackCal {
                min_count: 335,
                mid_count: 679,
                max_count: 1023,
                min_deg: 0.0,
                mid_deg: 135.0,
                max_deg: 270.0,
            },
            rot_center_deg: 35.0,
            rot_left_max_deg: 80.0,
            rot_right_min_deg: 0.0,
            nod_back_deg: 50.0,
            nod_fwd_deg: 150.0,
            tilt_right_deg: 50.0,
            tilt_left_deg: 160.0,
            neutral_deg: 100.0,
            right: NeckChannelConfig {
                channel: 16,
                feedback: AnalogChannel::NeckFeedbackRight,
            },
            left: NeckChannelConfig {
                channel: 17,
                feedback: AnalogChannel::NeckFeedbackLeft,
            },
            rot: NeckChannelConfig {
                channel: 18,
                feedback: AnalogChannel::NeckFeedbackRot,
            },
        }
    }

    fn mid_scale_analog() -> SimAnalog {
        let mut analog = SimAnalog::new();
        analog.set(AnalogChannel::NeckFeedbackRight, 679);
        analog.set(AnalogChannel::NeckFeedbackLeft, 679);
        analog.set(AnalogChannel::NeckFeedbackRot, 679);
        analog
    }

    #[test]
    fn test_link_conversion() {
        let neck = Neck::new(test_params());

        // Right at 100 maps to 270 - 100 - 60 = 110 on the left
        assert_eq!(neck.r_deg_to_l_deg(100.0), 110.0);
        assert_eq!(neck.r_deg_to_l_deg(150.0), 60.0);
    }

    #[test]
    fn test_move_to_deg_and_join() {
        let mut servo = test_servo_ctrl();
        let mut analog = mid_scale_analog();
        let mut neck = Neck::new(test_params());

        // Nod goal 150: right goes 135 -> 150, left goes 135 -> 60.
        // The right servo arrives long before the left
        let mut now = 0;
        let mut right_done_first = false;
        let mut done = false;

        for _ in 0..100 {
            now += 25;
            done = neck.move_to_deg(150.0, true, 2.0, now, &mut servo, &mut analog);

            let right_cmd = servo.last_cmd_deg(16).unwrap();
            if (right_cmd - 150.0).abs() < 2.0 && !done {
                right_done_first = true;
            }
            if done {
                break;
            }
        }

        assert!(done);
        assert!(right_done_first);

        let left_cmd = servo.last_cmd_deg(17).unwrap();
        assert!((left_cmd - 60.0).abs() < 2.0);
    }

    #[test]
    fn test_nod_times_counts_and_resets() {
        let mut servo = test_servo_ctrl();
        let mut analog = mid_scale_analog();
        let mut neck = Neck::new(test_params());

        let mut now = 0;
        let mut done = false;

        for _ in 0..5000 {
            now += 25;
            done = neck.nod_times(2, 250, now, &mut servo, &mut analog);
            if done {
                break;
            }
        }

        assert!(done);
        // The counter reset: the next call starts a fresh set of nods
        assert!(!neck.nod_times(2, 250, now + 25, &mut servo, &mut analog));
    }

    #[test]
    fn test_wince_left() {
        let mut servo = test_servo_ctrl();
        let mut analog = mid_scale_analog();
        let mut neck = Neck::new(test_params());

        let mut now = 0;
        let mut done = false;
        for _ in 0..200 {
            now += 25;
            done = neck.wince(Side::Left, now, &mut servo, &mut analog);
            if done {
                break;
            }
        }

        assert!(done);
        // Both tilt servos head for the same left limit when wincing
        assert!((servo.last_cmd_deg(16).unwrap() - 160.0).abs() < 5.0);
        assert!((servo.last_cmd_deg(17).unwrap() - 160.0).abs() < 5.0);
    }
}
