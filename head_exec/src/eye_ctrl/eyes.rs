//! Paired eyeball coordinator

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{Eye, Params};
use crate::motion::Side;
use crate::servo_ctrl::ServoCtrl;

use eqpt_if::{FRAME_MAX_X, FRAME_MAX_Y};
use util::maths::lin_map;
use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Directions a glance can take.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlanceDir {
    Left,
    Right,
    Up,
    Down,
}

/// Phase of the glance cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum GlancePhase {
    Neutral,
    Glancing,
}

/// Phase of the look-left-and-right cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum LookPhase {
    Right,
    Left,
}

/// Phase of the vertical stepping cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum VertCyclePhase {
    Uninitialised,
    Up,
    Down,
}

/// Phase of the horizontal stepping cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum HorCyclePhase {
    Uninitialised,
    Left,
    Right,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Both eyeballs, driven in lockstep.
pub struct Eyeballs {
    params: Params,

    eye_l: Eye,
    eye_r: Eye,

    glance_phase: GlancePhase,
    glance_last_ms: u64,
    rand_dir: GlanceDir,

    look_phase: LookPhase,
    look_last_ms: u64,

    vert_cycle: VertCyclePhase,
    hor_cycle: HorCyclePhase,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eyeballs {
    /// Initialise the eyeball pair from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::new(util::params::load(params_path)?))
    }

    pub fn new(params: Params) -> Self {
        let eye_l = Eye::new(Side::Left, params.left, params.family);
        let eye_r = Eye::new(Side::Right, params.right, params.family);

        Self {
            params,
            eye_l,
            eye_r,
            glance_phase: GlancePhase::Neutral,
            glance_last_ms: 0,
            rand_dir: GlanceDir::Left,
            look_phase: LookPhase::Right,
            look_last_ms: 0,
            vert_cycle: VertCyclePhase::Uninitialised,
            hor_cycle: HorCyclePhase::Uninitialised,
        }
    }

    // ---- SETPOINT MOVES ----

    /// Move the horizontal servos to per-side angles.
    pub fn move_hor_eyes_to(&mut self, left_deg: f64, right_deg: f64, servo: &mut ServoCtrl) {
        self.eye_r.move_hor_to(right_deg, servo);
        self.eye_l.move_hor_to(left_deg, servo);
    }

    /// Move the vertical servos to per-side angles.
    pub fn move_vert_eyes_to(&mut self, left_deg: f64, right_deg: f64, servo: &mut ServoCtrl) {
        self.eye_r.move_vert_to(right_deg, servo);
        self.eye_l.move_vert_to(left_deg, servo);
    }

    /// Both eyes look straight ahead.
    pub fn neutral_both(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.neutral(servo);
        self.eye_l.neutral(servo);
    }

    /// Both eyes look left.
    pub fn left_both(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.left(servo);
        self.eye_l.left(servo);
    }

    /// Both eyes look right.
    pub fn right_both(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.right(servo);
        self.eye_l.right(servo);
    }

    /// Both eyes look up.
    pub fn up_both(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.up(servo);
        self.eye_l.up(servo);
    }

    /// Both eyes look down.
    pub fn down_both(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.down(servo);
        self.eye_l.down(servo);
    }

    /// Both eyes point at the bridge of the nose.
    pub fn cross_eyed(&mut self, servo: &mut ServoCtrl) {
        self.eye_r.left(servo);
        self.eye_l.right(servo);
    }

    // ---- TIMED COMBOS ----

    /// Alternate between the left and right limits on a timer.
    pub fn look_left_and_right(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        match self.look_phase {
            LookPhase::Right => {
                self.right_both(servo);
                if now_ms > self.look_last_ms + self.params.time_between_look_ms {
                    self.look_last_ms = now_ms;
                    self.look_phase = LookPhase::Left;
                }
            }
            LookPhase::Left => {
                self.left_both(servo);
                if now_ms > self.look_last_ms + self.params.time_between_look_ms {
                    self.look_last_ms = now_ms;
                    self.look_phase = LookPhase::Right;
                }
            }
        }
    }

    /// Briefly look toward `dir`, then return to neutral.
    ///
    /// The eyes hold neutral for `time_btwn_glance_ms`, hold the target
    /// direction for `pause_ms`, and repeat. A fresh random direction is
    /// drawn at the end of every glance for [`Eyeballs::idle_glance`].
    pub fn glance(
        &mut self,
        dir: GlanceDir,
        time_btwn_glance_ms: u64,
        pause_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        match self.glance_phase {
            GlancePhase::Neutral => {
                self.neutral_both(servo);
                if now_ms > self.glance_last_ms + time_btwn_glance_ms {
                    self.glance_last_ms = now_ms;
                    self.glance_phase = GlancePhase::Glancing;
                }
            }
            GlancePhase::Glancing => {
                match dir {
                    GlanceDir::Left => self.left_both(servo),
                    GlanceDir::Right => self.right_both(servo),
                    GlanceDir::Up => self.up_both(servo),
                    GlanceDir::Down => self.down_both(servo),
                }
                if now_ms > self.glance_last_ms + pause_ms {
                    self.glance_last_ms = now_ms;
                    self.rand_dir = Self::random_dir();
                    self.glance_phase = GlancePhase::Neutral;
                }
            }
        }
    }

    /// Glance left on the standard timing.
    pub fn glance_left(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_glance_ms, self.params.glance_pause_ms);
        self.glance(GlanceDir::Left, t, p, now_ms, servo);
    }

    /// Glance right on the standard timing.
    pub fn glance_right(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_glance_ms, self.params.glance_pause_ms);
        self.glance(GlanceDir::Right, t, p, now_ms, servo);
    }

    /// Glance up on the standard timing.
    pub fn glance_up(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_glance_ms, self.params.glance_pause_ms);
        self.glance(GlanceDir::Up, t, p, now_ms, servo);
    }

    /// Glance down on the standard timing.
    pub fn glance_down(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (t, p) = (self.params.time_between_glance_ms, self.params.glance_pause_ms);
        self.glance(GlanceDir::Down, t, p, now_ms, servo);
    }

    /// Glance in a random direction, redrawn after every glance. The
    /// interval between glances is the caller's choice - the duller the
    /// patient, the longer the interval.
    pub fn idle_glance(&mut self, time_btwn_glance_ms: u64, now_ms: u64, servo: &mut ServoCtrl) {
        let dir = self.rand_dir;
        debug!("idle glance direction: {:?}", dir);
        self.glance(dir, time_btwn_glance_ms, self.params.glance_pause_ms, now_ms, servo);
    }

    // ---- STEPPING ----

    /// Step both eyes toward the upper limit. True only once both have
    /// independently arrived.
    pub fn step_eyes_up(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let right_set = self.eye_r.step_up(interval, incr_deg, now_ms, servo);
        let left_set = self.eye_l.step_up(interval, incr_deg, now_ms, servo);
        right_set && left_set
    }

    /// Step both eyes toward the lower limit.
    pub fn step_eyes_down(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let right_set = self.eye_r.step_down(interval, incr_deg, now_ms, servo);
        let left_set = self.eye_l.step_down(interval, incr_deg, now_ms, servo);
        right_set && left_set
    }

    /// Step both eyes toward the left limit.
    pub fn step_eyes_left(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let right_set = self.eye_r.step_left(interval, incr_deg, now_ms, servo);
        let left_set = self.eye_l.step_left(interval, incr_deg, now_ms, servo);
        right_set && left_set
    }

    /// Step both eyes toward the right limit.
    pub fn step_eyes_right(&mut self, incr_deg: f64, now_ms: u64, servo: &mut ServoCtrl) -> bool {
        let interval = self.params.step_interval_ms;
        let right_set = self.eye_r.step_right(interval, incr_deg, now_ms, servo);
        let left_set = self.eye_l.step_right(interval, incr_deg, now_ms, servo);
        right_set && left_set
    }

    /// Continuously cycle both eyes between the vertical limits, flipping
    /// direction once both eyes report arrival.
    pub fn step_eyes_up_and_down(
        &mut self,
        incr_up_deg: f64,
        incr_down_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        if let VertCyclePhase::Uninitialised = self.vert_cycle {
            // The cycle starts with both eyes parked at the lower limit
            let l = self.eye_l.config().down_vert_deg;
            let r = self.eye_r.config().down_vert_deg;
            self.eye_l.set_cmd(l);
            self.eye_r.set_cmd(r);
            self.down_both(servo);
            self.vert_cycle = VertCyclePhase::Up;
        }

        match self.vert_cycle {
            VertCyclePhase::Up => {
                if self.step_eyes_up(incr_up_deg, now_ms, servo) {
                    self.vert_cycle = VertCyclePhase::Down;
                }
            }
            VertCyclePhase::Down => {
                if self.step_eyes_down(incr_down_deg, now_ms, servo) {
                    self.vert_cycle = VertCyclePhase::Up;
                }
            }
            VertCyclePhase::Uninitialised => unreachable!(),
        }
    }

    /// Vertical cycle at the slowest possible pace.
    pub fn step_eyes_up_and_down_very_slow(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        self.step_eyes_up_and_down(1.0, 1.0, now_ms, servo);
    }

    /// Vertical cycle at a moderate pace.
    pub fn step_eyes_up_and_down_slow(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        self.step_eyes_up_and_down(3.0, 3.0, now_ms, servo);
    }

    /// Continuously cycle both eyes between the horizontal limits.
    pub fn step_eyes_left_and_right(
        &mut self,
        incr_left_deg: f64,
        incr_right_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        if let HorCyclePhase::Uninitialised = self.hor_cycle {
            // The cycle starts with both eyes parked at the right limit
            let l = self.eye_l.config().right_hor_deg;
            let r = self.eye_r.config().right_hor_deg;
            self.eye_l.set_cmd(l);
            self.eye_r.set_cmd(r);
            self.right_both(servo);
            self.hor_cycle = HorCyclePhase::Left;
        }

        match self.hor_cycle {
            HorCyclePhase::Left => {
                if self.step_eyes_left(incr_left_deg, now_ms, servo) {
                    self.hor_cycle = HorCyclePhase::Right;
                }
            }
            HorCyclePhase::Right => {
                if self.step_eyes_right(incr_right_deg, now_ms, servo) {
                    self.hor_cycle = HorCyclePhase::Left;
                }
            }
            HorCyclePhase::Uninitialised => unreachable!(),
        }
    }

    /// Horizontal cycle at a slower pace.
    pub fn step_eyes_left_and_right_slow(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        self.step_eyes_left_and_right(3.0, 3.0, now_ms, servo);
    }

    /// Roll both eyes through the semicircular path.
    pub fn roll_eyes(&mut self, now_ms: u64, servo: &mut ServoCtrl) {
        let (interval, incr) = (self.params.step_interval_ms, self.params.roll_increment_deg);
        self.eye_r.roll(interval, incr, now_ms, servo);
        self.eye_l.roll(interval, incr, now_ms, servo);
    }

    // ---- TRACKING ----

    /// Point both eyes at a camera pixel.
    ///
    /// The pixel is mapped linearly from the camera frame onto each eye's
    /// own calibrated range. `offset_deg` shifts every servo by a fixed
    /// amount, used to give the lower consciousness levels an off-target
    /// gaze.
    pub fn look_at_pixel(&mut self, x: u16, y: u16, offset_deg: f64, servo: &mut ServoCtrl) {
        let frame_x = (0.0, FRAME_MAX_X as f64);
        let frame_y = (0.0, FRAME_MAX_Y as f64);

        let l = *self.eye_l.config();
        let r = *self.eye_r.config();

        let hor_l = lin_map(frame_x, (l.left_hor_deg, l.right_hor_deg), x as f64);
        let hor_r = lin_map(frame_x, (r.left_hor_deg, r.right_hor_deg), x as f64);
        let vert_l = lin_map(frame_y, (l.up_vert_deg, l.down_vert_deg), y as f64);
        let vert_r = lin_map(frame_y, (r.up_vert_deg, r.down_vert_deg), y as f64);

        self.move_hor_eyes_to(hor_l + offset_deg, hor_r + offset_deg, servo);
        self.move_vert_eyes_to(vert_l + offset_deg, vert_r + offset_deg, servo);
    }

    // ---- PRIVATE ----

    fn random_dir() -> GlanceDir {
        match rand::random_range(0..4u8) {
            0 => GlanceDir::Left,
            1 => GlanceDir::Right,
            2 => GlanceDir::Up,
            _ => GlanceDir::Down,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::eye_ctrl::EyeConfig;
    use crate::servo_ctrl::ServoFamily;
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

    pub(crate) fn test_params() -> Params {
        Params {
            family: ServoFamily::Turnigy,
            step_interval_ms: 5,
            glance_pause_ms: 500,
            time_between_glance_ms: 2000,
            time_between_look_ms: 3000,
            roll_increment_deg: 1.0,
            left: EyeConfig {
                vert_channel: 5,
                hor_channel: 4,
                neutral_vert_deg: 79.0,
                neutral_hor_deg: 92.0,
                up_vert_deg: 100.0,
                down_vert_deg: 55.0,
                left_hor_deg: 65.0,
                right_hor_deg: 124.0,
            },
            right: EyeConfig {
                vert_channel: 7,
                hor_channel: 6,
                neutral_vert_deg: 50.0,
                neutral_hor_deg: 32.0,
                up_vert_deg: 30.0,
                down_vert_deg: 75.0,
                left_hor_deg: 14.0,
                right_hor_deg: 53.0,
            },
        }
    }

    #[test]
    fn test_and_join_up() {
        let mut servo = test_servo_ctrl();
        let mut eyes = Eyeballs::new(test_params());

        // Left eye covers 45 degrees, right eye covers 45 too, but step the
        // pair and confirm completion is reported exactly when the slower
        // of the two arrives, never before either
        let mut now = 0;
        let mut first_done_tick = None;

        for tick in 0..30 {
            now += 10;
            if eyes.step_eyes_up(5.0, now, &mut servo) && first_done_tick.is_none() {
                first_done_tick = Some(tick);
            }
        }

        let done_tick = first_done_tick.expect("pair never reported arrival");

        // At the joint completion tick both commands must be at their limits
        assert_eq!(servo.last_cmd_deg(5), Some(100.0));
        assert_eq!(servo.last_cmd_deg(7), Some(30.0));
        assert!(done_tick >= 10);
    }

    #[test]
    fn test_and_join_uneven_travel() {
        let mut servo = test_servo_ctrl();
        let mut params = test_params();
        // Shrink the right eye's travel so it arrives well before the left
        params.right.up_vert_deg = 70.0;
        let mut eyes = Eyeballs::new(params);

        let mut now = 0;
        let mut done = false;
        let mut right_arrived_early = false;

        for _ in 0..30 {
            now += 10;
            done = eyes.step_eyes_up(5.0, now, &mut servo);

            let right_at_limit = servo.last_cmd_deg(7) == Some(70.0);
            if right_at_limit && !done {
                right_arrived_early = true;
            }
        }

        assert!(done);
        // The pair must not have reported done while only the right eye
        // was at its limit
        assert!(right_arrived_early);
    }

    #[test]
    fn test_vert_cycle_flips_direction() {
        let mut servo = test_servo_ctrl();
        let mut eyes = Eyeballs::new(test_params());

        let mut now = 0;
        let mut max_seen = f64::MIN;
        let mut min_after_max = f64::MAX;

        for _ in 0..300 {
            now += 10;
            eyes.step_eyes_up_and_down(5.0, 5.0, now, &mut servo);
            let cmd = servo.last_cmd_deg(5).unwrap();
            if cmd > max_seen {
                max_seen = cmd;
            }
            if max_seen >= 100.0 && cmd < min_after_max {
                min_after_max = cmd;
            }
        }

        // The left eye reaches its upper limit then comes back down
        assert_eq!(max_seen, 100.0);
        assert!(min_after_max <= 55.0);
    }

    #[test]
    fn test_look_at_pixel_maps_frame_corners() {
        let mut servo = test_servo_ctrl();
        let mut eyes = Eyeballs::new(test_params());

        // Top-left pixel: both eyes at their left and upper limits
        eyes.look_at_pixel(0, 0, 0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(4), Some(65.0));
        assert_eq!(servo.last_cmd_deg(6), Some(14.0));
        assert_eq!(servo.last_cmd_deg(5), Some(100.0));
        assert_eq!(servo.last_cmd_deg(7), Some(30.0));

        // Bottom-right pixel: right and lower limits
        eyes.look_at_pixel(FRAME_MAX_X, FRAME_MAX_Y, 0.0, &mut servo);
        assert_eq!(servo.last_cmd_deg(4), Some(124.0));
        assert_eq!(servo.last_cmd_deg(6), Some(53.0));
        assert_eq!(servo.last_cmd_deg(5), Some(55.0));
        assert_eq!(servo.last_cmd_deg(7), Some(75.0));
    }

    #[test]
    fn test_glance_returns_to_neutral() {
        let mut servo = test_servo_ctrl();
        let mut eyes = Eyeballs::new(test_params());

        // Hold in neutral phase
        eyes.glance(GlanceDir::Left, 100, 50, 50, &mut servo);
        assert_eq!(servo.last_cmd_deg(4), Some(92.0));

        // Past the inter-glance interval: look left
        eyes.glance(GlanceDir::Left, 100, 50, 151, &mut servo);
        eyes.glance(GlanceDir::Left, 100, 50, 152, &mut servo);
        assert_eq!(servo.last_cmd_deg(4), Some(65.0));

        // Past the pause: back to neutral
        eyes.glance(GlanceDir::Left, 100, 50, 203, &mut servo);
        eyes.glance(GlanceDir::Left, 100, 50, 204, &mut servo);
        assert_eq!(servo.last_cmd_deg(4), Some(92.0));
    }
}
