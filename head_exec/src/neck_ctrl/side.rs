//! Closed loop control of a single neck servo

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{FeedbackCal, NeckChannelConfig};
use crate::servo_ctrl::{ServoCtrl, ServoFamily};

use eqpt_if::AnalogReader;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One neck servo under closed loop position control.
///
/// At the start of a goal sequence the commanded angle is synced to the
/// feedback potentiometer, after which corrective increments are issued
/// whenever the remaining error exceeds the tolerance band. The tilt servos
/// sync once, at their first sequence; the rotation servo re-syncs at the
/// start of every sequence (`resync_on_arrival`).
pub struct NeckServo {
    cfg: NeckChannelConfig,
    family: ServoFamily,
    cal: FeedbackCal,

    /// True if arrival should drop the sync, forcing a feedback re-read at
    /// the next sequence.
    resync_on_arrival: bool,

    cmd_deg: f64,
    synced: bool,
    last_step_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NeckServo {
    pub fn new(
        cfg: NeckChannelConfig,
        family: ServoFamily,
        cal: FeedbackCal,
        resync_on_arrival: bool,
    ) -> Self {
        Self {
            cfg,
            family,
            cal,
            resync_on_arrival,
            cmd_deg: 0.0,
            synced: false,
            last_step_ms: 0,
        }
    }

    /// The current commanded angle.
    pub fn cmd_deg(&self) -> f64 {
        self.cmd_deg
    }

    /// Drive the servo to the given angle directly.
    pub fn move_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.channel, deg, self.family);
    }

    /// One closed loop step toward `goal_deg`.
    ///
    /// Returns true while the remaining error is inside the tolerance band.
    /// The commanded angle is re-asserted every call.
    pub fn step_to_deg(
        &mut self,
        goal_deg: f64,
        incr_deg: f64,
        tol_deg: f64,
        min_interval_ms: u64,
        now_ms: u64,
        servo: &mut ServoCtrl,
        analog: &mut dyn AnalogReader,
    ) -> bool {
        if !self.synced {
            let raw = analog.read(self.cfg.feedback);
            self.cmd_deg = self.cal.to_deg(raw);
            self.synced = true;
            debug!(
                "neck channel {} synced to feedback: {:.1} deg (raw {})",
                self.cfg.channel, self.cmd_deg, raw
            );
        }

        let err = goal_deg - self.cmd_deg;

        let cmd = self.cmd_deg;
        self.move_to(cmd, servo);

        if now_ms > self.last_step_ms + min_interval_ms {
            if err >= tol_deg {
                self.cmd_deg += incr_deg;
            } else if err <= -tol_deg {
                self.cmd_deg -= incr_deg;
            }
            self.last_step_ms = now_ms;
        }

        let arrived = err < tol_deg && err > -tol_deg;
        if arrived {
            self.arrive();
        }

        arrived
    }

    fn arrive(&mut self) {
        if self.resync_on_arrival {
            self.synced = false;
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
