//! Parameters structure for the neck control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::servo_ctrl::ServoFamily;
use eqpt_if::AnalogChannel;
use util::maths::lin_map;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the neck.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Servo family fitted to all three neck channels.
    pub family: ServoFamily,

    /// Minimum time between corrective increments.
    ///
    /// Units: milliseconds
    pub step_interval_ms: u64,

    /// Error band within which a goal counts as reached.
    ///
    /// Units: degrees
    pub tolerance_deg: f64,

    /// Default corrective increment.
    ///
    /// Units: degrees
    pub step_increment_deg: f64,

    /// Faster increment used by the wince.
    ///
    /// Units: degrees
    pub wince_increment_deg: f64,

    /// Offset of the left linkage relative to the mirrored right angle.
    /// Found empirically - the left servo does not line up without it.
    ///
    /// Units: degrees
    pub left_link_offset_deg: f64,

    /// Feedback potentiometer calibration, shared by all three servos.
    pub feedback: FeedbackCal,

    // ---- SETPOINTS ----
    /// Rotation centre (facing forward).
    pub rot_center_deg: f64,

    /// Rotation limit toward the left.
    pub rot_left_max_deg: f64,

    /// Rotation limit toward the right.
    pub rot_right_min_deg: f64,

    /// Tilt servo angle nodding fully back.
    pub nod_back_deg: f64,

    /// Tilt servo angle nodding fully forward.
    pub nod_fwd_deg: f64,

    /// Tilt servo angle tilted fully right.
    pub tilt_right_deg: f64,

    /// Tilt servo angle tilted fully left.
    pub tilt_left_deg: f64,

    /// Neutral tilt servo angle.
    pub neutral_deg: f64,

    // ---- CHANNELS ----
    /// Right tilt servo channel and feedback input.
    pub right: NeckChannelConfig,

    /// Left tilt servo channel and feedback input.
    pub left: NeckChannelConfig,

    /// Rotation servo channel and feedback input.
    pub rot: NeckChannelConfig,
}

/// One neck servo's drive channel and feedback input.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct NeckChannelConfig {
    /// Global servo channel.
    pub channel: usize,

    /// Analog channel of the feedback potentiometer.
    pub feedback: AnalogChannel,
}

/// Three point calibration of the feedback potentiometers: raw counts at
/// the minimum, middle and maximum of the servos' degree range.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct FeedbackCal {
    /// Raw count at `min_deg`.
    pub min_count: u16,

    /// Raw count at `mid_deg`.
    pub mid_count: u16,

    /// Raw count at `max_deg`.
    pub max_count: u16,

    /// Degree value at the bottom calibration point.
    pub min_deg: f64,

    /// Degree value at the middle calibration point.
    pub mid_deg: f64,

    /// Degree value at the top calibration point.
    pub max_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FeedbackCal {
    /// Convert a raw feedback reading into servo degrees, piecewise linear
    /// through the three calibration points.
    pub fn to_deg(&self, raw: u16) -> f64 {
        let raw = raw as f64;

        let deg = if raw <= self.mid_count as f64 {
            lin_map(
                (self.min_count as f64, self.mid_count as f64),
                (self.min_deg, self.mid_deg),
                raw,
            )
        } else {
            lin_map(
                (self.mid_count as f64, self.max_count as f64),
                (self.mid_deg, self.max_deg),
                raw,
            )
        };

        deg.abs()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feedback_cal_points() {
        let cal = FeedbackCal {
            min_count: 335,
            mid_count: 679,
            max_count: 1023,
            min_deg: 0.0,
            mid_deg: 135.0,
            max_deg: 270.0,
        };

        assert_eq!(cal.to_deg(335), 0.0);
        assert_eq!(cal.to_deg(679), 135.0);
        assert_eq!(cal.to_deg(1023), 270.0);

        // Between calibration points the conversion is linear
        assert!((cal.to_deg(507) - 67.5).abs() < 0.5);
    }
}
