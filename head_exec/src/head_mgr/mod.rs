//! # HeadMgr module
//!
//! This module implements the [`HeadMgr`] state machine, which owns every
//! limb coordinator and sensor adapter and runs the level-of-consciousness
//! behaviour scripts. The LOC level is selected once per run by the
//! operator's settings; each level owns its own sub-state machine:
//!
//! - `Alert` - converse, follow the examiner's hand, then idle.
//! - `Verbal` - the same script, dazed and slow, with the neck following.
//! - `Pain` - react to the neck force sensor alone.
//! - `Unresponsive` - a fixed dazed posture every tick.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod alert;
mod dialogue;
mod hand_track;
mod pain;
mod params;
mod responses;
mod settings;
mod unresponsive;
mod verbal;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;
use serde::Serialize;

// Internal
pub use alert::Alert;
pub use dialogue::{Dialogue, DialoguePhase};
pub use hand_track::HandTrack;
pub use pain::Pain;
pub use params::Params;
pub use responses::{mech_response, voice_response};
pub use settings::*;
pub use unresponsive::Unresponsive;
pub use verbal::Verbal;

use crate::brow_ctrl::Eyebrows;
use crate::eqpt::Equipment;
use crate::eye_ctrl::Eyeballs;
use crate::jaw_ctrl::Jaw;
use crate::lid_ctrl::Eyelids;
use crate::neck_ctrl::Neck;
use crate::sensors::{ForceSensor, Microphone, Pulse};

use eqpt_if::{AnalogChannel, CamBlock, FRAME_MAX_X};
use util::maths::lin_map;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The head manager: the top level behaviour state machine.
pub struct HeadMgr {
    params: Params,

    settings: LocSettings,

    limbs: Limbs,
    sensors: Sensors,

    mode: LocMode,
}

/// Every limb coordinator on the head.
pub struct Limbs {
    pub eyes: Eyeballs,
    pub lids: Eyelids,
    pub brows: Eyebrows,
    pub jaw: Jaw,
    pub neck: Neck,
}

/// The sensor adapters the behaviour scripts read.
pub struct Sensors {
    /// The neck force sensor, the one the pain test reacts to.
    pub neck_force: ForceSensor,

    pub mic: Microphone,

    pub pulse: Pulse,
}

/// Summary of one tick of head processing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StatusReport {
    /// Name of the active sub-state.
    pub phase: String,

    /// True once the scripted dialogue has completed.
    pub finished_dialogue: bool,

    /// Completed dialogue exchanges.
    pub times_responded: u8,

    /// Force bucket read this tick, pain test only.
    pub force_level: Option<u8>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the head manager.
#[derive(Debug, thiserror::Error)]
pub enum HeadMgrError {
    #[error("Failed to load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),
}

/// The active LOC behaviour and its sub-state machine.
pub enum LocMode {
    Alert(Alert),
    Verbal(Verbal),
    Pain(Pain),
    Unresponsive(Unresponsive),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HeadMgr {
    /// Initialise the head manager, loading every module's parameter file.
    pub fn init(settings: LocSettings) -> Result<Self, HeadMgrError> {
        let params: Params = util::params::load("head_mgr.toml")?;
        let limbs = Limbs::init()?;
        let sensors = Sensors::init()?;

        Ok(Self::new(params, settings, limbs, sensors))
    }

    /// Assemble a head manager from already-built parts.
    pub fn new(params: Params, settings: LocSettings, limbs: Limbs, sensors: Sensors) -> Self {
        let mode = match settings.level {
            LocLevel::Alert => LocMode::Alert(Alert::new()),
            LocLevel::Verbal => LocMode::Verbal(Verbal::new()),
            LocLevel::Pain => LocMode::Pain(Pain::new()),
            LocLevel::Unresponsive => LocMode::Unresponsive(Unresponsive::new()),
        };

        info!("head manager running the {:?} LOC test", settings.level);

        Self {
            params,
            settings,
            limbs,
            sensors,
            mode,
        }
    }

    /// The settings this run was configured with.
    pub fn settings(&self) -> &LocSettings {
        &self.settings
    }

    /// Advance the head by one tick.
    ///
    /// Sensor reads happen inside the active mode, before the decisions
    /// that consume them; drive commands follow the decisions. Nothing in
    /// here blocks.
    pub fn step(&mut self, now_ms: u64, eqpt: &mut Equipment) -> StatusReport {
        let (params, settings) = (&self.params, &self.settings);
        let (limbs, sensors) = (&mut self.limbs, &mut self.sensors);

        match &mut self.mode {
            LocMode::Alert(alert) => alert.step(now_ms, settings, params, limbs, sensors, eqpt),
            LocMode::Verbal(verbal) => verbal.step(now_ms, settings, params, limbs, sensors, eqpt),
            LocMode::Pain(pain) => pain.step(now_ms, limbs, sensors, eqpt),
            LocMode::Unresponsive(unresp) => unresp.step(now_ms, limbs, eqpt),
        }
    }
}

impl Limbs {
    /// Initialise every limb coordinator from its parameter file.
    pub fn init() -> Result<Self, HeadMgrError> {
        Ok(Self {
            eyes: Eyeballs::init("eye_ctrl.toml")?,
            lids: Eyelids::init("lid_ctrl.toml")?,
            brows: Eyebrows::init("brow_ctrl.toml")?,
            jaw: Jaw::init("jaw_ctrl.toml")?,
            neck: Neck::init("neck_ctrl.toml")?,
        })
    }
}

impl Sensors {
    /// Initialise the sensor adapters from their parameter file.
    pub fn init() -> Result<Self, HeadMgrError> {
        let params: crate::sensors::Params = util::params::load("sensors.toml")?;

        Ok(Self {
            neck_force: ForceSensor::new(AnalogChannel::NeckForce, params.force),
            mic: Microphone::new(AnalogChannel::Microphone, params.mic),
            pulse: Pulse::new(params.pulse),
        })
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Point the eyes (and, for verbal patients, the neck) at the tracked hand.
///
/// The lids are held open throughout. With no usable block this tick the
/// mechanisms simply hold their last commands.
pub(crate) fn follow_hand(
    loc: LocLevel,
    block: Option<CamBlock>,
    params: &Params,
    limbs: &mut Limbs,
    eqpt: &mut Equipment,
    now_ms: u64,
) {
    limbs.lids.open_both(&mut eqpt.servo);

    let block = match block {
        Some(b) => b,
        None => return,
    };

    match loc {
        LocLevel::Alert => {
            limbs
                .eyes
                .look_at_pixel(block.x, block.y, 0.0, &mut eqpt.servo);
        }
        LocLevel::Verbal => {
            limbs.eyes.look_at_pixel(
                block.x,
                block.y,
                params.verbal_gaze_offset_deg,
                &mut eqpt.servo,
            );

            // The neck rotation tracks the hand's horizontal position
            let rot_goal = lin_map(
                (0.0, FRAME_MAX_X as f64),
                (
                    limbs.neck.rot_left_max_deg(),
                    limbs.neck.rot_right_min_deg(),
                ),
                block.x as f64,
            );
            limbs.neck.rot_to_deg(
                rot_goal,
                params.neck_follow_increment_deg,
                now_ms,
                &mut eqpt.servo,
                &mut *eqpt.analog,
            );
        }
        _ => (),
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{self, TestEqpt};

    use eqpt_if::AudioClip;

    fn test_head(level: LocLevel) -> (HeadMgr, TestEqpt) {
        let settings = LocSettings {
            level,
            airway: AirwayConditions {
                normal: true,
                ..Default::default()
            },
            pulse_bpm: 80,
        };

        let mgr = HeadMgr::new(
            test_util::head_params(),
            settings,
            test_util::limbs(),
            test_util::sensors(),
        );

        (mgr, test_util::equipment())
    }

    #[test]
    fn test_dialogue_runs_to_termination() {
        let (mut mgr, mut te) = test_head(LocLevel::Alert);

        // Quiet room
        te.analog.set(AnalogChannel::Microphone, 560);

        let mut now = 0;
        let step = |mgr: &mut HeadMgr, te: &mut TestEqpt, now: u64| {
            te.eqpt.audio.update(now);
            mgr.step(now, &mut te.eqpt)
        };

        // Two full exchanges: speak, go quiet, wait out the response
        for _ in 0..2 {
            // Speak for a few ticks
            te.analog.set(AnalogChannel::Microphone, 900);
            for _ in 0..5 {
                now += 20;
                step(&mut mgr, &mut te, now);
            }

            // Fall silent and wait past the quiet period plus the response
            te.analog.set(AnalogChannel::Microphone, 560);
            for _ in 0..250 {
                now += 20;
                step(&mut mgr, &mut te, now);
            }
        }

        now += 20;
        let report = step(&mut mgr, &mut te, now);

        assert!(report.finished_dialogue);
        assert_eq!(
            te.audio.history(),
            vec![AudioClip::HiBus, AudioClip::YesFollow]
        );

        // Finished stays latched on subsequent ticks
        now += 20;
        let report = step(&mut mgr, &mut te, now);
        assert!(report.finished_dialogue);
    }

    #[test]
    fn test_quiet_clock_restarts_on_new_speech() {
        let (mut mgr, mut te) = test_head(LocLevel::Alert);

        // Speak, then go quiet for less than the quiet period
        te.analog.set(AnalogChannel::Microphone, 900);
        let mut now = 0;
        for _ in 0..3 {
            now += 20;
            mgr.step(now, &mut te.eqpt);
        }

        te.analog.set(AnalogChannel::Microphone, 560);
        for _ in 0..100 {
            now += 20;
            mgr.step(now, &mut te.eqpt);
        }

        // Interrupt with more speech: no response may have started yet
        te.analog.set(AnalogChannel::Microphone, 900);
        now += 20;
        mgr.step(now, &mut te.eqpt);

        assert!(te.audio.history().is_empty());
    }

    #[test]
    fn test_pain_big_force_scenario() {
        let (mut mgr, mut te) = test_head(LocLevel::Pain);

        te.analog.set(AnalogChannel::NeckForce, 900);

        let mut now = 0;
        for _ in 0..50 {
            now += 20;
            mgr.step(now, &mut te.eqpt);
        }

        // The yell triggered exactly once while the clip kept playing
        assert_eq!(te.audio.history(), vec![AudioClip::Ahhh]);

        // Brows: left furrowed, right raised
        assert_eq!(te.eqpt.servo.last_cmd_deg(8), Some(85.0));
        assert_eq!(te.eqpt.servo.last_cmd_deg(10), Some(112.0));

        // Lids: left closed, right open
        assert_eq!(te.eqpt.servo.last_cmd_deg(1), Some(135.0));
        assert_eq!(te.eqpt.servo.last_cmd_deg(3), Some(125.0));

        // Eyes left
        assert_eq!(te.eqpt.servo.last_cmd_deg(4), Some(65.0));
        assert_eq!(te.eqpt.servo.last_cmd_deg(6), Some(14.0));

        // Neck heading for the left tilt limit
        let right_tilt = te.eqpt.servo.last_cmd_deg(16).unwrap();
        assert!(right_tilt > 135.0);
    }

    #[test]
    fn test_pain_middle_buckets_are_no_ops() {
        let (mut mgr, mut te) = test_head(LocLevel::Pain);

        // Bucket 1 (very light): nothing moves
        te.analog.set(AnalogChannel::NeckForce, 200);
        let report = mgr.step(20, &mut te.eqpt);

        assert_eq!(report.force_level, Some(1));
        assert_eq!(te.eqpt.servo.last_cmd_deg(8), None);
        assert_eq!(te.eqpt.servo.last_cmd_deg(1), None);
    }

    #[test]
    fn test_unresponsive_fixed_posture() {
        let (mut mgr, mut te) = test_head(LocLevel::Unresponsive);

        let report = mgr.step(20, &mut te.eqpt);
        assert_eq!(report.phase, "Dazed");

        // Slight raise brows, neutral eyes, lazy half-open lids
        assert_eq!(te.eqpt.servo.last_cmd_deg(8), Some(37.0));
        assert_eq!(te.eqpt.servo.last_cmd_deg(5), Some(79.0));
    }

    #[test]
    fn test_hand_tracking_follows_then_loses() {
        let (mut mgr, mut te) = test_head(LocLevel::Alert);

        // Run the dialogue to completion quickly: no mic excursion plus a
        // finished dialogue comes from two scripted exchanges, so instead
        // drive the protocol with the microphone
        te.analog.set(AnalogChannel::Microphone, 560);
        let mut now = 0;
        for _ in 0..2 {
            te.analog.set(AnalogChannel::Microphone, 900);
            for _ in 0..5 {
                now += 20;
                te.eqpt.audio.update(now);
                mgr.step(now, &mut te.eqpt);
            }
            te.analog.set(AnalogChannel::Microphone, 560);
            for _ in 0..250 {
                now += 20;
                te.eqpt.audio.update(now);
                mgr.step(now, &mut te.eqpt);
            }
        }

        // Hand in frame, track age growing
        for age in 1..20u8 {
            te.camera.set_block(150, 100, age);
            now += 20;
            mgr.step(now, &mut te.eqpt);
        }

        // Eyes are pointed into the frame, lids held open
        let left_hor = te.eqpt.servo.last_cmd_deg(4).unwrap();
        assert!(left_hor > 65.0 && left_hor < 124.0);
        assert_eq!(te.eqpt.servo.last_cmd_deg(1), Some(75.0));

        // The track age freezes: after the lost threshold the test idles
        let mut idled = false;
        for _ in 0..50 {
            te.camera.set_block(150, 100, 19);
            now += 20;
            let report = mgr.step(now, &mut te.eqpt);
            if report.phase == "Idle" {
                idled = true;
                break;
            }
        }
        assert!(idled);
    }
}
