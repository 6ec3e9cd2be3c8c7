//! # Pain-response LOC behaviour

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::{Limbs, Sensors, StatusReport};
use crate::eqpt::Equipment;
use crate::motion::Side;
use crate::sensors::ForceLevel;

use eqpt_if::AudioClip;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The pain-response test: no listening, no camera - the neck force sensor
/// alone selects the behaviour, and the pulse runs irregular.
pub struct Pain;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pain {
    pub fn new() -> Self {
        Self
    }

    pub fn step(
        &mut self,
        now_ms: u64,
        limbs: &mut Limbs,
        sensors: &mut Sensors,
        eqpt: &mut Equipment,
    ) -> StatusReport {
        sensors.pulse.rand_pulse(now_ms, &mut *eqpt.sols);

        let level = sensors.neck_force.level(&mut *eqpt.analog);

        match level {
            // No pressure: act dazed and tired
            ForceLevel::NoPressure => {
                limbs.brows.raise_and_slight_raise(now_ms, &mut eqpt.servo);
                limbs.lids.step_lids_sleepy(now_ms, &mut eqpt.servo);
                limbs
                    .eyes
                    .step_eyes_up_and_down_very_slow(now_ms, &mut eqpt.servo);
                limbs.neck.neutral(now_ms, &mut eqpt.servo, &mut *eqpt.analog);
            }

            // A light press parks the face at mid setpoints, which also
            // gives the mechanisms a way point when a big force lets go
            ForceLevel::Light => {
                limbs.brows.slight_raise_both(&mut eqpt.servo);
                limbs.eyes.neutral_both(&mut eqpt.servo);
                limbs.lids.open_percent_both(50.0, &mut eqpt.servo);
            }

            // A big force triggers the full pain reaction
            ForceLevel::Big => pain_actions(now_ms, limbs, eqpt),

            // The in-between buckets deliberately do nothing
            ForceLevel::VeryLight | ForceLevel::Medium => (),
        }

        StatusReport {
            phase: format!("{:?}", level),
            finished_dialogue: false,
            times_responded: 0,
            force_level: Some(level as u8),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// The fixed pain reaction: yell once, wince left across the whole face.
///
/// The yell is guarded against retriggering while it is still playing; the
/// poses are re-asserted every tick the force stays on.
pub fn pain_actions(now_ms: u64, limbs: &mut Limbs, eqpt: &mut Equipment) {
    if !eqpt.audio.is_playing() {
        info!("playing {}", AudioClip::Ahhh.file_name());
        eqpt.audio.play(AudioClip::Ahhh);
    }

    limbs.brows.raise_right_furrow_left(&mut eqpt.servo);
    limbs.lids.wince(Side::Left, &mut eqpt.servo);
    limbs.eyes.left_both(&mut eqpt.servo);
    limbs
        .neck
        .wince(Side::Left, now_ms, &mut eqpt.servo, &mut *eqpt.analog);
}
