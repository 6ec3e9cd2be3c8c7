//! # Verbal-response LOC behaviour

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::{
    follow_hand, Dialogue, HandTrack, Limbs, LocLevel, LocSettings, Params, Sensors, StatusReport,
};
use crate::eqpt::Equipment;
use crate::sensors;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Sub-states of the verbal test.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum VerbalPhase {
    Dialogue,
    HandTracking,
    Idle,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The verbal-response test: the same script as the alert test but dazed
/// and slow, with the neck joining the hand following.
pub struct Verbal {
    phase: VerbalPhase,
    dialogue: Dialogue,
    tracker: HandTrack,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Verbal {
    pub fn new() -> Self {
        Self {
            phase: VerbalPhase::Dialogue,
            dialogue: Dialogue::new(),
            tracker: HandTrack::new(),
        }
    }

    pub fn step(
        &mut self,
        now_ms: u64,
        settings: &LocSettings,
        params: &Params,
        limbs: &mut Limbs,
        sensors: &mut Sensors,
        eqpt: &mut Equipment,
    ) -> StatusReport {
        sensors
            .pulse
            .pulse_by_bpm(settings.pulse_bpm, now_ms, &mut *eqpt.sols);

        match self.phase {
            VerbalPhase::Dialogue => {
                if self.dialogue.finished() {
                    info!("dialogue complete, tracking the examiner's hand");
                    self.phase = VerbalPhase::HandTracking;
                } else {
                    // Dazed background motion instead of the alert blink
                    limbs
                        .eyes
                        .step_eyes_up_and_down_very_slow(now_ms, &mut eqpt.servo);
                    self.dialogue
                        .step(now_ms, LocLevel::Verbal, params, limbs, &sensors.mic, eqpt);
                }
            }

            VerbalPhase::HandTracking => {
                let block = sensors::tracked_block(&mut *eqpt.camera);
                follow_hand(LocLevel::Verbal, block, params, limbs, eqpt, now_ms);

                if self
                    .tracker
                    .observe(block.map(|b| b.age), params.hand_lost_ticks)
                {
                    info!("hand lost, idling");
                    self.phase = VerbalPhase::Idle;
                }
            }

            VerbalPhase::Idle => {
                limbs.lids.blink_eyes(now_ms, &mut eqpt.servo);
                limbs.eyes.step_eyes_up_and_down_slow(now_ms, &mut eqpt.servo);
            }
        }

        StatusReport {
            phase: format!("{:?}", self.phase),
            finished_dialogue: self.dialogue.finished(),
            times_responded: self.dialogue.times_responded(),
            force_level: None,
        }
    }
}
