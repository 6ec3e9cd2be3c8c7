//! # Alert LOC behaviour

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

/// Sub-states of the alert test.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum AlertPhase {
    /// Converse with the examiner.
    Dialogue,

    /// Follow the examiner's hand with the eyes.
    HandTracking,

    /// Generic resting behaviour once the script is done.
    Idle,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The fully alert test: quick, realistic responses to the standard script,
/// then hand following, then idling. The configured pulse runs throughout.
pub struct Alert {
    phase: AlertPhase,
    dialogue: Dialogue,
    tracker: HandTrack,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Alert {
    pub fn new() -> Self {
        Self {
            phase: AlertPhase::Dialogue,
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
        // The pulse runs for the whole test
        sensors
            .pulse
            .pulse_by_bpm(settings.pulse_bpm, now_ms, &mut *eqpt.sols);

        match self.phase {
            AlertPhase::Dialogue => {
                if self.dialogue.finished() {
                    info!("dialogue complete, tracking the examiner's hand");
                    self.phase = AlertPhase::HandTracking;
                } else {
                    limbs.lids.blink_eyes(now_ms, &mut eqpt.servo);
                    self.dialogue
                        .step(now_ms, LocLevel::Alert, params, limbs, &sensors.mic, eqpt);
                }
            }

            AlertPhase::HandTracking => {
                let block = sensors::tracked_block(&mut *eqpt.camera);
                follow_hand(LocLevel::Alert, block, params, limbs, eqpt, now_ms);

                if self
                    .tracker
                    .observe(block.map(|b| b.age), params.hand_lost_ticks)
                {
                    info!("hand lost, idling");
                    self.phase = AlertPhase::Idle;
                }
            }

            AlertPhase::Idle => {
                limbs.eyes.neutral_both(&mut eqpt.servo);
                limbs.lids.blink_eyes(now_ms, &mut eqpt.servo);
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
