//! The listen-and-respond protocol

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, info, trace};

// Internal
use super::{responses, Limbs, LocLevel, Params};
use crate::eqpt::Equipment;
use crate::sensors::Microphone;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of the listen-and-respond protocol.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DialoguePhase {
    /// Waiting for the microphone to leave the dead band.
    Listening,

    /// Someone spoke; waiting for a continuous quiet period.
    AwaitingQuiet,

    /// Playing the scripted response while driving the matching motion.
    Responding,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The back-and-forth conversation state machine.
///
/// Listening detects a microphone excursion beyond the dead band;
/// AwaitingQuiet requires the signal back inside the band continuously for
/// the configured quiet period (excursions restart the clock); Responding
/// triggers the scripted clip once and drives the matching motion every
/// tick until the clip finishes. After the configured number of exchanges
/// the dialogue reports finished until externally reset.
pub struct Dialogue {
    phase: DialoguePhase,

    /// Start of the current quiet stretch, if the signal is in band.
    quiet_since_ms: Option<u64>,

    times_responded: u8,
    finished: bool,

    /// Guards the response clip against retriggering within one exchange.
    response_triggered: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Dialogue {
    pub fn new() -> Self {
        Self {
            phase: DialoguePhase::Listening,
            quiet_since_ms: None,
            times_responded: 0,
            finished: false,
            response_triggered: false,
        }
    }

    /// True once the scripted number of exchanges has completed. Latches
    /// until [`Dialogue::reset`].
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Completed exchanges so far.
    pub fn times_responded(&self) -> u8 {
        self.times_responded
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    /// Start the conversation over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the protocol by one tick.
    pub fn step(
        &mut self,
        now_ms: u64,
        loc: LocLevel,
        params: &Params,
        limbs: &mut Limbs,
        mic: &Microphone,
        eqpt: &mut Equipment,
    ) {
        match self.phase {
            DialoguePhase::Listening => {
                if self.times_responded >= params.dialogue_responses {
                    info!("dialogue finished after {} responses", self.times_responded);
                    self.times_responded = 0;
                    self.finished = true;
                    return;
                }

                let trimmed = mic.read_trimmed(&mut *eqpt.analog);
                trace!("mic reads {}", trimmed);

                if mic.is_excursion(trimmed) {
                    debug!("speech detected ({})", trimmed);
                    self.quiet_since_ms = None;
                    self.phase = DialoguePhase::AwaitingQuiet;
                }
            }

            DialoguePhase::AwaitingQuiet => {
                let trimmed = mic.read_trimmed(&mut *eqpt.analog);

                if mic.is_excursion(trimmed) {
                    // Still talking: the quiet clock starts over
                    self.quiet_since_ms = None;
                } else {
                    let since = *self.quiet_since_ms.get_or_insert(now_ms);
                    if now_ms >= since + params.quiet_period_ms {
                        debug!("speaker finished, responding");
                        self.response_triggered = false;
                        self.phase = DialoguePhase::Responding;
                    }
                }
            }

            DialoguePhase::Responding => {
                if !self.response_triggered {
                    if let Some(clip) = responses::voice_response(loc, self.times_responded) {
                        if !eqpt.audio.is_playing() {
                            info!("playing response clip {}", clip.file_name());
                            eqpt.audio.play(clip);
                        }
                    }
                    self.response_triggered = true;
                }

                // The motion runs every tick the clip is playing
                responses::mech_response(loc, self.times_responded, now_ms, limbs, eqpt);

                if !eqpt.audio.is_playing() {
                    self.times_responded += 1;
                    self.phase = DialoguePhase::Listening;
                }
            }
        }
    }
}

impl Default for Dialogue {
    fn default() -> Self {
        Self::new()
    }
}
