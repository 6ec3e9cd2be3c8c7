//! # Unresponsive LOC behaviour

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::{Limbs, StatusReport};
use crate::eqpt::Equipment;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The unresponsive test: the same dazed posture every tick, regardless of
/// any stimulus.
pub struct Unresponsive;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Unresponsive {
    pub fn new() -> Self {
        Self
    }

    pub fn step(&mut self, now_ms: u64, limbs: &mut Limbs, eqpt: &mut Equipment) -> StatusReport {
        limbs.lids.lazy_blink_eyes(now_ms, &mut eqpt.servo);
        limbs.brows.slight_raise_both(&mut eqpt.servo);
        limbs.eyes.neutral_both(&mut eqpt.servo);

        StatusReport {
            phase: "Dazed".to_string(),
            finished_dialogue: false,
            times_responded: 0,
            force_level: None,
        }
    }
}
