//! Canned response scripts, keyed by LOC level and response count
//!
//! Each spoken exchange of the standard script pairs an audio clip with a
//! mechanical motion. The mechanical side is driven every tick while the
//! clip plays, so everything here must be non-blocking.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use super::{Limbs, LocLevel};
use crate::eqpt::Equipment;
use crate::motion::Side;

use eqpt_if::AudioClip;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Nods given while agreeing to follow the hand.
const AGREE_NOD_TIMES: u32 = 3;

/// Pause between those nods.
///
/// Units: milliseconds
const AGREE_NOD_PAUSE_MS: u64 = 250;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// The audio clip for the given exchange, or `None` when the script has no
/// line there.
pub fn voice_response(loc: LocLevel, times_responded: u8) -> Option<AudioClip> {
    match (loc, times_responded) {
        // Greeting and a brief description of the medical problem
        (LocLevel::Alert, 0) => Some(AudioClip::HiBus),
        // Agreeing to follow the hand
        (LocLevel::Alert, 1) => Some(AudioClip::YesFollow),

        // Dazed greeting
        (LocLevel::Verbal, 0) => Some(AudioClip::Ahhh),
        (LocLevel::Verbal, 1) => Some(AudioClip::YesFollow),

        (LocLevel::Pain, 0) => Some(AudioClip::SdTest1),
        (LocLevel::Pain, 1) => Some(AudioClip::Ahhh),

        _ => None,
    }
}

/// Drive the mechanical half of the given exchange for one tick.
pub fn mech_response(
    loc: LocLevel,
    times_responded: u8,
    now_ms: u64,
    limbs: &mut Limbs,
    eqpt: &mut Equipment,
) {
    match (loc, times_responded) {
        (LocLevel::Alert, 0) => {
            limbs.lids.wink_left(now_ms, &mut eqpt.servo);
            limbs.jaw.hello(now_ms, &mut eqpt.servo);
        }
        (LocLevel::Alert, 1) => {
            limbs.lids.wink_right(now_ms, &mut eqpt.servo);
            limbs.jaw.hello_slow(now_ms, &mut eqpt.servo);
            limbs.neck.nod_times(
                AGREE_NOD_TIMES,
                AGREE_NOD_PAUSE_MS,
                now_ms,
                &mut eqpt.servo,
                &mut *eqpt.analog,
            );
        }

        (LocLevel::Verbal, 0) => {
            limbs.brows.raise_left_furrow_right(&mut eqpt.servo);
        }
        (LocLevel::Verbal, 1) => {
            limbs.eyes.look_left_and_right(now_ms, &mut eqpt.servo);
            limbs.neck.tilt(now_ms, &mut eqpt.servo, &mut *eqpt.analog);
        }

        (LocLevel::Pain, 0) => {
            limbs.brows.raise_and_furrow(now_ms, &mut eqpt.servo);
        }
        (LocLevel::Pain, 1) => {
            limbs.lids.long_close(now_ms, &mut eqpt.servo);
            limbs.neck.wince(Side::Left, now_ms, &mut eqpt.servo, &mut *eqpt.analog);
        }

        _ => (),
    }
}
