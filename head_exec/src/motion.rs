//! # Shared motion vocabulary
//!
//! Every limb on the head moves by the same discipline: a commanded value is
//! re-asserted every tick, and incremented toward a limit only when the
//! per-axis move interval has elapsed. This module holds the pieces of that
//! discipline shared by all limbs: the [`Side`] of a bilateral pair, the
//! explicit [`StepState`] of a timer-gated stepping sequence, and the
//! arrival/direction predicates.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// One side of a bilateral mechanical pair.
///
/// The left and right linkages of a limb are mechanically mirrored, so the
/// direction of increasing servo angle can differ between sides. All
/// side-dependent behaviour is derived from the per-side calibration tables,
/// never from branching on the side itself.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// State of one timer-gated stepping sequence.
///
/// This is the explicit form of the "first call sets direction" pattern: a
/// sequence is either not yet started, or stepping toward a known target
/// with a record of when the command was last incremented.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepState<T> {
    /// No stepping sequence has been started on this axis.
    Uninitialised,

    /// A sequence toward `target` is in progress.
    SteppingToward {
        target: T,
        /// Session time of the last command increment.
        last_step_ms: u64,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<T: Copy + PartialEq> StepState<T> {
    /// The target of the sequence in progress, if any.
    pub fn target(&self) -> Option<T> {
        match self {
            StepState::Uninitialised => None,
            StepState::SteppingToward { target, .. } => Some(*target),
        }
    }

    /// Guard: true when at least `min_interval_ms` has elapsed since the
    /// last increment, so the command may advance this tick.
    pub fn due(&self, now_ms: u64, min_interval_ms: u64) -> bool {
        match self {
            StepState::Uninitialised => false,
            StepState::SteppingToward { last_step_ms, .. } => {
                now_ms > last_step_ms + min_interval_ms
            }
        }
    }

    /// Record an increment at `now_ms`.
    pub fn mark(&mut self, now_ms: u64) {
        if let StepState::SteppingToward { last_step_ms, .. } = self {
            *last_step_ms = now_ms;
        }
    }

    /// Enter a sequence toward `target`.
    pub fn retarget(&mut self, target: T, now_ms: u64) {
        *self = StepState::SteppingToward {
            target,
            last_step_ms: now_ms,
        };
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Direction multiplier for travel from `from` toward `limit`.
pub fn dir_toward(from: f64, limit: f64) -> f64 {
    if limit >= from {
        1.0
    } else {
        -1.0
    }
}

/// Arrival predicate: true once `cmd` has reached or passed `limit`
/// travelling in direction `dir`.
pub fn reached(cmd: f64, limit: f64, dir: f64) -> bool {
    if dir >= 0.0 {
        cmd >= limit
    } else {
        cmd <= limit
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reached() {
        assert!(reached(100.0, 100.0, 1.0));
        assert!(reached(101.0, 100.0, 1.0));
        assert!(!reached(99.0, 100.0, 1.0));

        assert!(reached(55.0, 55.0, -1.0));
        assert!(reached(54.0, 55.0, -1.0));
        assert!(!reached(56.0, 55.0, -1.0));
    }

    #[test]
    fn test_step_state_due() {
        let mut state: StepState<u8> = StepState::Uninitialised;
        assert!(!state.due(1000, 5));

        state.retarget(0, 1000);
        // Zero elapsed time never advances the command
        assert!(!state.due(1000, 5));
        assert!(!state.due(1005, 5));
        assert!(state.due(1006, 5));

        state.mark(1006);
        assert!(!state.due(1006, 5));
        assert!(state.due(1012, 5));
    }
}
