//! Hand tracking loss detection

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Watches the camera's track age to decide when the examiner's hand has
/// left the frame.
///
/// While a block is tracked its age grows frame to frame; an age that sits
/// unchanged means the firmware has stopped updating the track. A frame
/// with no usable block counts as unchanged too.
#[derive(Debug, Default)]
pub struct HandTrack {
    last_age: Option<u8>,
    stable_ticks: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HandTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's observed track age (`None` when the camera gave
    /// no usable block). Returns true once the age has sat unchanged for
    /// more than `lost_after_ticks` consecutive ticks.
    pub fn observe(&mut self, age: Option<u8>, lost_after_ticks: u32) -> bool {
        // A missing observation keeps the last age on the books
        let effective = age.or(self.last_age);

        match effective {
            Some(a) if self.last_age != Some(a) => {
                self.last_age = Some(a);
                self.stable_ticks = 0;
            }
            // A zero age means nothing has been tracked yet
            Some(a) if a > 0 => self.stable_ticks += 1,
            _ => (),
        }

        self.stable_ticks > lost_after_ticks
    }

    /// Forget the current track, ready for a fresh hand.
    pub fn reset(&mut self) {
        self.last_age = None;
        self.stable_ticks = 0;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_changing_age_never_loses() {
        let mut tracker = HandTrack::new();

        for age in 1..100u8 {
            assert!(!tracker.observe(Some(age), 40));
        }
    }

    #[test]
    fn test_stalled_age_loses_after_threshold() {
        let mut tracker = HandTrack::new();

        tracker.observe(Some(10), 40);

        let mut lost_at = None;
        for tick in 0..60 {
            if tracker.observe(Some(10), 40) {
                lost_at = Some(tick);
                break;
            }
        }

        // 41 stalled ticks are needed before the hand counts as lost
        assert_eq!(lost_at, Some(40));
    }

    #[test]
    fn test_missing_frames_count_as_stalled() {
        let mut tracker = HandTrack::new();

        tracker.observe(Some(10), 40);

        let mut lost = false;
        for _ in 0..45 {
            lost = tracker.observe(None, 40);
        }

        assert!(lost);
    }

    #[test]
    fn test_age_change_resets_the_count() {
        let mut tracker = HandTrack::new();

        tracker.observe(Some(10), 40);
        for _ in 0..30 {
            assert!(!tracker.observe(Some(10), 40));
        }

        // The track updates: the stall counter starts over
        tracker.observe(Some(11), 40);
        for _ in 0..35 {
            assert!(!tracker.observe(Some(11), 40));
        }
    }

    #[test]
    fn test_zero_age_never_counts() {
        let mut tracker = HandTrack::new();

        for _ in 0..100 {
            assert!(!tracker.observe(Some(0), 40));
        }
    }
}
