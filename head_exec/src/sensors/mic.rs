//! Microphone adapter

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::MicParams;

use eqpt_if::{AnalogChannel, AnalogReader};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The microphone, read as an offset-trimmed signal with a dead band.
pub struct Microphone {
    channel: AnalogChannel,
    params: MicParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Microphone {
    pub fn new(channel: AnalogChannel, params: MicParams) -> Self {
        Self { channel, params }
    }

    /// Read the microphone with the calibration offset removed.
    pub fn read_trimmed(&self, analog: &mut dyn AnalogReader) -> i32 {
        analog.read(self.channel) as i32 - self.params.offset_count
    }

    /// True if a trimmed reading lies outside the dead band, meaning
    /// someone is talking.
    pub fn is_excursion(&self, trimmed: i32) -> bool {
        trimmed > self.params.range_count || trimmed < -self.params.range_count
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::sim::SimAnalog;

    fn test_mic() -> Microphone {
        Microphone::new(
            AnalogChannel::Microphone,
            MicParams {
                offset_count: 560,
                range_count: 20,
            },
        )
    }

    #[test]
    fn test_trim_and_dead_band() {
        let mut analog = SimAnalog::new();
        let mic = test_mic();

        analog.set(AnalogChannel::Microphone, 560);
        let trimmed = mic.read_trimmed(&mut analog);
        assert_eq!(trimmed, 0);
        assert!(!mic.is_excursion(trimmed));

        // Just inside the band either side
        assert!(!mic.is_excursion(20));
        assert!(!mic.is_excursion(-20));

        // Outside the band
        assert!(mic.is_excursion(21));
        assert!(mic.is_excursion(-21));
    }
}
