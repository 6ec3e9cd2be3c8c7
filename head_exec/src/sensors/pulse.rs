//! Pulse solenoid adapter

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::PulseParams;

use eqpt_if::{SolenoidDriver, SolenoidId};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Added to the demanded BPM when computing the beat period. The motion
/// state machines steal small slices of every tick, which stretches the
/// realised period; the offset compensates so the felt pulse lands on the
/// demanded rate.
const BPM_LAG_OFFSET: u64 = 10;

/// Normal adult resting heart rate range, BPM (upper bound exclusive).
pub const NORMAL_BPM_RANGE: (u16, u16) = (60, 101);

/// Tachycardic range, BPM (upper bound exclusive).
pub const FAST_BPM_RANGE: (u16, u16) = (101, 221);

/// Bradycardic range, BPM (upper bound exclusive).
pub const SLOW_BPM_RANGE: (u16, u16) = (10, 60);

/// Range an irregular rhythm is drawn from, BPM (upper bound exclusive).
pub const IRREGULAR_BPM_RANGE: (u16, u16) = (30, 220);

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Phase of the beat cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum PulsePhase {
    /// Solenoids energised.
    Beat,

    /// Short release between beats.
    Rest,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The carotid pulse: both solenoids tapped at a BPM-derived period.
pub struct Pulse {
    params: PulseParams,

    phase: PulsePhase,
    last_ms: u64,

    /// Current draw of the irregular rhythm, redrawn every beat.
    irregular_bpm: Option<u16>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pulse {
    pub fn new(params: PulseParams) -> Self {
        Self {
            params,
            phase: PulsePhase::Beat,
            last_ms: 0,
            irregular_bpm: None,
        }
    }

    /// Duration the solenoids stay energised for one beat at the given BPM.
    pub fn on_duration_ms(bpm: u16) -> u64 {
        60_000 / (bpm as u64 + BPM_LAG_OFFSET)
    }

    /// Tap out an even pulse at the given BPM.
    pub fn pulse_by_bpm(&mut self, bpm: u16, now_ms: u64, sols: &mut dyn SolenoidDriver) {
        match self.phase {
            PulsePhase::Beat => {
                Self::set_both(sols, true);
                if now_ms > self.last_ms + Self::on_duration_ms(bpm) {
                    self.last_ms = now_ms;
                    self.phase = PulsePhase::Rest;
                }
            }
            PulsePhase::Rest => {
                Self::set_both(sols, false);
                if now_ms > self.last_ms + self.params.off_pulse_ms {
                    self.last_ms = now_ms;
                    self.phase = PulsePhase::Beat;
                }
            }
        }
    }

    /// Tap out an irregular rhythm, redrawing the rate after every beat.
    pub fn rand_pulse(&mut self, now_ms: u64, sols: &mut dyn SolenoidDriver) {
        let bpm = match self.irregular_bpm {
            Some(bpm) => bpm,
            None => {
                let bpm = Self::irregular_bpm();
                self.irregular_bpm = Some(bpm);
                bpm
            }
        };

        match self.phase {
            PulsePhase::Beat => {
                Self::set_both(sols, true);
                if now_ms > self.last_ms + Self::on_duration_ms(bpm) {
                    let next = Self::irregular_bpm();
                    debug!("next irregular beat: {} BPM", next);
                    self.irregular_bpm = Some(next);
                    self.last_ms = now_ms;
                    self.phase = PulsePhase::Rest;
                }
            }
            PulsePhase::Rest => {
                Self::set_both(sols, false);
                if now_ms > self.last_ms + self.params.off_pulse_ms {
                    self.last_ms = now_ms;
                    self.phase = PulsePhase::Beat;
                }
            }
        }
    }

    // ---- BPM GENERATORS ----

    /// Draw a BPM from the normal adult range.
    pub fn normal_bpm() -> u16 {
        rand::random_range(NORMAL_BPM_RANGE.0..NORMAL_BPM_RANGE.1)
    }

    /// Draw a BPM from the fast range.
    pub fn fast_bpm() -> u16 {
        rand::random_range(FAST_BPM_RANGE.0..FAST_BPM_RANGE.1)
    }

    /// Draw a BPM from the slow range.
    pub fn slow_bpm() -> u16 {
        rand::random_range(SLOW_BPM_RANGE.0..SLOW_BPM_RANGE.1)
    }

    /// Draw a BPM from the irregular range.
    pub fn irregular_bpm() -> u16 {
        rand::random_range(IRREGULAR_BPM_RANGE.0..IRREGULAR_BPM_RANGE.1)
    }

    // ---- PRIVATE ----

    fn set_both(sols: &mut dyn SolenoidDriver, energised: bool) {
        sols.set(SolenoidId::PulseLeft, energised);
        sols.set(SolenoidId::PulseRight, energised);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::sim::SimSolenoids;

    fn test_pulse() -> Pulse {
        Pulse::new(PulseParams { off_pulse_ms: 30 })
    }

    #[test]
    fn test_on_duration() {
        // 60 BPM: 60000 / 70
        assert_eq!(Pulse::on_duration_ms(60), 857);

        // Every BPM in the supported range yields a positive duration
        for bpm in 10..=220 {
            assert!(Pulse::on_duration_ms(bpm) > 0);
        }
    }

    #[test]
    fn test_beat_cycle() {
        let mut pulse = test_pulse();
        let mut sols = SimSolenoids::new();

        // During the beat both solenoids are energised
        pulse.pulse_by_bpm(60, 100, &mut sols);
        assert!(sols.is_on(SolenoidId::PulseLeft));
        assert!(sols.is_on(SolenoidId::PulseRight));

        // Past the on-duration: transition, next tick releases
        pulse.pulse_by_bpm(60, 858, &mut sols);
        pulse.pulse_by_bpm(60, 860, &mut sols);
        assert!(!sols.is_on(SolenoidId::PulseLeft));

        // Past the off pulse: beating again
        pulse.pulse_by_bpm(60, 889, &mut sols);
        pulse.pulse_by_bpm(60, 891, &mut sols);
        assert!(sols.is_on(SolenoidId::PulseLeft));
    }

    #[test]
    fn test_generators_in_range() {
        for _ in 0..100 {
            let n = Pulse::normal_bpm();
            assert!(n >= 60 && n <= 100);

            let f = Pulse::fast_bpm();
            assert!(f >= 101 && f <= 220);

            let s = Pulse::slow_bpm();
            assert!(s >= 10 && s <= 59);

            let i = Pulse::irregular_bpm();
            assert!(i >= 30 && i <= 219);
        }
    }

    #[test]
    fn test_rand_pulse_redraws_each_beat() {
        let mut pulse = test_pulse();
        let mut sols = SimSolenoids::new();

        pulse.rand_pulse(100, &mut sols);
        let first = pulse.irregular_bpm.unwrap();
        assert!(first >= 30 && first <= 219);

        // Run far past any possible beat length so a redraw must occur
        let mut now = 100;
        for _ in 0..10 {
            now += 2000;
            pulse.rand_pulse(now, &mut sols);
        }
        assert!(pulse.irregular_bpm.is_some());
    }
}
