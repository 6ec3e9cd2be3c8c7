//! Simulation settings, assembled before the behaviour loop starts

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;
use serde::{Deserialize, Serialize};

// Internal
use crate::sensors::Pulse;

use util::params::LoadError;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Pulse rate used when the operator sets neither an exact BPM nor a range.
const DEFAULT_PULSE_BPM: u16 = 120;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The level of consciousness the head simulates for this run.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LocLevel {
    /// Fully alert: converses and follows the examiner's hand.
    Alert,

    /// Responds to verbal stimuli, but dazed and slow.
    Verbal,

    /// Responds to painful stimuli only.
    Pain,

    /// No response to any stimulus.
    Unresponsive,
}

/// Named pulse ranges the operator can pick instead of an exact BPM.
#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PulseRange {
    Normal,
    Fast,
    Slow,
}

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The assembled, validated settings consumed by the head manager.
///
/// Constructed only through [`LocSettings::assemble`], which enforces the
/// airway invariants, so the behaviour scripts never re-validate.
#[derive(Serialize, Debug, Copy, Clone)]
pub struct LocSettings {
    pub level: LocLevel,
    pub airway: AirwayConditions,
    pub pulse_bpm: u16,
}

/// Airway conditions of the simulated patient.
#[derive(Serialize, Debug, Copy, Clone, Default)]
pub struct AirwayConditions {
    /// Nothing wrong with the airway; all other flags are clear.
    pub normal: bool,

    pub lock_jaw: bool,
    pub irregular_breathing: bool,
    pub stridor_breathing: bool,

    /// Agonal gasps cannot occur at the same time as irregular or stridor
    /// breathing.
    pub agonal_gasps: bool,
}

/// Raw operator input, as delivered by the settings file (standing in for
/// the LCD menu).
#[derive(Deserialize, Debug, Clone)]
pub struct SettingsInput {
    pub level: LocLevel,
    pub airway: AirwayInput,
    pub pulse: PulseInput,
}

/// Raw airway flags before the invariants are applied.
#[derive(Deserialize, Debug, Copy, Clone)]
pub struct AirwayInput {
    pub normal: bool,
    pub lock_jaw: bool,
    pub irregular_breathing: bool,
    pub stridor_breathing: bool,
    pub agonal_gasps: bool,
}

/// Raw pulse selection: an exact BPM wins over a named range.
#[derive(Deserialize, Debug, Copy, Clone)]
pub struct PulseInput {
    pub bpm: Option<u16>,
    pub range: Option<PulseRange>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LocSettings {
    /// Load and assemble the settings from the given parameter file.
    pub fn load(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self::assemble(util::params::load(params_path)?))
    }

    /// Assemble validated settings from raw operator input.
    ///
    /// A normal airway clears every problem flag, and agonal gasps are
    /// masked whenever irregular or stridor breathing is set.
    pub fn assemble(input: SettingsInput) -> Self {
        let mut airway = AirwayConditions {
            normal: input.airway.normal,
            ..Default::default()
        };

        if !airway.normal {
            airway.lock_jaw = input.airway.lock_jaw;
            airway.irregular_breathing = input.airway.irregular_breathing;
            airway.stridor_breathing = input.airway.stridor_breathing;

            if !airway.irregular_breathing && !airway.stridor_breathing {
                airway.agonal_gasps = input.airway.agonal_gasps;
            }
        }

        let pulse_bpm = match (input.pulse.bpm, input.pulse.range) {
            (Some(bpm), _) => bpm,
            (None, Some(PulseRange::Normal)) => Pulse::normal_bpm(),
            (None, Some(PulseRange::Fast)) => Pulse::fast_bpm(),
            (None, Some(PulseRange::Slow)) => Pulse::slow_bpm(),
            (None, None) => DEFAULT_PULSE_BPM,
        };

        info!(
            "settings assembled: {:?} LOC, pulse {} BPM",
            input.level, pulse_bpm
        );

        Self {
            level: input.level,
            airway,
            pulse_bpm,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
