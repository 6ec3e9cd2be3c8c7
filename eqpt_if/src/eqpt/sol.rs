//! # Pulse Solenoid Contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The solenoids which tap out the carotid pulse.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum SolenoidId {
    PulseLeft,
    PulseRight,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing a unified API for the solenoid outputs.
pub trait SolenoidDriver {
    /// Energise or release the given solenoid.
    fn set(&mut self, id: SolenoidId, energised: bool);
}
