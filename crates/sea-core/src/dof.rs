//! Wave-type / degree-of-freedom codes.
//!
//! Result arrays carry one integer code per column identifying the mode
//! family of that column. The codes follow the physics engine's numbering;
//! codes the engine reports but this table does not know are carried
//! through extraction as raw integers.

use core::fmt;

/// Known wave-type / DOF code families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaveKind {
    /// Acoustic pressure in a cavity (code 0).
    AcousticPressure,
    /// Plate/beam bending (code 3).
    Bending,
    /// In-plane longitudinal (code 5).
    Longitudinal,
    /// Structural velocity response (code 7).
    Velocity,
}

impl WaveKind {
    /// The engine-side integer code.
    pub fn code(self) -> u32 {
        match self {
            WaveKind::AcousticPressure => 0,
            WaveKind::Bending => 3,
            WaveKind::Longitudinal => 5,
            WaveKind::Velocity => 7,
        }
    }

    /// Map an engine code back to a known family.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(WaveKind::AcousticPressure),
            3 => Some(WaveKind::Bending),
            5 => Some(WaveKind::Longitudinal),
            7 => Some(WaveKind::Velocity),
            _ => None,
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WaveKind::AcousticPressure => "pressure",
            WaveKind::Bending => "bending",
            WaveKind::Longitudinal => "longitudinal",
            WaveKind::Velocity => "velocity",
        };
        write!(f, "{label}")
    }
}
