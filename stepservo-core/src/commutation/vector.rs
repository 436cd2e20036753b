//! Result of one commutation

use crate::angle::ElectricalAngle;
use crate::traits::PhaseState;

/// What one bridge was told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseDrive {
    /// Static level (current mode, idle)
    Steady(PhaseState),
    /// Chopped at `duty` (voltage mode)
    Chopped { duty: u16, quadrant: bool },
}

impl Default for PhaseDrive {
    fn default() -> Self {
        PhaseDrive::Steady(PhaseState::Coast)
    }
}

/// Outputs of one commutation call
///
/// Index 0 is phase A (sine), index 1 is phase B (cosine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveVector {
    /// Angle after phase lead compensation
    pub angle: ElectricalAngle,
    pub sin: i16,
    pub cos: i16,
    /// Reference levels written to the bridge
    pub reference: [u16; 2],
    pub phases: [PhaseDrive; 2],
}

impl DriveVector {
    /// Zero reference, both bridges coasting
    pub const fn idle(angle: ElectricalAngle) -> Self {
        Self {
            angle,
            sin: 0,
            cos: 0,
            reference: [0, 0],
            phases: [
                PhaseDrive::Steady(PhaseState::Coast),
                PhaseDrive::Steady(PhaseState::Coast),
            ],
        }
    }

    pub fn is_idle(&self) -> bool {
        self.reference == [0, 0]
            && self
                .phases
                .iter()
                .all(|p| *p == PhaseDrive::Steady(PhaseState::Coast))
    }
}
