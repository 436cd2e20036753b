//! Two-phase bridge driver trait
//!
//! A bridge driver turns per-phase commands into timer compare values and
//! owns no control logic. Every call is a pure function of its arguments:
//! repeating a call leaves the hardware in the same state.

use crate::commutation::DecayMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor winding (one half-bridge pair each)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// First winding, sine component
    A,
    /// Second winding, cosine component
    B,
}

impl Phase {
    pub const fn index(self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
        }
    }
}

/// Static bridge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhaseState {
    Forward,
    Reverse,
    /// Both outputs off, winding de-energized
    #[default]
    Coast,
    /// Winding shorted
    Brake,
}

/// Power stage for a two-phase motor
pub trait BridgeDriver {
    /// Program the current reference of both phases
    ///
    /// Levels are reference PWM duties in `[0, VREF_MAX]`; larger values are
    /// clamped by the implementation.
    fn set_reference(&mut self, level_a: u16, level_b: u16);

    /// Hold one bridge in a static state
    fn set_phase_state(&mut self, phase: Phase, state: PhaseState);

    /// Chop one bridge at `duty` (clamped to `PWM_MAX`)
    ///
    /// `quadrant` selects which input carries the variable term, `decay`
    /// selects the recirculation strategy.
    fn set_duty_cycle(&mut self, phase: Phase, duty: u16, quadrant: bool, decay: DecayMode);

    /// Safe idle output: zero reference, both bridges coasting
    fn idle(&mut self) {
        self.set_reference(0, 0);
        self.set_phase_state(Phase::A, PhaseState::Coast);
        self.set_phase_state(Phase::B, PhaseState::Coast);
    }
}
