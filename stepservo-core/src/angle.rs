//! Electrical angle ring and fixed-point trigonometry
//!
//! One electrical revolution is `SINE_STEPS` units; a full mechanical step
//! of a two-phase motor is a quarter of that (90 electrical degrees).
//! All wrap-around is done with a bitmask, so `SINE_STEPS` must stay a
//! power of two.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

include!(concat!(env!("OUT_DIR"), "/sine_table.rs"));

/// Angle units per electrical revolution
pub const SINE_STEPS: u16 = 1024;

/// Angle units per full step (90 electrical degrees)
pub const FULL_STEP: u16 = SINE_STEPS / 4;

/// Fixed-point amplitude of the sine table (`sin = 1.0`)
pub const SINE_MAX: i32 = 32768;

const RING_MASK: u16 = SINE_STEPS - 1;
const QUARTER_MASK: u16 = FULL_STEP - 1;

const _: () = assert!(SINE_STEPS.is_power_of_two());
const _: () = assert!(QUARTER_SINE.len() == FULL_STEP as usize + 1);

/// Position within one commutation cycle
///
/// Always held in `[0, SINE_STEPS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u16", into = "u16"))]
pub struct ElectricalAngle(u16);

impl ElectricalAngle {
    /// Zero angle
    pub const ZERO: Self = Self(0);

    /// Wrap an arbitrary raw value onto the ring
    pub const fn new(raw: u16) -> Self {
        Self(raw & RING_MASK)
    }

    /// Raw value in `[0, SINE_STEPS)`
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Move the angle forward by `units`
    pub const fn advance(self, units: u16) -> Self {
        Self::new(self.0.wrapping_add(units))
    }

    /// Move the angle backward by `units`
    pub const fn retard(self, units: u16) -> Self {
        Self::new(self.0.wrapping_sub(units))
    }

    /// Forward distance from `self` to `other` on the ring
    pub const fn distance_to(self, other: Self) -> u16 {
        other.0.wrapping_sub(self.0) & RING_MASK
    }

    /// Fixed-point sine, `±(SINE_MAX - 1)` at the peaks
    pub fn sine(self) -> i16 {
        let index = (self.0 & QUARTER_MASK) as usize;
        let quarter = FULL_STEP as usize;
        match self.0 / FULL_STEP {
            0 => QUARTER_SINE[index],
            1 => QUARTER_SINE[quarter - index],
            2 => -QUARTER_SINE[index],
            _ => -QUARTER_SINE[quarter - index],
        }
    }

    /// Fixed-point cosine (sine shifted by a full step)
    pub fn cosine(self) -> i16 {
        self.advance(FULL_STEP).sine()
    }
}

impl From<u16> for ElectricalAngle {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}

impl From<ElectricalAngle> for u16 {
    fn from(angle: ElectricalAngle) -> Self {
        angle.raw()
    }
}
