//! PWM decay strategy

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::PWM_MAX;

/// How winding current recirculates during the off part of a PWM cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecayMode {
    /// One input held high, the other chopped; current recirculates
    /// through the low-side pair
    #[default]
    Slow,
    /// One input chopped, the other held low; current returns to supply
    Fast,
}

impl DecayMode {
    /// Compare values for the two inputs of one bridge
    ///
    /// `quadrant` selects which input carries the variable term. `duty` is
    /// clamped to `PWM_MAX`.
    pub const fn channel_duties(self, duty: u16, quadrant: bool) -> (u16, u16) {
        let duty = if duty > PWM_MAX { PWM_MAX } else { duty };
        match (self, quadrant) {
            (DecayMode::Slow, true) => (PWM_MAX, PWM_MAX - duty),
            (DecayMode::Slow, false) => (PWM_MAX - duty, PWM_MAX),
            (DecayMode::Fast, true) => (duty, 0),
            (DecayMode::Fast, false) => (0, duty),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            DecayMode::Slow => 0,
            DecayMode::Fast => 1,
        }
    }

    /// Unknown values fall back to slow decay
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => DecayMode::Fast,
            _ => DecayMode::Slow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_decay_pairs() {
        assert_eq!(DecayMode::Slow.channel_duties(100, true), (PWM_MAX, PWM_MAX - 100));
        assert_eq!(DecayMode::Slow.channel_duties(100, false), (PWM_MAX - 100, PWM_MAX));
        assert_eq!(DecayMode::Slow.channel_duties(0, true), (PWM_MAX, PWM_MAX));
    }

    #[test]
    fn test_fast_decay_pairs() {
        assert_eq!(DecayMode::Fast.channel_duties(100, true), (100, 0));
        assert_eq!(DecayMode::Fast.channel_duties(100, false), (0, 100));
    }

    #[test]
    fn test_duty_clamped() {
        assert_eq!(DecayMode::Fast.channel_duties(u16::MAX, true), (PWM_MAX, 0));
        assert_eq!(DecayMode::Slow.channel_duties(u16::MAX, false), (0, PWM_MAX));
    }

    #[test]
    fn test_u8_encoding() {
        for mode in [DecayMode::Slow, DecayMode::Fast] {
            assert_eq!(DecayMode::from_u8(mode.as_u8()), mode);
        }
        assert_eq!(DecayMode::from_u8(0xFF), DecayMode::Slow);
    }
}
