//! Power stage and motor configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Encoder positions per mechanical revolution
pub const ANGLE_STEPS: u32 = 65536;

/// Phase polarity of the motor connection
///
/// Decides which bridge 2 direction corresponds to a cosine sign. Only the
/// second phase is affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotorWiring {
    #[default]
    Direct,
    Crossed,
}

impl MotorWiring {
    /// Map the persisted boolean flag (`true` = crossed)
    pub const fn from_flag(crossed: bool) -> Self {
        if crossed {
            MotorWiring::Crossed
        } else {
            MotorWiring::Direct
        }
    }

    pub const fn is_crossed(self) -> bool {
        matches!(self, MotorWiring::Crossed)
    }
}

/// Electrical parameters of the drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveConfig {
    /// A4950 current sense resistor (mΩ)
    pub sense_resistor_mohm: u16,
    /// MCU output voltage, full scale of the reference PWM (mV)
    pub mcu_vout_mv: u16,
    /// Bridge supply voltage (mV)
    pub supply_mv: u16,
    /// Motor phase resistance (Ω)
    pub phase_resistance_ohm: u16,
    /// Back-EMF constant (mV per rev/s)
    pub back_emf_mv_per_rps: u16,
    /// Encoder positions per mechanical revolution
    pub angle_steps_per_rev: u32,
    pub wiring: MotorWiring,
}

impl DriveConfig {
    const COMMON: Self = Self {
        sense_resistor_mohm: 200,
        mcu_vout_mv: 3300,
        supply_mv: 14500,
        phase_resistance_ohm: 3,
        back_emf_mv_per_rps: 3530 / 2,
        angle_steps_per_rev: ANGLE_STEPS,
        wiring: MotorWiring::Direct,
    };

    /// MKS SERVO42B v2 board (200 mΩ sense resistors)
    pub const fn s42b_v2() -> Self {
        Self::COMMON
    }

    /// MKS SERVO57B v2 board (100 mΩ sense resistors)
    pub const fn s57b_v2() -> Self {
        Self {
            sense_resistor_mohm: 100,
            ..Self::COMMON
        }
    }

    /// Same parameters with a different wiring flag
    pub const fn with_wiring(self, wiring: MotorWiring) -> Self {
        Self { wiring, ..self }
    }

    /// Check the parameters the engine divides by or scales with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sense_resistor_mohm == 0 {
            return Err(ConfigError::SenseResistor);
        }
        if self.mcu_vout_mv == 0 {
            return Err(ConfigError::ReferenceVoltage);
        }
        if self.supply_mv == 0 {
            return Err(ConfigError::SupplyVoltage);
        }
        if self.angle_steps_per_rev == 0 {
            return Err(ConfigError::AngleSteps);
        }
        Ok(())
    }

    /// Reference voltage for a current demand, clamped to the MCU output
    ///
    /// A4950: `I_trip = V_ref / (10 * R_s)`, so `V_ref[mV] = I[mA] * R_s[mΩ] / 100`.
    pub fn current_to_vref_mv(&self, current_ma: u16) -> u32 {
        let vref = current_ma as u32 * self.sense_resistor_mohm as u32 / 100;
        vref.min(self.mcu_vout_mv as u32)
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::s42b_v2()
    }
}
