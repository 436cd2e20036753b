//! Task timer configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepservo_hal::timer::TASK_TIMER_TICK_HZ;

use super::ConfigError;

/// Service task period (µs), not configurable
pub const SERVICE_PERIOD_US: u32 = 10_000;

/// Default motion task period (µs)
pub const DEFAULT_MOTION_PERIOD_US: u32 = 250;

/// Default STM32F103 core clock (Hz)
pub const DEFAULT_CORE_CLOCK_HZ: u32 = 72_000_000;

/// Clock and period settings for both task timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerConfig {
    /// Timer input clock (Hz)
    pub core_clock_hz: u32,
    /// Motion task period (µs)
    pub motion_period_us: u32,
}

impl SchedulerConfig {
    pub const DEFAULT: Self = Self {
        core_clock_hz: DEFAULT_CORE_CLOCK_HZ,
        motion_period_us: DEFAULT_MOTION_PERIOD_US,
    };

    /// Motion period in µs, service period fixed
    pub const fn with_motion_period(motion_period_us: u32) -> Self {
        Self {
            motion_period_us,
            ..Self::DEFAULT
        }
    }

    /// Prescaler that brings the timer to one tick per µs
    pub const fn prescaler(&self) -> u32 {
        (self.core_clock_hz / TASK_TIMER_TICK_HZ).saturating_sub(1)
    }

    /// Auto-reload for the motion timer
    pub const fn motion_auto_reload(&self) -> u32 {
        self.motion_period_us.saturating_sub(1)
    }

    /// Auto-reload for the service timer
    pub const fn service_auto_reload(&self) -> u32 {
        SERVICE_PERIOD_US - 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.core_clock_hz < TASK_TIMER_TICK_HZ || self.core_clock_hz % TASK_TIMER_TICK_HZ != 0 {
            return Err(ConfigError::CoreClock);
        }
        if self.prescaler() > u16::MAX as u32 {
            return Err(ConfigError::Prescaler);
        }
        if self.motion_period_us == 0 || self.motion_auto_reload() > u16::MAX as u32 {
            return Err(ConfigError::Period);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
