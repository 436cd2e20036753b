//! Configuration types
//!
//! Board presets and timing parameters. Values normally come from the
//! persisted parameter block; the core only ever reads them, and each struct
//! is validated before it reaches the engine or the scheduler.

pub mod drive;
pub mod scheduler;

pub use drive::*;
pub use scheduler::*;

/// Configuration validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sense resistor is zero
    SenseResistor,
    /// MCU reference voltage is zero
    ReferenceVoltage,
    /// Supply voltage is zero
    SupplyVoltage,
    /// Encoder resolution is zero
    AngleSteps,
    /// Core clock is not a whole multiple of the task tick rate
    CoreClock,
    /// Timer prescaler would not fit the 16-bit register
    Prescaler,
    /// Task period of zero or beyond the 16-bit auto-reload range
    Period,
}
