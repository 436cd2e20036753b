//! Commutation engine
//!
//! Turns an electrical angle and a torque demand into bridge commands for a
//! two-phase stepper:
//!
//! - **Current mode** sets both bridge directions statically and shapes the
//!   winding currents through the A4950 reference inputs (`|sin|`, `|cos|`).
//!   The reference PWM passes an RC filter, so the angle is advanced by a
//!   speed-dependent phase lead.
//! - **Voltage mode** chops the bridges directly with duties computed from
//!   the demand and a back-EMF feed-forward term. The reference is held at a
//!   flat ceiling.

mod decay;
mod engine;
mod flags;
mod phase_lead;
mod vector;

pub use decay::DecayMode;
pub use engine::CommutationEngine;
pub use flags::DriveFlags;
pub use phase_lead::{PhaseLeadTable, DAC_PHASE_LEAD, PHASE_LEAD_MAX_SPEED};
pub use vector::{DriveVector, PhaseDrive};

use crate::angle::SINE_MAX;

/// Shift from sine amplitude to reference PWM resolution
pub const VREF_SCALER: u32 = 6;

/// Ratio between sine amplitude and reference PWM resolution
pub const VREF_SINE_RATIO: u32 = 1 << VREF_SCALER;

/// Full-scale reference PWM value
pub const VREF_MAX: u16 = (SINE_MAX >> VREF_SCALER) as u16;

/// Shift from sine amplitude to bridge PWM resolution
pub const PWM_SCALER: u32 = 3;

/// Bridge PWM auto-reload while chopping
pub const PWM_MAX: u16 = (SINE_MAX >> PWM_SCALER) as u16;

/// Bridge timer auto-reload while holding static levels
pub const PWM_MIN: u16 = 1;
