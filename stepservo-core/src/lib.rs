//! Board-agnostic core logic for the stepper servo firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Electrical angle ring and fixed-point sine table
//! - Commutation engine (current and voltage modes, phase lead)
//! - Interrupt task scheduler with overrun diagnostics
//! - Control state machine, startup sequence and communication watchdog
//! - Collaborator traits (bridge, feedback, communication, control mode)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod angle;
pub mod commutation;
pub mod config;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use angle::{ElectricalAngle, SINE_MAX, SINE_STEPS};
