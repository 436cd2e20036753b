//! Runtime safety monitoring
//!
//! The communication watchdog runs once per service period and removes
//! torque when the link that supplies the setpoint goes quiet.

pub mod watchdog;

pub use watchdog::{CommStatus, CommWatchdog};
