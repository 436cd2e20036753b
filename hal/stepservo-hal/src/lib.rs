//! stepservo Hardware Abstraction Layer
//!
//! This crate defines register-level traits that chip-specific HALs
//! implement (currently STM32F103). The core logic and the bridge driver
//! only ever talk to hardware through these traits, so both can be tested
//! on the host against scripted stubs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  stepservo-core / stepservo-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stepservo-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ stepservo-hal-│
//!             │    stm32f1    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::TaskTimer`] - free-running timer that paces a scheduled task
//! - [`pwm::PwmTimer`] - four-channel timer driving the bridge inputs

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use pwm::{PwmChannel, PwmTimer};
pub use timer::TaskTimer;
