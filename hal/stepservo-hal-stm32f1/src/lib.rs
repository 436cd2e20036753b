//! STM32F103-specific HAL for the stepservo firmware
//!
//! This crate provides STM32F103 implementations of the `stepservo-hal`
//! traits and the pin/timer assignment of the MKS SERVO42B/57B boards:
//!
//! - [`timer::MotionTimer`] (TIM1) and [`timer::ServiceTimer`] (TIM2) pace
//!   the two scheduled tasks
//! - [`pwm::BridgeTimer`] (TIM4) drives the A4950 logic inputs
//! - TIM3 channels from [`board::vref_channels`] set the A4950 current
//!   references
//!
//! Interrupt handlers live in the firmware binary; they call the
//! scheduler's `on_motion_interrupt` / `on_service_interrupt` with the
//! timers from this crate.

#![no_std]

pub mod board;
pub mod pwm;
pub mod timer;

pub use pwm::BridgeTimer;
pub use timer::{MotionTimer, ServiceTimer};
