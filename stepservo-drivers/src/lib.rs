//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stepservo-core:
//!
//! - A4950 dual full-bridge ([`a4950::A4950`], a `BridgeDriver`)
//! - Error LED ([`indicator::LedIndicator`], an `ErrorIndicator`)

#![no_std]
#![deny(unsafe_code)]

pub mod a4950;
pub mod indicator;

pub use a4950::A4950;
pub use indicator::LedIndicator;
