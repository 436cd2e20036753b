//! Drive flags shared across interrupt priorities
//!
//! The motion task reads both flags on every commutation. Configuration code
//! in the service task or main loop may write them at any time; each flag is
//! a single atomic word, so there is nothing to tear.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use super::DecayMode;

/// Enable flag and decay mode of the power stage
#[derive(Debug)]
pub struct DriveFlags {
    enabled: AtomicBool,
    decay: AtomicU8,
}

impl DriveFlags {
    /// Disabled, with the given decay mode
    pub const fn new(decay: DecayMode) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            decay: AtomicU8::new(decay.as_u8()),
        }
    }

    /// Takes effect on the next commutation
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_decay(&self, mode: DecayMode) {
        self.decay.store(mode.as_u8(), Ordering::Relaxed);
    }

    pub fn decay(&self) -> DecayMode {
        DecayMode::from_u8(self.decay.load(Ordering::Relaxed))
    }
}

impl Default for DriveFlags {
    fn default() -> Self {
        Self::new(DecayMode::Slow)
    }
}
