//! Rolling task counters

use portable_atomic::{AtomicU32, Ordering};

/// Firing counters for both tasks
///
/// Both wrap at `u32::MAX`. The service count doubles as the status frame
/// sequence number.
#[derive(Debug, Default)]
pub struct Telemetry {
    motion_count: AtomicU32,
    service_count: AtomicU32,
}

impl Telemetry {
    pub const fn new() -> Self {
        Self {
            motion_count: AtomicU32::new(0),
            service_count: AtomicU32::new(0),
        }
    }

    /// Count one motion firing
    pub fn record_motion(&self) -> u32 {
        self.motion_count.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Count one service firing, returning the new count
    pub fn record_service(&self) -> u32 {
        self.service_count.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    pub fn motion_count(&self) -> u32 {
        self.motion_count.load(Ordering::Relaxed)
    }

    pub fn service_count(&self) -> u32 {
        self.service_count.load(Ordering::Relaxed)
    }
}
