//! Control state shared across contexts

use portable_atomic::{AtomicU8, Ordering};

use super::{ControlState, Event};

/// Current [`ControlState`] in one atomic byte
///
/// Written by the startup sequence and the service task, read anywhere.
#[derive(Debug)]
pub struct SharedControlState(AtomicU8);

impl SharedControlState {
    pub const fn new(initial: ControlState) -> Self {
        Self(AtomicU8::new(initial.as_u8()))
    }

    pub fn load(&self) -> ControlState {
        ControlState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Apply an event atomically and return the resulting state
    pub fn apply(&self, event: Event) -> ControlState {
        let previous = match self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
            Some(ControlState::from_u8(raw).transition(event).as_u8())
        }) {
            Ok(raw) | Err(raw) => ControlState::from_u8(raw),
        };
        let next = previous.transition(event);
        if next != previous {
            info!("control state {} -> {}", previous, next);
        }
        next
    }
}

impl Default for SharedControlState {
    fn default() -> Self {
        Self::new(ControlState::NoPower)
    }
}
