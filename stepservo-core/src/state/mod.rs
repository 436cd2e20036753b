//! Control state machine
//!
//! Startup walks the controller from power-on to `Ready` (or halts on a
//! missing encoder). At runtime the only transition is the soft torque off
//! latch on communication loss, which is released by an explicit off
//! request.

pub mod events;
pub mod machine;
mod shared;
mod startup;

pub use events::{Event, StartupStatus};
pub use machine::ControlState;
pub use shared::SharedControlState;
pub use startup::run_startup;
