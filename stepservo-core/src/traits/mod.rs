//! Collaborator traits
//!
//! These traits define the interface between the core logic and the
//! hardware drivers or firmware subsystems that live outside this crate
//! (encoder, control loop, CAN link, menu, LED).

pub mod bridge;
pub mod comm;
pub mod controller;
pub mod feedback;
pub mod indicator;

pub use bridge::{BridgeDriver, Phase, PhaseState};
pub use comm::{CommLink, ModeControl};
pub use controller::{ControllerInit, StartupUi};
pub use feedback::{ControlLoop, Demand, DriveCommand, FeedbackSample, MotionFeedback};
pub use indicator::ErrorIndicator;
