//! Motion feedback and control loop traits

use crate::angle::ElectricalAngle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One encoder reading taken at the start of a motion tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackSample {
    /// Electrical angle of the rotor
    pub angle: ElectricalAngle,
    /// Signed speed in encoder positions per second
    pub speed: i32,
}

/// Encoder / motion estimate provider
pub trait MotionFeedback {
    fn sample(&mut self) -> FeedbackSample;
}

/// Torque demand produced by the control step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Demand {
    /// No torque; the bridges are idled but the engine stays enabled
    #[default]
    Idle,
    /// Current-regulated demand (mA)
    Current(u16),
    /// Voltage-regulated demand (signed, current units times phase resistance)
    Voltage(i16),
}

/// Output of one control step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveCommand {
    pub angle: ElectricalAngle,
    pub demand: Demand,
}

impl DriveCommand {
    pub const IDLE: Self = Self {
        angle: ElectricalAngle::ZERO,
        demand: Demand::Idle,
    };
}

/// Closed-loop control step (position/velocity/torque modes live here)
pub trait ControlLoop {
    /// Compute the drive command for this motion tick
    fn process_motion(&mut self, feedback: &FeedbackSample) -> DriveCommand;
}
