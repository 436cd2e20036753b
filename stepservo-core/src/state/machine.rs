//! Control state definition

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::events::{Event, StartupStatus};

/// Controller status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlState {
    /// Waiting for motor supply
    NoPower,
    /// Encoder missing; no recovery without a restart
    NoEncoder,
    /// Waiting for a valid calibration
    NoCalibration,
    /// Running
    Ready,
    /// Link lost while the setpoint came from it; torque removed
    FeedbackSoftTorqueOff,
}

impl From<StartupStatus> for ControlState {
    fn from(status: StartupStatus) -> Self {
        match status {
            StartupStatus::NoPower => ControlState::NoPower,
            StartupStatus::NoEncoder => ControlState::NoEncoder,
            StartupStatus::NoCalibration => ControlState::NoCalibration,
            StartupStatus::Ready => ControlState::Ready,
        }
    }
}

impl ControlState {
    /// Check if this state needs a restart
    pub fn is_fatal(&self) -> bool {
        matches!(self, ControlState::NoEncoder)
    }

    /// Check if this state allows the control loop to apply torque
    pub fn torque_allowed(&self) -> bool {
        matches!(self, ControlState::Ready)
    }

    /// Check if startup is still in progress
    pub fn is_starting(&self) -> bool {
        matches!(self, ControlState::NoPower | ControlState::NoCalibration)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use ControlState::*;
        use Event::*;

        match (self, event) {
            // Startup: each attempt's result becomes the state
            (NoPower, Begin(status)) => status.into(),
            (NoCalibration, Begin(status)) => status.into(),

            // Runtime: one-way latch, released only by an off request
            (Ready, CommunicationLost) => FeedbackSoftTorqueOff,
            (FeedbackSoftTorqueOff, OffRequested) => Ready,

            // NoEncoder is terminal; everything else is ignored
            _ => self,
        }
    }

    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            ControlState::NoPower => 0,
            ControlState::NoEncoder => 1,
            ControlState::NoCalibration => 2,
            ControlState::Ready => 3,
            ControlState::FeedbackSoftTorqueOff => 4,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => ControlState::NoEncoder,
            2 => ControlState::NoCalibration,
            3 => ControlState::Ready,
            4 => ControlState::FeedbackSoftTorqueOff,
            _ => ControlState::NoPower,
        }
    }
}
