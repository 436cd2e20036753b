//! Events that trigger control state transitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of one controller initialization attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StartupStatus {
    /// Motor supply not present yet
    NoPower,
    /// Encoder did not answer; needs a restart
    NoEncoder,
    /// Calibration table missing or invalid
    NoCalibration,
    /// Controller started
    Ready,
}

/// Events that can change the control state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A startup attempt finished with this status
    Begin(StartupStatus),
    /// Service task saw no control signal while feedback was enabled
    CommunicationLost,
    /// Control mode explicitly switched off
    OffRequested,
}
