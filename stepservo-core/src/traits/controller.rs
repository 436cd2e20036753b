//! Startup collaborator traits

use crate::state::StartupStatus;

/// Controller initialization (power check, encoder probe, calibration check)
pub trait ControllerInit {
    /// Run one initialization attempt
    fn begin(&mut self) -> StartupStatus;

    /// Whether a valid calibration table is present
    fn calibration_valid(&mut self) -> bool;
}

/// Display and menu used during startup
pub trait StartupUi {
    /// Show the current startup status to the operator
    fn show_status(&mut self, _status: StartupStatus) {}

    /// Open the calibration menu
    fn enter_calibration(&mut self);

    /// Service buttons and display once
    fn process(&mut self);
}
