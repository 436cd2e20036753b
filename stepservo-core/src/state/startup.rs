//! Startup sequence

use crate::traits::{ControllerInit, StartupUi};

use super::{ControlState, Event, SharedControlState, StartupStatus};

/// Bring the controller up
///
/// Repeats `begin()` until it reports [`StartupStatus::Ready`]:
///
/// - `NoPower`: query again until the supply appears
/// - `NoCalibration`: open the calibration menu and pump the UI until a
///   valid calibration exists, then query again
/// - `NoEncoder`: stop and return; the board needs a restart
///
/// Every status change is shown on the UI and applied to `state`.
pub fn run_startup<C, U>(ctrl: &mut C, ui: &mut U, state: &SharedControlState) -> ControlState
where
    C: ControllerInit,
    U: StartupUi,
{
    let mut shown: Option<StartupStatus> = None;

    loop {
        let status = ctrl.begin();
        let current = state.apply(Event::Begin(status));

        if shown != Some(status) {
            ui.show_status(status);
            shown = Some(status);
        }

        match status {
            StartupStatus::Ready => return current,
            StartupStatus::NoEncoder => {
                error!("encoder not detected, restart required");
                return current;
            }
            StartupStatus::NoPower => {}
            StartupStatus::NoCalibration => {
                info!("not calibrated, entering calibration");
                ui.enter_calibration();
                while !ctrl.calibration_valid() {
                    ui.process();
                }
            }
        }
    }
}
