//! Service task body

use crate::safety::{CommStatus, CommWatchdog};
use crate::state::SharedControlState;
use crate::traits::{CommLink, ModeControl};

use super::{Task, Telemetry};

/// 10 ms housekeeping: status frame, then link watchdog
pub struct ServiceTask<'a, L, M>
where
    L: CommLink,
    M: ModeControl,
{
    link: L,
    modes: M,
    watchdog: CommWatchdog,
    telemetry: &'a Telemetry,
    state: &'a SharedControlState,
}

impl<'a, L, M> ServiceTask<'a, L, M>
where
    L: CommLink,
    M: ModeControl,
{
    pub fn new(link: L, modes: M, telemetry: &'a Telemetry, state: &'a SharedControlState) -> Self {
        Self {
            link,
            modes,
            watchdog: CommWatchdog::new(),
            telemetry,
            state,
        }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn modes(&self) -> &M {
        &self.modes
    }

    pub fn watchdog(&self) -> &CommWatchdog {
        &self.watchdog
    }

    pub fn comm_status(&self) -> CommStatus {
        self.watchdog.last_status()
    }
}

impl<L, M> Task for ServiceTask<'_, L, M>
where
    L: CommLink,
    M: ModeControl,
{
    fn run(&mut self) {
        let counter = self.telemetry.record_service();
        self.link.transmit_status(counter);
        self.watchdog
            .check(&mut self.link, &mut self.modes, self.state);
    }
}
