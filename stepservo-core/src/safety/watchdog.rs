//! Communication watchdog

use crate::state::{ControlState, Event, SharedControlState};
use crate::traits::{CommLink, ModeControl};

/// Outcome of one watchdog check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommStatus {
    /// Setpoint does not come from the link; nothing checked
    Unchecked,
    /// Control signal received recently
    Healthy,
    /// No control signal; soft torque off commanded
    Lost,
}

/// Communication watchdog for the service task
///
/// Fail passive: a lost link removes torque instead of stopping the loop.
/// The latch is never released here; a healthy link afterwards only
/// reports [`CommStatus::Healthy`].
#[derive(Debug, Clone)]
pub struct CommWatchdog {
    last: CommStatus,
    lost_checks: u32,
}

impl Default for CommWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommWatchdog {
    pub const fn new() -> Self {
        Self {
            last: CommStatus::Unchecked,
            lost_checks: 0,
        }
    }

    /// Run one check
    pub fn check<L, M>(&mut self, link: &mut L, modes: &mut M, state: &SharedControlState) -> CommStatus
    where
        L: CommLink,
        M: ModeControl,
    {
        let status = if !modes.feedback_enabled() {
            CommStatus::Unchecked
        } else if link.control_signal_valid() {
            CommStatus::Healthy
        } else {
            modes.force_soft_torque_off();
            let next = state.apply(Event::CommunicationLost);
            self.lost_checks = self.lost_checks.saturating_add(1);
            if self.last != CommStatus::Lost && next == ControlState::FeedbackSoftTorqueOff {
                warn!("control signal lost, soft torque off");
            }
            CommStatus::Lost
        };
        self.last = status;
        status
    }

    pub fn last_status(&self) -> CommStatus {
        self.last
    }

    /// Number of failed checks since start
    pub fn lost_checks(&self) -> u32 {
        self.lost_checks
    }
}
