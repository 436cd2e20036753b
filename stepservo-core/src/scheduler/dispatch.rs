//! Scheduler front end for the two timer interrupts

use stepservo_hal::TaskTimer;

use crate::config::{ConfigError, SchedulerConfig};
use crate::traits::ErrorIndicator;

use super::{Task, TaskDescriptor, TaskKind, TaskSample};

/// Motion and service task descriptors
///
/// Meant to live in a `static`; all state is atomic, so the interrupt
/// handlers and the main loop share it by `&`.
#[derive(Debug)]
pub struct Scheduler {
    motion: TaskDescriptor,
    service: TaskDescriptor,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            motion: TaskDescriptor::new(TaskKind::Motion),
            service: TaskDescriptor::new(TaskKind::Service),
        }
    }

    pub fn motion(&self) -> &TaskDescriptor {
        &self.motion
    }

    pub fn service(&self) -> &TaskDescriptor {
        &self.service
    }

    /// Program both timers and arm the service task
    ///
    /// The motion task stays disabled until startup has finished; arm it
    /// with [`Scheduler::enable_motion`].
    pub fn start<M, S>(
        &self,
        config: &SchedulerConfig,
        motion_timer: &mut M,
        service_timer: &mut S,
    ) -> Result<(), ConfigError>
    where
        M: TaskTimer,
        S: TaskTimer,
    {
        config.validate()?;
        let prescaler = config.prescaler() as u16;

        motion_timer.configure(prescaler, config.motion_auto_reload() as u16);
        service_timer.configure(prescaler, config.service_auto_reload() as u16);
        self.service.enable(service_timer);

        info!(
            "scheduler started: motion {} us, service {} us",
            config.motion_period_us,
            config.service_auto_reload() + 1
        );
        Ok(())
    }

    pub fn enable_motion<T: TaskTimer>(&self, timer: &mut T) {
        self.motion.enable(timer);
    }

    pub fn disable_motion<T: TaskTimer>(&self, timer: &mut T) {
        self.motion.disable(timer);
    }

    pub fn enable_service<T: TaskTimer>(&self, timer: &mut T) {
        self.service.enable(timer);
    }

    pub fn disable_service<T: TaskTimer>(&self, timer: &mut T) {
        self.service.disable(timer);
    }

    /// Motion timer interrupt handler body
    ///
    /// The error indicator follows the overrun flag on every firing.
    pub fn on_motion_interrupt<T, K, I>(
        &self,
        timer: &mut T,
        task: &mut K,
        indicator: &mut I,
    ) -> Option<TaskSample>
    where
        T: TaskTimer,
        K: Task + ?Sized,
        I: ErrorIndicator + ?Sized,
    {
        let sample = self.motion.on_interrupt(timer, task)?;
        if self.motion.kind().drives_indicator() {
            indicator.set_error(sample.overrun);
        }
        Some(sample)
    }

    /// Service timer interrupt handler body
    pub fn on_service_interrupt<T, K>(&self, timer: &mut T, task: &mut K) -> Option<TaskSample>
    where
        T: TaskTimer,
        K: Task + ?Sized,
    {
        self.service.on_interrupt(timer, task)
    }
}
