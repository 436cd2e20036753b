//! Task descriptor and execution-time measurement

use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use stepservo_hal::TaskTimer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Body of a scheduled task
///
/// Runs to completion inside the timer interrupt.
pub trait Task {
    fn run(&mut self);
}

/// Which timer a task is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskKind {
    Motion,
    Service,
}

impl TaskKind {
    /// Clear the update flag raised during an overrun
    ///
    /// The motion task is the highest priority; re-entering it straight
    /// away would starve everything else. The service task keeps the flag
    /// and fires once more to catch up.
    pub const fn clears_on_overrun(self) -> bool {
        matches!(self, TaskKind::Motion)
    }

    /// Mirror the overrun flag on the error indicator
    pub const fn drives_indicator(self) -> bool {
        matches!(self, TaskKind::Motion)
    }

    pub const fn name(self) -> &'static str {
        match self {
            TaskKind::Motion => "motion",
            TaskKind::Service => "service",
        }
    }
}

/// Task lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskState {
    /// Interrupt off
    Disabled,
    /// Waiting for the next update event
    Armed,
    /// Body executing
    Running,
    /// Body finished late, counters being updated
    OverrunRecorded,
}

impl TaskState {
    const fn as_u8(self) -> u8 {
        match self {
            TaskState::Disabled => 0,
            TaskState::Armed => 1,
            TaskState::Running => 2,
            TaskState::OverrunRecorded => 3,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => TaskState::Armed,
            2 => TaskState::Running,
            3 => TaskState::OverrunRecorded,
            _ => TaskState::Disabled,
        }
    }
}

/// Measurement of one firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskSample {
    /// Execution time in timer ticks (µs)
    pub ticks: u32,
    /// Body ran past the end of its period
    pub overrun: bool,
}

/// Snapshot of a task's diagnostics
///
/// Fields are read one at a time, so a snapshot taken while the task is
/// preempting the reader may mix two firings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskDiagnostics {
    pub kind: TaskKind,
    pub state: TaskState,
    pub overrun: bool,
    pub overrun_count: u32,
    pub last_ticks: u32,
}

/// Per-task shared state
///
/// Written only from the task's own interrupt (plus enable/disable), read
/// from anywhere. All fields are single atomic words.
#[derive(Debug)]
pub struct TaskDescriptor {
    kind: TaskKind,
    state: AtomicU8,
    overrun: AtomicBool,
    overrun_count: AtomicU32,
    last_ticks: AtomicU32,
}

impl TaskDescriptor {
    pub const fn new(kind: TaskKind) -> Self {
        Self {
            kind,
            state: AtomicU8::new(TaskState::Disabled.as_u8()),
            overrun: AtomicBool::new(false),
            overrun_count: AtomicU32::new(0),
            last_ticks: AtomicU32::new(0),
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_enabled(&self) -> bool {
        self.state() != TaskState::Disabled
    }

    /// Arm the task
    ///
    /// A stale update flag is cleared first so enabling never causes an
    /// immediate firing.
    pub fn enable<T: TaskTimer>(&self, timer: &mut T) {
        timer.clear_update();
        self.state.store(TaskState::Armed.as_u8(), Ordering::Release);
        timer.set_update_interrupt(true);
        debug!("{} task enabled", self.kind.name());
    }

    /// Stop the task; a pending update is discarded
    pub fn disable<T: TaskTimer>(&self, timer: &mut T) {
        timer.set_update_interrupt(false);
        self.state.store(TaskState::Disabled.as_u8(), Ordering::Release);
        timer.clear_update();
        debug!("{} task disabled", self.kind.name());
    }

    pub fn overrun(&self) -> bool {
        self.overrun.load(Ordering::Relaxed)
    }

    pub fn overrun_count(&self) -> u32 {
        self.overrun_count.load(Ordering::Relaxed)
    }

    /// Execution time of the last completed firing (ticks)
    pub fn last_ticks(&self) -> u32 {
        self.last_ticks.load(Ordering::Relaxed)
    }

    pub fn diagnostics(&self) -> TaskDiagnostics {
        TaskDiagnostics {
            kind: self.kind,
            state: self.state(),
            overrun: self.overrun(),
            overrun_count: self.overrun_count(),
            last_ticks: self.last_ticks(),
        }
    }

    /// Timer interrupt entry
    ///
    /// Runs `task` if the update flag is set and the task is armed, then
    /// samples the counter. Returns `None` for spurious entries.
    pub fn on_interrupt<T, K>(&self, timer: &mut T, task: &mut K) -> Option<TaskSample>
    where
        T: TaskTimer,
        K: Task + ?Sized,
    {
        if !timer.is_update_pending() {
            return None;
        }
        if self
            .state
            .compare_exchange(
                TaskState::Armed.as_u8(),
                TaskState::Running.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            // Not armed: drop the flag so the interrupt does not re-enter
            timer.clear_update();
            return None;
        }

        timer.clear_update();
        task.run();

        let mut ticks = timer.counter() as u32;
        let overrun = timer.is_update_pending();
        let finished = if overrun {
            // Counter wrapped during the body
            ticks += timer.period_ticks();
            self.overrun.store(true, Ordering::Relaxed);
            self.overrun_count.fetch_add(1, Ordering::Relaxed);
            if self.kind.clears_on_overrun() {
                timer.clear_update();
            }
            let _ = self.state.compare_exchange(
                TaskState::Running.as_u8(),
                TaskState::OverrunRecorded.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            warn!("{} task overrun: {} ticks", self.kind.name(), ticks);
            TaskState::OverrunRecorded
        } else {
            self.overrun.store(false, Ordering::Relaxed);
            TaskState::Running
        };
        self.last_ticks.store(ticks, Ordering::Relaxed);

        // Stays disabled if the body (or a higher priority) disabled the task
        let _ = self.state.compare_exchange(
            finished.as_u8(),
            TaskState::Armed.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );

        Some(TaskSample { ticks, overrun })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeTimer<'a> {
        pending: &'a Cell<bool>,
        counter: &'a Cell<u16>,
        auto_reload: u16,
        irq: bool,
    }

    impl TaskTimer for FakeTimer<'_> {
        fn configure(&mut self, _prescaler: u16, auto_reload: u16) {
            self.auto_reload = auto_reload;
            self.counter.set(0);
        }
        fn counter(&self) -> u16 {
            self.counter.get()
        }
        fn auto_reload(&self) -> u16 {
            self.auto_reload
        }
        fn is_update_pending(&self) -> bool {
            self.pending.get()
        }
        fn clear_update(&mut self) {
            self.pending.set(false);
        }
        fn set_update_interrupt(&mut self, enabled: bool) {
            self.irq = enabled;
        }
    }

    /// Task that leaves the counter at `elapsed` and optionally wraps it
    struct BusyTask<'a> {
        pending: &'a Cell<bool>,
        counter: &'a Cell<u16>,
        elapsed: u16,
        wraps: bool,
        runs: u32,
    }

    impl Task for BusyTask<'_> {
        fn run(&mut self) {
            self.runs += 1;
            self.counter.set(self.elapsed);
            if self.wraps {
                self.pending.set(true);
            }
        }
    }

    fn fixture<'a>(
        pending: &'a Cell<bool>,
        counter: &'a Cell<u16>,
    ) -> (FakeTimer<'a>, BusyTask<'a>) {
        let timer = FakeTimer {
            pending,
            counter,
            auto_reload: 249,
            irq: false,
        };
        let task = BusyTask {
            pending,
            counter,
            elapsed: 40,
            wraps: false,
            runs: 0,
        };
        (timer, task)
    }

    #[test]
    fn test_new_is_disabled() {
        let desc = TaskDescriptor::new(TaskKind::Motion);
        assert_eq!(desc.state(), TaskState::Disabled);
        assert!(!desc.is_enabled());
        assert_eq!(desc.overrun_count(), 0);
    }

    #[test]
    fn test_enable_clears_stale_flag() {
        let (pending, counter) = (Cell::new(true), Cell::new(0));
        let (mut timer, _) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);

        desc.enable(&mut timer);
        assert!(!pending.get());
        assert!(timer.irq);
        assert_eq!(desc.state(), TaskState::Armed);
    }

    #[test]
    fn test_disable_clears_pending() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, _) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Service);
        desc.enable(&mut timer);

        pending.set(true);
        desc.disable(&mut timer);
        assert!(!pending.get());
        assert!(!timer.irq);
        assert_eq!(desc.state(), TaskState::Disabled);
    }

    #[test]
    fn test_spurious_entry_ignored() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);
        desc.enable(&mut timer);

        assert_eq!(desc.on_interrupt(&mut timer, &mut task), None);
        assert_eq!(task.runs, 0);
    }

    #[test]
    fn test_disabled_task_not_run() {
        let (pending, counter) = (Cell::new(true), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);

        assert_eq!(desc.on_interrupt(&mut timer, &mut task), None);
        assert_eq!(task.runs, 0);
        assert!(!pending.get());
    }

    #[test]
    fn test_normal_firing() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);
        desc.enable(&mut timer);

        pending.set(true);
        let sample = desc.on_interrupt(&mut timer, &mut task);
        assert_eq!(
            sample,
            Some(TaskSample {
                ticks: 40,
                overrun: false
            })
        );
        assert_eq!(task.runs, 1);
        assert_eq!(desc.last_ticks(), 40);
        assert_eq!(desc.state(), TaskState::Armed);
        assert!(!pending.get());
    }

    #[test]
    fn test_motion_overrun_adds_period_and_clears() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);
        desc.enable(&mut timer);

        task.elapsed = 12;
        task.wraps = true;
        pending.set(true);
        let sample = desc.on_interrupt(&mut timer, &mut task);
        assert_eq!(
            sample,
            Some(TaskSample {
                ticks: 12 + 250,
                overrun: true
            })
        );
        assert!(desc.overrun());
        assert_eq!(desc.overrun_count(), 1);
        assert!(!pending.get());
        assert_eq!(desc.state(), TaskState::Armed);
    }

    #[test]
    fn test_service_overrun_keeps_flag() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        timer.auto_reload = 9_999;
        let desc = TaskDescriptor::new(TaskKind::Service);
        desc.enable(&mut timer);

        task.wraps = true;
        pending.set(true);
        desc.on_interrupt(&mut timer, &mut task);
        assert!(pending.get());
        assert_eq!(desc.overrun_count(), 1);
        assert_eq!(desc.last_ticks(), 40 + 10_000);

        // Catch-up firing finishes in time
        task.wraps = false;
        let sample = desc.on_interrupt(&mut timer, &mut task);
        assert_eq!(sample.map(|s| s.overrun), Some(false));
        assert!(!desc.overrun());
        assert_eq!(desc.overrun_count(), 1);
        assert_eq!(task.runs, 2);
    }

    #[test]
    fn test_overrun_flag_clears_on_next_good_tick() {
        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, mut task) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);
        desc.enable(&mut timer);

        task.wraps = true;
        for _ in 0..3 {
            pending.set(true);
            desc.on_interrupt(&mut timer, &mut task);
        }
        assert_eq!(desc.overrun_count(), 3);

        task.wraps = false;
        pending.set(true);
        desc.on_interrupt(&mut timer, &mut task);
        assert!(!desc.overrun());
        assert_eq!(desc.overrun_count(), 3);
    }

    #[test]
    fn test_disable_during_run_sticks() {
        struct SelfDisabling<'a> {
            desc: &'a TaskDescriptor,
            timer: FakeTimer<'a>,
        }
        impl Task for SelfDisabling<'_> {
            fn run(&mut self) {
                self.desc.disable(&mut self.timer);
            }
        }

        let (pending, counter) = (Cell::new(false), Cell::new(0));
        let (mut timer, _) = fixture(&pending, &counter);
        let (inner, _) = fixture(&pending, &counter);
        let desc = TaskDescriptor::new(TaskKind::Motion);
        desc.enable(&mut timer);

        let mut task = SelfDisabling { desc: &desc, timer: inner };
        pending.set(true);
        assert!(desc.on_interrupt(&mut timer, &mut task).is_some());
        assert_eq!(desc.state(), TaskState::Disabled);
    }

    #[test]
    fn test_diagnostics_snapshot() {
        let desc = TaskDescriptor::new(TaskKind::Service);
        let diag = desc.diagnostics();
        assert_eq!(diag.kind, TaskKind::Service);
        assert_eq!(diag.state, TaskState::Disabled);
        assert!(!diag.overrun);
        assert_eq!(diag.overrun_count, 0);
        assert_eq!(diag.last_ticks, 0);
    }

    #[test]
    fn test_kind_policies() {
        assert!(TaskKind::Motion.clears_on_overrun());
        assert!(TaskKind::Motion.drives_indicator());
        assert!(!TaskKind::Service.clears_on_overrun());
        assert!(!TaskKind::Service.drives_indicator());
    }
}
