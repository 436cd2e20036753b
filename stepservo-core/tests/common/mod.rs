//! Shared host-side stubs for integration tests

#![allow(dead_code)]

use std::cell::Cell;

use heapless::Vec;
use stepservo_core::commutation::DecayMode;
use stepservo_core::scheduler::Task;
use stepservo_core::state::StartupStatus;
use stepservo_core::traits::{
    BridgeDriver, CommLink, ControllerInit, ErrorIndicator, ModeControl, Phase, PhaseState,
    StartupUi,
};
use stepservo_hal::TaskTimer;

/// One recorded bridge call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCall {
    Reference(u16, u16),
    State(Phase, PhaseState),
    Duty(Phase, u16, bool, DecayMode),
}

/// Bridge stub that logs every call (most recent 64)
#[derive(Default)]
pub struct RecordingBridge {
    pub calls: Vec<BridgeCall, 64>,
}

impl RecordingBridge {
    fn record(&mut self, call: BridgeCall) {
        if self.calls.is_full() {
            self.calls.remove(0);
        }
        let _ = self.calls.push(call);
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn last_reference(&self) -> Option<(u16, u16)> {
        self.calls.iter().rev().find_map(|c| match c {
            BridgeCall::Reference(a, b) => Some((*a, *b)),
            _ => None,
        })
    }

    pub fn last_state(&self, phase: Phase) -> Option<PhaseState> {
        self.calls.iter().rev().find_map(|c| match c {
            BridgeCall::State(p, s) if *p == phase => Some(*s),
            _ => None,
        })
    }
}

impl BridgeDriver for RecordingBridge {
    fn set_reference(&mut self, level_a: u16, level_b: u16) {
        self.record(BridgeCall::Reference(level_a, level_b));
    }

    fn set_phase_state(&mut self, phase: Phase, state: PhaseState) {
        self.record(BridgeCall::State(phase, state));
    }

    fn set_duty_cycle(&mut self, phase: Phase, duty: u16, quadrant: bool, decay: DecayMode) {
        self.record(BridgeCall::Duty(phase, duty, quadrant, decay));
    }
}

/// Timer registers shared between a scripted timer and a test task
#[derive(Default)]
pub struct TimerRegs {
    pub counter: Cell<u16>,
    pub pending: Cell<bool>,
}

impl TimerRegs {
    /// Simulate the body running for `ticks` timer ticks with period `period`
    pub fn elapse(&self, ticks: u32, period: u32) {
        let wrapped = ticks >= period;
        self.counter.set((ticks % period) as u16);
        if wrapped {
            self.pending.set(true);
        }
    }
}

pub struct ScriptedTimer<'a> {
    pub regs: &'a TimerRegs,
    pub prescaler: u16,
    pub auto_reload: u16,
    pub irq: bool,
}

impl<'a> ScriptedTimer<'a> {
    pub fn new(regs: &'a TimerRegs, auto_reload: u16) -> Self {
        Self {
            regs,
            prescaler: 0,
            auto_reload,
            irq: false,
        }
    }

    /// Hardware update event
    pub fn fire(&self) {
        self.regs.counter.set(0);
        self.regs.pending.set(true);
    }
}

impl TaskTimer for ScriptedTimer<'_> {
    fn configure(&mut self, prescaler: u16, auto_reload: u16) {
        self.prescaler = prescaler;
        self.auto_reload = auto_reload;
        self.regs.counter.set(0);
    }

    fn counter(&self) -> u16 {
        self.regs.counter.get()
    }

    fn auto_reload(&self) -> u16 {
        self.auto_reload
    }

    fn is_update_pending(&self) -> bool {
        self.regs.pending.get()
    }

    fn clear_update(&mut self) {
        self.regs.pending.set(false);
    }

    fn set_update_interrupt(&mut self, enabled: bool) {
        self.irq = enabled;
    }
}

/// Task whose body takes a configurable number of ticks
pub struct TimedTask<'a> {
    pub regs: &'a TimerRegs,
    pub period: u32,
    pub duration: u32,
    pub runs: u32,
}

impl Task for TimedTask<'_> {
    fn run(&mut self) {
        self.runs += 1;
        self.regs.elapse(self.duration, self.period);
    }
}

#[derive(Default)]
pub struct Led {
    pub on: bool,
    pub writes: u32,
}

impl ErrorIndicator for Led {
    fn set_error(&mut self, on: bool) {
        self.on = on;
        self.writes += 1;
    }
}

/// Controller whose `begin()` results are scripted
pub struct ScriptedController {
    pub script: std::vec::Vec<StartupStatus>,
    pub begins: usize,
    pub invalid_calibration_checks: u32,
}

impl ScriptedController {
    pub fn new(script: &[StartupStatus]) -> Self {
        Self {
            script: script.to_vec(),
            begins: 0,
            invalid_calibration_checks: 0,
        }
    }
}

impl ControllerInit for ScriptedController {
    fn begin(&mut self) -> StartupStatus {
        let status = self.script[self.begins];
        self.begins += 1;
        status
    }

    fn calibration_valid(&mut self) -> bool {
        if self.invalid_calibration_checks > 0 {
            self.invalid_calibration_checks -= 1;
            false
        } else {
            true
        }
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub shown: std::vec::Vec<StartupStatus>,
    pub calibration_entries: u32,
    pub process_calls: u32,
}

impl StartupUi for RecordingUi {
    fn show_status(&mut self, status: StartupStatus) {
        self.shown.push(status);
    }

    fn enter_calibration(&mut self) {
        self.calibration_entries += 1;
    }

    fn process(&mut self) {
        self.process_calls += 1;
    }
}

/// Link whose validity is set by the test
#[derive(Default)]
pub struct TestLink {
    pub valid: bool,
    pub transmitted: std::vec::Vec<u32>,
}

impl CommLink for TestLink {
    fn control_signal_valid(&mut self) -> bool {
        self.valid
    }

    fn transmit_status(&mut self, counter: u32) {
        self.transmitted.push(counter);
    }
}

#[derive(Default)]
pub struct TestModes {
    pub feedback: bool,
    pub soft_off_requests: u32,
}

impl ModeControl for TestModes {
    fn feedback_enabled(&self) -> bool {
        self.feedback
    }

    fn force_soft_torque_off(&mut self) {
        self.soft_off_requests += 1;
    }
}
