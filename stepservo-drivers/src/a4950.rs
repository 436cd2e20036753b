//! A4950 dual full-bridge driver
//!
//! Each A4950 has two logic inputs (IN1/IN2) and a reference input that
//! sets its current trip level. On the S42B/S57B boards:
//!
//! - the four bridge inputs sit on channels 1-4 of one timer (phase A on
//!   CH1/CH2, phase B on CH3/CH4)
//! - each reference is a PWM channel followed by an RC filter
//!
//! Static levels are produced by the same timer with its auto-reload at
//! `PWM_MIN`, so the pins never leave alternate-function mode. The outputs
//! are active-low: compare `0` holds an input high, `PWM_MIN + 1` holds it
//! low.

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;
use stepservo_core::commutation::{DecayMode, PWM_MAX, PWM_MIN, VREF_MAX};
use stepservo_core::traits::{BridgeDriver, Phase, PhaseState};
use stepservo_hal::{PwmChannel, PwmTimer};

/// Compare value that holds an input high
const LEVEL_HIGH: u16 = 0;

/// Compare value that holds an input low
const LEVEL_LOW: u16 = PWM_MIN + 1;

/// How the bridge timer is currently being used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMode {
    /// Auto-reload at `PWM_MIN`, inputs at static levels
    Static,
    /// Auto-reload at `PWM_MAX`, inputs chopped
    Chopping,
}

/// Compare pair (IN1, IN2) for a static state
pub const fn static_levels(state: PhaseState) -> (u16, u16) {
    match state {
        PhaseState::Forward => (LEVEL_HIGH, LEVEL_LOW),
        PhaseState::Reverse => (LEVEL_LOW, LEVEL_HIGH),
        PhaseState::Coast => (LEVEL_LOW, LEVEL_LOW),
        PhaseState::Brake => (LEVEL_HIGH, LEVEL_HIGH),
    }
}

/// Timer channels feeding one bridge
pub const fn phase_channels(phase: Phase) -> (PwmChannel, PwmChannel) {
    match phase {
        Phase::A => (PwmChannel::Ch1, PwmChannel::Ch2),
        Phase::B => (PwmChannel::Ch3, PwmChannel::Ch4),
    }
}

/// Two A4950 bridges sharing one input timer
pub struct A4950<T, VA, VB> {
    timer: T,
    vref_a: VA,
    vref_b: VB,
    mode: BridgeMode,
}

impl<T, VA, VB> A4950<T, VA, VB>
where
    T: PwmTimer,
    VA: SetDutyCycle<Error = Infallible>,
    VB: SetDutyCycle<Error = Infallible>,
{
    /// Take ownership of the bridge timer and both reference channels
    ///
    /// `vref_a` drives the phase A reference (VREF12), `vref_b` phase B
    /// (VREF34).
    pub fn new(timer: T, vref_a: VA, vref_b: VB) -> Self {
        Self {
            timer,
            vref_a,
            vref_b,
            mode: BridgeMode::Static,
        }
    }

    pub fn mode(&self) -> BridgeMode {
        self.mode
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Release the hardware resources
    pub fn release(self) -> (T, VA, VB) {
        (self.timer, self.vref_a, self.vref_b)
    }

    fn set_mode(&mut self, mode: BridgeMode) {
        let auto_reload = match mode {
            BridgeMode::Static => PWM_MIN,
            BridgeMode::Chopping => PWM_MAX,
        };
        self.timer.set_auto_reload(auto_reload);
        self.mode = mode;
    }

    fn set_pair(&mut self, phase: Phase, (first, second): (u16, u16)) {
        let (ch_first, ch_second) = phase_channels(phase);
        self.timer.set_compare(ch_first, first);
        self.timer.set_compare(ch_second, second);
    }
}

impl<T, VA, VB> BridgeDriver for A4950<T, VA, VB>
where
    T: PwmTimer,
    VA: SetDutyCycle<Error = Infallible>,
    VB: SetDutyCycle<Error = Infallible>,
{
    fn set_reference(&mut self, level_a: u16, level_b: u16) {
        let level_a = level_a.min(VREF_MAX);
        let level_b = level_b.min(VREF_MAX);
        self.vref_a
            .set_duty_cycle_fraction(level_a, VREF_MAX)
            .unwrap_or_else(|e| match e {});
        self.vref_b
            .set_duty_cycle_fraction(level_b, VREF_MAX)
            .unwrap_or_else(|e| match e {});
    }

    fn set_phase_state(&mut self, phase: Phase, state: PhaseState) {
        self.set_mode(BridgeMode::Static);
        self.set_pair(phase, static_levels(state));
    }

    fn set_duty_cycle(&mut self, phase: Phase, duty: u16, quadrant: bool, decay: DecayMode) {
        self.set_mode(BridgeMode::Chopping);
        self.set_pair(phase, decay.channel_duties(duty, quadrant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::ErrorType;

    /// Mock bridge timer
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct MockTimer {
        auto_reload: u16,
        compare: [u16; 4],
    }

    impl PwmTimer for MockTimer {
        fn set_auto_reload(&mut self, value: u16) {
            self.auto_reload = value;
        }

        fn set_compare(&mut self, channel: PwmChannel, value: u16) {
            self.compare[channel.index()] = value;
        }
    }

    /// Mock reference channel with the reference timer's resolution
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct MockVref {
        duty: u16,
    }

    impl ErrorType for MockVref {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockVref {
        fn max_duty_cycle(&self) -> u16 {
            VREF_MAX
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn bridge() -> A4950<MockTimer, MockVref, MockVref> {
        A4950::new(MockTimer::default(), MockVref::default(), MockVref::default())
    }

    fn snapshot(b: &A4950<MockTimer, MockVref, MockVref>) -> (MockTimer, u16, u16) {
        (b.timer.clone(), b.vref_a.duty, b.vref_b.duty)
    }

    #[test]
    fn test_static_states_phase_a() {
        let mut b = bridge();

        b.set_phase_state(Phase::A, PhaseState::Forward);
        assert_eq!(b.timer().auto_reload, PWM_MIN);
        assert_eq!(&b.timer().compare[..2], &[0, PWM_MIN + 1]);

        b.set_phase_state(Phase::A, PhaseState::Reverse);
        assert_eq!(&b.timer().compare[..2], &[PWM_MIN + 1, 0]);

        b.set_phase_state(Phase::A, PhaseState::Coast);
        assert_eq!(&b.timer().compare[..2], &[PWM_MIN + 1, PWM_MIN + 1]);

        b.set_phase_state(Phase::A, PhaseState::Brake);
        assert_eq!(&b.timer().compare[..2], &[0, 0]);

        // Phase B channels untouched
        assert_eq!(&b.timer().compare[2..], &[0, 0]);
    }

    #[test]
    fn test_phase_b_uses_upper_channels() {
        let mut b = bridge();
        b.set_phase_state(Phase::B, PhaseState::Reverse);
        assert_eq!(b.timer().compare, [0, 0, PWM_MIN + 1, 0]);
    }

    #[test]
    fn test_reference_clamped() {
        let mut b = bridge();
        b.set_reference(100, 200);
        assert_eq!((b.vref_a.duty, b.vref_b.duty), (100, 200));

        b.set_reference(u16::MAX, VREF_MAX + 1);
        assert_eq!((b.vref_a.duty, b.vref_b.duty), (VREF_MAX, VREF_MAX));
    }

    #[test]
    fn test_duty_switches_timer_to_chopping() {
        let mut b = bridge();
        b.set_duty_cycle(Phase::A, 1000, true, DecayMode::Slow);
        assert_eq!(b.mode(), BridgeMode::Chopping);
        assert_eq!(b.timer().auto_reload, PWM_MAX);
        assert_eq!(&b.timer().compare[..2], &[PWM_MAX, PWM_MAX - 1000]);

        b.set_duty_cycle(Phase::B, 1000, false, DecayMode::Fast);
        assert_eq!(&b.timer().compare[2..], &[0, 1000]);

        b.set_phase_state(Phase::A, PhaseState::Coast);
        assert_eq!(b.mode(), BridgeMode::Static);
        assert_eq!(b.timer().auto_reload, PWM_MIN);
    }

    #[test]
    fn test_calls_are_idempotent() {
        let mut b = bridge();

        b.set_reference(321, 45);
        b.set_phase_state(Phase::B, PhaseState::Forward);
        let once = snapshot(&b);
        b.set_reference(321, 45);
        b.set_phase_state(Phase::B, PhaseState::Forward);
        assert_eq!(snapshot(&b), once);

        b.set_duty_cycle(Phase::A, 777, false, DecayMode::Fast);
        let once = snapshot(&b);
        b.set_duty_cycle(Phase::A, 777, false, DecayMode::Fast);
        assert_eq!(snapshot(&b), once);
    }

    #[test]
    fn test_decay_round_trip() {
        let mut b = bridge();
        b.set_duty_cycle(Phase::A, 1234, true, DecayMode::Slow);
        let slow = snapshot(&b);

        b.set_duty_cycle(Phase::A, 1234, true, DecayMode::Fast);
        assert_ne!(snapshot(&b), slow);

        b.set_duty_cycle(Phase::A, 1234, true, DecayMode::Slow);
        assert_eq!(snapshot(&b), slow);
    }

    #[test]
    fn test_idle_zeroes_both() {
        let mut b = bridge();
        b.set_reference(400, 400);
        b.set_duty_cycle(Phase::A, 500, true, DecayMode::Slow);
        b.set_duty_cycle(Phase::B, 500, true, DecayMode::Slow);

        b.idle();
        assert_eq!((b.vref_a.duty, b.vref_b.duty), (0, 0));
        assert_eq!(b.timer().auto_reload, PWM_MIN);
        assert_eq!(b.timer().compare, [PWM_MIN + 1; 4]);
    }
}
