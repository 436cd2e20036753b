//! MKS SERVO42B/57B board wiring
//!
//! | Signal          | Pin  | Peripheral |
//! |-----------------|------|------------|
//! | A4950 IN1..IN4  | PB6-9| TIM4 CH1-4 |
//! | VREF12 (phase A)| PB5  | TIM3 CH2   |
//! | VREF34 (phase B)| PB4  | TIM3 CH1   |
//! | Red LED         | PA3  | GPIO       |
//!
//! PB4 is a JTAG pin (NJTRST) and TIM3 is partially remapped onto PB4/PB5;
//! embassy applies both remaps when the pins are claimed.

use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::interrupt::Priority;
use embassy_stm32::peripherals::{PA3, PB4, PB5, TIM3};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm, SimplePwmChannel};
use embassy_stm32::Peri;

/// Core clock the board runs at
pub const CORE_CLOCK_HZ: u32 = 72_000_000;

/// Reference PWM frequency, chosen so TIM3 counts to about `VREF_MAX`
/// without prescaling (72 MHz / 513)
pub const VREF_PWM_HZ: Hertz = Hertz(140_000);

/// Motion task preempts the service task
pub const MOTION_PRIORITY: Priority = Priority::P1;
pub const SERVICE_PRIORITY: Priority = Priority::P2;

/// Reference channels for phase A and phase B
pub type VrefChannel = SimplePwmChannel<'static, TIM3>;

/// Claim TIM3 and both reference pins
///
/// Returns `(phase A, phase B)`: VREF12 on CH2 and VREF34 on CH1. The
/// bridge driver writes references as fractions of `VREF_MAX`, so the exact
/// auto-reload embassy picks does not matter.
pub fn vref_channels(
    tim: Peri<'static, TIM3>,
    vref34: Peri<'static, PB4>,
    vref12: Peri<'static, PB5>,
) -> (VrefChannel, VrefChannel) {
    let pwm = SimplePwm::new(
        tim,
        Some(PwmPin::new_ch1(vref34, OutputType::PushPull)),
        Some(PwmPin::new_ch2(vref12, OutputType::PushPull)),
        None,
        None,
        VREF_PWM_HZ,
        CountingMode::EdgeAlignedUp,
    );
    let channels = pwm.split();
    let mut phase_a = channels.ch2;
    let mut phase_b = channels.ch1;
    phase_a.set_duty_cycle_fully_off();
    phase_b.set_duty_cycle_fully_off();
    phase_a.enable();
    phase_b.enable();
    (phase_a, phase_b)
}

/// Red error LED, starts dark (active high)
pub fn error_led(pin: Peri<'static, PA3>) -> Output<'static> {
    Output::new(pin, Level::Low, Speed::Low)
}
