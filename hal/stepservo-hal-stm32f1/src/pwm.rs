//! A4950 logic input timer
//!
//! TIM4 channels 1-4 drive IN1-IN4 on PB6-PB9. The channels are set up once
//! through embassy's `SimplePwm` (pin muxing, PWM mode, active-low outputs)
//! and then driven directly through the PAC, since the bridge driver
//! switches the auto-reload between static and chopping operation on every
//! call.

use embassy_stm32::gpio::OutputType;
use embassy_stm32::pac;
use embassy_stm32::peripherals::{PB6, PB7, PB8, PB9, TIM4};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::{CountingMode, OutputPolarity};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_stm32::Peri;
use stepservo_hal::{PwmChannel, PwmTimer};

/// Initial switching frequency; `set_auto_reload` takes over after the first
/// bridge command
const BRIDGE_PWM_HZ: Hertz = Hertz(17_000);

const fn channel_of(channel: PwmChannel) -> Channel {
    match channel {
        PwmChannel::Ch1 => Channel::Ch1,
        PwmChannel::Ch2 => Channel::Ch2,
        PwmChannel::Ch3 => Channel::Ch3,
        PwmChannel::Ch4 => Channel::Ch4,
    }
}

/// TIM4 as a four-channel bridge input timer
pub struct BridgeTimer {
    // Keeps the pins and the timer claimed
    _pwm: SimplePwm<'static, TIM4>,
}

impl BridgeTimer {
    pub fn new(
        tim: Peri<'static, TIM4>,
        in1: Peri<'static, PB6>,
        in2: Peri<'static, PB7>,
        in3: Peri<'static, PB8>,
        in4: Peri<'static, PB9>,
    ) -> Self {
        let mut pwm = SimplePwm::new(
            tim,
            Some(PwmPin::new_ch1(in1, OutputType::PushPull)),
            Some(PwmPin::new_ch2(in2, OutputType::PushPull)),
            Some(PwmPin::new_ch3(in3, OutputType::PushPull)),
            Some(PwmPin::new_ch4(in4, OutputType::PushPull)),
            BRIDGE_PWM_HZ,
            CountingMode::EdgeAlignedUp,
        );

        for channel in [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4] {
            // Compare 0 holds the input high, compare > ARR holds it low
            pwm.set_polarity(channel, OutputPolarity::ActiveLow);
            pwm.channel(channel).enable();
        }
        pac::TIM4.psc().write_value(0);

        Self { _pwm: pwm }
    }
}

impl PwmTimer for BridgeTimer {
    fn set_auto_reload(&mut self, value: u16) {
        pac::TIM4.arr().write(|w| w.set_arr(value.into()));
    }

    fn set_compare(&mut self, channel: PwmChannel, value: u16) {
        pac::TIM4
            .ccr(channel_of(channel).index())
            .write(|w| w.set_ccr(value.into()));
    }
}
