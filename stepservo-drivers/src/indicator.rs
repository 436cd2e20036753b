//! Error LED output
//!
//! Drives a status LED through an `embedded_hal` output pin. The pin can be
//! wired active-high (default) or active-low.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use stepservo_core::traits::ErrorIndicator;

/// Pin level that lights the LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPolarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

/// Error LED on a GPIO pin
pub struct LedIndicator<P> {
    pin: P,
    polarity: LedPolarity,
    /// Current logical state (true = error shown)
    on: bool,
}

impl<P: OutputPin<Error = Infallible>> LedIndicator<P> {
    /// Create an indicator, starting dark
    pub fn new(pin: P, polarity: LedPolarity) -> Self {
        let mut led = Self {
            pin,
            polarity,
            on: false,
        };
        led.set_error(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, LedPolarity::ActiveHigh)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, LedPolarity::ActiveLow)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin<Error = Infallible>> ErrorIndicator for LedIndicator<P> {
    fn set_error(&mut self, on: bool) {
        self.on = on;
        let high = on == (self.polarity == LedPolarity::ActiveHigh);
        self.pin.set_state(high.into()).unwrap_or_else(|e| match e {});
    }
}
