//! PWM timer abstraction
//!
//! The bridge inputs of the power stage are wired to four compare channels of
//! a single timer. The same timer is used both for real PWM (auto-reload at
//! full resolution) and as a static output level (auto-reload at its minimum),
//! so the trait exposes the auto-reload register directly.

/// Compare channel of a four-channel timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

impl PwmChannel {
    /// Zero-based channel index
    pub const fn index(self) -> usize {
        match self {
            PwmChannel::Ch1 => 0,
            PwmChannel::Ch2 => 1,
            PwmChannel::Ch3 => 2,
            PwmChannel::Ch4 => 3,
        }
    }
}

/// Four-channel PWM timer
pub trait PwmTimer {
    /// Set the auto-reload (period) register
    fn set_auto_reload(&mut self, value: u16);

    /// Set the compare value of one channel
    fn set_compare(&mut self, channel: PwmChannel, value: u16);
}
