//! Task timer abstraction
//!
//! A task timer is an up-counting hardware timer that resets to zero every
//! period and raises an update (overflow) flag when it does. The scheduler
//! uses the flag both as the interrupt trigger and, read again after the task
//! body, as the overrun detector.

/// Timer tick rate expected by the scheduler (1 tick = 1 µs)
pub const TASK_TIMER_TICK_HZ: u32 = 1_000_000;

/// Free-running periodic timer backing one scheduled task
pub trait TaskTimer {
    /// Program prescaler and auto-reload, reset the counter and start counting
    ///
    /// Does not touch the update interrupt enable.
    fn configure(&mut self, prescaler: u16, auto_reload: u16);

    /// Current counter value in ticks since the last update event
    fn counter(&self) -> u16;

    /// Auto-reload value (the timer counts `0..=auto_reload`)
    fn auto_reload(&self) -> u16;

    /// Check if the update (overflow) flag is set
    fn is_update_pending(&self) -> bool;

    /// Clear the update flag
    fn clear_update(&mut self);

    /// Enable or disable the update interrupt
    fn set_update_interrupt(&mut self, enabled: bool);

    /// Length of one period in ticks
    fn period_ticks(&self) -> u32 {
        self.auto_reload() as u32 + 1
    }
}
