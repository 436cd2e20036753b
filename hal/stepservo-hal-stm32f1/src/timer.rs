//! Task timers
//!
//! TIM1 (advanced) paces the motion task from `TIM1_UP`, TIM2
//! (general-purpose) paces the service task. Both count up at
//! `TASK_TIMER_TICK_HZ` once configured by the scheduler.

use embassy_stm32::interrupt::{self, InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_stm32::peripherals::{TIM1, TIM2};
use embassy_stm32::Peri;
use stepservo_hal::TaskTimer;

macro_rules! task_timer {
    ($(#[$meta:meta])* $name:ident, $periph:ident, $regs:expr, $irq:ident, $clock:expr) => {
        $(#[$meta])*
        pub struct $name {
            _private: (),
        }

        impl $name {
            /// Clock on, counter stopped, update interrupt masked at the
            /// timer and unmasked in the NVIC at `priority`
            ///
            /// Taking the peripheral token makes this the only handle to the
            /// timer registers.
            pub fn new(_tim: Peri<'static, $periph>, priority: Priority) -> Self {
                $clock;
                let regs = $regs;
                regs.cr1().modify(|w| w.set_cen(false));
                regs.dier().modify(|w| w.set_uie(false));
                regs.sr().modify(|w| w.set_uif(false));

                interrupt::$irq.set_priority(priority);
                // SAFETY: the vector's handler is provided by the firmware and
                // only reaches shared state through the scheduler's atomics.
                unsafe { interrupt::$irq.enable() };

                Self { _private: () }
            }
        }

        impl TaskTimer for $name {
            fn configure(&mut self, prescaler: u16, auto_reload: u16) {
                let regs = $regs;
                regs.cr1().modify(|w| w.set_cen(false));
                regs.psc().write_value(prescaler);
                regs.arr().write(|w| w.set_arr(auto_reload.into()));
                // Latch PSC/ARR without raising an update interrupt
                regs.cr1().modify(|w| w.set_urs(pac::timer::vals::Urs::COUNTER_ONLY));
                regs.egr().write(|w| w.set_ug(true));
                regs.cnt().write(|w| w.set_cnt(0));
                regs.sr().modify(|w| w.set_uif(false));
                regs.cr1().modify(|w| w.set_cen(true));
            }

            fn counter(&self) -> u16 {
                $regs.cnt().read().cnt() as u16
            }

            fn auto_reload(&self) -> u16 {
                $regs.arr().read().arr() as u16
            }

            fn is_update_pending(&self) -> bool {
                $regs.sr().read().uif()
            }

            fn clear_update(&mut self) {
                $regs.sr().modify(|w| w.set_uif(false));
            }

            fn set_update_interrupt(&mut self, enabled: bool) {
                $regs.dier().modify(|w| w.set_uie(enabled));
            }
        }
    };
}

task_timer!(
    /// TIM1 update interrupt, motion task
    MotionTimer,
    TIM1,
    pac::TIM1,
    TIM1_UP,
    pac::RCC.apb2enr().modify(|w| w.set_tim1en(true))
);

task_timer!(
    /// TIM2 update interrupt, service task
    ServiceTimer,
    TIM2,
    pac::TIM2,
    TIM2,
    pac::RCC.apb1enr().modify(|w| w.set_tim2en(true))
);
