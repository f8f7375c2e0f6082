//! SysTick as the delay service's dedicated tick source.
//!
//! The system tick timer (software timers or the periodic tick) runs on a
//! chip timer. SysTick stays private to the busy-wait delay.

use cortex_m::delay::Delay;
use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};
use platform::priority_byte;

/// SysTick, clocked from the core, not yet counting.
pub struct SysTickSource {
    syst: SYST,
    core_hz: u32,
}

impl SysTickSource {
    /// Take SysTick and select the core clock.
    pub fn new(mut syst: SYST, core_hz: u32) -> Self {
        syst.disable_interrupt();
        syst.set_clock_source(SystClkSource::Core);
        syst.clear_current();
        Self { syst, core_hz }
    }

    /// Core clock frequency the delay is calibrated against.
    pub fn core_hz(&self) -> u32 {
        self.core_hz
    }

    /// Set the SysTick exception priority and start the delay.
    ///
    /// `priority` is the ordinal handed down by bring-up; 0 is the most
    /// urgent. It is mapped onto the two implemented priority bits.
    pub fn start(self, scb: &mut SCB, priority: u8) -> Delay {
        // SAFETY: changing an exception priority cannot break a priority
        // based critical section here; this crate uses interrupt masking.
        unsafe { scb.set_priority(SystemHandler::SysTick, priority_byte(priority)) };
        debug!("delay: SysTick at {} Hz, priority {}", self.core_hz, priority);
        Delay::new(self.syst, self.core_hz)
    }

    /// Give SysTick back unused.
    pub fn free(self) -> SYST {
        self.syst
    }
}
