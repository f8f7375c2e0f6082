//! Tick timers and the delay service.
//!
//! Two unrelated time sources exist on the board:
//!
//! - the **system tick timer**, shared by everything that needs periodic
//!   callbacks. It is either a software-timer multiplexer running on a base
//!   hardware timer (PIT on the reference board) or a plain periodic timer.
//! - the **delay tick source**, a dedicated counter (SysTick) owned by the
//!   busy-wait delay service. It never touches the system tick timer.

/// Priority ordinal the bring-up sequence hands to the delay service.
pub const DELAY_PRIORITY: u8 = 0;

/// Priority bits implemented by the Cortex-M0+ NVIC.
pub const NVIC_PRIO_BITS: u8 = 2;

/// Priority register byte for `ordinal`, 0 being the most urgent.
///
/// Only the top [`NVIC_PRIO_BITS`] of the byte exist in hardware, so the
/// ordinal goes into them. Ordinals past the lowest level clamp to it.
pub const fn priority_byte(ordinal: u8) -> u8 {
    match ordinal {
        0 => 0x00,
        1 => 0x40,
        2 => 0x80,
        _ => 0xC0,
    }
}

/// System tick timer initialisers.
///
/// At most one of the two is called per boot.
pub trait TickTimers {
    /// Opaque timer handle.
    type Timer: Copy;

    /// Start a base timer and multiplex software timers over it.
    fn init_softimer_tick(&mut self) -> Self::Timer;

    /// Start a plain periodic-interrupt timer.
    fn init_periodic_tick(&mut self) -> Self::Timer;
}

/// Busy-wait delay service.
pub trait DelayService {
    /// Dedicated hardware tick source consumed by the delay service.
    type TickSource;

    /// Bring up the delay service's own tick source.
    fn init_delay_tick_source(&mut self) -> Self::TickSource;

    /// Start the delay service on `source`.
    fn init_delay(&mut self, source: Self::TickSource, priority: u8);
}
