//! Power management unit.

/// Power management unit.
pub trait PowerManagement {
    /// Initialise the PMU (low-power modes, wake-up sources).
    fn init_pmu(&mut self);
}
