//! Board services produced by bring-up.
//!
//! Handles that later code shares (the system tick timer, the buzzer's PWM
//! timer) live in a [`BoardServices`] value instead of mutable globals. Each
//! handle slot is a [`WriteOnce`]: empty until bring-up fills it, never
//! overwritten, read-only for everyone afterwards.

use platform::HeapBounds;

use crate::config::TickStrategy;
use crate::step::{BringUpPlan, Step};

/// Slot written at most once.
///
/// Starts empty, which is the "feature disabled" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOnce<T> {
    value: Option<T>,
}

/// Second write to a [`WriteOnce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlreadySet;

#[cfg(feature = "std")]
impl std::error::Error for AlreadySet {}

impl core::fmt::Display for AlreadySet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "handle already assigned")
    }
}

impl<T> WriteOnce<T> {
    /// Empty slot.
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// Fill the slot. Fails, leaving the first value in place, if it is
    /// already filled.
    pub fn set(&mut self, value: T) -> Result<(), AlreadySet> {
        if self.value.is_some() {
            return Err(AlreadySet);
        }
        self.value = Some(value);
        Ok(())
    }

    /// The value, or `None` while empty.
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// `true` once filled.
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: Copy> WriteOnce<T> {
    /// Copy of the value, or `None` while empty.
    pub fn copied(&self) -> Option<T> {
        self.value
    }
}

impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything bring-up hands to the application.
///
/// `C`, `T` and `P` are the board's console, timer and PWM handle types.
/// Only the sequencer writes; everything else reads.
#[derive(Debug, Clone)]
pub struct BoardServices<C, T, P> {
    pub(crate) heap: WriteOnce<HeapBounds>,
    pub(crate) console: WriteOnce<C>,
    pub(crate) system_tick_timer: WriteOnce<T>,
    pub(crate) buzzer_pwm: WriteOnce<P>,
    pub(crate) tick_strategy: TickStrategy,
    pub(crate) completed: BringUpPlan,
}

impl<C, T, P> BoardServices<C, T, P> {
    pub(crate) fn new(tick_strategy: TickStrategy) -> Self {
        Self {
            heap: WriteOnce::empty(),
            console: WriteOnce::empty(),
            system_tick_timer: WriteOnce::empty(),
            buzzer_pwm: WriteOnce::empty(),
            tick_strategy,
            completed: BringUpPlan::new(),
        }
    }

    /// Heap region handed to the allocator.
    pub fn heap_bounds(&self) -> Option<&HeapBounds> {
        self.heap.get()
    }

    /// Debug console, when one came up.
    pub fn console(&self) -> Option<&C> {
        self.console.get()
    }

    /// Shared system tick timer, when one was configured.
    pub fn system_tick_timer(&self) -> Option<&T> {
        self.system_tick_timer.get()
    }

    /// Buzzer PWM timer, when the buzzer was configured.
    ///
    /// The buzzer drives one channel; the remaining channels of the same
    /// timer are free for the application.
    pub fn buzzer_pwm(&self) -> Option<&P> {
        self.buzzer_pwm.get()
    }

    /// Which tick strategy bring-up applied.
    pub fn tick_strategy(&self) -> TickStrategy {
        self.tick_strategy
    }

    /// Steps that ran, in order.
    pub fn completed_steps(&self) -> &[Step] {
        &self.completed
    }

    /// `true` if `step` ran.
    pub fn step_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }
}
