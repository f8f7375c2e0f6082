//! Whole-board collaborator bundle.

use crate::{
    DelayService, EventInput, HeapAllocator, Indicators, IsrDefer, PowerManagement,
    RuntimeBinding, TickTimers,
};

/// Everything the bring-up sequence calls into.
///
/// Implemented automatically for any type implementing each collaborator
/// trait; a board implements the pieces and gets this for free.
pub trait BoardHal:
    HeapAllocator + RuntimeBinding + TickTimers + DelayService + Indicators + EventInput
    + PowerManagement + IsrDefer
{
}

impl<T> BoardHal for T where
    T: HeapAllocator
        + RuntimeBinding
        + TickTimers
        + DelayService
        + Indicators
        + EventInput
        + PowerManagement
        + IsrDefer
{
}
