//! Deferred interrupt dispatch.
//!
//! High-priority handlers hand long-running work to a lower-priority,
//! software-triggered exception (PendSV on Cortex-M). Once started, any
//! interrupt may queue work that calls into any other subsystem, so this is
//! the last thing bring-up initialises.

/// Deferred interrupt dispatch.
pub trait IsrDefer {
    /// Activate the low-priority dispatch context.
    fn init_isr_defer(&mut self);
}
