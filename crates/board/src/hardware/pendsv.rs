//! Deferred interrupt dispatch on PendSV.
//!
//! PendSV runs at the lowest priority. [`defer`] queues a job and pends it;
//! the handler drains the queue with interrupts enabled, one job at a time.

use core::cell::RefCell;

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::SCB;
use cortex_m_rt::exception;
use critical_section::Mutex;
use platform::IsrDefer;

use crate::defer::{DeferError, DeferQueue, Job};

static QUEUE: Mutex<RefCell<DeferQueue>> = Mutex::new(RefCell::new(DeferQueue::new()));

/// Lowest priority on every Cortex-M.
const PENDSV_PRIORITY: u8 = 0xFF;

/// Queue `job` for PendSV and pend the exception.
///
/// Safe from any interrupt. Fails until bring-up has run the deferred
/// dispatch step, or when the queue is full.
pub fn defer(job: Job) -> Result<(), DeferError> {
    critical_section::with(|cs| QUEUE.borrow_ref_mut(cs).push(job))?;
    SCB::set_pendsv();
    Ok(())
}

/// `IsrDefer` collaborator for PendSV.
#[derive(Debug, Default)]
pub struct PendSvDefer;

impl IsrDefer for PendSvDefer {
    fn init_isr_defer(&mut self) {
        // SAFETY: only the PendSV priority byte is written, before any job
        // can be queued.
        unsafe {
            let mut peripherals = cortex_m::Peripherals::steal();
            peripherals.SCB.set_priority(SystemHandler::PendSV, PENDSV_PRIORITY);
        }
        critical_section::with(|cs| QUEUE.borrow_ref_mut(cs).activate());
        debug!("isr-defer: PendSV dispatch active");
    }
}

#[exception]
fn PendSV() {
    // Pop under the lock, run outside it.
    while let Some(job) = critical_section::with(|cs| QUEUE.borrow_ref_mut(cs).pop()) {
        job();
    }
}
