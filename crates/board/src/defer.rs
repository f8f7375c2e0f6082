//! Deferred-work queue.
//!
//! Interrupt handlers push [`Job`]s; a low-priority context pops and runs
//! them. The queue refuses work until it is activated, which happens in the
//! last bring-up step, so nothing runs against a half-initialised board.
//!
//! The queue itself is plain data. On the target it sits behind a critical
//! section (see `hardware::pendsv`).

use heapless::Deque;

/// Deferred work item.
pub type Job = fn();

/// Default queue depth.
pub const DEFER_QUEUE_DEPTH: usize = 16;

/// Rejected [`DeferQueue::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeferError {
    /// Deferred dispatch has not been started yet.
    Inactive,
    /// Every slot is taken.
    QueueFull,
}

#[cfg(feature = "std")]
impl std::error::Error for DeferError {}

impl core::fmt::Display for DeferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Inactive => write!(f, "deferred dispatch not started"),
            Self::QueueFull => write!(f, "deferred work queue full"),
        }
    }
}

/// FIFO of deferred jobs with an activation gate.
pub struct DeferQueue<const N: usize = DEFER_QUEUE_DEPTH> {
    jobs: Deque<Job, N>,
    active: bool,
}

impl<const N: usize> DeferQueue<N> {
    /// Inactive, empty queue.
    pub const fn new() -> Self {
        Self {
            jobs: Deque::new(),
            active: false,
        }
    }

    /// Start accepting work. Idempotent.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// `true` once [`activate`](Self::activate) ran.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Queue `job` behind everything already queued.
    pub fn push(&mut self, job: Job) -> Result<(), DeferError> {
        if !self.active {
            return Err(DeferError::Inactive);
        }
        self.jobs.push_back(job).map_err(|_| DeferError::QueueFull)
    }

    /// Oldest queued job.
    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Jobs waiting.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// `true` when nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<const N: usize> Default for DeferQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static ORDER: AtomicUsize = AtomicUsize::new(0);
    static FIRST_SEEN: AtomicUsize = AtomicUsize::new(usize::MAX);
    static SECOND_SEEN: AtomicUsize = AtomicUsize::new(usize::MAX);

    fn first() {
        FIRST_SEEN.store(ORDER.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
    }

    fn second() {
        SECOND_SEEN.store(ORDER.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
    }

    fn noop() {}

    #[test]
    fn test_rejects_work_before_activation() {
        let mut q: DeferQueue<4> = DeferQueue::new();
        assert_eq!(q.push(noop), Err(DeferError::Inactive));
        assert!(q.is_empty());
    }

    #[test]
    fn test_runs_in_fifo_order() {
        let mut q: DeferQueue<4> = DeferQueue::new();
        q.activate();
        q.push(first).unwrap();
        q.push(second).unwrap();
        while let Some(job) = q.pop() {
            job();
        }
        assert!(FIRST_SEEN.load(Ordering::SeqCst) < SECOND_SEEN.load(Ordering::SeqCst));
    }

    #[test]
    fn test_full_queue_reports_and_keeps_contents() {
        let mut q: DeferQueue<2> = DeferQueue::new();
        q.activate();
        q.push(noop).unwrap();
        q.push(noop).unwrap();
        assert_eq!(q.push(noop), Err(DeferError::QueueFull));
        assert_eq!(q.len(), 2);
    }
}
