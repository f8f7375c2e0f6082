//! Board collaborator interfaces for the bring-up sequence.
//!
//! Every peripheral the bring-up sequence touches is reached through one of
//! the small traits in this crate. The sequence only decides *whether* and
//! *when* each initialiser runs; what an initialiser does to the hardware is
//! the implementor's business.
//!
//! # Architecture Layers
//!
//! ```text
//! Application
//!         ↓
//! Bring-up sequencer (board crate)
//!         ↓
//! Collaborator traits (this crate)
//!         ↓
//! Chip support: UART, PIT, TPM, GPIO, PMU, PendSV
//! ```
//!
//! # Collaborators
//!
//! - [`HeapBoundsSource`], [`HeapAllocator`] - system heap
//! - [`DebugConsole`], [`RuntimeBinding`] - console and C-library retargeting
//! - [`TickTimers`], [`DelayService`] - time bases
//! - [`Indicators`] - LEDs and buzzer
//! - [`EventInput`] - event input manager and GPIO keys
//! - [`PowerManagement`] - PMU
//! - [`IsrDefer`] - deferred interrupt dispatch
//!
//! [`BoardHal`] bundles all of them.
//!
//! # Features
//!
//! - `std`: expose [`mocks`] to other crates' tests
//! - `defmt`: derive `defmt::Format` on value types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // register and symbol names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod console;
pub mod heap;
pub mod indicator;
pub mod input;
pub mod isr_defer;
pub mod mocks;
pub mod power;
pub mod timer;

pub use board::BoardHal;
pub use console::{DebugConsole, RuntimeBinding, RuntimeLibrary, Toolchain};
pub use heap::{
    HeapAllocator, HeapBounds, HeapBoundsError, HeapBoundsSource, ARMCC_SRAM_ORIGIN, ARMCC_SRAM_SIZE,
};
pub use indicator::Indicators;
pub use input::EventInput;
pub use isr_defer::IsrDefer;
pub use power::PowerManagement;
pub use timer::{priority_byte, DelayService, TickTimers, DELAY_PRIORITY, NVIC_PRIO_BITS};
