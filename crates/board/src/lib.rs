//! Board bring-up for the KL26 reference board.
//!
//! Takes the board from reset state to application-ready in one call: heap,
//! debug console, C-library binding, system tick, delay, LEDs, buzzer, keys,
//! PMU and deferred interrupt dispatch, each switched by a [`BoardConfig`].
//!
//! # Architecture
//!
//! ```text
//! Firmware main (hardware::bring_up)
//!         ↓
//! Sequencer (initialize_board, Step table)
//!         ↓
//! Collaborator traits (platform crate)
//!         ↓
//! Chip support and instance adapters (instances, hardware)
//! ```
//!
//! # Features
//!
//! - `hardware` - Cortex-M0+ target: global heap, SysTick, PendSV, defmt-rtt
//! - `defmt` - log through defmt (implied by `hardware`)
//! - `tracing` - log through `tracing` on the host
//! - `std` - standard library support for host builds and tests
//! - `debug`, `vdebug`, `stdlib`, `softimer`, `system-tick`, `delay`, `led`,
//!   `buzzer`, `key`, `key-gpio`, `pmu`, `isr-defer`, `armcc`, `microlib` -
//!   read by [`BoardConfig::from_cargo_features`]
//!
//! # Example
//!
//! ```
//! use board::{initialize_board, BoardConfig, TickStrategy};
//! use platform::mocks::RecordingBoard;
//! use platform::HeapBounds;
//!
//! const CONFIG: BoardConfig = BoardConfig::NONE
//!     .with_debug(true)
//!     .with_stdlib(true)
//!     .with_system_tick(true);
//!
//! let heap = HeapBounds::new(0x1FFF_F400, 0x2000_2800).unwrap();
//! let mut hal = RecordingBoard::new();
//! let services = initialize_board(&CONFIG, &heap, &mut hal);
//!
//! assert_eq!(services.tick_strategy(), TickStrategy::PeriodicTimer);
//! assert!(services.buzzer_pwm().is_none());
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // log through the fmt macros, not println!
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod defer;
pub mod flash_config;
pub mod instances;
pub mod once;
pub mod sequencer;
pub mod services;
pub mod step;

#[cfg(feature = "hardware")]
pub mod hardware;

pub use config::{BoardConfig, ConfigIssue, TickStrategy};
pub use defer::{DeferError, DeferQueue, Job};
pub use instances::{
    BuzzerPwm, GpioKeys, InstanceError, KeyEvent, LedBank, Polarity, PwmChannel,
};
pub use once::{BringUpError, BringUpLatch};
pub use sequencer::{initialize_board, Services};
pub use services::{AlreadySet, BoardServices, WriteOnce};
pub use step::{BringUpPlan, Step, STEP_COUNT};
