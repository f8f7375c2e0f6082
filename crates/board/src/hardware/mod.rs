//! Cortex-M0+ building blocks (feature `hardware`).
//!
//! - [`LinkerHeapBounds`], [`FixedHeapBounds`]: where the heap lives
//! - [`SystemHeap`]: the global allocator as a bring-up collaborator
//! - [`SysTickSource`]: the delay service's tick source
//! - [`PendSvDefer`], [`defer`]: deferred interrupt dispatch
//! - [`bring_up`]: once-only entry point for firmware
//!
//! The flash configuration field is emitted here, into `.flash_config`.
//!
//! Enabling `hardware` also links `defmt-rtt` as the log transport and
//! `panic-probe` as the panic handler.
//!
//! ```ignore
//! static SERVICES: StaticCell<Services<Kl26Board>> = StaticCell::new();
//!
//! #[cortex_m_rt::entry]
//! fn main() -> ! {
//!     let mut hal = Kl26Board::take();
//!     let services = bring_up(&SERVICES, &CONFIG, &LinkerHeapBounds, &mut hal)
//!         .unwrap_or_else(|_| cortex_m::asm::udf());
//!     app::run(services)
//! }
//! ```

mod heap;
mod pendsv;
mod systick;

use defmt_rtt as _;
use panic_probe as _;

use core::cell::RefCell;

use critical_section::Mutex;
use platform::{BoardHal, HeapBoundsSource};
use static_cell::StaticCell;

use crate::config::BoardConfig;
use crate::flash_config::{FLASH_CONFIG_FIELD, FLASH_CONFIG_LEN};
use crate::once::{BringUpError, BringUpLatch};
use crate::sequencer::{initialize_board, Services};

#[cfg(feature = "armcc")]
pub use heap::ScatterHeapBounds;
pub use heap::{FixedHeapBounds, GlobalHeap, LinkerHeapBounds, SystemHeap};
pub use pendsv::{defer, PendSvDefer};
pub use systick::SysTickSource;

/// Placed at flash 0x400 by `memory.x`.
#[link_section = ".flash_config"]
#[used]
static FLASH_CONFIG: [u8; FLASH_CONFIG_LEN] = FLASH_CONFIG_FIELD;

static LATCH: Mutex<RefCell<BringUpLatch>> = Mutex::new(RefCell::new(BringUpLatch::new()));

/// Run [`initialize_board`] once per boot and keep the services in `cell`.
///
/// The second call returns [`BringUpError::AlreadyInitialized`] without
/// touching any hardware.
pub fn bring_up<S, H>(
    cell: &'static StaticCell<Services<H>>,
    config: &BoardConfig,
    heap_source: &S,
    hal: &mut H,
) -> Result<&'static Services<H>, BringUpError>
where
    S: HeapBoundsSource + ?Sized,
    H: BoardHal,
{
    critical_section::with(|cs| LATCH.borrow_ref_mut(cs).claim())?;
    let services = initialize_board(config, heap_source, hal);
    cell.try_init(services)
        .map(|services| &*services)
        .ok_or(BringUpError::AlreadyInitialized)
}
