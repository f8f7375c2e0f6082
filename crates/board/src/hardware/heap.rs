//! System heap on the target: region lookup and the global allocator.

use core::alloc::{GlobalAlloc, Layout};
use core::cell::{Cell, RefCell};
use core::ptr::{self, NonNull};

use critical_section::Mutex;
use linked_list_allocator::Heap;
use platform::{HeapAllocator, HeapBounds, HeapBoundsSource};

extern "C" {
    /// End of `.bss`/`.uninit`, provided by cortex-m-rt's `link.x`.
    static __sheap: u8;
    /// Bottom of the stack reservation, provided by `memory.x`.
    static __heap_end__: u8;
}

/// Heap bounds from the GNU linker script.
///
/// Start is cortex-m-rt's `__sheap`, end is `__heap_end__` from `memory.x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkerHeapBounds;

impl HeapBoundsSource for LinkerHeapBounds {
    fn resolve_heap_bounds(&self) -> HeapBounds {
        // SAFETY: only the symbol addresses are taken, never the contents.
        // Rust 1.82 made this safe; the block stays for the 1.75 MSRV.
        #[allow(unused_unsafe)]
        let (start, end) = unsafe {
            (
                ptr::addr_of!(__sheap) as usize,
                ptr::addr_of!(__heap_end__) as usize,
            )
        };
        // An inverted range means the statics ate into the stack reservation;
        // an empty heap makes `SystemHeap` trap.
        HeapBounds::new(start, end).unwrap_or(HeapBounds::empty_at(start))
    }
}

/// Heap bounds from the Arm Compiler scatter file: from the end of the
/// zero-initialised RW region to the end of on-chip SRAM.
#[cfg(feature = "armcc")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterHeapBounds;

#[cfg(feature = "armcc")]
extern "C" {
    #[link_name = "Image$$RW_IRAM1$$ZI$$Limit"]
    static RW_IRAM1_ZI_LIMIT: u8;
}

#[cfg(feature = "armcc")]
impl HeapBoundsSource for ScatterHeapBounds {
    fn resolve_heap_bounds(&self) -> HeapBounds {
        // SAFETY: only the symbol address is taken. Safe since Rust 1.82.
        #[allow(unused_unsafe)]
        let start = unsafe { ptr::addr_of!(RW_IRAM1_ZI_LIMIT) as usize };
        HeapBounds::armcc(start).unwrap_or(HeapBounds::empty_at(start))
    }
}

/// Heap bounds known up front, e.g. a dedicated RAM block.
#[derive(Debug, Clone, Copy)]
pub struct FixedHeapBounds(pub HeapBounds);

impl HeapBoundsSource for FixedHeapBounds {
    fn resolve_heap_bounds(&self) -> HeapBounds {
        self.0
    }
}

/// `linked_list_allocator` heap behind a critical section.
///
/// Cortex-M0+ has no compare-and-swap, so the spin-locked `LockedHeap` is
/// out; a critical section serialises allocation instead.
pub struct GlobalHeap {
    heap: Mutex<RefCell<Heap>>,
    ready: Mutex<Cell<bool>>,
}

impl GlobalHeap {
    /// Heap with no memory; every allocation fails until [`SystemHeap`]
    /// hands it a region.
    pub const fn empty() -> Self {
        Self {
            heap: Mutex::new(RefCell::new(Heap::empty())),
            ready: Mutex::new(Cell::new(false)),
        }
    }

    /// Bytes currently allocated.
    pub fn used(&self) -> usize {
        critical_section::with(|cs| self.heap.borrow_ref(cs).used())
    }

    /// Bytes currently free.
    pub fn free(&self) -> usize {
        critical_section::with(|cs| self.heap.borrow_ref(cs).free())
    }
}

// SAFETY: every access to the inner heap happens inside a critical section.
unsafe impl GlobalAlloc for GlobalHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        critical_section::with(|cs| {
            self.heap
                .borrow_ref_mut(cs)
                .allocate_first_fit(layout)
                .map_or(ptr::null_mut(), NonNull::as_ptr)
        })
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if let Some(ptr) = NonNull::new(ptr) {
            critical_section::with(|cs| {
                // SAFETY: `ptr` came from `alloc` with the same layout.
                unsafe { self.heap.borrow_ref_mut(cs).deallocate(ptr, layout) }
            });
        }
    }
}

#[global_allocator]
static HEAP: GlobalHeap = GlobalHeap::empty();

/// The global heap as a bring-up collaborator.
///
/// Boards delegate their [`HeapAllocator`] implementation to this.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHeap;

impl SystemHeap {
    /// Bytes currently allocated from the global heap.
    pub fn used(&self) -> usize {
        HEAP.used()
    }

    /// Bytes currently free in the global heap.
    pub fn free(&self) -> usize {
        HEAP.free()
    }
}

impl HeapAllocator for SystemHeap {
    fn init_heap(&mut self, bounds: HeapBounds) {
        if bounds.is_empty() {
            error!("system heap: empty region at 0x{:x}", bounds.start());
            // Fatal: nothing past this point may allocate.
            cortex_m::asm::udf();
        }
        let fresh = critical_section::with(|cs| {
            if HEAP.ready.borrow(cs).replace(true) {
                return false;
            }
            // SAFETY: the region comes from the linker and lies between the
            // statics and the stack; it is handed to the allocator once.
            unsafe {
                HEAP.heap
                    .borrow_ref_mut(cs)
                    .init(bounds.start() as *mut u8, bounds.len());
            }
            true
        });
        if fresh {
            debug!("system heap: {} bytes", bounds.len());
        } else {
            warn!("system heap already initialised, region ignored");
        }
    }
}
