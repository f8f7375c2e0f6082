//! System heap region and the collaborators that locate and own it.
//!
//! The heap is a single linear region handed to the allocator exactly once,
//! before any step that may allocate. Where the region comes from depends on
//! the toolchain:
//!
//! | Toolchain | Start                                  | End                        |
//! |-----------|----------------------------------------|----------------------------|
//! | GNU       | `__sheap` (linker script)              | `__heap_end__`             |
//! | ArmCC     | `Image$$RW_IRAM1$$ZI$$Limit` (scatter) | [`ARMCC_SRAM_ORIGIN`] + [`ARMCC_SRAM_SIZE`] |
//!
//! The bring-up sequencer never looks at symbol names; it asks a
//! [`HeapBoundsSource`] supplied by platform startup code.

/// SRAM origin used by the fixed-origin (ArmCC) heap variant.
pub const ARMCC_SRAM_ORIGIN: usize = 0x1FFF_F000;

/// SRAM size used by the fixed-origin (ArmCC) heap variant: 15 KiB.
pub const ARMCC_SRAM_SIZE: usize = 15 * 1024;

/// Address range `[start, end)` of the system heap.
///
/// Invariant: `start <= end`. Construct through [`HeapBounds::new`] or
/// [`HeapBounds::from_origin`]; there is no way to build an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeapBounds {
    start: usize,
    end: usize,
}

impl HeapBounds {
    /// Build bounds from a start and an end address.
    pub const fn new(start: usize, end: usize) -> Result<Self, HeapBoundsError> {
        if start > end {
            return Err(HeapBoundsError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build bounds from a fixed origin plus a size in bytes.
    pub const fn from_origin(origin: usize, size: usize) -> Result<Self, HeapBoundsError> {
        match origin.checked_add(size) {
            Some(end) => Ok(Self { start: origin, end }),
            None => Err(HeapBoundsError::Overflow { origin, size }),
        }
    }

    /// Zero-length region at `addr`.
    pub const fn empty_at(addr: usize) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Heap bounds of the ArmCC variant: from `start` (the end of the
    /// zero-initialised RW region) to the end of on-chip SRAM.
    pub const fn armcc(start: usize) -> Result<Self, HeapBoundsError> {
        match Self::from_origin(ARMCC_SRAM_ORIGIN, ARMCC_SRAM_SIZE) {
            Ok(sram) => Self::new(start, sram.end),
            Err(e) => Err(e),
        }
    }

    /// First address of the region.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last address of the region.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Region length in bytes.
    #[allow(clippy::arithmetic_side_effects)] // start <= end by construction
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` when the region holds no bytes.
    ///
    /// A degenerate heap is accepted here; the allocator decides whether it
    /// is fatal.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` when `addr` lies inside the region.
    pub const fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr < self.end
    }

    /// `true` when the two regions share at least one byte.
    pub const fn overlaps(&self, other: &HeapBounds) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Invalid heap bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeapBoundsError {
    /// End address lies below the start address.
    Inverted {
        /// Requested start
        start: usize,
        /// Requested end
        end: usize,
    },
    /// `origin + size` does not fit in the address space.
    Overflow {
        /// Requested origin
        origin: usize,
        /// Requested size
        size: usize,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for HeapBoundsError {}

impl core::fmt::Display for HeapBoundsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Inverted { start, end } => {
                write!(f, "heap end 0x{end:08X} lies below heap start 0x{start:08X}")
            }
            Self::Overflow { origin, size } => {
                write!(f, "heap of {size} bytes at 0x{origin:08X} overflows the address space")
            }
        }
    }
}

/// Locates the heap region.
///
/// Implemented by platform startup code (linker symbols, scatter-file
/// symbols, fixed constants). Called once, before [`HeapAllocator::init_heap`].
pub trait HeapBoundsSource {
    /// Resolve the heap region.
    fn resolve_heap_bounds(&self) -> HeapBounds;
}

impl HeapBoundsSource for HeapBounds {
    fn resolve_heap_bounds(&self) -> HeapBounds {
        *self
    }
}

/// System heap allocator.
pub trait HeapAllocator {
    /// Hand the region to the allocator.
    ///
    /// Called exactly once, before anything allocates. A degenerate region
    /// is the allocator's to reject (typically by trapping).
    fn init_heap(&mut self, bounds: HeapBounds);
}
