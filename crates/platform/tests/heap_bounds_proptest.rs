//! Property-based tests for heap region math.
//! Verifies invariants hold for ALL addresses, not just fixed examples.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use platform::{HeapBounds, HeapBoundsError, HeapBoundsSource, ARMCC_SRAM_ORIGIN, ARMCC_SRAM_SIZE};

proptest::proptest! {
    /// `new` accepts exactly the non-inverted ranges.
    #[test]
    fn new_rejects_only_inverted(start in proptest::num::usize::ANY, end in proptest::num::usize::ANY) {
        match HeapBounds::new(start, end) {
            Ok(b) => {
                assert!(start <= end);
                assert_eq!(b.len(), end - start);
                assert_eq!(b.is_empty(), start == end);
            }
            Err(e) => {
                assert!(start > end);
                assert_eq!(e, HeapBoundsError::Inverted { start, end });
            }
        }
    }

    /// `from_origin` never panics; success means the end did not wrap.
    #[test]
    fn from_origin_never_wraps(origin in proptest::num::usize::ANY, size in proptest::num::usize::ANY) {
        if let Ok(b) = HeapBounds::from_origin(origin, size) {
            assert_eq!(b.start(), origin);
            assert_eq!(b.len(), size);
            assert!(b.end() >= b.start());
        }
    }

    /// The ArmCC variant always ends at the end of SRAM.
    #[test]
    fn armcc_ends_at_sram_end(offset in 0usize..=ARMCC_SRAM_SIZE) {
        let start = ARMCC_SRAM_ORIGIN + offset;
        let b = HeapBounds::armcc(start).unwrap();
        assert_eq!(b.end(), ARMCC_SRAM_ORIGIN + ARMCC_SRAM_SIZE);
        assert_eq!(b.len(), ARMCC_SRAM_SIZE - offset);
    }

    /// `contains` agrees with the half-open range definition.
    #[test]
    fn contains_is_half_open(start in 0usize..0x1000, len in 0usize..0x1000, probe in 0usize..0x3000) {
        let b = HeapBounds::from_origin(start, len).unwrap();
        assert_eq!(b.contains(probe), probe >= start && probe < start + len);
    }

    /// Bounds used as their own source resolve to themselves.
    #[test]
    fn bounds_resolve_to_themselves(start in 0usize..0x1000_0000, len in 0usize..0x1000) {
        let b = HeapBounds::from_origin(start, len).unwrap();
        assert_eq!(b.resolve_heap_bounds(), b);
    }
}
