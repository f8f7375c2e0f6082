//! Once-per-boot guard for firmware bring-up.

/// Refused bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpError {
    /// Bring-up already ran (or is running) in this boot.
    AlreadyInitialized,
}

#[cfg(feature = "std")]
impl std::error::Error for BringUpError {}

impl core::fmt::Display for BringUpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "board already initialised"),
        }
    }
}

/// Latch that lets exactly one caller through.
///
/// The firmware keeps one in a `critical_section::Mutex`; claiming happens
/// before any initialiser runs, so a re-entrant call from an interrupt is
/// refused too.
#[derive(Debug, Default)]
pub struct BringUpLatch {
    claimed: bool,
}

impl BringUpLatch {
    /// Unclaimed latch.
    pub const fn new() -> Self {
        Self { claimed: false }
    }

    /// Claim the latch. Only the first call succeeds.
    pub fn claim(&mut self) -> Result<(), BringUpError> {
        if core::mem::replace(&mut self.claimed, true) {
            return Err(BringUpError::AlreadyInitialized);
        }
        Ok(())
    }

    /// Whether bring-up has started.
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_claim_wins() {
        let mut latch = BringUpLatch::new();
        assert!(!latch.is_claimed());
        assert_eq!(latch.claim(), Ok(()));
        assert!(latch.is_claimed());
    }

    #[test]
    fn test_every_later_claim_is_refused() {
        let mut latch = BringUpLatch::new();
        latch.claim().unwrap();
        assert_eq!(latch.claim(), Err(BringUpError::AlreadyInitialized));
        assert_eq!(latch.claim(), Err(BringUpError::AlreadyInitialized));
        assert!(latch.is_claimed());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            BringUpError::AlreadyInitialized.to_string(),
            "board already initialised"
        );
    }
}
