//! Centralized Constants
//!
//! Single source of truth for the numeric limits used by the link core.

// =============================================================================
// PHY Addressing
// =============================================================================

/// Maximum valid PHY address (5-bit MDIO field)
pub const MAX_PHY_ADDR: u8 = 31;

// =============================================================================
// Resolution
// =============================================================================

/// Upper bound on resolution passes run by one `process_pending()` call.
///
/// A producer that keeps re-arming the scheduler faster than passes complete
/// would otherwise keep the executor busy forever; the remaining request stays
/// pending and is picked up by the next call.
pub const MAX_PASSES_PER_DRAIN: usize = 8;
