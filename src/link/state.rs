//! Link state snapshots.

use super::interface::PhyInterface;
use super::params::{Duplex, LinkModes, Pause, Speed};
use crate::error::{ConfigError, ConfigResult};
use crate::internal::constants::MAX_PHY_ADDR;

// =============================================================================
// Link State
// =============================================================================

/// One snapshot of a negotiated link
///
/// The resolver produces one of these per pass; the last one handed to the
/// MAC driver is the *published* state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    /// PHY-facing interface mode
    pub interface: PhyInterface,
    /// Negotiated speed
    pub speed: Speed,
    /// Negotiated duplex
    pub duplex: Duplex,
    /// Flow control: capabilities plus resolved TX/RX
    pub pause: Pause,
    /// Local advertisement
    pub advertising: LinkModes,
    /// Link partner advertisement
    pub lp_advertising: LinkModes,
    /// Link is up per the active negotiation mode
    pub link: bool,
    /// Autonegotiation active for this snapshot
    pub an_enabled: bool,
    /// Autonegotiation completed
    pub an_complete: bool,
}

impl LinkState {
    /// Link down, nothing negotiated
    pub const fn new(interface: PhyInterface) -> Self {
        Self {
            interface,
            speed: Speed::Unknown,
            duplex: Duplex::Unknown,
            pause: Pause::NONE,
            advertising: LinkModes::NONE,
            lp_advertising: LinkModes::NONE,
            link: false,
            an_enabled: false,
            an_complete: false,
        }
    }

    /// Whether two snapshots would program the MAC identically
    ///
    /// Ignores `link`, `an_complete` and the partner's advertisement: those
    /// never reach `mac_config` as configuration.
    #[must_use]
    pub fn same_config(&self, other: &LinkState) -> bool {
        self.interface == other.interface
            && self.speed == other.speed
            && self.duplex == other.duplex
            && self.pause == other.pause
            && self.advertising == other.advertising
            && self.an_enabled == other.an_enabled
    }
}

impl core::fmt::Display for LinkState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "interface={} speed={} duplex={} pause={} link={} an={}",
            self.interface,
            self.speed,
            self.duplex,
            self.pause,
            u8::from(self.link),
            u8::from(self.an_enabled)
        )
    }
}

// =============================================================================
// PHY State
// =============================================================================

/// Link parameters as last reported by the attached PHY
///
/// Merged into the resolved [`LinkState`] during a pass, never published
/// to the MAC on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyState {
    /// Host-side interface the PHY is currently using
    pub interface: PhyInterface,
    /// Negotiated speed
    pub speed: Speed,
    /// Negotiated duplex
    pub duplex: Duplex,
    /// Partner PAUSE capabilities (`SYM` / `ASYM` only)
    pub pause: Pause,
    /// PHY reports link up
    pub link: bool,
}

impl PhyState {
    /// A PHY report without flow-control capabilities
    pub const fn new(interface: PhyInterface, speed: Speed, duplex: Duplex, link: bool) -> Self {
        Self {
            interface,
            speed,
            duplex,
            pause: Pause::NONE,
            link,
        }
    }

    /// A PHY that has not reported link yet
    pub const fn down(interface: PhyInterface) -> Self {
        Self::new(interface, Speed::Unknown, Duplex::Unknown, false)
    }

    /// Set the partner's symmetric/asymmetric PAUSE capabilities
    #[must_use]
    pub const fn with_pause(mut self, sym: bool, asym: bool) -> Self {
        self.pause = Pause::from_caps(sym, asym);
        self
    }
}

impl core::fmt::Display for PhyState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {}/{}/{}",
            if self.link { "up" } else { "down" },
            self.interface,
            self.speed,
            self.duplex
        )
    }
}

// =============================================================================
// PHY Handle
// =============================================================================

/// Identifies the attached PHY by its MDIO address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyHandle(u8);

impl PhyHandle {
    /// Create a handle for the PHY at `address` (0-31)
    pub const fn new(address: u8) -> ConfigResult<Self> {
        if address > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress);
        }
        Ok(Self(address))
    }

    /// MDIO address of the PHY
    #[inline(always)]
    pub const fn address(self) -> u8 {
        self.0
    }
}
