//! Link configuration
//!
//! The firmware/device-tree description of a link, supplied once at
//! construction: negotiation mode, initial interface mode, local
//! flow-control policy, local advertisement and, for fixed links, the
//! static speed and duplex.
//!
//! # Example
//!
//! ```ignore
//! let config = LinkConfig::new()
//!     .with_mode(NegotiationMode::InBand)
//!     .with_interface(PhyInterface::Sgmii)
//!     .with_pause(Pause::AN | Pause::SYM);
//! config.validate()?;
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::link::{Duplex, LinkModes, LinkState, Pause, PhyInterface, Speed};
use crate::mode::NegotiationMode;

// =============================================================================
// Fixed Link
// =============================================================================

/// Static link parameters for [`NegotiationMode::Fixed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedLink {
    /// Fixed speed
    pub speed: Speed,
    /// Fixed duplex
    pub duplex: Duplex,
    /// Partner PAUSE capabilities declared for the fixed link
    pub pause: Pause,
    /// Carrier; stays up unless a link GPIO says otherwise
    pub link: bool,
}

impl FixedLink {
    /// Fixed link with carrier up and no PAUSE
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self {
            speed,
            duplex,
            pause: Pause::NONE,
            link: true,
        }
    }

    /// Declare partner PAUSE capabilities
    #[must_use]
    pub const fn with_pause(mut self, sym: bool, asym: bool) -> Self {
        self.pause = Pause::from_caps(sym, asym);
        self
    }

    /// Both speed and duplex are known
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self.speed, Speed::Unknown) && !matches!(self.duplex, Duplex::Unknown)
    }
}

// =============================================================================
// Link Configuration
// =============================================================================

/// Complete link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Negotiation mode, fixed for the lifetime of the link
    pub mode: NegotiationMode,
    /// Initial PHY-facing interface mode
    pub interface: PhyInterface,
    /// Local flow-control policy: `SYM`/`ASYM` capabilities, `AN` to
    /// resolve TX/RX from negotiation, or forced `TX`/`RX`
    pub pause: Pause,
    /// Local advertisement
    pub advertising: LinkModes,
    /// Run autonegotiation (ignored for fixed links)
    pub an_enabled: bool,
    /// Static parameters, required in fixed mode
    pub fixed: Option<FixedLink>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkConfig {
    /// PHY-driven link, interface unset, pause resolved by negotiation
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: NegotiationMode::Phy,
            interface: PhyInterface::Na,
            pause: Pause::AN,
            advertising: LinkModes::NONE,
            an_enabled: true,
            fixed: None,
        }
    }

    /// Fixed link at the given interface, speed and duplex
    #[must_use]
    pub const fn fixed(interface: PhyInterface, speed: Speed, duplex: Duplex) -> Self {
        Self::new()
            .with_mode(NegotiationMode::Fixed)
            .with_interface(interface)
            .with_autoneg(false)
            .with_fixed_link(FixedLink::new(speed, duplex))
    }

    /// In-band negotiated link on `interface`
    #[must_use]
    pub const fn inband(interface: PhyInterface) -> Self {
        Self::new()
            .with_mode(NegotiationMode::InBand)
            .with_interface(interface)
    }

    /// Set the negotiation mode
    #[must_use]
    pub const fn with_mode(mut self, mode: NegotiationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the initial interface mode
    #[must_use]
    pub const fn with_interface(mut self, interface: PhyInterface) -> Self {
        self.interface = interface;
        self
    }

    /// Set the local flow-control policy
    #[must_use]
    pub const fn with_pause(mut self, pause: Pause) -> Self {
        self.pause = pause;
        self
    }

    /// Set the local advertisement
    #[must_use]
    pub const fn with_advertising(mut self, advertising: LinkModes) -> Self {
        self.advertising = advertising;
        self
    }

    /// Enable or disable autonegotiation
    #[must_use]
    pub const fn with_autoneg(mut self, enabled: bool) -> Self {
        self.an_enabled = enabled;
        self
    }

    /// Set the fixed-link parameters
    #[must_use]
    pub const fn with_fixed_link(mut self, fixed: FixedLink) -> Self {
        self.fixed = Some(fixed);
        self
    }

    /// Check the configuration is usable for its mode
    pub const fn validate(&self) -> ConfigResult<()> {
        if matches!(self.interface, PhyInterface::Na) {
            return Err(ConfigError::MissingInterface);
        }

        match self.mode {
            NegotiationMode::Fixed => match self.fixed {
                Some(fixed) if fixed.is_complete() => Ok(()),
                _ => Err(ConfigError::FixedLinkIncomplete),
            },
            NegotiationMode::InBand if !self.interface.supports_inband() => {
                Err(ConfigError::InterfaceNotInBand)
            }
            _ => Ok(()),
        }
    }

    /// Check a PHY may be attached to this link
    ///
    /// Fixed links have no PHY, and on 802.3z interfaces the PCS negotiates
    /// directly with the link partner.
    pub const fn check_phy_allowed(&self) -> ConfigResult<()> {
        if !self.mode.allows_phy()
            || (matches!(self.mode, NegotiationMode::InBand) && self.interface.is_8023z())
        {
            return Err(ConfigError::PhyNotAllowed);
        }
        Ok(())
    }

    /// Local PAUSE capabilities: policy bits plus advertised bits
    #[must_use]
    pub const fn local_pause_caps(&self) -> Pause {
        self.pause
            .intersection(Pause::CAPS_MASK)
            .union(self.advertising.pause())
    }

    /// State published before any pass has run
    #[must_use]
    pub const fn initial_state(&self) -> LinkState {
        let mut state = LinkState::new(self.interface);
        state.advertising = self.advertising;
        state.an_enabled = self.an_enabled && !matches!(self.mode, NegotiationMode::Fixed);
        state
    }
}
