//! Negotiation modes and their resolution strategies.
//!
//! A link's [`NegotiationMode`] is fixed when it is created. At the start of
//! every pass the mode is combined with whether a PHY is currently attached
//! to pick a [`Strategy`], and the resolver dispatches on the strategy with
//! one function per variant.

/// How the link's parameters are negotiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegotiationMode {
    /// Parameters come from the attached PHY
    #[default]
    Phy,
    /// Statically configured parameters, no negotiation
    Fixed,
    /// Parameters come from the in-band word on the PHY-to-MAC link
    /// (e.g. SGMII), optionally qualified by an attached PHY
    InBand,
}

impl NegotiationMode {
    /// Every supported mode
    pub const ALL: [NegotiationMode; 3] = [
        NegotiationMode::Phy,
        NegotiationMode::Fixed,
        NegotiationMode::InBand,
    ];

    /// Short name used in diagnostics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NegotiationMode::Phy => "phy",
            NegotiationMode::Fixed => "fixed",
            NegotiationMode::InBand => "inband",
        }
    }

    /// Resolution strategy for this mode given the current PHY attachment
    #[must_use]
    pub const fn strategy(self, phy_attached: bool) -> Strategy {
        match self {
            NegotiationMode::Phy => Strategy::PhyDriven,
            NegotiationMode::Fixed => Strategy::Fixed,
            NegotiationMode::InBand => Strategy::InBand { phy_attached },
        }
    }

    /// Whether a PHY may sit between the MAC and the medium
    #[must_use]
    pub const fn allows_phy(self) -> bool {
        !matches!(self, NegotiationMode::Fixed)
    }
}

impl core::fmt::Display for NegotiationMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-pass resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strategy {
    /// Take the PHY's report verbatim
    PhyDriven,
    /// Take the static configuration
    Fixed,
    /// Take the in-band result, qualified by the PHY when one is attached
    InBand {
        /// A PHY is attached
        phy_attached: bool,
    },
}

impl Strategy {
    /// The mode this strategy belongs to
    #[must_use]
    pub const fn mode(self) -> NegotiationMode {
        match self {
            Strategy::PhyDriven => NegotiationMode::Phy,
            Strategy::Fixed => NegotiationMode::Fixed,
            Strategy::InBand { .. } => NegotiationMode::InBand,
        }
    }

    /// Whether the pass needs the MAC's in-band negotiation result
    #[must_use]
    pub const fn reads_inband(self) -> bool {
        matches!(self, Strategy::InBand { .. })
    }
}
