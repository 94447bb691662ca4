//! PHY-to-MAC interface modes.

/// Electrical/protocol mode of the PHY-to-MAC connection
///
/// This is distinct from the line-side speed and duplex: a PHY may switch
/// its host-facing interface (e.g. SGMII to 2500BASE-X) depending on the
/// rate it negotiated with the link partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// Not yet known / not applicable
    #[default]
    Na,
    /// Media Independent Interface
    Mii,
    /// Reduced Media Independent Interface
    Rmii,
    /// Gigabit MII
    Gmii,
    /// Reduced Gigabit MII, no internal delays
    Rgmii,
    /// RGMII with internal RX and TX delays
    RgmiiId,
    /// Serial Gigabit MII
    Sgmii,
    /// Quad SGMII
    Qsgmii,
    /// 1000BASE-X (IEEE 802.3 clause 36)
    Base1000X,
    /// 2500BASE-X
    Base2500X,
    /// 10GBASE-KR backplane
    Base10GKr,
    /// Universal Serial 10G MII
    Usxgmii,
    /// 10 Gigabit Attachment Unit Interface
    Xaui,
}

impl PhyInterface {
    /// Every interface mode, in declaration order
    pub const ALL: [PhyInterface; 13] = [
        PhyInterface::Na,
        PhyInterface::Mii,
        PhyInterface::Rmii,
        PhyInterface::Gmii,
        PhyInterface::Rgmii,
        PhyInterface::RgmiiId,
        PhyInterface::Sgmii,
        PhyInterface::Qsgmii,
        PhyInterface::Base1000X,
        PhyInterface::Base2500X,
        PhyInterface::Base10GKr,
        PhyInterface::Usxgmii,
        PhyInterface::Xaui,
    ];

    /// Canonical lowercase name, as used in firmware descriptions
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PhyInterface::Na => "na",
            PhyInterface::Mii => "mii",
            PhyInterface::Rmii => "rmii",
            PhyInterface::Gmii => "gmii",
            PhyInterface::Rgmii => "rgmii",
            PhyInterface::RgmiiId => "rgmii-id",
            PhyInterface::Sgmii => "sgmii",
            PhyInterface::Qsgmii => "qsgmii",
            PhyInterface::Base1000X => "1000base-x",
            PhyInterface::Base2500X => "2500base-x",
            PhyInterface::Base10GKr => "10gbase-kr",
            PhyInterface::Usxgmii => "usxgmii",
            PhyInterface::Xaui => "xaui",
        }
    }

    /// Look up an interface by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }

    /// IEEE 802.3z (clause 36) interfaces, where the PCS negotiates
    /// directly with the link partner and no PHY sits in between.
    #[must_use]
    pub const fn is_8023z(self) -> bool {
        matches!(self, PhyInterface::Base1000X | PhyInterface::Base2500X)
    }

    /// Whether the interface carries an in-band status/negotiation word
    #[must_use]
    pub const fn supports_inband(self) -> bool {
        matches!(
            self,
            PhyInterface::Sgmii
                | PhyInterface::Qsgmii
                | PhyInterface::Base1000X
                | PhyInterface::Base2500X
                | PhyInterface::Base10GKr
                | PhyInterface::Usxgmii
        )
    }
}

impl core::fmt::Display for PhyInterface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for interface in PhyInterface::ALL {
            assert_eq!(PhyInterface::from_name(interface.as_str()), Some(interface));
        }
        assert_eq!(PhyInterface::from_name("sgmii-ish"), None);
    }

    #[test]
    fn only_base_x_is_8023z() {
        assert!(PhyInterface::Base1000X.is_8023z());
        assert!(PhyInterface::Base2500X.is_8023z());
        assert!(!PhyInterface::Sgmii.is_8023z());
        assert!(!PhyInterface::Base10GKr.is_8023z());
    }

    #[test]
    fn parallel_interfaces_have_no_inband() {
        assert!(!PhyInterface::Rmii.supports_inband());
        assert!(!PhyInterface::Rgmii.supports_inband());
        assert!(!PhyInterface::Na.supports_inband());
        assert!(PhyInterface::Sgmii.supports_inband());
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(PhyInterface::default(), PhyInterface::Na);
    }
}
