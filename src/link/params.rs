//! Negotiated link parameters: speed, duplex, pause and link modes.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

// =============================================================================
// Speed
// =============================================================================

/// Ethernet link speed
///
/// [`Speed::Unknown`] is a valid state meaning "not yet negotiated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// Not negotiated
    #[default]
    Unknown,
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1 Gbps
    Mbps1000,
    /// 2.5 Gbps
    Mbps2500,
    /// 5 Gbps
    Mbps5000,
    /// 10 Gbps
    Mbps10000,
}

impl Speed {
    /// Speed in Mbps, `None` when unknown
    #[must_use]
    pub const fn as_mbps(self) -> Option<u32> {
        match self {
            Speed::Unknown => None,
            Speed::Mbps10 => Some(10),
            Speed::Mbps100 => Some(100),
            Speed::Mbps1000 => Some(1_000),
            Speed::Mbps2500 => Some(2_500),
            Speed::Mbps5000 => Some(5_000),
            Speed::Mbps10000 => Some(10_000),
        }
    }

    /// Map a rate in Mbps; unrecognised rates are [`Speed::Unknown`]
    #[must_use]
    pub const fn from_mbps(mbps: u32) -> Self {
        match mbps {
            10 => Speed::Mbps10,
            100 => Speed::Mbps100,
            1_000 => Speed::Mbps1000,
            2_500 => Speed::Mbps2500,
            5_000 => Speed::Mbps5000,
            10_000 => Speed::Mbps10000,
            _ => Speed::Unknown,
        }
    }

    /// Short human-readable form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Speed::Unknown => "Unknown",
            Speed::Mbps10 => "10Mbps",
            Speed::Mbps100 => "100Mbps",
            Speed::Mbps1000 => "1Gbps",
            Speed::Mbps2500 => "2.5Gbps",
            Speed::Mbps5000 => "5Gbps",
            Speed::Mbps10000 => "10Gbps",
        }
    }
}

impl core::fmt::Display for Speed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Duplex
// =============================================================================

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Not negotiated
    #[default]
    Unknown,
    /// Half duplex
    Half,
    /// Full duplex
    Full,
}

impl Duplex {
    /// Short human-readable form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Duplex::Unknown => "Unknown",
            Duplex::Half => "Half",
            Duplex::Full => "Full",
        }
    }
}

impl core::fmt::Display for Duplex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pause
// =============================================================================

/// Flow-control flags
///
/// `SYM` / `ASYM` are capabilities (local or advertised by the partner).
/// `TX` / `RX` are the resolved directions the MAC should honour.
/// `AN` in a local policy means TX/RX are derived from negotiation rather
/// than forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pause(u8);

impl Pause {
    /// No flow control
    pub const NONE: Self = Self(0);
    /// Symmetric PAUSE capability
    pub const SYM: Self = Self(1 << 0);
    /// Asymmetric PAUSE capability
    pub const ASYM: Self = Self(1 << 1);
    /// Resolve TX/RX from autonegotiation
    pub const AN: Self = Self(1 << 2);
    /// Send PAUSE frames
    pub const TX: Self = Self(1 << 3);
    /// Honour received PAUSE frames
    pub const RX: Self = Self(1 << 4);

    /// Capability bits
    pub const CAPS_MASK: Self = Self(Self::SYM.0 | Self::ASYM.0);
    /// Resolved direction bits
    pub const TXRX_MASK: Self = Self(Self::TX.0 | Self::RX.0);

    /// Raw bit value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping undefined ones
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x1F)
    }

    /// Build from the two capability flags a PHY reports
    #[must_use]
    pub const fn from_caps(sym: bool, asym: bool) -> Self {
        let mut bits = 0;
        if sym {
            bits |= Self::SYM.0;
        }
        if asym {
            bits |= Self::ASYM.0;
        }
        Self(bits)
    }

    /// True when every bit of `other` is set
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True when no bit is set
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Bits of `self` not in `other`
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Human-readable resolved direction, as shown in link-up messages
    #[must_use]
    pub const fn direction_str(self) -> &'static str {
        match (self.contains(Self::TX), self.contains(Self::RX)) {
            (true, true) => "rx/tx",
            (true, false) => "tx",
            (false, true) => "rx",
            (false, false) => "off",
        }
    }
}

impl BitOr for Pause {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Pause {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for Pause {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl Not for Pause {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits_truncate(!self.0)
    }
}

impl core::fmt::Display for Pause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names = [
            (Self::SYM, "sym"),
            (Self::ASYM, "asym"),
            (Self::AN, "an"),
            (Self::TX, "tx"),
            (Self::RX, "rx"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

// =============================================================================
// Link Modes
// =============================================================================

/// Set of link-mode capability bits (advertisement / link partner)
///
/// Only consumed as resolution inputs; the up/down decision never looks
/// at them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkModes(u32);

impl LinkModes {
    /// Empty set
    pub const NONE: Self = Self(0);
    /// 10BASE-T half duplex
    pub const T10_HALF: Self = Self(1 << 0);
    /// 10BASE-T full duplex
    pub const T10_FULL: Self = Self(1 << 1);
    /// 100BASE-TX half duplex
    pub const T100_HALF: Self = Self(1 << 2);
    /// 100BASE-TX full duplex
    pub const T100_FULL: Self = Self(1 << 3);
    /// 1000BASE-T full duplex
    pub const T1000_FULL: Self = Self(1 << 4);
    /// 1000BASE-X full duplex
    pub const X1000_FULL: Self = Self(1 << 5);
    /// 2500BASE-X full duplex
    pub const X2500_FULL: Self = Self(1 << 6);
    /// 10GBASE-KR full duplex
    pub const KR10G_FULL: Self = Self(1 << 7);
    /// Autonegotiation
    pub const AUTONEG: Self = Self(1 << 16);
    /// Symmetric PAUSE
    pub const PAUSE: Self = Self(1 << 17);
    /// Asymmetric PAUSE
    pub const ASYM_PAUSE: Self = Self(1 << 18);

    /// Raw bit value
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// The PAUSE capability bits of this set
    #[must_use]
    pub const fn pause(self) -> Pause {
        Pause::from_caps(self.contains(Self::PAUSE), self.contains(Self::ASYM_PAUSE))
    }
}

impl BitOr for LinkModes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
