//! Link resolution
//!
//! Pure decision logic: given the configuration, a snapshot of the shared
//! inputs, the MAC's in-band result (in-band mode only), the last published
//! state and the MAC's current up/down state, compute the new [`LinkState`]
//! and decide which MAC calls this pass must make.
//!
//! Nothing here touches the MAC driver or the shared inputs; the executor in
//! [`crate::phylink`] gathers the inputs and applies the [`Resolution`].
//!
//! # Reconfiguration rule
//!
//! `mac_config` is due when the pass brings the link up, or when the
//! strategy asks for it and the resolved configuration differs from the
//! published one (or nothing has been published since start). Either way it
//! is issued at most once per pass and always before `mac_link_up`.

use crate::config::LinkConfig;
use crate::link::{LinkModes, LinkState, Pause, PhyState};
use crate::mac::MacLink;
use crate::mode::Strategy;

// =============================================================================
// Inputs and Outputs
// =============================================================================

/// Snapshot of the shared inputs, taken once per pass under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Last PHY report
    pub phy: PhyState,
    /// A PHY is attached
    pub phy_attached: bool,
    /// Fixed-link carrier (fixed mode)
    pub fixed_link: bool,
    /// The link is administratively stopped
    pub stopped: bool,
    /// The MAC reported a dropped link since the last pass
    pub mac_link_dropped: bool,
}

/// Link up/down transition decided by a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Down to up: `mac_link_up` after `mac_config`
    Up,
    /// Up to down: `mac_link_down`
    Down,
}

/// Result of one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    /// Newly resolved state
    pub state: LinkState,
    /// `mac_config` must be issued with `state`
    pub reconfigure: bool,
    /// Up/down notification to issue after any reconfiguration
    pub transition: Option<Transition>,
}

// =============================================================================
// Flow Control
// =============================================================================

/// Resolve the TX/RX PAUSE directions
///
/// With `AN` in the local `policy`, the directions follow the IEEE 802.3
/// Annex 28B table from the local and partner `SYM`/`ASYM` capabilities.
/// Otherwise the policy's forced `TX`/`RX` bits are used as is.
/// Only `TX`/`RX` bits are returned.
#[must_use]
pub fn resolve_flow(policy: Pause, local: Pause, partner: Pause) -> Pause {
    if !policy.contains(Pause::AN) {
        return policy & Pause::TXRX_MASK;
    }

    let common = local & partner;
    if common.contains(Pause::SYM) {
        Pause::TX | Pause::RX
    } else if common.contains(Pause::ASYM) {
        let mut directions = Pause::NONE;
        if local.contains(Pause::SYM) {
            directions |= Pause::RX;
        }
        if partner.contains(Pause::SYM) {
            directions |= Pause::TX;
        }
        directions
    } else {
        Pause::NONE
    }
}

// =============================================================================
// In-band Seed
// =============================================================================

/// State handed to the MAC to fill in with its in-band result
///
/// Starts from the published state (or the configured initial state) with
/// link optimistically up, the partner's advertisement and PAUSE bits
/// cleared, and the local advertisement refreshed from configuration.
#[must_use]
pub fn inband_seed(config: &LinkConfig, previous: Option<&LinkState>) -> LinkState {
    let mut state = previous.copied().unwrap_or_else(|| config.initial_state());
    state.advertising = config.advertising;
    state.lp_advertising = LinkModes::NONE;
    state.an_enabled = config.an_enabled;
    state.an_complete = false;
    state.pause = Pause::NONE;
    state.link = true;
    state
}

// =============================================================================
// Resolver
// =============================================================================

/// Per-strategy output before the reconfiguration decision
struct Candidate {
    state: LinkState,
    wants_config: bool,
}

/// Resolve one pass
///
/// `inband` is the MAC's in-band result, seeded by [`inband_seed`]; it is
/// only read by the in-band strategy.
#[must_use]
pub fn resolve(
    config: &LinkConfig,
    strategy: Strategy,
    inputs: &Snapshot,
    inband: Option<LinkState>,
    previous: Option<&LinkState>,
    mac_link: MacLink,
) -> Resolution {
    let candidate = if inputs.stopped || inputs.mac_link_dropped {
        forced_down(config, previous)
    } else {
        match strategy {
            Strategy::PhyDriven => phy_driven(config, &inputs.phy),
            Strategy::Fixed => fixed(config, inputs.fixed_link),
            Strategy::InBand { phy_attached } => {
                let inband = inband.unwrap_or_else(|| {
                    let mut seed = inband_seed(config, previous);
                    seed.link = false;
                    seed
                });
                in_band(config, inband, phy_attached.then_some(&inputs.phy))
            }
        }
    };

    let state = candidate.state;
    let transition = match (state.link, mac_link) {
        (true, MacLink::Down) => Some(Transition::Up),
        (false, MacLink::Up) => Some(Transition::Down),
        _ => None,
    };
    let differs = previous.is_none_or(|published| !published.same_config(&state));
    let reconfigure =
        transition == Some(Transition::Up) || (candidate.wants_config && differs);

    Resolution {
        state,
        reconfigure,
        transition,
    }
}

/// Stopped, or the MAC dropped the link: report down, program nothing
fn forced_down(config: &LinkConfig, previous: Option<&LinkState>) -> Candidate {
    let mut state = previous.copied().unwrap_or_else(|| config.initial_state());
    state.link = false;
    Candidate {
        state,
        wants_config: false,
    }
}

/// The PHY's report is the link state; flow-control capabilities are taken
/// verbatim and only TX/RX are derived from them.
fn phy_driven(config: &LinkConfig, phy: &PhyState) -> Candidate {
    let directions = resolve_flow(config.pause, config.local_pause_caps(), phy.pause);

    let mut state = config.initial_state();
    state.interface = phy.interface;
    state.speed = phy.speed;
    state.duplex = phy.duplex;
    state.pause = phy.pause | directions;
    state.link = phy.link;
    state.an_complete = phy.link && state.an_enabled;

    Candidate {
        state,
        wants_config: true,
    }
}

/// Static parameters; re-applied whenever nothing has been published
fn fixed(config: &LinkConfig, carrier: bool) -> Candidate {
    let mut state = config.initial_state();
    if let Some(fixed) = config.fixed {
        let directions = resolve_flow(config.pause, config.local_pause_caps(), fixed.pause);
        state.speed = fixed.speed;
        state.duplex = fixed.duplex;
        state.pause = fixed.pause | directions;
    }
    state.link = carrier;

    Candidate {
        state,
        wants_config: true,
    }
}

/// In-band result, qualified by the PHY when one is attached
///
/// Both the in-band negotiation and the PHY must report link for the link to
/// be up. A PHY that switched its host interface is followed even while its
/// link is down, so the MAC is never left on a stale interface mode.
fn in_band(config: &LinkConfig, mut state: LinkState, phy: Option<&PhyState>) -> Candidate {
    let local = config.local_pause_caps();
    let mut partner = state.pause & Pause::CAPS_MASK;
    let mut wants_config = false;

    if let Some(phy) = phy {
        state.link = state.link && phy.link;

        let changed = phy.interface != state.interface;
        if changed {
            state.interface = phy.interface;
        }

        if phy.link || changed {
            partner |= phy.pause;
            wants_config = true;
        }
    }

    let directions = resolve_flow(config.pause, local, partner);
    state.pause = local | partner | directions;

    Candidate {
        state,
        wants_config,
    }
}
