//! MAC driver interface and call sequencing
//!
//! [`MacDriver`] is the contract a MAC driver implements. [`MacAdapter`]
//! owns the driver, tracks whether the MAC has been told the link is up, and
//! turns a [`Resolution`] into driver calls in the only allowed order:
//!
//! 1. `mac_config` (when the resolution asks for it)
//! 2. `mac_link_up` / `mac_link_down` (on a transition)
//!
//! The adapter is only ever driven from the single resolution executor, so
//! the MAC driver never sees concurrent calls from this crate.

use crate::link::{LinkState, PhyHandle};
use crate::mode::NegotiationMode;
use crate::resolve::{Resolution, Transition};

// =============================================================================
// MAC Driver Trait
// =============================================================================

/// Operations a MAC driver provides to the link core
///
/// Calls are already serialized. Failures inside these calls are the
/// driver's own concern; the core neither sees nor retries them.
///
/// # Example Implementation
///
/// ```ignore
/// struct MyMac { regs: MacRegs }
///
/// impl MacDriver for MyMac {
///     fn mac_config(&mut self, _mode: NegotiationMode, state: &LinkState) {
///         self.regs.set_interface(state.interface);
///         self.regs.set_speed(state.speed);
///     }
///     fn mac_link_up(&mut self, _mode: NegotiationMode, _phy: Option<PhyHandle>) {
///         self.regs.enable_tx_rx();
///     }
///     fn mac_link_down(&mut self, _mode: NegotiationMode) {
///         self.regs.disable_tx_rx();
///     }
/// }
/// ```
pub trait MacDriver {
    /// Program interface, speed, duplex and flow control
    ///
    /// Always called before the `mac_link_up` it precedes, so the MAC can
    /// rely on `state.interface` when interpreting the link coming up.
    fn mac_config(&mut self, mode: NegotiationMode, state: &LinkState);

    /// The link is up; start passing traffic
    fn mac_link_up(&mut self, mode: NegotiationMode, phy: Option<PhyHandle>);

    /// The link is down; stop passing traffic
    fn mac_link_down(&mut self, mode: NegotiationMode);

    /// Report the in-band negotiation result (in-band mode only)
    ///
    /// `state` arrives seeded with the published interface, the local
    /// advertisement and `link = true`. Fill in speed, duplex, `an_complete`
    /// and the partner's advertisement; OR the partner's `SYM`/`ASYM` PAUSE
    /// capabilities into `pause`; clear `link` if the in-band link is down.
    ///
    /// The default reports the link down.
    fn mac_inband_state(&mut self, state: &mut LinkState) {
        state.link = false;
    }

    /// Restart in-band autonegotiation
    fn mac_an_restart(&mut self) {}
}

impl<M: MacDriver + ?Sized> MacDriver for &mut M {
    fn mac_config(&mut self, mode: NegotiationMode, state: &LinkState) {
        (**self).mac_config(mode, state);
    }

    fn mac_link_up(&mut self, mode: NegotiationMode, phy: Option<PhyHandle>) {
        (**self).mac_link_up(mode, phy);
    }

    fn mac_link_down(&mut self, mode: NegotiationMode) {
        (**self).mac_link_down(mode);
    }

    fn mac_inband_state(&mut self, state: &mut LinkState) {
        (**self).mac_inband_state(state);
    }

    fn mac_an_restart(&mut self) {
        (**self).mac_an_restart();
    }
}

// =============================================================================
// MAC Link State
// =============================================================================

/// What the MAC has last been told about the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacLink {
    /// Down (initial)
    #[default]
    Down,
    /// Up
    Up,
}

impl MacLink {
    /// True when up
    #[inline(always)]
    pub const fn is_up(self) -> bool {
        matches!(self, MacLink::Up)
    }
}

/// What a pass actually issued to the MAC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassOutcome {
    /// `mac_config` was called
    pub configured: bool,
    /// `mac_link_up` / `mac_link_down` was called
    pub transition: Option<Transition>,
}

impl PassOutcome {
    /// No MAC call was made
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        !self.configured && self.transition.is_none()
    }
}

// =============================================================================
// MAC Adapter
// =============================================================================

/// Sequences MAC driver calls for one link
pub struct MacAdapter<M: MacDriver> {
    mac: M,
    link: MacLink,
    published: Option<LinkState>,
}

impl<M: MacDriver> MacAdapter<M> {
    /// Wrap a MAC driver; the MAC starts with link down and nothing published
    pub const fn new(mac: M) -> Self {
        Self {
            mac,
            link: MacLink::Down,
            published: None,
        }
    }

    /// Issue the calls a resolution asks for, configuration first
    pub fn apply(
        &mut self,
        mode: NegotiationMode,
        phy: Option<PhyHandle>,
        resolution: &Resolution,
    ) -> PassOutcome {
        let state = &resolution.state;

        if resolution.reconfigure {
            debug!(
                "mac_config: mode={} interface={} speed={} duplex={} pause={} link={} an={}",
                mode,
                state.interface,
                state.speed,
                state.duplex,
                state.pause,
                state.link,
                state.an_enabled
            );
            self.mac.mac_config(mode, state);
            self.published = Some(*state);
        }

        match resolution.transition {
            Some(Transition::Up) => {
                self.mac.mac_link_up(mode, phy);
                self.link = MacLink::Up;
                info!(
                    "Link is Up - {}/{} - flow control {}",
                    state.speed,
                    state.duplex,
                    state.pause.direction_str()
                );
            }
            Some(Transition::Down) => {
                self.mac.mac_link_down(mode);
                self.link = MacLink::Down;
                info!("Link is Down");
            }
            None => {}
        }

        PassOutcome {
            configured: resolution.reconfigure,
            transition: resolution.transition,
        }
    }

    /// Forget the published state so the next pass re-applies configuration
    pub fn forget(&mut self) {
        self.published = None;
    }

    /// Last state handed to `mac_config`
    #[inline(always)]
    pub fn published(&self) -> Option<&LinkState> {
        self.published.as_ref()
    }

    /// What the MAC has last been told about the link
    #[inline(always)]
    pub fn link(&self) -> MacLink {
        self.link
    }

    /// Borrow the MAC driver
    pub fn mac(&self) -> &M {
        &self.mac
    }

    /// Mutably borrow the MAC driver
    pub fn mac_mut(&mut self) -> &mut M {
        &mut self.mac
    }

    /// Release the MAC driver
    pub fn into_inner(self) -> M {
        self.mac
    }
}
