//! Event ingress
//!
//! [`PhylinkShared`] holds the inputs that producers update from any context
//! (PHY interrupt, link GPIO interrupt, MAC/PCS interrupt, administrative
//! code) and the scheduler that tells the executor a pass is due.
//!
//! Every entry point takes `&self`, assigns fields inside one short critical
//! section, releases it and then requests a pass. None of them waits for the
//! pass to run.
//!
//! # Example
//!
//! ```ignore
//! static LINK: PhylinkShared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
//!
//! // PHY interrupt handler
//! fn phy_irq(report: PhyState) {
//!     LINK.on_phy_notify(report);
//! }
//! ```

use embedded_hal::digital::InputPin;

use crate::config::LinkConfig;
use crate::error::{IoError, Result, StateError, StateResult};
use crate::link::{PhyHandle, PhyInterface, PhyState};
use crate::mode::NegotiationMode;
use crate::resolve::Snapshot;
use crate::sync::{CriticalSectionCell, ResolveScheduler};

/// Inputs guarded by the critical section
#[derive(Debug, Clone, Copy)]
struct LinkInputs {
    phy: PhyState,
    phy_handle: Option<PhyHandle>,
    fixed_link: bool,
    stopped: bool,
    mac_link_dropped: bool,
    bound: bool,
}

/// Producer-facing half of a link
///
/// Owns the shared inputs and the scheduler. The executor half,
/// [`Phylink`](crate::Phylink), borrows it.
pub struct PhylinkShared {
    config: LinkConfig,
    inputs: CriticalSectionCell<LinkInputs>,
    scheduler: ResolveScheduler,
}

impl PhylinkShared {
    /// Create the shared half of a link (const, suitable for static
    /// initialization). The link starts stopped with no PHY attached.
    pub const fn new(config: LinkConfig) -> Self {
        let fixed_link = match config.fixed {
            Some(fixed) => fixed.link,
            None => false,
        };

        Self {
            config,
            inputs: CriticalSectionCell::new(LinkInputs {
                phy: PhyState::down(config.interface),
                phy_handle: None,
                fixed_link,
                stopped: true,
                mac_link_dropped: false,
                bound: false,
            }),
            scheduler: ResolveScheduler::new(),
        }
    }

    /// Link configuration
    #[inline(always)]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Negotiation mode
    #[inline(always)]
    pub fn mode(&self) -> NegotiationMode {
        self.config.mode
    }

    /// The resolution scheduler
    #[inline(always)]
    pub fn scheduler(&self) -> &ResolveScheduler {
        &self.scheduler
    }

    // =========================================================================
    // Producer entry points
    // =========================================================================

    /// PHY state-change callback
    ///
    /// Reports from a PHY that is not attached are dropped. An interface of
    /// [`PhyInterface::Na`] means "unchanged".
    pub fn on_phy_notify(&self, report: PhyState) {
        debug!(
            "phy link {} {}/{}/{}",
            if report.link { "up" } else { "down" },
            report.interface,
            report.speed,
            report.duplex
        );

        let accepted = self.inputs.with(|inputs| {
            if inputs.phy_handle.is_none() {
                return false;
            }
            let interface = match report.interface {
                PhyInterface::Na => inputs.phy.interface,
                other => other,
            };
            inputs.phy = PhyState { interface, ..report };
            true
        });

        if accepted {
            self.scheduler.request();
        } else {
            warn!("phy report without attached PHY ignored");
        }
    }

    /// Fixed-link carrier change (e.g. link GPIO interrupt)
    pub fn on_fixed_link_change(&self, up: bool) {
        trace!("fixed link {}", if up { "up" } else { "down" });
        self.inputs.with(|inputs| inputs.fixed_link = up);
        self.scheduler.request();
    }

    /// Sample a link GPIO and apply it as the fixed-link carrier
    pub fn sample_link_gpio<P: InputPin>(&self, pin: &mut P) -> Result<bool> {
        let up = pin.is_high().map_err(|_| IoError::GpioError)?;
        self.on_fixed_link_change(up);
        Ok(up)
    }

    /// MAC/PCS in-band state change
    ///
    /// A drop (`up == false`) is latched: the next pass reports the link down
    /// even if the MAC has already recovered, and a further pass reads the
    /// MAC's current state.
    pub fn on_mac_change(&self, up: bool) {
        trace!("mac link {}", if up { "up" } else { "down" });
        if !up {
            self.inputs.with(|inputs| inputs.mac_link_dropped = true);
        }
        self.scheduler.request();
    }

    /// Attach a PHY
    ///
    /// The PHY starts out link-down on the configured interface until its
    /// first report.
    pub fn attach_phy(&self, handle: PhyHandle) -> Result<()> {
        self.config.check_phy_allowed()?;

        let interface = self.config.interface;
        self.inputs.with(|inputs| -> StateResult<()> {
            if inputs.phy_handle.is_some() {
                return Err(StateError::PhyAlreadyAttached);
            }
            inputs.phy_handle = Some(handle);
            inputs.phy = PhyState::down(interface);
            Ok(())
        })?;

        debug!("phy {} attached", handle.address());
        self.scheduler.request();
        Ok(())
    }

    /// Detach the PHY, returning its handle
    pub fn detach_phy(&self) -> Result<PhyHandle> {
        let handle = self.inputs.with(|inputs| {
            let handle = inputs.phy_handle.take()?;
            inputs.phy.link = false;
            Some(handle)
        });
        let handle = handle.ok_or(StateError::NoPhyAttached)?;

        debug!("phy {} detached", handle.address());
        self.scheduler.request();
        Ok(handle)
    }

    /// Currently attached PHY
    pub fn phy(&self) -> Option<PhyHandle> {
        self.inputs.snapshot().phy_handle
    }

    /// Request a pass without changing any input
    pub fn request_resolve(&self) {
        self.scheduler.request();
    }

    // =========================================================================
    // Executor side
    // =========================================================================

    /// Copy the inputs for one pass, consuming a latched MAC link drop
    pub(crate) fn take_snapshot(&self) -> (Snapshot, Option<PhyHandle>) {
        self.inputs.with(|inputs| {
            let snapshot = Snapshot {
                phy: inputs.phy,
                phy_attached: inputs.phy_handle.is_some(),
                fixed_link: inputs.fixed_link,
                stopped: inputs.stopped,
                mac_link_dropped: inputs.mac_link_dropped,
            };
            inputs.mac_link_dropped = false;
            (snapshot, inputs.phy_handle)
        })
    }

    /// Claim the link for one executor
    pub(crate) fn bind(&self) -> StateResult<()> {
        self.inputs.with(|inputs| {
            if inputs.bound {
                return Err(StateError::ExecutorBound);
            }
            inputs.bound = true;
            Ok(())
        })
    }

    /// Release the executor claim; the link is left stopped
    pub(crate) fn unbind(&self) {
        self.inputs.with(|inputs| {
            inputs.bound = false;
            inputs.stopped = true;
            inputs.mac_link_dropped = false;
        });
    }

    /// Set the stopped flag, returning its previous value
    pub(crate) fn set_stopped(&self, stopped: bool) -> bool {
        self.inputs
            .with(|inputs| core::mem::replace(&mut inputs.stopped, stopped))
    }
}
