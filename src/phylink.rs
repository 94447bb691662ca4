//! Resolution executor
//!
//! [`Phylink`] is the single sequential executor for one link. It owns the
//! MAC driver (through [`MacAdapter`]) and the published link state, and
//! borrows the producer-facing [`PhylinkShared`].
//!
//! Every method that runs a pass takes `&mut self`, so two passes for the same
//! link can never overlap. Each pass:
//!
//! 1. copies the shared inputs in one critical section
//! 2. picks the strategy for the negotiation mode
//! 3. reads the MAC's in-band result (in-band mode only)
//! 4. resolves the new state
//! 5. issues `mac_config`, then `mac_link_up` / `mac_link_down`
//!
//! # Example
//!
//! ```ignore
//! static LINK: PhylinkShared = PhylinkShared::new(LinkConfig::new()
//!     .with_interface(PhyInterface::Rgmii));
//!
//! let mut phylink = Phylink::new(&LINK, my_mac)?;
//! LINK.attach_phy(PhyHandle::new(1)?)?;
//! phylink.start()?;
//!
//! loop {
//!     // PHY interrupt handler calls LINK.on_phy_notify(..)
//!     phylink.process_pending();
//! }
//! ```

use crate::error::{Result, StateError};
use crate::ingress::PhylinkShared;
use crate::internal::constants::MAX_PASSES_PER_DRAIN;
use crate::link::LinkState;
use crate::mac::{MacAdapter, MacDriver, MacLink, PassOutcome};
use crate::mode::NegotiationMode;
use crate::resolve::{inband_seed, resolve};

/// Executor claim on a link, released on drop
struct Binding<'a>(&'a PhylinkShared);

impl Drop for Binding<'_> {
    fn drop(&mut self) {
        self.0.unbind();
    }
}

/// Executor half of a link
///
/// At most one exists per [`PhylinkShared`] at a time. Dropping it (or
/// calling [`into_inner`](Self::into_inner)) leaves the link stopped and free
/// for a new executor.
pub struct Phylink<'a, M: MacDriver> {
    shared: &'a PhylinkShared,
    adapter: MacAdapter<M>,
    _binding: Binding<'a>,
}

impl<'a, M: MacDriver> Phylink<'a, M> {
    /// Bind a MAC driver to a link
    ///
    /// Fails if the link configuration is unusable for its mode, or if
    /// another executor is already bound to the link. The link stays stopped
    /// until [`start`](Self::start).
    pub fn new(shared: &'a PhylinkShared, mac: M) -> Result<Self> {
        let config = shared.config();
        config.validate()?;
        shared.bind()?;

        info!(
            "configuring for {}/{} link mode",
            config.mode, config.interface
        );

        Ok(Self {
            shared,
            adapter: MacAdapter::new(mac),
            _binding: Binding(shared),
        })
    }

    /// Start the link and run the first pass
    pub fn start(&mut self) -> Result<PassOutcome> {
        if !self.shared.set_stopped(false) {
            return Err(StateError::AlreadyStarted.into());
        }

        let config = self.shared.config();
        info!("start: {}/{}", config.mode, config.interface);

        if matches!(config.mode, NegotiationMode::InBand) && config.interface.is_8023z() {
            self.adapter.mac_mut().mac_an_restart();
        }

        // This pass reads every input, so earlier requests are covered
        self.shared.scheduler().take();
        Ok(self.run_pass())
    }

    /// Stop the link
    ///
    /// Runs a pass that takes the link down, then forgets the published state
    /// so the next start programs the MAC again.
    pub fn stop(&mut self) -> Result<PassOutcome> {
        if self.shared.set_stopped(true) {
            return Err(StateError::NotStarted.into());
        }

        info!("stop");
        self.shared.scheduler().take();
        let outcome = self.run_pass();
        self.adapter.forget();
        Ok(outcome)
    }

    /// Run one pass if one is due
    pub fn poll(&mut self) -> Option<PassOutcome> {
        if !self.shared.scheduler().take() {
            return None;
        }
        Some(self.run_pass())
    }

    /// Run passes until none is due, returning how many ran
    ///
    /// Bounded by [`MAX_PASSES_PER_DRAIN`]; a request still pending after
    /// that stays armed for the next call.
    pub fn process_pending(&mut self) -> usize {
        let mut passes = 0;
        while passes < MAX_PASSES_PER_DRAIN && self.poll().is_some() {
            passes += 1;
        }
        passes
    }

    /// Wait for requests and run them, forever
    #[cfg(feature = "async")]
    pub async fn run(&mut self) -> ! {
        loop {
            crate::sync::PendingFuture::new(self.shared.scheduler()).await;
            self.process_pending();
        }
    }

    fn run_pass(&mut self) -> PassOutcome {
        let shared = self.shared;
        let config = shared.config();
        let (inputs, phy) = shared.take_snapshot();
        let strategy = config.mode.strategy(inputs.phy_attached);

        trace!(
            "resolve: {} stopped={} dropped={} phy={}",
            config.mode,
            inputs.stopped,
            inputs.mac_link_dropped,
            inputs.phy.link
        );

        let inband = if strategy.reads_inband() && !inputs.stopped && !inputs.mac_link_dropped {
            let mut state = inband_seed(config, self.adapter.published());
            self.adapter.mac_mut().mac_inband_state(&mut state);
            Some(state)
        } else {
            None
        };

        let resolution = resolve(
            config,
            strategy,
            &inputs,
            inband,
            self.adapter.published(),
            self.adapter.link(),
        );
        let outcome = self.adapter.apply(config.mode, phy, &resolution);

        // Read the MAC again now that the drop has been reported
        if inputs.mac_link_dropped {
            shared.request_resolve();
        }

        outcome
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The producer-facing half
    #[inline(always)]
    pub fn shared(&self) -> &'a PhylinkShared {
        self.shared
    }

    /// Last state handed to `mac_config`
    pub fn published(&self) -> Option<&LinkState> {
        self.adapter.published()
    }

    /// What the MAC has last been told about the link
    pub fn link(&self) -> MacLink {
        self.adapter.link()
    }

    /// Borrow the MAC driver
    pub fn mac(&self) -> &M {
        self.adapter.mac()
    }

    /// Mutably borrow the MAC driver
    pub fn mac_mut(&mut self) -> &mut M {
        self.adapter.mac_mut()
    }

    /// Release the MAC driver and unbind from the link
    pub fn into_inner(self) -> M {
        self.adapter.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::error::{ConfigError, Error};
    use crate::link::{Duplex, Pause, PhyHandle, PhyInterface, PhyState, Speed};
    use crate::resolve::Transition;
    use crate::testing::{MacCall, MockMac};

    fn phy(address: u8) -> PhyHandle {
        PhyHandle::new(address).unwrap()
    }

    fn sgmii_gigabit() -> PhyState {
        PhyState::new(PhyInterface::Sgmii, Speed::Mbps1000, Duplex::Full, true)
    }

    #[test]
    fn new_rejects_invalid_config() {
        let shared = PhylinkShared::new(LinkConfig::new());
        assert!(matches!(
            Phylink::new(&shared, MockMac::new()),
            Err(Error::Config(ConfigError::MissingInterface))
        ));
    }

    #[test]
    fn second_executor_is_rejected() {
        let shared = PhylinkShared::new(LinkConfig::new().with_interface(PhyInterface::Sgmii));
        let mut first = Phylink::new(&shared, MockMac::new()).unwrap();
        first.start().unwrap();

        assert!(matches!(
            Phylink::new(&shared, MockMac::new()),
            Err(Error::State(StateError::ExecutorBound))
        ));

        // The rejected executor never touched the running link
        shared.attach_phy(phy(1)).unwrap();
        shared.on_phy_notify(sgmii_gigabit());
        first.process_pending();
        assert_eq!(first.link(), MacLink::Up);
    }

    #[test]
    fn dropped_executor_releases_link() {
        let shared = PhylinkShared::new(LinkConfig::fixed(
            PhyInterface::Sgmii,
            Speed::Mbps1000,
            Duplex::Full,
        ));

        {
            let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
            phylink.start().unwrap();
        }

        // Rebinding starts from a stopped link with nothing published
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        assert!(phylink.published().is_none());
        phylink.start().unwrap();
        assert_eq!(phylink.mac().config_count(), 1);

        let mac = phylink.into_inner();
        assert_eq!(mac.config_count(), 1);
        assert!(Phylink::new(&shared, MockMac::new()).is_ok());
    }

    #[test]
    fn start_twice_is_rejected() {
        let shared = PhylinkShared::new(LinkConfig::fixed(
            PhyInterface::Sgmii,
            Speed::Mbps1000,
            Duplex::Full,
        ));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        assert!(phylink.start().is_ok());
        assert_eq!(
            phylink.start(),
            Err(Error::State(StateError::AlreadyStarted))
        );
    }

    #[test]
    fn stop_before_start_is_rejected() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        assert_eq!(phylink.stop(), Err(Error::State(StateError::NotStarted)));
    }

    #[test]
    fn nothing_runs_while_stopped() {
        let shared = PhylinkShared::new(LinkConfig::new().with_interface(PhyInterface::Rgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        shared.attach_phy(phy(1)).unwrap();
        shared.on_phy_notify(PhyState::new(
            PhyInterface::Rgmii,
            Speed::Mbps1000,
            Duplex::Full,
            true,
        ));

        assert_eq!(phylink.process_pending(), 1);
        assert!(phylink.mac().calls().is_empty());
        assert_eq!(phylink.link(), MacLink::Down);
    }

    #[test]
    fn fixed_start_configures_then_links_up() {
        let shared = PhylinkShared::new(LinkConfig::fixed(
            PhyInterface::Sgmii,
            Speed::Mbps1000,
            Duplex::Full,
        ));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        let outcome = phylink.start().unwrap();
        assert!(outcome.configured);
        assert_eq!(outcome.transition, Some(Transition::Up));

        let calls = phylink.mac().calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], MacCall::Config(NegotiationMode::Fixed, _)));
        assert_eq!(calls[1], MacCall::LinkUp(NegotiationMode::Fixed, None));
    }

    #[test]
    fn stop_takes_link_down_and_restart_reconfigures() {
        let shared = PhylinkShared::new(LinkConfig::fixed(
            PhyInterface::Sgmii,
            Speed::Mbps1000,
            Duplex::Full,
        ));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        phylink.start().unwrap();
        phylink.mac_mut().clear();

        let outcome = phylink.stop().unwrap();
        assert!(!outcome.configured);
        assert_eq!(outcome.transition, Some(Transition::Down));
        assert_eq!(
            phylink.mac().calls(),
            [MacCall::LinkDown(NegotiationMode::Fixed)]
        );
        assert!(phylink.published().is_none());

        phylink.mac_mut().clear();
        phylink.start().unwrap();
        assert_eq!(phylink.mac().config_count(), 1);
        assert_eq!(phylink.link(), MacLink::Up);
    }

    #[test]
    fn start_restarts_8023z_autoneg() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Base1000X));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        phylink.start().unwrap();
        assert_eq!(phylink.mac().calls().first(), Some(&MacCall::AnRestart));
    }

    #[test]
    fn start_does_not_restart_sgmii_autoneg() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        phylink.start().unwrap();
        assert!(!phylink.mac().calls().contains(&MacCall::AnRestart));
    }

    #[test]
    fn phy_link_up_reaches_mac_with_handle() {
        let shared = PhylinkShared::new(LinkConfig::new().with_interface(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        shared.attach_phy(phy(3)).unwrap();
        phylink.start().unwrap();
        phylink.mac_mut().clear();

        shared.on_phy_notify(sgmii_gigabit());
        assert_eq!(phylink.process_pending(), 1);

        let calls = phylink.mac().calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], MacCall::Config(NegotiationMode::Phy, s) if s.link));
        assert_eq!(calls[1], MacCall::LinkUp(NegotiationMode::Phy, Some(phy(3))));
    }

    #[test]
    fn repeated_report_is_quiet() {
        let shared = PhylinkShared::new(LinkConfig::new().with_interface(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        shared.attach_phy(phy(0)).unwrap();
        phylink.start().unwrap();

        shared.on_phy_notify(sgmii_gigabit());
        phylink.process_pending();
        phylink.mac_mut().clear();

        shared.on_phy_notify(sgmii_gigabit());
        assert_eq!(phylink.poll(), Some(PassOutcome::default()));
        assert!(phylink.mac().calls().is_empty());
    }

    #[test]
    fn detach_takes_phy_driven_link_down() {
        let shared = PhylinkShared::new(LinkConfig::new().with_interface(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        shared.attach_phy(phy(0)).unwrap();
        phylink.start().unwrap();
        shared.on_phy_notify(sgmii_gigabit());
        phylink.process_pending();

        shared.detach_phy().unwrap();
        phylink.process_pending();
        assert_eq!(phylink.link(), MacLink::Down);
        assert_eq!(
            phylink.mac().calls().last(),
            Some(&MacCall::LinkDown(NegotiationMode::Phy))
        );
    }

    #[test]
    fn inband_without_phy_uses_mac_result() {
        let shared = PhylinkShared::new(
            LinkConfig::inband(PhyInterface::Sgmii).with_pause(Pause::AN | Pause::SYM),
        );
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        phylink.start().unwrap();
        assert!(phylink.mac().calls().is_empty());

        phylink
            .mac_mut()
            .set_inband(Speed::Mbps1000, Duplex::Full, Pause::SYM);
        shared.on_mac_change(true);
        phylink.process_pending();

        let configs = phylink.mac().configs();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].speed, Speed::Mbps1000);
        assert!(configs[0].pause.contains(Pause::TX | Pause::RX));
        assert_eq!(phylink.link(), MacLink::Up);
    }

    #[test]
    fn mac_drop_forces_visible_down_up_cycle() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        phylink
            .mac_mut()
            .set_inband(Speed::Mbps1000, Duplex::Full, Pause::NONE);
        phylink.start().unwrap();
        assert_eq!(phylink.link(), MacLink::Up);
        phylink.mac_mut().clear();

        // The MAC already recovered by the time the executor runs
        shared.on_mac_change(false);
        assert_eq!(phylink.process_pending(), 2);

        let calls = phylink.mac().calls();
        assert_eq!(calls[0], MacCall::LinkDown(NegotiationMode::InBand));
        assert!(matches!(calls[1], MacCall::Config(NegotiationMode::InBand, _)));
        assert_eq!(calls[2], MacCall::LinkUp(NegotiationMode::InBand, None));
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn inband_state_not_read_while_stopped() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();

        shared.request_resolve();
        phylink.process_pending();
        assert_eq!(phylink.mac().inband_reads(), 0);

        phylink.start().unwrap();
        assert_eq!(phylink.mac().inband_reads(), 1);
    }

    /// MAC that reports a change every time it is read
    struct Chattering<'a>(&'a PhylinkShared);

    impl MacDriver for Chattering<'_> {
        fn mac_config(&mut self, _mode: NegotiationMode, _state: &LinkState) {}
        fn mac_link_up(&mut self, _mode: NegotiationMode, _phy: Option<PhyHandle>) {}
        fn mac_link_down(&mut self, _mode: NegotiationMode) {}

        fn mac_inband_state(&mut self, state: &mut LinkState) {
            state.link = false;
            self.0.on_mac_change(true);
        }
    }

    #[test]
    fn drain_is_bounded() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, Chattering(&shared)).unwrap();
        phylink.start().unwrap();

        assert_eq!(phylink.process_pending(), MAX_PASSES_PER_DRAIN);
        assert!(shared.scheduler().is_pending());
    }

    #[test]
    fn idle_poll_does_nothing() {
        let shared = PhylinkShared::new(LinkConfig::inband(PhyInterface::Sgmii));
        let mut phylink = Phylink::new(&shared, MockMac::new()).unwrap();
        assert_eq!(phylink.poll(), None);
        assert_eq!(phylink.process_pending(), 0);
    }
}
