//! Link-State Resolution Core
//!
//! A `no_std`, `no_alloc` link-state resolution engine sitting between an
//! Ethernet PHY (or a fixed-link description, or a MAC/PCS doing in-band
//! autonegotiation) and a MAC driver.
//!
//! Producers report PHY and carrier changes from any context; a single
//! executor per link resolves them into one published [`LinkState`] and drives
//! the MAC with `mac_config`, `mac_link_up` and `mac_link_down`, always
//! configuring the MAC before telling it the link is up.
//!
//! # Architecture
//!
//! 1. **Ingress** ([`PhylinkShared`]): ISR-safe producer entry points and the
//!    single-slot resolution scheduler
//! 2. **Resolver** ([`resolve`]): pure per-mode resolution and flow control
//! 3. **Executor** ([`Phylink`]): snapshots inputs, resolves, and sequences
//!    MAC driver calls through [`MacAdapter`]
//!
//! ## Negotiation Modes
//!
//! - [`NegotiationMode::Phy`]: the PHY's report is the link state
//! - [`NegotiationMode::Fixed`]: static speed/duplex/pause, carrier from a
//!   link GPIO or administrative code
//! - [`NegotiationMode::InBand`]: the MAC/PCS in-band result, qualified by
//!   the PHY when one is attached
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and logging
//! - `log`: Log through the `log` facade (when `defmt` is off)
//! - `async`: Enable [`Phylink::run`] and the scheduler waker
//!
//! # Example
//!
//! ```ignore
//! use ph_phylink::{LinkConfig, MacDriver, Phylink, PhyHandle, PhyInterface};
//!
//! ph_phylink::phylink_static!(LINK, LinkConfig::inband(PhyInterface::Sgmii));
//!
//! let mut phylink = Phylink::new(&LINK, my_mac)?;
//! LINK.attach_phy(PhyHandle::new(1)?)?;
//! phylink.start()?;
//!
//! // PHY interrupt: LINK.on_phy_notify(report)
//! // MAC/PCS interrupt: LINK.on_mac_change(up)
//! loop {
//!     phylink.process_pending();
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

// Logging macros; must stay first so later modules see them
#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod ingress;
pub mod link;
pub mod mac;
pub mod mode;
pub mod phylink;
pub mod resolve;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{FixedLink, LinkConfig};
pub use error::{
    ConfigError, ConfigResult, Error, IoError, Result, StateError, StateResult,
};
pub use ingress::PhylinkShared;
pub use link::{
    Duplex, LinkModes, LinkState, Pause, PhyHandle, PhyInterface, PhyState, Speed,
};
pub use mac::{MacAdapter, MacDriver, MacLink, PassOutcome};
pub use mode::{NegotiationMode, Strategy};
pub use phylink::Phylink;
pub use resolve::{Resolution, Snapshot, Transition, resolve, resolve_flow};
pub use sync::{ResolveScheduler, SchedulerStats};

/// Limits shared with callers.
pub mod constants {
    pub use crate::internal::constants::{MAX_PASSES_PER_DRAIN, MAX_PHY_ADDR};
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static link for ISR producers.
///
/// Expands to a [`PhylinkShared`] static built from a const [`LinkConfig`].
///
/// # Examples
///
/// ```ignore
/// ph_phylink::phylink_static!(
///     LINK,
///     LinkConfig::fixed(PhyInterface::Sgmii, Speed::Mbps1000, Duplex::Full)
/// );
///
/// fn link_gpio_irq(level: bool) {
///     LINK.on_fixed_link_change(level);
/// }
/// ```
#[macro_export]
macro_rules! phylink_static {
    ($name:ident, $config:expr) => {
        static $name: $crate::PhylinkShared = $crate::PhylinkShared::new($config);
    };
}
