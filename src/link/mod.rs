//! Link data model
//!
//! Plain data describing a negotiated link:
//!
//! - [`PhyInterface`]: the electrical mode of the PHY-to-MAC connection
//! - [`Speed`], [`Duplex`], [`Pause`], [`LinkModes`]: negotiated parameters
//! - [`LinkState`]: one resolved snapshot, the unit published to the MAC
//! - [`PhyState`]: what the attached PHY last reported
//! - [`PhyHandle`]: identifies the attached PHY

pub mod interface;
pub mod params;
pub mod state;

pub use interface::PhyInterface;
pub use params::{Duplex, LinkModes, Pause, Speed};
pub use state::{LinkState, PhyHandle, PhyState};
