//! Test doubles shared by the in-module unit tests.
//!
//! - [`MockMac`]: records every MAC driver call in order and plays back a
//!   scripted in-band negotiation result
//! - [`MockPin`]: link GPIO with a settable level and an optional read error

extern crate std;

use std::vec::Vec;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};

use crate::link::{Duplex, LinkState, Pause, PhyHandle, Speed};
use crate::mac::MacDriver;
use crate::mode::NegotiationMode;

// =============================================================================
// Mock MAC
// =============================================================================

/// One recorded MAC driver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MacCall {
    Config(NegotiationMode, LinkState),
    LinkUp(NegotiationMode, Option<PhyHandle>),
    LinkDown(NegotiationMode),
    AnRestart,
}

/// Scripted in-band negotiation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InbandResult {
    pub speed: Speed,
    pub duplex: Duplex,
    pub partner_pause: Pause,
}

/// Recording MAC driver
#[derive(Debug, Default)]
pub(crate) struct MockMac {
    calls: Vec<MacCall>,
    inband: Option<InbandResult>,
    inband_reads: usize,
}

impl MockMac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report in-band link up with these parameters
    pub fn set_inband(&mut self, speed: Speed, duplex: Duplex, partner_pause: Pause) {
        self.inband = Some(InbandResult {
            speed,
            duplex,
            partner_pause,
        });
    }

    pub fn calls(&self) -> Vec<MacCall> {
        self.calls.clone()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn config_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MacCall::Config(..)))
            .count()
    }

    /// Configurations handed to `mac_config`, in order
    pub fn configs(&self) -> Vec<LinkState> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MacCall::Config(_, state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn inband_reads(&self) -> usize {
        self.inband_reads
    }
}

impl MacDriver for MockMac {
    fn mac_config(&mut self, mode: NegotiationMode, state: &LinkState) {
        self.calls.push(MacCall::Config(mode, *state));
    }

    fn mac_link_up(&mut self, mode: NegotiationMode, phy: Option<PhyHandle>) {
        self.calls.push(MacCall::LinkUp(mode, phy));
    }

    fn mac_link_down(&mut self, mode: NegotiationMode) {
        self.calls.push(MacCall::LinkDown(mode));
    }

    fn mac_inband_state(&mut self, state: &mut LinkState) {
        self.inband_reads += 1;
        match self.inband {
            Some(result) => {
                state.speed = result.speed;
                state.duplex = result.duplex;
                state.pause |= result.partner_pause;
                state.an_complete = true;
            }
            None => state.link = false,
        }
    }

    fn mac_an_restart(&mut self) {
        self.calls.push(MacCall::AnRestart);
    }
}

// =============================================================================
// Mock GPIO
// =============================================================================

/// Link GPIO read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Link GPIO double
#[derive(Debug)]
pub(crate) struct MockPin {
    high: bool,
    fail: bool,
}

impl MockPin {
    pub fn new(high: bool) -> Self {
        Self { high, fail: false }
    }

    /// A pin whose every read fails
    pub fn failing() -> Self {
        Self {
            high: false,
            fail: true,
        }
    }

    pub fn set_high(&mut self, high: bool) {
        self.high = high;
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
