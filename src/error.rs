//! Error types for the link resolution core
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Link configuration and PHY attach validation failures
//! - [`StateError`]: Lifecycle misuse (start/stop, attach/detach)
//! - [`IoError`]: Failures reading external link sources (link GPIO)
//!
//! The unified [`Error`] enum wraps all domain errors.
//!
//! Failures inside the MAC driver's `mac_config` / `mac_link_up` /
//! `mac_link_down` never show up here: those are the MAC driver's own
//! concern and are neither wrapped nor retried.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Link configuration errors
///
/// Returned when a [`LinkConfig`](crate::LinkConfig) is rejected, or when a
/// PHY cannot be attached in the configured negotiation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Fixed mode without a fixed speed and duplex
    FixedLinkIncomplete,
    /// In-band mode on an interface without in-band signalling
    InterfaceNotInBand,
    /// A PHY cannot be attached in this mode/interface combination
    PhyNotAllowed,
    /// No interface mode configured
    MissingInterface,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::FixedLinkIncomplete => "fixed link needs speed and duplex",
            ConfigError::InterfaceNotInBand => "interface has no in-band signalling",
            ConfigError::PhyNotAllowed => "PHY not allowed in this mode",
            ConfigError::MissingInterface => "no interface mode configured",
        }
    }
}

// =============================================================================
// State Errors
// =============================================================================

/// Lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// `start()` called on a running link
    AlreadyStarted,
    /// `stop()` called on a stopped link
    NotStarted,
    /// A PHY is already attached
    PhyAlreadyAttached,
    /// No PHY is attached
    NoPhyAttached,
    /// Another executor is already bound to the link
    ExecutorBound,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StateError::AlreadyStarted => "link already started",
            StateError::NotStarted => "link not started",
            StateError::PhyAlreadyAttached => "PHY already attached",
            StateError::NoPhyAttached => "no PHY attached",
            StateError::ExecutorBound => "link already has an executor",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Errors reading external link sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// The fixed-link GPIO could not be read
    GpioError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::GpioError => "link GPIO read failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match shared.attach_phy(PhyHandle::new(3)?) {
///     Err(Error::Config(ConfigError::PhyNotAllowed)) => { /* fixed link */ }
///     Err(Error::State(StateError::PhyAlreadyAttached)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Lifecycle error
    State(StateError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::State(e) => write!(f, "state: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for link operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for lifecycle operations
pub type StateResult<T> = core::result::Result<T, StateError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::InvalidPhyAddress,
            ConfigError::FixedLinkIncomplete,
            ConfigError::InterfaceNotInBand,
            ConfigError::PhyNotAllowed,
            ConfigError::MissingInterface,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn state_error_display() {
        let display = format!("{}", StateError::PhyAlreadyAttached);
        assert_eq!(display, "PHY already attached");
        assert!(!StateError::ExecutorBound.as_str().is_empty());
    }

    #[test]
    fn error_from_domain_errors() {
        assert_eq!(
            Error::from(ConfigError::PhyNotAllowed),
            Error::Config(ConfigError::PhyNotAllowed)
        );
        assert_eq!(
            Error::from(StateError::NotStarted),
            Error::State(StateError::NotStarted)
        );
        assert_eq!(Error::from(IoError::GpioError), Error::Io(IoError::GpioError));
    }

    #[test]
    fn error_display_prefixes_domain() {
        let display = format!("{}", Error::Config(ConfigError::InterfaceNotInBand));
        assert!(display.starts_with("config:"));
        assert!(display.contains("in-band"));

        let display = format!("{}", Error::Io(IoError::GpioError));
        assert!(display.starts_with("io:"));
    }

    #[test]
    fn result_alias_propagates_with_question_mark() {
        fn inner() -> ConfigResult<()> {
            Err(ConfigError::MissingInterface)
        }
        fn outer() -> Result<u8> {
            inner()?;
            Ok(1)
        }

        assert_eq!(outer(), Err(Error::Config(ConfigError::MissingInterface)));
    }
}
