//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//!
//! # Contents
//!
//! - [`constants`]: Internal constants and limits
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Do not depend on any types
//! or functions in this module from external code.

pub(crate) mod constants;
