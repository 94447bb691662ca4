//! Synchronization and Concurrency Support
//!
//! This module provides the primitives that let interrupt-context producers
//! and the single resolution executor share one link:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - `AtomicWaker` - Async waker storage (feature `async`)
//!
//! - **Scheduler** (`scheduler`): Single-slot request coalescing
//!   - [`ResolveScheduler`] - Pending flag shared by producers and executor
//!
//! - **Async Support** (`asynch`): Waiting for requests without polling
//!   - `PendingFuture` - Completes when a pass is due
//!
//! # Feature Flags
//!
//! - `async`: Enables `asynch` and the waker inside [`ResolveScheduler`]

mod primitives;

pub use primitives::CriticalSectionCell;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;

mod scheduler;

pub use scheduler::{ResolveScheduler, SchedulerStats};

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::PendingFuture;
