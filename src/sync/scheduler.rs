//! Single-slot resolution request coalescer.
//!
//! Producers call [`ResolveScheduler::request`] after updating the shared
//! inputs; the executor calls [`ResolveScheduler::take`] before snapshotting
//! them. The slot holds one request: any number of requests made before the
//! executor's next `take` collapse into one pass, and a request made after
//! `take` always leaves the slot armed for another pass.

#[cfg(feature = "async")]
use super::primitives::AtomicWaker;
use super::primitives::CriticalSectionCell;

/// Request counters, for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerStats {
    /// Requests made by producers
    pub requests: u32,
    /// Requests consumed by the executor (one per pass)
    pub taken: u32,
}

impl SchedulerStats {
    /// Requests that were folded into another pass
    #[must_use]
    pub const fn coalesced(&self) -> u32 {
        self.requests.saturating_sub(self.taken)
    }
}

#[derive(Clone, Copy)]
struct Slot {
    pending: bool,
    stats: SchedulerStats,
}

/// Coalescing resolution scheduler for one link
pub struct ResolveScheduler {
    slot: CriticalSectionCell<Slot>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl ResolveScheduler {
    /// Create an idle scheduler (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            slot: CriticalSectionCell::new(Slot {
                pending: false,
                stats: SchedulerStats {
                    requests: 0,
                    taken: 0,
                },
            }),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// Arm the slot and wake the executor. Never blocks on a pass.
    #[inline]
    pub fn request(&self) {
        self.slot.with(|slot| {
            slot.pending = true;
            slot.stats.requests = slot.stats.requests.wrapping_add(1);
        });

        #[cfg(feature = "async")]
        self.waker.wake();
    }

    /// Disarm the slot, returning whether a pass is due
    #[inline]
    pub fn take(&self) -> bool {
        self.slot.with(|slot| {
            let pending = slot.pending;
            if pending {
                slot.pending = false;
                slot.stats.taken = slot.stats.taken.wrapping_add(1);
            }
            pending
        })
    }

    /// A pass is due
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.slot.with_ref(|slot| slot.pending)
    }

    /// Request counters
    pub fn stats(&self) -> SchedulerStats {
        self.slot.with_ref(|slot| slot.stats)
    }

    /// Register the executor's waker (async executor only)
    #[cfg(feature = "async")]
    pub(crate) fn register(&self, waker: &core::task::Waker) {
        self.waker.register(waker);
    }
}

impl Default for ResolveScheduler {
    fn default() -> Self {
        Self::new()
    }
}
