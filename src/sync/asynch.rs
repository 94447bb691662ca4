//! Async/await support for the resolution executor.
//!
//! [`PendingFuture`] completes once the scheduler holds a request. Producers
//! wake it from any context through [`ResolveScheduler::request`].

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use super::scheduler::ResolveScheduler;

/// Future that waits for a pending resolution request.
///
/// Does not consume the request; the executor takes it when it runs the pass.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct PendingFuture<'a> {
    scheduler: &'a ResolveScheduler,
}

impl<'a> PendingFuture<'a> {
    /// Create a new pending-request future.
    pub fn new(scheduler: &'a ResolveScheduler) -> Self {
        Self { scheduler }
    }
}

impl Future for PendingFuture<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.scheduler.is_pending() {
            return Poll::Ready(());
        }

        self.scheduler.register(cx.waker());
        if self.scheduler.is_pending() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
