//! Lock and waker shared by link producers and the executor.
//!
//! [`CriticalSectionCell`] guards the link inputs and the scheduler slot.
//! Every access is one short critical section; the executor copies what it
//! needs out with [`CriticalSectionCell::snapshot`] instead of holding the
//! lock across a pass.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers. Closures passed in must only
/// assign fields: the critical section stays held until they return.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    ///
    /// Re-entering the same cell from inside the closure is a lock-ordering
    /// bug and panics.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Execute a closure with immutable access.
    #[inline]
    pub fn with_ref<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| {
            let value = self.inner.borrow_ref(cs);
            f(&value)
        })
    }
}

impl<T: Copy> CriticalSectionCell<T> {
    /// Copy the value out in one critical section.
    #[inline]
    pub fn snapshot(&self) -> T {
        self.with_ref(|value| *value)
    }
}

// SAFETY: CriticalSectionCell uses critical sections to protect all access.
unsafe impl<T: Send> Sync for CriticalSectionCell<T> {}

/// Thread-safe, interrupt-safe waker storage.
///
/// Register a waker from async poll, wake from any producer context.
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Create a new empty waker (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Register a waker to be woken later.
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| match slot {
            Some(existing) if existing.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake the registered waker, if any (clears the stored waker).
    #[inline]
    pub fn wake(&self) {
        let waker = self.waker.with(Option::take);
        if let Some(w) = waker {
            w.wake();
        }
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}
