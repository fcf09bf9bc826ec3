//! Scope-tracking flag guard.
//!
//! [`ScopedBool`] raises a caller-owned flag for as long as the guard lives and lowers it when
//! the guard is dropped, including during panic unwinding. It is the exception-safe way of
//! recording entry into and exit from an execution zone.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::NonCopyable;

/// Boolean storage a [`ScopedBool`] can raise and lower through a shared reference.
pub trait FlagSlot {
    /// Writes the flag.
    fn store_flag(&self, value: bool);
    /// Reads the flag.
    fn load_flag(&self) -> bool;
}

impl FlagSlot for Cell<bool> {
    fn store_flag(&self, value: bool) {
        self.set(value);
    }

    fn load_flag(&self) -> bool {
        self.get()
    }
}

impl FlagSlot for AtomicBool {
    fn store_flag(&self, value: bool) {
        self.store(value, Ordering::Release);
    }

    fn load_flag(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Sets a borrowed flag to `true` on construction and back to `false` on drop.
///
/// The guard only borrows the flag, so other code may read it while the guard is alive and
/// guards may nest on the same flag. The first guard to drop lowers the flag.
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub struct ScopedBool<'a, F: FlagSlot + ?Sized = Cell<bool>> {
    flag: &'a F,
    _noncopy: NonCopyable,
}

impl<'a, F: FlagSlot + ?Sized> ScopedBool<'a, F> {
    /// Raises `flag` and returns the guard that will lower it.
    pub fn new(flag: &'a F) -> Self {
        flag.store_flag(true);
        Self {
            flag,
            _noncopy: NonCopyable::new(),
        }
    }

    /// Current value of the guarded flag.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load_flag()
    }
}

impl<F: FlagSlot + ?Sized> Drop for ScopedBool<'_, F> {
    fn drop(&mut self) {
        self.flag.store_flag(false);
    }
}

impl<F: FlagSlot + ?Sized> fmt::Debug for ScopedBool<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedBool")
            .field("is_set", &self.is_set())
            .finish()
    }
}
