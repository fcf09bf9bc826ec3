//! Assertion collaborator: routes contract violations to a replaceable process-wide handler.

use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::config::{AssertionPolicy, BuildProfile};

/// A failed contract check, handed to the active [`AssertionHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("assertion `{condition}` failed at {location}: {message}")]
pub struct AssertionFailure {
    condition: &'static str,
    message: String,
    location: &'static Location<'static>,
}

impl AssertionFailure {
    /// Failure for `condition`, located at the caller.
    #[must_use]
    #[track_caller]
    pub fn new(condition: &'static str) -> Self {
        Self {
            condition,
            message: condition.to_owned(),
            location: Location::caller(),
        }
    }

    /// Replaces the default message (the condition text).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Source text of the failed condition.
    #[must_use]
    pub const fn condition(&self) -> &'static str {
        self.condition
    }

    /// Human-readable detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the check was made.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// Receives contract violations.
pub trait AssertionHandler: Send + Sync {
    /// Called once per failed check.
    fn on_failure(&self, failure: &AssertionFailure);
}

impl AssertionHandler for AssertionPolicy {
    /// # Panics
    ///
    /// Panics with the failure text under [`AssertionPolicy::Panic`].
    fn on_failure(&self, failure: &AssertionFailure) {
        match self {
            Self::Panic => panic!("{failure}"),
            Self::Log => tracing::error!(
                condition = failure.condition(),
                location = %failure.location(),
                "{}",
                failure.message()
            ),
            Self::Ignore => {}
        }
    }
}

static HANDLER: RwLock<Option<Arc<dyn AssertionHandler>>> = RwLock::new(None);

/// Installs `handler` as the process-wide assertion handler, returning the previous one.
pub fn set_assertion_handler(
    handler: Arc<dyn AssertionHandler>,
) -> Option<Arc<dyn AssertionHandler>> {
    let mut slot = HANDLER.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(handler)
}

/// Drops any installed handler; failures fall back to the build profile's default policy.
pub fn reset_assertion_handler() -> Option<Arc<dyn AssertionHandler>> {
    HANDLER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

fn active_handler() -> Option<Arc<dyn AssertionHandler>> {
    HANDLER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn dispatch(failure: &AssertionFailure) {
    // The lock is released before the handler runs so a panicking handler cannot poison it.
    match active_handler() {
        Some(handler) => handler.on_failure(failure),
        None => BuildProfile::CURRENT
            .default_assertion_policy()
            .on_failure(failure),
    }
}

/// Reports `condition_text` to the process-wide handler when `condition` is false.
///
/// Returns `condition`.
#[track_caller]
pub fn check(condition: bool, condition_text: &'static str) -> bool {
    if !condition {
        dispatch(&AssertionFailure::new(condition_text));
    }
    condition
}

/// Like [`check`], building the message only on failure.
#[track_caller]
pub fn check_with(
    condition: bool,
    condition_text: &'static str,
    message: impl FnOnce() -> String,
) -> bool {
    if !condition {
        dispatch(&AssertionFailure::new(condition_text).with_message(message()));
    }
    condition
}

/// Like [`check_with`], reporting to an explicit handler instead of the process-wide one.
#[track_caller]
pub fn check_with_handler(
    handler: &dyn AssertionHandler,
    condition: bool,
    condition_text: &'static str,
    message: impl FnOnce() -> String,
) -> bool {
    if !condition {
        handler.on_failure(&AssertionFailure::new(condition_text).with_message(message()));
    }
    condition
}

/// Checks a condition through the process-wide assertion handler.
///
/// ```
/// # #![allow(unused_crate_dependencies)]
/// use emulator_utilities::contract_assert;
///
/// let cycles = 4;
/// assert!(contract_assert!(cycles > 0));
/// assert!(contract_assert!(cycles < 8, "cycle cost {cycles} out of range"));
/// ```
#[macro_export]
macro_rules! contract_assert {
    ($cond:expr $(,)?) => {
        $crate::assertions::check($cond, stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::assertions::check_with($cond, stringify!($cond), || format!($($arg)+))
    };
}
