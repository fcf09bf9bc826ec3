//! Build-gated error capture.
//!
//! A gate either handles a failure locally or lets it propagate, depending on the build
//! category. Debug builds arm both tiers, developer builds arm only the devel tier, and
//! release builds arm neither. When a gate is not armed the body runs straight through and
//! the handler is never called.

use std::any::Any;
use std::panic::{self, UnwindSafe};

use crate::BuildProfile;

/// Diagnostics tier a gate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum GateTier {
    /// Armed in debug builds only.
    Debug,
    /// Armed in developer and debug builds.
    Devel,
}

impl GateTier {
    /// Returns `true` when this tier captures failures under `profile`.
    #[must_use]
    pub const fn is_armed(self, profile: BuildProfile) -> bool {
        match self {
            Self::Debug => profile.is_debug_build(),
            Self::Devel => profile.is_devel_build(),
        }
    }
}

/// Runs `body`; when the gate is armed, an `Err` is handed to `catch` and its result returned
/// as `Ok`. When the gate is not armed, the body's result is returned untouched.
pub fn try_gated<T, E>(
    profile: BuildProfile,
    tier: GateTier,
    body: impl FnOnce() -> Result<T, E>,
    catch: impl FnOnce(E) -> T,
) -> Result<T, E> {
    if !tier.is_armed(profile) {
        return body();
    }
    body().or_else(|err| {
        tracing::debug!(?tier, %profile, "gated failure captured");
        Ok(catch(err))
    })
}

/// [`try_gated`] in the debug tier of the current build.
pub fn try_debug<T, E>(
    body: impl FnOnce() -> Result<T, E>,
    catch: impl FnOnce(E) -> T,
) -> Result<T, E> {
    try_gated(BuildProfile::CURRENT, GateTier::Debug, body, catch)
}

/// [`try_gated`] in the devel tier of the current build.
pub fn try_devel<T, E>(
    body: impl FnOnce() -> Result<T, E>,
    catch: impl FnOnce(E) -> T,
) -> Result<T, E> {
    try_gated(BuildProfile::CURRENT, GateTier::Devel, body, catch)
}

/// Runs `body`; when the gate is armed, a panic is caught and its payload handed to `catch`.
/// When the gate is not armed, a panic unwinds past this call.
pub fn catch_unwind_gated<T>(
    profile: BuildProfile,
    tier: GateTier,
    body: impl FnOnce() -> T + UnwindSafe,
    catch: impl FnOnce(Box<dyn Any + Send>) -> T,
) -> T {
    if !tier.is_armed(profile) {
        return body();
    }
    panic::catch_unwind(body).unwrap_or_else(|payload| {
        tracing::debug!(
            ?tier,
            %profile,
            panic = panic_message(payload.as_ref()).unwrap_or("<non-string payload>"),
            "gated panic captured"
        );
        catch(payload)
    })
}

/// [`catch_unwind_gated`] in the debug tier of the current build.
pub fn try_debug_unwind<T>(
    body: impl FnOnce() -> T + UnwindSafe,
    catch: impl FnOnce(Box<dyn Any + Send>) -> T,
) -> T {
    catch_unwind_gated(BuildProfile::CURRENT, GateTier::Debug, body, catch)
}

/// [`catch_unwind_gated`] in the devel tier of the current build.
pub fn try_devel_unwind<T>(
    body: impl FnOnce() -> T + UnwindSafe,
    catch: impl FnOnce(Box<dyn Any + Send>) -> T,
) -> T {
    catch_unwind_gated(BuildProfile::CURRENT, GateTier::Devel, body, catch)
}

/// Text of a panic payload raised with a string message.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
