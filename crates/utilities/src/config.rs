//! Build categories and process-wide configuration.

/// Default character length above which a translated message triggers a warning.
pub const DEFAULT_LONG_MESSAGE_THRESHOLD: usize = 128;

crate::bounded_enum! {
    /// Compile-time build category. Developer builds are the broader diagnostics category;
    /// every debug build is also a developer build.
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub enum BuildProfile {
        /// No extra diagnostics.
        #[default]
        Release => "release",
        /// Developer build (`devel-build` feature).
        Devel => "devel",
        /// Debug build (`debug-build` feature).
        Debug => "debug",
    }
}

impl BuildProfile {
    /// Profile selected by the crate features at compile time.
    pub const CURRENT: Self = if cfg!(feature = "debug-build") {
        Self::Debug
    } else if cfg!(feature = "devel-build") {
        Self::Devel
    } else {
        Self::Release
    };

    /// Returns `true` for developer and debug builds.
    #[must_use]
    pub const fn is_devel_build(self) -> bool {
        matches!(self, Self::Devel | Self::Debug)
    }

    /// Returns `true` for debug builds only.
    #[must_use]
    pub const fn is_debug_build(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Assertion policy used when no handler has been installed.
    #[must_use]
    pub const fn default_assertion_policy(self) -> AssertionPolicy {
        match self {
            Self::Release => AssertionPolicy::Ignore,
            Self::Devel => AssertionPolicy::Log,
            Self::Debug => AssertionPolicy::Panic,
        }
    }
}

/// Reaction to a failed contract check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AssertionPolicy {
    /// Abort the caller by panicking.
    Panic,
    /// Emit an `error` event and continue.
    Log,
    /// Continue silently.
    Ignore,
}

/// Configuration applied by [`init`](crate::init).
///
/// Build gating is not configurable here: gates always follow [`BuildProfile::CURRENT`].
/// [`for_profile`](Self::for_profile) only selects the defaults another profile would use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UtilitiesConfig {
    /// Handler installed for failed contract checks.
    pub assertion_policy: AssertionPolicy,
    /// Warn when a message routed through the `translate` family is suspiciously long.
    pub warn_on_long_messages: bool,
    /// Character count above which the long-message warning fires.
    pub long_message_threshold: usize,
}

impl Default for UtilitiesConfig {
    fn default() -> Self {
        Self::for_profile(BuildProfile::CURRENT)
    }
}

impl UtilitiesConfig {
    /// Per-profile defaults.
    #[must_use]
    pub const fn for_profile(profile: BuildProfile) -> Self {
        Self {
            assertion_policy: profile.default_assertion_policy(),
            warn_on_long_messages: profile.is_devel_build(),
            long_message_threshold: DEFAULT_LONG_MESSAGE_THRESHOLD,
        }
    }
}
