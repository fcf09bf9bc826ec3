//! Cross-cutting utility primitives shared by every emulator crate.

/// Bounded enumerations with sentinel-terminated stepping and range validation.
pub mod enums;
pub use enums::{BoundedEnum, EnumCursor, EnumEnd, EnumIter, EnumRangeError, ENUM_END};

/// Scope-tracking flag guard.
pub mod scoped;
pub use scoped::{FlagSlot, ScopedBool};

/// Non-copyable marker.
pub mod noncopy;
pub use noncopy::NonCopyable;

/// Human-readable byte-count constants.
pub mod sizes;
pub use sizes::{
    kib, mib, SIZE_128KB, SIZE_16KB, SIZE_16MB, SIZE_1GB, SIZE_1KB, SIZE_1MB, SIZE_256KB,
    SIZE_256MB, SIZE_32KB, SIZE_32MB, SIZE_4GB, SIZE_4KB, SIZE_64KB, SIZE_64MB, SIZE_8MB,
};

/// Build categories and process-wide configuration.
pub mod config;
pub use config::{AssertionPolicy, BuildProfile, UtilitiesConfig, DEFAULT_LONG_MESSAGE_THRESHOLD};

/// Replaceable assertion handler and contract checks.
pub mod assertions;
pub use assertions::{
    check, check_with, check_with_handler, reset_assertion_handler, set_assertion_handler,
    AssertionFailure, AssertionHandler,
};

/// Translation lookup, extraction tags, and the process-wide translator.
pub mod i18n;
pub use i18n::{
    expand_message, expand_message_devel, expand_message_tertiary, get_translation,
    install_translator, is_english, tag, tag_devel, tag_tertiary, translate, translate_devel,
    translate_tertiary, translate_tier, translate_with, uninstall_translator,
    IdentityTranslator, Language, TranslationTable, TranslationTier, Translator,
};

/// Byte-string decoding helpers.
pub mod text;
pub use text::{from_ascii, from_utf8, try_from_ascii, try_from_utf8, TextError};

/// Build-gated error and panic capture.
pub mod gate;
pub use gate::{
    catch_unwind_gated, panic_message, try_debug, try_debug_unwind, try_devel, try_devel_unwind,
    try_gated, GateTier,
};

use std::sync::Arc;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tracing_subscriber as _;

/// Initializes the process-wide services from `config`.
///
/// Installs `config.assertion_policy` as the assertion handler and arms the long-message
/// translation warning when requested. Safe to call again to reconfigure.
pub fn init(config: &UtilitiesConfig) {
    tracing::debug!(
        build = %BuildProfile::CURRENT,
        policy = ?config.assertion_policy,
        "initializing utilities"
    );
    set_assertion_handler(Arc::new(config.assertion_policy));
    i18n::set_long_message_threshold(
        config
            .warn_on_long_messages
            .then_some(config.long_message_threshold),
    );
}

/// Tears down everything [`init`] and [`install_translator`] set up.
pub fn shutdown() {
    reset_assertion_handler();
    uninstall_translator();
    i18n::set_long_message_threshold(None);
    tracing::debug!("utilities shut down");
}
