//! Translation helpers.
//!
//! Three families of helpers exist, each in a standard, tertiary (low priority) and devel
//! tier. The tier is informational only and never changes runtime behavior.
//!
//! - `translate*` looks a message up through the active [`Translator`].
//! - `expand_message*` does the same for long English paragraphs, without the long-message
//!   warning.
//! - `tag*` performs no lookup at all; it only marks a literal for string extraction.
//!
//! The process-wide translator is installed explicitly with [`install_translator`]. Until
//! then every lookup returns its input unchanged.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

crate::bounded_enum! {
    /// Translation priority tier.
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub enum TranslationTier {
        /// Regular user-facing strings.
        Standard => "standard",
        /// Very low translation priority.
        Tertiary => "tertiary",
        /// Strings only shown in developer and debug builds.
        Devel => "devel",
    }
}

crate::bounded_enum! {
    /// Translation catalog identifier.
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub enum Language {
        /// Follow the host locale.
        Default => "Default",
        /// English.
        English => "English",
        /// English (U.S.).
        EnglishUs => "English (U.S.)",
        /// French.
        French => "French",
        /// German.
        German => "German",
        /// Japanese.
        Japanese => "Japanese",
        /// Spanish.
        Spanish => "Spanish",
    }
}

/// Returns `true` when `language` needs no translation catalog.
#[must_use]
pub const fn is_english(language: Language) -> bool {
    matches!(language, Language::English | Language::EnglishUs)
}

/// Message lookup backend.
pub trait Translator: Send + Sync {
    /// Translation of `text`, or `text` itself when the catalog has no entry.
    fn lookup(&self, text: &'static str) -> Cow<'static, str>;

    /// Catalog language.
    fn language(&self) -> Language {
        Language::English
    }
}

/// Translator that returns every message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn lookup(&self, text: &'static str) -> Cow<'static, str> {
        Cow::Borrowed(text)
    }
}

/// In-memory catalog keyed by the English source text.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    language: Language,
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Empty catalog for `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    /// Catalog for `language` built from `(english, translated)` pairs.
    #[must_use]
    pub fn from_entries<I, K, V>(language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(language);
        for (english, translated) in entries {
            table.insert(english, translated);
        }
        table
    }

    /// Adds or replaces the translation of `english`, returning the previous one.
    pub fn insert(
        &mut self,
        english: impl Into<String>,
        translated: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(english.into(), translated.into())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for TranslationTable {
    fn lookup(&self, text: &'static str) -> Cow<'static, str> {
        self.entries
            .get(text)
            .map_or(Cow::Borrowed(text), |translated| {
                Cow::Owned(translated.clone())
            })
    }

    fn language(&self) -> Language {
        self.language
    }
}

static TRANSLATOR: RwLock<Option<Arc<dyn Translator>>> = RwLock::new(None);

// Zero disables the long-message warning.
static LONG_MESSAGE_LIMIT: AtomicUsize = AtomicUsize::new(0);

/// Installs the process-wide translator, returning the previous one.
pub fn install_translator(translator: Arc<dyn Translator>) -> Option<Arc<dyn Translator>> {
    tracing::debug!(language = %translator.language(), "installing translator");
    TRANSLATOR
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(translator)
}

/// Removes the process-wide translator; lookups fall back to identity.
pub fn uninstall_translator() -> Option<Arc<dyn Translator>> {
    let previous = TRANSLATOR
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if previous.is_some() {
        tracing::debug!("translator uninstalled");
    }
    previous
}

/// The installed translator, if any.
#[must_use]
pub fn active_translator() -> Option<Arc<dyn Translator>> {
    TRANSLATOR
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Arms (`Some(threshold)`) or disarms (`None`) the long-message warning.
pub fn set_long_message_threshold(threshold: Option<usize>) {
    LONG_MESSAGE_LIMIT.store(threshold.unwrap_or(0), Ordering::Relaxed);
}

/// Current long-message threshold, if armed.
#[must_use]
pub fn long_message_threshold() -> Option<usize> {
    match LONG_MESSAGE_LIMIT.load(Ordering::Relaxed) {
        0 => None,
        limit => Some(limit),
    }
}

/// Looks `text` up through an explicit translator.
#[must_use]
pub fn translate_with(translator: &dyn Translator, text: &'static str) -> Cow<'static, str> {
    translator.lookup(text)
}

fn lookup_active(text: &'static str) -> Cow<'static, str> {
    active_translator().map_or(Cow::Borrowed(text), |translator| {
        translator.lookup(text)
    })
}

/// Looks `text` up through the process-wide translator.
///
/// When the long-message warning is armed, messages longer than the threshold are reported;
/// paragraphs belong in [`expand_message`].
#[must_use]
pub fn get_translation(text: &'static str) -> Cow<'static, str> {
    if let Some(limit) = long_message_threshold() {
        let length = text.chars().count();
        if length > limit {
            tracing::warn!(
                length,
                limit,
                text,
                "long message passed to translate, use expand_message instead"
            );
        }
    }
    lookup_active(text)
}

/// Standard-priority translation.
#[must_use]
pub fn translate(text: &'static str) -> Cow<'static, str> {
    get_translation(text)
}

/// Low-priority translation.
#[must_use]
pub fn translate_tertiary(text: &'static str) -> Cow<'static, str> {
    get_translation(text)
}

/// Developer-build translation.
#[must_use]
pub fn translate_devel(text: &'static str) -> Cow<'static, str> {
    get_translation(text)
}

/// Translation in an explicit tier. The tier does not affect the result.
#[must_use]
pub fn translate_tier(tier: TranslationTier, text: &'static str) -> Cow<'static, str> {
    tracing::trace!(tier = %tier, "translate");
    get_translation(text)
}

/// Expands and translates a long English message.
#[must_use]
pub fn expand_message(english: &'static str) -> Cow<'static, str> {
    lookup_active(english)
}

/// Low-priority [`expand_message`].
#[must_use]
pub fn expand_message_tertiary(english: &'static str) -> Cow<'static, str> {
    expand_message(english)
}

/// Developer-build [`expand_message`].
#[must_use]
pub fn expand_message_devel(english: &'static str) -> Cow<'static, str> {
    expand_message(english)
}

/// Marks a standard-priority string for extraction without translating it.
#[must_use]
pub const fn tag(text: &'static str) -> &'static str {
    text
}

/// Marks a low-priority string for extraction without translating it.
#[must_use]
pub const fn tag_tertiary(text: &'static str) -> &'static str {
    text
}

/// Marks a developer-build string for extraction without translating it.
#[must_use]
pub const fn tag_devel(text: &'static str) -> &'static str {
    text
}
