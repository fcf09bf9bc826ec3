//! Process-wide services: assertion handler, translator, and init/shutdown.
//!
//! Every test takes `SERIAL` because the services are global.

use std::panic;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use emulator_utilities::{
    assertions, bounded_enum, check, contract_assert, expand_message, expand_message_devel,
    get_translation, i18n, init, install_translator, set_assertion_handler, shutdown, tag,
    translate, translate_tertiary, translate_tier, try_debug, try_devel, uninstall_translator,
    AssertionFailure, AssertionHandler, AssertionPolicy, BoundedEnum, BuildProfile, EnumCursor,
    GateTier, Language, TranslationTable, TranslationTier, UtilitiesConfig,
};
use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    shutdown();
    guard
}

#[derive(Clone, Default)]
struct LevelLog(Arc<Mutex<Vec<Level>>>);

impl LevelLog {
    fn count(&self, level: Level) -> usize {
        self.0
            .lock()
            .expect("level log lock")
            .iter()
            .filter(|seen| **seen == level)
            .count()
    }
}

impl<S: Subscriber> Layer<S> for LevelLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0
            .lock()
            .expect("level log lock")
            .push(*event.metadata().level());
    }
}

fn with_log<T>(body: impl FnOnce() -> T) -> (T, LevelLog) {
    let log = LevelLog::default();
    let subscriber = Registry::default().with(log.clone());
    let value = tracing::subscriber::with_default(subscriber, body);
    (value, log)
}

#[derive(Default)]
struct Recorder(Mutex<Vec<AssertionFailure>>);

impl AssertionHandler for Recorder {
    fn on_failure(&self, failure: &AssertionFailure) {
        self.0.lock().expect("recorder lock").push(failure.clone());
    }
}

bounded_enum! {
    /// Controller port.
    enum Port {
        /// Port one.
        One => "Port 1",
        /// Port two.
        Two => "Port 2",
    }
}

#[test]
fn installed_handler_receives_enum_assertions() {
    let _serial = serial();
    let recorder = Arc::new(Recorder::default());
    set_assertion_handler(recorder.clone());

    Port::Two.assert_valid();
    EnumCursor::<Port>::end().assert_valid();
    let line = line!() - 1;

    let failures = recorder.0.lock().expect("recorder lock");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].message(), "Port value 2 is outside 0..2");
    assert_eq!(failures[0].location().file(), file!());
    assert_eq!(failures[0].location().line(), line);
    drop(failures);
    shutdown();
}

#[test]
fn contract_assert_reports_stringified_condition() {
    let _serial = serial();
    let recorder = Arc::new(Recorder::default());
    set_assertion_handler(recorder.clone());

    let depth = 3;
    assert!(contract_assert!(depth < 4));
    assert!(!contract_assert!(depth > 4));
    assert!(!contract_assert!(depth == 0, "depth was {depth}"));

    let failures = recorder.0.lock().expect("recorder lock");
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].condition(), "depth > 4");
    assert_eq!(failures[1].condition(), "depth == 0");
    assert_eq!(failures[1].message(), "depth was 3");
    drop(failures);
    shutdown();
}

#[test]
fn log_policy_emits_an_error_event() {
    let _serial = serial();
    init(&UtilitiesConfig {
        assertion_policy: AssertionPolicy::Log,
        ..UtilitiesConfig::for_profile(BuildProfile::Devel)
    });

    let (passed, log) = with_log(|| check(false, "vif fifo drained"));
    assert!(!passed);
    assert_eq!(log.count(Level::ERROR), 1);
    shutdown();
}

#[test]
fn panic_policy_aborts_failed_checks() {
    let _serial = serial();
    init(&UtilitiesConfig::for_profile(BuildProfile::Debug));

    let result = panic::catch_unwind(|| check(false, "iop halted"));
    assert!(result.is_err());
    assert!(check(true, "still fine"));
    shutdown();
}

#[test]
fn ignore_policy_is_silent() {
    let _serial = serial();
    init(&UtilitiesConfig::for_profile(BuildProfile::Release));

    let (passed, log) = with_log(|| check(false, "ignored"));
    assert!(!passed);
    assert_eq!(log.count(Level::ERROR), 0);
    shutdown();
}

#[test]
fn translator_lifecycle() {
    let _serial = serial();
    assert_eq!(translate("Memory Card"), "Memory Card");

    let french = TranslationTable::from_entries(
        Language::French,
        [
            ("Memory Card", "Carte m\u{e9}moire"),
            ("Settings", "Param\u{e8}tres"),
        ],
    );
    assert!(install_translator(Arc::new(french)).is_none());

    assert_eq!(translate("Memory Card"), "Carte m\u{e9}moire");
    assert_eq!(translate_tertiary("Settings"), "Param\u{e8}tres");
    assert_eq!(expand_message("Settings"), "Param\u{e8}tres");
    assert_eq!(expand_message_devel("Unknown"), "Unknown");
    assert_eq!(tag("Settings"), "Settings");
    assert_eq!(
        i18n::active_translator().map(|translator| translator.language()),
        Some(Language::French)
    );

    let previous = uninstall_translator().expect("translator was installed");
    assert_eq!(previous.language(), Language::French);
    assert_eq!(translate("Memory Card"), "Memory Card");
    shutdown();
}

#[rstest]
#[case(TranslationTier::Standard)]
#[case(TranslationTier::Tertiary)]
#[case(TranslationTier::Devel)]
fn tiers_share_runtime_behavior(#[case] tier: TranslationTier) {
    let _serial = serial();
    install_translator(Arc::new(TranslationTable::from_entries(
        Language::German,
        [("Cancel", "Abbrechen")],
    )));
    assert_eq!(translate_tier(tier, "Cancel"), get_translation("Cancel"));
    assert_eq!(translate_tier(tier, "Cancel"), "Abbrechen");
    assert!(TranslationTier::is_valid_raw(tier.to_raw()));
    shutdown();
}

#[test]
fn long_messages_warn_only_in_the_translate_family() {
    let _serial = serial();
    init(&UtilitiesConfig {
        long_message_threshold: 16,
        ..UtilitiesConfig::for_profile(BuildProfile::Devel)
    });
    assert_eq!(i18n::long_message_threshold(), Some(16));

    let paragraph = "The memory card in port 1 could not be formatted.";
    let ((), log) = with_log(|| {
        let _ = translate(paragraph);
        let _ = translate("Short");
        let _ = expand_message(paragraph);
        let _ = tag(paragraph);
    });
    assert_eq!(log.count(Level::WARN), 1);
    shutdown();
}

#[test]
fn release_config_leaves_long_message_check_disarmed() {
    let _serial = serial();
    init(&UtilitiesConfig::for_profile(BuildProfile::Release));
    assert_eq!(i18n::long_message_threshold(), None);

    let ((), log) = with_log(|| {
        let _ = translate("The memory card in port 1 could not be formatted, and much more.");
    });
    assert_eq!(log.count(Level::WARN), 0);
    shutdown();
}

#[rstest]
#[case(BuildProfile::Release)]
#[case(BuildProfile::Devel)]
#[case(BuildProfile::Debug)]
fn init_never_rearms_build_gates(#[case] profile: BuildProfile) {
    let _serial = serial();
    init(&UtilitiesConfig {
        assertion_policy: AssertionPolicy::Ignore,
        ..UtilitiesConfig::for_profile(profile)
    });

    let debug: Result<u8, &str> = try_debug(|| Err("x"), |_| 1);
    let devel: Result<u8, &str> = try_devel(|| Err("x"), |_| 1);
    assert_eq!(debug.is_ok(), GateTier::Debug.is_armed(BuildProfile::CURRENT));
    assert_eq!(devel.is_ok(), GateTier::Devel.is_armed(BuildProfile::CURRENT));
    shutdown();
}

#[test]
fn shutdown_restores_defaults() {
    let _serial = serial();
    init(&UtilitiesConfig::for_profile(BuildProfile::Debug));
    install_translator(Arc::new(TranslationTable::new(Language::Japanese)));

    shutdown();

    assert!(i18n::active_translator().is_none());
    assert_eq!(i18n::long_message_threshold(), None);
    assert!(assertions::reset_assertion_handler().is_none());
}
