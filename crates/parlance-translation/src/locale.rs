//! Locale fallback and locale-scoped state.

use crate::error::{I18nError, Result};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};

/// Check that `locale` can be used in a catalog path.
pub fn validate_locale(locale: &str) -> Result<()> {
    if locale.contains(['/', '\\']) {
        return Err(I18nError::InvalidLocale(locale.to_string()));
    }
    Ok(())
}

/// Locales to try for one lookup, in order.
///
/// Without fallback this is exactly `[requested]`. Otherwise it is the
/// requested locale (or the default) followed by the fallback, with empty
/// entries and duplicates removed.
pub fn fallback_chain(
    requested: Option<&str>,
    default: &str,
    fallback: Option<&str>,
    allow_fallback: bool,
) -> Vec<String> {
    let primary = requested.filter(|l| !l.is_empty()).unwrap_or(default);

    if !allow_fallback {
        return vec![primary.to_string()];
    }

    let mut chain: Vec<String> = Vec::with_capacity(2);
    for locale in [Some(primary), fallback].into_iter().flatten() {
        if !locale.is_empty() && !chain.iter().any(|l| l == locale) {
            chain.push(locale.to_string());
        }
    }
    chain
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// A process-unique id for per-instance thread-local state.
pub(crate) fn next_instance_id() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

thread_local! {
    static MISSING_KEYS_SUPPRESSED: RefCell<HashMap<u64, bool>> = RefCell::new(HashMap::new());
}

/// Storage for the "current locale" of a translator.
///
/// Implementations must isolate concurrent callers from one another.
pub trait LocaleStore: Send + Sync {
    /// The locale set for the calling context, if any.
    fn get(&self) -> Option<String>;

    /// Set (or with `None`, clear) the locale for the calling context.
    fn set(&self, locale: Option<String>);
}

/// Per-thread locale storage, private to one store instance.
///
/// Entries live in the store, so dropping it frees every thread's locale.
#[derive(Debug, Default)]
pub struct ThreadLocaleStore {
    locales: Mutex<HashMap<ThreadId, String>>,
}

impl ThreadLocaleStore {
    /// A store with no locale set on any thread.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of threads with a locale set.
    pub fn len(&self) -> usize {
        self.locales.lock().len()
    }

    /// Whether no thread has a locale set.
    pub fn is_empty(&self) -> bool {
        self.locales.lock().is_empty()
    }
}

impl LocaleStore for ThreadLocaleStore {
    fn get(&self) -> Option<String> {
        self.locales.lock().get(&thread::current().id()).cloned()
    }

    fn set(&self, locale: Option<String>) {
        let thread = thread::current().id();
        let mut locales = self.locales.lock();
        match locale {
            Some(locale) => locales.insert(thread, locale),
            None => locales.remove(&thread),
        };
    }
}

/// Restores the previous locale of a store when dropped.
#[must_use = "the previous locale is restored when the guard is dropped"]
pub struct LocaleGuard<'a> {
    store: &'a dyn LocaleStore,
    previous: Option<String>,
}

impl<'a> LocaleGuard<'a> {
    pub(crate) fn new(store: &'a dyn LocaleStore, locale: String) -> Self {
        let previous = store.get();
        store.set(Some(locale));
        Self { store, previous }
    }
}

impl Drop for LocaleGuard<'_> {
    fn drop(&mut self) {
        self.store.set(self.previous.take());
    }
}

/// Whether missing-key handling is enabled for `instance` on this thread.
pub(crate) fn missing_keys_enabled(instance: u64) -> bool {
    MISSING_KEYS_SUPPRESSED.with(|state| !state.borrow().get(&instance).copied().unwrap_or(false))
}

/// Disables missing-key handling for one instance on this thread until dropped.
///
/// The previous state is restored on drop, unwinding included.
pub(crate) struct SuppressMissingKeys {
    instance: u64,
    previous: bool,
}

impl SuppressMissingKeys {
    pub(crate) fn new(instance: u64) -> Self {
        let previous = MISSING_KEYS_SUPPRESSED.with(|state| {
            state
                .borrow_mut()
                .insert(instance, true)
                .unwrap_or(false)
        });
        Self { instance, previous }
    }
}

impl Drop for SuppressMissingKeys {
    fn drop(&mut self) {
        let (instance, previous) = (self.instance, self.previous);
        let _ = MISSING_KEYS_SUPPRESSED.try_with(|state| {
            let mut state = state.borrow_mut();
            if previous {
                state.insert(instance, true);
            } else {
                state.remove(&instance);
            }
        });
    }
}
