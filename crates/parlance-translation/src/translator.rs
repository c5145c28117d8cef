//! The translator: lookup, fallback, pluralization and missing keys.

use crate::cache::{CatalogCache, LoadedCatalogs};
use crate::error::Result;
use crate::key::{KeyResolver, ParsedKey, DEFAULT_NAMESPACE, FLAT_GROUP};
use crate::loader::Loader;
use crate::locale::{
    fallback_chain, missing_keys_enabled, next_instance_id, validate_locale, LocaleGuard,
    LocaleStore, SuppressMissingKeys, ThreadLocaleStore,
};
use crate::plural::{Count, MessageSelector, PluralSelector};
use crate::replace::{make_replacements, Replacements, StringableRegistry};
use crate::tree::{get_path, Lines, MessageValue};
use parking_lot::RwLock;
use parlance_common_log::spans::{catalog_span, lookup_span, record_hit, Timer};
use std::any::Any;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Called with `(key, replacements, locale, allow_fallback)` when a key
/// misses every locale. A returned string replaces the key.
pub type MissingKeyCallback = dyn Fn(&str, &Replacements, &str, bool) -> Option<String> + Send + Sync;

/// Rewrites the computed fallback chain.
pub type LocalesCallback = dyn Fn(&[String]) -> Vec<String> + Send + Sync;

/// Resolves messages by key and locale.
///
/// A translator is built once and shared (typically as `Arc<Translator>`).
/// The current locale lives in a [`LocaleStore`], per thread by default, so
/// concurrent callers never see each other's locale.
pub struct Translator {
    id: u64,
    loader: Arc<dyn Loader>,
    default_locale: String,
    locale_store: Arc<dyn LocaleStore>,
    fallback: RwLock<Option<String>>,
    loaded: CatalogCache,
    keys: KeyResolver,
    selector: RwLock<Arc<dyn PluralSelector>>,
    determine_locales: RwLock<Option<Arc<LocalesCallback>>>,
    stringables: RwLock<StringableRegistry>,
    missing_key_callback: RwLock<Option<Arc<MissingKeyCallback>>>,
}

impl Translator {
    /// Create a translator with `locale` as its default locale.
    pub fn new(loader: Arc<dyn Loader>, locale: impl Into<String>) -> Result<Self> {
        Self::with_locale_store(loader, locale, Arc::new(ThreadLocaleStore::new()))
    }

    /// Create a translator whose current locale is kept in `store`.
    pub fn with_locale_store(
        loader: Arc<dyn Loader>,
        locale: impl Into<String>,
        store: Arc<dyn LocaleStore>,
    ) -> Result<Self> {
        let locale = locale.into();
        validate_locale(&locale)?;

        Ok(Self {
            id: next_instance_id(),
            loader,
            default_locale: locale,
            locale_store: store,
            fallback: RwLock::new(None),
            loaded: CatalogCache::new(),
            keys: KeyResolver::new(),
            selector: RwLock::new(Arc::new(MessageSelector::new())),
            determine_locales: RwLock::new(None),
            stringables: RwLock::new(StringableRegistry::new()),
            missing_key_callback: RwLock::new(None),
        })
    }

    /// Whether `key` has a line in `locale` itself, without fallback.
    pub fn has_for_locale(&self, key: &str, locale: &str) -> Result<bool> {
        self.has(key, Some(locale), false)
    }

    /// Whether `key` resolves to something other than itself.
    ///
    /// A flat-catalog entry always counts. Otherwise a grouped line whose
    /// text equals its own key is indistinguishable from a miss.
    pub fn has(&self, key: &str, locale: Option<&str>, allow_fallback: bool) -> Result<bool> {
        let locale = self.resolve_locale(locale)?;

        let line = {
            let _suppressed = SuppressMissingKeys::new(self.id);
            self.get(key, &Replacements::new(), Some(&locale), allow_fallback)?
        };

        let in_flat_catalog = self
            .loaded
            .get(DEFAULT_NAMESPACE, FLAT_GROUP, &locale)
            .is_some_and(|flat| flat.contains_key(key));
        if in_flat_catalog {
            return Ok(true);
        }

        Ok(match line {
            MessageValue::Text(text) => text != key,
            MessageValue::Group(_) => true,
        })
    }

    /// Resolve `key` in the current locale with fallback.
    pub fn trans(&self, key: &str, replace: &Replacements, locale: Option<&str>) -> Result<MessageValue> {
        self.get(key, replace, locale, true)
    }

    /// Resolve `key`.
    ///
    /// The flat catalog of `locale` is tried first with the whole key. Then
    /// the key is parsed and each locale of the fallback chain is tried in
    /// turn. A miss runs the missing-key callback and yields the key itself.
    /// The result has `replace` applied to every leaf.
    pub fn get(
        &self,
        key: &str,
        replace: &Replacements,
        locale: Option<&str>,
        allow_fallback: bool,
    ) -> Result<MessageValue> {
        let locale = self.resolve_locale(locale)?;
        let span = lookup_span(key, &locale);
        let _entered = span.enter();

        let flat = self.load_group(DEFAULT_NAMESPACE, FLAT_GROUP, &locale)?;
        match flat.get(key) {
            Some(MessageValue::Text(line)) => {
                record_hit(&span, true);
                let line = if line.is_empty() { key } else { line.as_str() };
                return Ok(MessageValue::Text(self.make_replacements(line, replace)));
            }
            Some(MessageValue::Group(lines)) if !lines.is_empty() => {
                record_hit(&span, true);
                return Ok(self.replace_leaves(MessageValue::Group(lines.clone()), replace));
            }
            Some(MessageValue::Group(_)) => {
                return Ok(MessageValue::Text(self.make_replacements(key, replace)));
            }
            None => {}
        }

        let parsed = self.parse_key(key);
        let locales = if allow_fallback {
            self.locale_array(&locale)
        } else {
            vec![locale.clone()]
        };

        for candidate in &locales {
            validate_locale(candidate)?;
            if let Some(line) = self.get_line(&parsed, candidate, replace)? {
                record_hit(&span, true);
                return Ok(line);
            }
        }

        record_hit(&span, false);
        debug!(key = %key, locale = %locale, "translation missing");

        let key = self.handle_missing_key(key, replace, &locale, allow_fallback);
        Ok(MessageValue::Text(self.make_replacements(&key, replace)))
    }

    /// Alias of [`Translator::choice`].
    pub fn trans_choice(
        &self,
        key: &str,
        count: impl Into<Count>,
        replace: &Replacements,
        locale: Option<&str>,
    ) -> Result<String> {
        self.choice(key, count, replace, locale)
    }

    /// Resolve `key` and pick the plural form for `count`.
    ///
    /// `:count` is filled from `count` unless `replace` already sets it.
    pub fn choice(
        &self,
        key: &str,
        count: impl Into<Count>,
        replace: &Replacements,
        locale: Option<&str>,
    ) -> Result<String> {
        let count = count.into();
        let locale = self.locale_for_choice(key, locale)?;

        let line = match self.get(key, &Replacements::new(), Some(&locale), true)? {
            MessageValue::Text(line) => line,
            MessageValue::Group(_) => key.to_string(),
        };

        let mut replace = replace.clone();
        if !replace.contains_key("count") {
            replace.insert("count", count.to_string());
        }

        let selected = self.selector().choose(&line, count, &locale);
        Ok(self.make_replacements(&selected, &replace))
    }

    fn locale_for_choice(&self, key: &str, locale: Option<&str>) -> Result<String> {
        let locale = self.resolve_locale(locale)?;
        if self.has_for_locale(key, &locale)? {
            return Ok(locale);
        }
        Ok(self.fallback().filter(|f| !f.is_empty()).unwrap_or(locale))
    }

    fn get_line(&self, parsed: &ParsedKey, locale: &str, replace: &Replacements) -> Result<Option<MessageValue>> {
        let lines = self.load_group(&parsed.namespace, &parsed.group, locale)?;

        let line = match &parsed.item {
            None => Some(MessageValue::Group(lines.as_ref().clone())),
            Some(item) => get_path(&lines, item).cloned(),
        };

        Ok(match line {
            Some(MessageValue::Text(text)) => Some(MessageValue::Text(self.make_replacements(&text, replace))),
            Some(MessageValue::Group(group)) if !group.is_empty() => {
                Some(self.replace_leaves(MessageValue::Group(group), replace))
            }
            _ => None,
        })
    }

    fn make_replacements(&self, line: &str, replace: &Replacements) -> String {
        if replace.has_objects() {
            let renderers = self.stringables.read().clone();
            make_replacements(line, replace, &renderers)
        } else {
            make_replacements(line, replace, &StringableRegistry::new())
        }
    }

    fn replace_leaves(&self, mut value: MessageValue, replace: &Replacements) -> MessageValue {
        if !replace.is_empty() {
            value.map_leaves(&mut |leaf| self.make_replacements(leaf, replace));
        }
        value
    }

    /// Seed lines directly, bypassing the loader. Keys are `group.item`;
    /// the item may be dotted to address nested structure.
    pub fn add_lines<I, K, V>(&self, lines: I, locale: &str, namespace: Option<&str>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<MessageValue>,
    {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        for (key, value) in lines {
            let key = key.as_ref();
            match key.split_once('.') {
                Some((group, item)) => self.loaded.set_line(namespace, group, locale, item, value.into()),
                None => warn!(key = %key, "ignoring line without a group"),
            }
        }
    }

    /// Make sure a group is loaded.
    pub fn load(&self, namespace: &str, group: &str, locale: &str) -> Result<()> {
        validate_locale(locale)?;
        self.load_group(namespace, group, locale).map(|_| ())
    }

    fn load_group(&self, namespace: &str, group: &str, locale: &str) -> Result<Arc<Lines>> {
        self.loaded.get_or_load(namespace, group, locale, || {
            let span = catalog_span(namespace, group, locale);
            let _entered = span.enter();
            let timer = Timer::start("load_catalog");

            let lines = self.loader.load(locale, group, Some(namespace))?;
            debug!(entries = lines.len(), "catalog loaded");

            timer.finish();
            Ok(lines)
        })
    }

    fn handle_missing_key(&self, key: &str, replace: &Replacements, locale: &str, allow_fallback: bool) -> String {
        if !missing_keys_enabled(self.id) {
            return key.to_string();
        }

        let callback = self.missing_key_callback.read().clone();
        let Some(callback) = callback else {
            return key.to_string();
        };

        let _suppressed = SuppressMissingKeys::new(self.id);
        callback(key, replace, locale, allow_fallback).unwrap_or_else(|| key.to_string())
    }

    /// Register the callback run for keys that miss every locale.
    ///
    /// Lookups made by the callback itself do not trigger it again.
    pub fn handle_missing_keys_using<F>(&self, callback: F) -> &Self
    where
        F: Fn(&str, &Replacements, &str, bool) -> Option<String> + Send + Sync + 'static,
    {
        *self.missing_key_callback.write() = Some(Arc::new(callback));
        self
    }

    /// Remove the missing-key callback.
    pub fn forget_missing_key_handler(&self) -> &Self {
        *self.missing_key_callback.write() = None;
        self
    }

    /// Register the base path of a namespace with the loader.
    pub fn add_namespace(&self, namespace: &str, hint: impl AsRef<Path>) {
        self.loader.add_namespace(namespace, hint.as_ref());
    }

    /// Append a default lang path to the loader.
    pub fn add_path(&self, path: impl AsRef<Path>) {
        self.loader.add_path(path.as_ref());
    }

    /// Append a flat-catalog path to the loader.
    pub fn add_json_path(&self, path: impl AsRef<Path>) {
        self.loader.add_json_path(path.as_ref());
    }

    /// Parse a key, honouring keys pinned with `set_parsed_key`.
    pub fn parse_key(&self, key: &str) -> ParsedKey {
        self.keys.parse(key)
    }

    /// Pin how `key` is parsed.
    pub fn set_parsed_key(&self, key: impl Into<String>, parsed: ParsedKey) {
        self.keys.set_parsed(key, parsed);
    }

    fn locale_array(&self, locale: &str) -> Vec<String> {
        let fallback = self.fallback();
        let locales = fallback_chain(Some(locale), &self.locale(), fallback.as_deref(), true);

        let hook = self.determine_locales.read().clone();
        match hook {
            Some(hook) => hook(&locales),
            None => locales,
        }
    }

    /// Replace the fallback chain computation. The hook receives the
    /// default chain and its result is used as-is.
    pub fn determine_locales_using<F>(&self, callback: F)
    where
        F: Fn(&[String]) -> Vec<String> + Send + Sync + 'static,
    {
        *self.determine_locales.write() = Some(Arc::new(callback));
    }

    /// The active plural selector.
    pub fn selector(&self) -> Arc<dyn PluralSelector> {
        self.selector.read().clone()
    }

    /// Replace the plural selector.
    pub fn set_selector(&self, selector: impl PluralSelector + 'static) {
        *self.selector.write() = Arc::new(selector);
    }

    /// The loader catalogs come from.
    pub fn loader(&self) -> &Arc<dyn Loader> {
        &self.loader
    }

    /// The current locale.
    pub fn locale(&self) -> String {
        self.locale_store
            .get()
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Set the current locale for the calling context.
    pub fn set_locale(&self, locale: impl Into<String>) -> Result<()> {
        let locale = locale.into();
        validate_locale(&locale)?;
        debug!(locale = %locale, "locale changed");
        self.locale_store.set(Some(locale));
        Ok(())
    }

    /// Switch the current locale until the returned guard is dropped.
    pub fn with_locale(&self, locale: impl Into<String>) -> Result<LocaleGuard<'_>> {
        let locale = locale.into();
        validate_locale(&locale)?;
        Ok(LocaleGuard::new(self.locale_store.as_ref(), locale))
    }

    /// The fallback locale, if set.
    pub fn fallback(&self) -> Option<String> {
        self.fallback.read().clone()
    }

    /// Set the locale consulted after the requested one. It is
    /// validated when a lookup reaches it.
    pub fn set_fallback(&self, fallback: impl Into<String>) {
        *self.fallback.write() = Some(fallback.into());
    }

    /// Replace every loaded group.
    pub fn set_loaded(&self, catalogs: LoadedCatalogs) {
        self.loaded.replace_all(catalogs);
    }

    /// Copy of every loaded group.
    pub fn loaded(&self) -> LoadedCatalogs {
        self.loaded.snapshot()
    }

    /// Register how values of type `T` render in replacements.
    pub fn stringable<T, F>(&self, renderer: F)
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.stringables.write().register::<T, F>(renderer);
    }

    /// The requested locale, or the current one. Locales name catalog
    /// paths, so a requested locale is validated like `set_locale` does.
    fn resolve_locale(&self, locale: Option<&str>) -> Result<String> {
        match locale.filter(|l| !l.is_empty()) {
            Some(locale) => {
                validate_locale(locale)?;
                Ok(locale.to_string())
            }
            None => Ok(self.locale()),
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale())
            .field("fallback", &self.fallback())
            .field("loaded_groups", &self.loaded.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nError;
    use crate::loader::ArrayLoader;
    use serde_json::json;

    fn lines(value: serde_json::Value) -> Lines {
        crate::tree::lines_from_document(value).unwrap()
    }

    fn translator() -> (Arc<ArrayLoader>, Translator) {
        let loader = Arc::new(ArrayLoader::new());
        let translator = Translator::new(loader.clone(), "en").unwrap();
        translator.set_fallback("en");
        (loader, translator)
    }

    fn text(value: MessageValue) -> String {
        value.into_text().unwrap()
    }

    #[test]
    fn test_get_group_line_with_replacements() {
        let (loader, t) = translator();
        loader.add_messages("en", "messages", lines(json!({"welcome": "Welcome, :name"})), None);

        let replace = Replacements::from([("name", "ada")]);
        assert_eq!(text(t.get("messages.welcome", &replace, None, true).unwrap()), "Welcome, ada");
    }

    #[test]
    fn test_missing_key_returns_key_with_replacements() {
        let (_, t) = translator();
        let replace = Replacements::from([("name", "ada")]);
        assert_eq!(text(t.get("Hi :name", &replace, None, true).unwrap()), "Hi ada");
    }

    #[test]
    fn test_whole_group_lookup() {
        let (loader, t) = translator();
        loader.add_messages("en", "validation", lines(json!({"required": ":attribute is required", "custom": {"email": {"required": "Email :attribute"}}})), None);

        let replace = Replacements::from([("attribute", "name")]);
        let group = t.get("validation", &replace, None, true).unwrap();
        assert_eq!(
            group,
            MessageValue::Group(lines(json!({"required": "name is required", "custom": {"email": {"required": "Email name"}}})))
        );

        let nested = t.get("validation.custom", &Replacements::new(), None, true).unwrap();
        assert!(nested.is_group());
    }

    #[test]
    fn test_empty_group_is_a_miss() {
        let (_, t) = translator();
        assert_eq!(text(t.get("nothing", &Replacements::new(), None, true).unwrap()), "nothing");
    }

    #[test]
    fn test_has_semantics() {
        let (loader, t) = translator();
        loader.add_messages("en", "auth", lines(json!({"failed": "Nope", "same": "auth.same"})), None);

        assert!(t.has("auth.failed", None, true).unwrap());
        assert!(!t.has("auth.missing", None, true).unwrap());
        // A line equal to its own key reads as missing
        assert!(!t.has("auth.same", None, true).unwrap());
        assert!(t.has("auth", None, true).unwrap());
    }

    #[test]
    fn test_has_for_locale_skips_fallback() {
        let (loader, t) = translator();
        loader.add_messages("en", "auth", lines(json!({"failed": "Nope"})), None);

        assert!(t.has("auth.failed", Some("fr"), true).unwrap());
        assert!(!t.has_for_locale("auth.failed", "fr").unwrap());
    }

    #[test]
    fn test_choice() {
        let (loader, t) = translator();
        loader.add_messages("en", "fruit", lines(json!({"apples": "one apple|:count apples"})), None);

        let none = Replacements::new();
        assert_eq!(t.choice("fruit.apples", 1, &none, None).unwrap(), "one apple");
        assert_eq!(t.choice("fruit.apples", 5, &none, None).unwrap(), "5 apples");
        assert_eq!(t.choice("fruit.apples", &vec![1, 2, 3], &none, None).unwrap(), "3 apples");

        let custom = Replacements::from([("count", "many")]);
        assert_eq!(t.choice("fruit.apples", 5, &custom, None).unwrap(), "many apples");
    }

    #[test]
    fn test_choice_uses_fallback_locale() {
        let (loader, t) = translator();
        loader.add_messages("en", "fruit", lines(json!({"apples": "one apple|:count apples"})), None);
        loader.add_messages("ru", "fruit", lines(json!({"pears": "груша|груши|груш"})), None);

        assert_eq!(t.choice("fruit.apples", 2, &Replacements::new(), Some("ru")).unwrap(), "2 apples");
        assert_eq!(t.choice("fruit.pears", 5, &Replacements::new(), Some("ru")).unwrap(), "груш");
    }

    #[test]
    fn test_choice_on_group_uses_key() {
        let (loader, t) = translator();
        loader.add_messages("en", "fruit", lines(json!({"apples": {"one": "apple"}})), None);
        assert_eq!(t.choice("fruit", 3, &Replacements::new(), None).unwrap(), "fruit");
    }

    #[test]
    fn test_add_lines_bypasses_loader() {
        let (loader, t) = translator();
        loader.add_messages("en", "messages", lines(json!({"from_loader": "loaded"})), None);

        t.add_lines([("messages.greeting", "Hello"), ("messages.nested.deep", "Deep")], "en", None);

        assert_eq!(text(t.get("messages.greeting", &Replacements::new(), None, true).unwrap()), "Hello");
        assert_eq!(text(t.get("messages.nested.deep", &Replacements::new(), None, true).unwrap()), "Deep");
        // The seeded group is considered loaded
        assert_eq!(text(t.get("messages.from_loader", &Replacements::new(), None, true).unwrap()), "messages.from_loader");
    }

    #[test]
    fn test_set_loaded_replaces_cache() {
        let (_, t) = translator();
        t.add_lines([("messages.greeting", "Hello")], "en", None);

        let mut catalogs = LoadedCatalogs::new();
        catalogs
            .entry("*".to_string())
            .or_default()
            .entry("messages".to_string())
            .or_default()
            .insert("en".to_string(), lines(json!({"farewell": "Bye"})));
        t.set_loaded(catalogs.clone());

        assert_eq!(t.loaded(), catalogs);
        assert_eq!(text(t.get("messages.farewell", &Replacements::new(), None, true).unwrap()), "Bye");
        assert_eq!(text(t.get("messages.greeting", &Replacements::new(), None, true).unwrap()), "messages.greeting");
    }

    #[test]
    fn test_set_locale_rejects_separators() {
        let (_, t) = translator();
        assert!(t.set_locale("../secrets").is_err());
        assert!(t.set_locale("en\\US").is_err());
        assert_eq!(t.locale(), "en");
        assert!(Translator::new(Arc::new(ArrayLoader::new()), "a/b").is_err());
    }

    #[test]
    fn test_requested_locale_is_validated() {
        let (_, t) = translator();
        let none = Replacements::new();

        assert!(matches!(t.get("k", &none, Some("../x"), true), Err(I18nError::InvalidLocale(_))));
        assert!(matches!(t.has("k", Some("a\\b"), true), Err(I18nError::InvalidLocale(_))));
        assert!(matches!(t.choice("k", 2, &none, Some("../x")), Err(I18nError::InvalidLocale(_))));
        assert!(matches!(t.load("*", "auth", "../x"), Err(I18nError::InvalidLocale(_))));
    }

    #[test]
    fn test_fallback_chain_is_validated() {
        let (_, t) = translator();
        t.determine_locales_using(|locales| {
            let mut locales = locales.to_vec();
            locales.push("../../etc".to_string());
            locales
        });

        let result = t.get("messages.absent", &Replacements::new(), None, true);
        assert!(matches!(result, Err(I18nError::InvalidLocale(_))));
    }

    #[test]
    fn test_with_locale_guard() {
        let (_, t) = translator();
        {
            let _guard = t.with_locale("de").unwrap();
            assert_eq!(t.locale(), "de");
        }
        assert_eq!(t.locale(), "en");
    }

    #[test]
    fn test_determine_locales_hook() {
        let (loader, t) = translator();
        loader.add_messages("es", "messages", lines(json!({"hi": "Hola"})), None);

        assert_eq!(text(t.get("messages.hi", &Replacements::new(), Some("es_MX"), true).unwrap()), "messages.hi");

        t.determine_locales_using(|locales| {
            let mut expanded = Vec::new();
            for locale in locales {
                expanded.push(locale.clone());
                if let Some((language, _)) = locale.split_once('_') {
                    expanded.push(language.to_string());
                }
            }
            expanded
        });
        assert_eq!(text(t.get("messages.hi", &Replacements::new(), Some("es_MX"), true).unwrap()), "Hola");
    }

    #[test]
    fn test_set_parsed_key() {
        let (loader, t) = translator();
        loader.add_messages("en", "auth", lines(json!({"failed": "Nope"})), None);

        t.set_parsed_key("login-failed", ParsedKey::new("*", "auth", Some("failed")));
        assert_eq!(text(t.get("login-failed", &Replacements::new(), None, true).unwrap()), "Nope");
    }

    struct Upper;

    impl PluralSelector for Upper {
        fn choose(&self, line: &str, _count: Count, _locale: &str) -> String {
            line.to_uppercase()
        }
    }

    #[test]
    fn test_custom_selector() {
        let (loader, t) = translator();
        loader.add_messages("en", "fruit", lines(json!({"apples": "apples"})), None);
        t.set_selector(Upper);
        assert_eq!(t.choice("fruit.apples", 2, &Replacements::new(), None).unwrap(), "APPLES");
    }

    #[derive(Debug)]
    struct Temperature(f64);

    impl fmt::Display for Temperature {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn test_stringable_renderer() {
        let (_, t) = translator();
        let replace = Replacements::new().object("temp", Temperature(21.5));

        assert_eq!(text(t.get("It is :temp", &replace, None, true).unwrap()), "It is 21.5");

        t.stringable::<Temperature, _>(|temp| format!("{:.1}°C", temp.0));
        assert_eq!(text(t.get("It is :temp", &replace, None, true).unwrap()), "It is 21.5°C");
    }
}
