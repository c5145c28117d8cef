//! Placeholder substitution.
//!
//! A line like `"Welcome, :name"` is rewritten from a [`Replacements`] set.
//! Each plain entry registers three tokens: `:Name` (first letter
//! upper-cased), `:NAME` (fully upper-cased) and `:name` (as given). All
//! tokens are applied in one pass, so a substituted value is never scanned
//! again. Tag entries rewrite `<key>...</key>` regions through a callback
//! before the token pass.

use regex::Regex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback for a tag replacement; receives the enclosed text.
pub type TagFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Renders a registered type to a string.
pub type RendererFn = Arc<dyn Fn(&(dyn Any + Send + Sync)) -> String + Send + Sync>;

/// One replacement value.
#[derive(Clone)]
pub enum ReplaceValue {
    /// Plain text for `:key` tokens.
    Text(String),
    /// Callback for `<key>...</key>` regions.
    Tag(TagFn),
    /// A typed value, rendered by its registered renderer or `display`.
    Object {
        /// Exact type of `value`, the renderer lookup key.
        type_id: TypeId,
        /// The value itself.
        value: Arc<dyn Any + Send + Sync>,
        /// `Display` form used without a renderer.
        display: String,
    },
}

impl fmt::Debug for ReplaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Tag(_) => f.write_str("Tag(..)"),
            Self::Object { display, .. } => f.debug_tuple("Object").field(display).finish(),
        }
    }
}

/// Ordered replacement set. Re-inserting a key keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Replacements {
    entries: Vec<(String, ReplaceValue)>,
}

impl Replacements {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Replacements::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value.to_string());
        self
    }

    /// Builder form of [`Replacements::insert_tag`].
    pub fn tag<F>(mut self, key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.insert_tag(key, callback);
        self
    }

    /// Builder form of [`Replacements::insert_object`].
    pub fn object<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Any + fmt::Display + Send + Sync,
    {
        self.insert_object(key, value);
        self
    }

    /// Set a text value for `:key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key.into(), ReplaceValue::Text(value.into()));
    }

    /// Set a callback for `<key>...</key>` regions. It receives the
    /// enclosed text.
    pub fn insert_tag<F>(&mut self, key: impl Into<String>, callback: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.put(key.into(), ReplaceValue::Tag(Arc::new(callback)));
    }

    /// Insert a typed value. A renderer registered for `T` formats it,
    /// otherwise its `Display` form is used.
    pub fn insert_object<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + fmt::Display + Send + Sync,
    {
        let display = value.to_string();
        self.put(
            key.into(),
            ReplaceValue::Object {
                type_id: TypeId::of::<T>(),
                value: Arc::new(value),
                display,
            },
        );
    }

    fn put(&mut self, key: String, value: ReplaceValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The value for `key`.
    pub fn get(&self, key: &str) -> Option<&ReplaceValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReplaceValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether any entry is a typed object.
    pub fn has_objects(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, v)| matches!(v, ReplaceValue::Object { .. }))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (key, value) in iter {
            replacements.insert(key, value);
        }
        replacements
    }
}

/// Renderers for typed replacement values, keyed by exact type.
#[derive(Clone, Default)]
pub struct StringableRegistry {
    renderers: HashMap<TypeId, RendererFn>,
}

impl StringableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the renderer for values of type `T`.
    pub fn register<T, F>(&mut self, renderer: F)
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let renderer: RendererFn = Arc::new(move |value: &(dyn Any + Send + Sync)| {
            value.downcast_ref::<T>().map(&renderer).unwrap_or_default()
        });
        self.renderers.insert(TypeId::of::<T>(), renderer);
    }

    /// Whether a renderer is registered for `type_id`.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.renderers.contains_key(&type_id)
    }

    fn render(&self, type_id: TypeId, value: &(dyn Any + Send + Sync)) -> Option<String> {
        self.renderers.get(&type_id).map(|renderer| renderer(value))
    }
}

impl fmt::Debug for StringableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringableRegistry")
            .field("renderers", &self.renderers.len())
            .finish()
    }
}

/// Apply `replace` to `line`. An empty set returns `line` unchanged.
pub fn make_replacements(line: &str, replace: &Replacements, renderers: &StringableRegistry) -> String {
    if replace.is_empty() {
        return line.to_string();
    }

    let mut line = line.to_string();
    let mut tokens: HashMap<String, String> = HashMap::new();

    for (key, value) in replace.iter() {
        let value = match value {
            ReplaceValue::Tag(callback) => {
                line = replace_tag(&line, key, callback);
                continue;
            }
            ReplaceValue::Object {
                type_id,
                value,
                display,
            } => renderers
                .render(*type_id, &**value)
                .unwrap_or_else(|| display.clone()),
            ReplaceValue::Text(text) => text.clone(),
        };

        tokens.insert(format!(":{}", ucfirst(key)), ucfirst(&value));
        tokens.insert(format!(":{}", key.to_uppercase()), value.to_uppercase());
        tokens.insert(format!(":{}", key), value);
    }

    substitute(&line, tokens)
}

fn replace_tag(line: &str, key: &str, callback: &TagFn) -> String {
    let escaped = regex::escape(key);
    let pattern = format!("<{0}>(.*?)</{0}>", escaped);
    match Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(line, |caps: &regex::Captures<'_>| callback(&caps[1]))
            .into_owned(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "unusable tag replacement");
            line.to_string()
        }
    }
}

/// Single pass, longest token first at every position.
fn substitute(line: &str, tokens: HashMap<String, String>) -> String {
    let mut tokens: Vec<(String, String)> = tokens.into_iter().collect();
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match tokens.iter().find(|(token, _)| tail.starts_with(token.as_str())) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push(':');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apply(line: &str, replace: &Replacements) -> String {
        make_replacements(line, replace, &StringableRegistry::new())
    }

    #[test]
    fn test_case_forms() {
        let replace = Replacements::from([("name", "sam")]);
        assert_eq!(apply(":Name is here", &replace), "Sam is here");
        assert_eq!(apply(":NAME is here", &replace), "SAM is here");
        assert_eq!(apply(":name is here", &replace), "sam is here");
    }

    #[test]
    fn test_single_pass() {
        let replace = Replacements::from([("a", ":b"), ("b", "x")]);
        assert_eq!(apply(":a and :b", &replace), ":b and x");
    }

    #[test]
    fn test_longest_token_wins() {
        let replace = Replacements::from([("name", "short"), ("name_full", "long")]);
        assert_eq!(apply(":name_full / :name", &replace), "long / short");
    }

    #[test]
    fn test_unmatched_colons_survive() {
        let replace = Replacements::from([("time", "noon")]);
        assert_eq!(apply("at :time: 12:00 :other", &replace), "at noon: 12:00 :other");
    }

    #[test]
    fn test_tag_callback() {
        let replace = Replacements::new()
            .tag("link", |inner| format!("<a href=\"/docs\">{}</a>", inner))
            .with("name", "Ada");

        assert_eq!(
            apply("Hi :name, read <link>the docs</link> or <link>FAQ</link>", &replace),
            "Hi Ada, read <a href=\"/docs\">the docs</a> or <a href=\"/docs\">FAQ</a>"
        );
    }

    #[test]
    fn test_tag_keys_are_escaped() {
        let replace = Replacements::new().tag("b+", |inner| inner.to_uppercase());
        assert_eq!(apply("<b+>loud</b+> <bb>x</bb>", &replace), "LOUD <bb>x</bb>");
    }

    #[test]
    fn test_tags_do_not_register_tokens() {
        let replace = Replacements::new().tag("strong", |inner| inner.to_string());
        assert_eq!(apply(":strong stays", &replace), ":strong stays");
    }

    struct Money(i64);

    impl fmt::Display for Money {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn test_stringable_renderer() {
        let replace = Replacements::new().object("total", Money(1250));
        assert_eq!(apply("Total: :total", &replace), "Total: 1250");

        let mut renderers = StringableRegistry::new();
        renderers.register::<Money, _>(|m| format!("${}.{:02}", m.0 / 100, m.0 % 100));
        assert!(renderers.contains(TypeId::of::<Money>()));
        assert_eq!(make_replacements("Total: :total", &replace, &renderers), "Total: $12.50");
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut replace = Replacements::from([("a", "1"), ("b", "2")]);
        replace.insert("a", "3");
        let keys: Vec<&str> = replace.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(matches!(replace.get("a"), Some(ReplaceValue::Text(v)) if v == "3"));
    }

    proptest! {
        #[test]
        fn test_empty_set_is_identity(line in "\\PC*") {
            prop_assert_eq!(apply(&line, &Replacements::new()), line);
        }

        #[test]
        fn test_lines_without_colons_unchanged(line in "[^:]*", value in "[a-z]{0,8}") {
            let replace = Replacements::from([("key", value.as_str())]);
            prop_assert_eq!(apply(&line, &replace), line);
        }
    }
}
