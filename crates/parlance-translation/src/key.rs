//! Translation key parsing.
//!
//! Keys have the shape `[namespace::]group[.item]`. The item may itself
//! contain dots, which address nested structure inside the group.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Namespace used when a key carries none. Also marks flat catalogs.
pub const DEFAULT_NAMESPACE: &str = "*";

/// Group name reserved for flat catalogs.
pub const FLAT_GROUP: &str = "*";

/// A key split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedKey {
    /// `"*"` when the key names none.
    pub namespace: String,
    /// The catalog file's logical name.
    pub group: String,
    /// Dotted path inside the group. `None` addresses the whole group.
    pub item: Option<String>,
}

impl ParsedKey {
    /// Build a parsed key from its parts.
    pub fn new(namespace: impl Into<String>, group: impl Into<String>, item: Option<&str>) -> Self {
        Self {
            namespace: namespace.into(),
            group: group.into(),
            item: item.map(str::to_string),
        }
    }
}

/// Split `key` into namespace, group and item. Never fails.
pub fn parse_key(key: &str) -> ParsedKey {
    let (namespace, rest) = match key.split_once("::") {
        Some((namespace, rest)) => (namespace, rest),
        None => (DEFAULT_NAMESPACE, key),
    };

    match rest.split_once('.') {
        Some((group, item)) => ParsedKey::new(namespace, group, Some(item)),
        None => ParsedKey::new(namespace, rest, None),
    }
}

/// Key parser with per-key overrides.
///
/// Only pinned keys are stored. Any other key is parsed on each call.
#[derive(Debug, Default)]
pub struct KeyResolver {
    pinned: RwLock<HashMap<String, ParsedKey>>,
}

impl KeyResolver {
    /// A resolver with nothing pinned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key`, or return the result pinned for it.
    pub fn parse(&self, key: &str) -> ParsedKey {
        if let Some(parsed) = self.pinned.read().get(key) {
            return parsed.clone();
        }
        parse_key(key)
    }

    /// Pin the parse result for `key`.
    pub fn set_parsed(&self, key: impl Into<String>, parsed: ParsedKey) {
        self.pinned.write().insert(key.into(), parsed);
    }

    /// Number of pinned keys.
    pub fn pinned_len(&self) -> usize {
        self.pinned.read().len()
    }
}
