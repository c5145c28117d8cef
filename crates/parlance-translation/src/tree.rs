//! Nested message trees.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Item-path segments of one catalog group.
pub type Lines = BTreeMap<String, MessageValue>;

/// A resolved message: a leaf string or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValue {
    /// A leaf message.
    Text(String),
    /// A nested mapping of messages.
    Group(Lines),
}

impl MessageValue {
    /// The leaf string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// The leaf string, consuming the value.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// The nested mapping, if this is one.
    pub fn as_group(&self) -> Option<&Lines> {
        match self {
            Self::Group(lines) => Some(lines),
            Self::Text(_) => None,
        }
    }

    /// Whether this is a nested mapping.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Rewrite every leaf string in place.
    pub fn map_leaves(&mut self, f: &mut impl FnMut(&str) -> String) {
        match self {
            Self::Text(text) => *text = f(text),
            Self::Group(lines) => {
                for value in lines.values_mut() {
                    value.map_leaves(f);
                }
            }
        }
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Group(lines) => {
                f.write_str("{")?;
                for (i, (key, value)) in lines.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for MessageValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Lines> for MessageValue {
    fn from(lines: Lines) -> Self {
        Self::Group(lines)
    }
}

/// Convert a parsed document into message lines.
///
/// Objects and arrays become groups (arrays keyed by index) and `null`
/// becomes an empty group. Any other top-level scalar is not a catalog and
/// yields `None`. `null` members are dropped, booleans render as `"1"`/`""`.
pub fn lines_from_document(doc: Value) -> Option<Lines> {
    match doc {
        Value::Null => Some(Lines::new()),
        Value::Object(_) | Value::Array(_) => match convert(doc) {
            Some(MessageValue::Group(lines)) => Some(lines),
            _ => Some(Lines::new()),
        },
        _ => None,
    }
}

fn convert(value: Value) -> Option<MessageValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(MessageValue::Text(if b { "1" } else { "" }.to_string())),
        Value::Number(n) => Some(MessageValue::Text(n.to_string())),
        Value::String(s) => Some(MessageValue::Text(s)),
        Value::Array(items) => Some(MessageValue::Group(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(i, item)| convert(item).map(|v| (i.to_string(), v)))
                .collect(),
        )),
        Value::Object(map) => Some(MessageValue::Group(
            map.into_iter()
                .filter_map(|(k, v)| convert(v).map(|v| (k, v)))
                .collect(),
        )),
    }
}

/// Recursively merge `overlay` onto `base`; `overlay` wins on every leaf.
///
/// Two groups under the same key merge key-by-key. Any other collision
/// replaces the base value wholesale.
pub fn deep_merge(base: &mut Lines, overlay: Lines) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(MessageValue::Group(existing)), MessageValue::Group(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Look up a dotted item path.
///
/// A key present literally (dots included) wins over walking the segments.
pub fn get_path<'a>(lines: &'a Lines, path: &str) -> Option<&'a MessageValue> {
    if let Some(value) = lines.get(path) {
        return Some(value);
    }

    if !path.contains('.') {
        return None;
    }

    let mut segments = path.split('.');
    let mut current = lines.get(segments.next()?)?;
    for segment in segments {
        current = current.as_group()?.get(segment)?;
    }
    Some(current)
}

/// Set a value at a dotted path, creating (or overwriting) intermediate groups.
pub fn set_path(lines: &mut Lines, path: &str, value: MessageValue) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = match segments.pop() {
        Some(last) => last,
        None => return,
    };

    let mut current = lines;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| MessageValue::Group(Lines::new()));
        if !entry.is_group() {
            *entry = MessageValue::Group(Lines::new());
        }
        current = match entry {
            MessageValue::Group(inner) => inner,
            MessageValue::Text(_) => return,
        };
    }

    current.insert(last.to_string(), value);
}
