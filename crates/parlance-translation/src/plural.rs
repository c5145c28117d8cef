//! Plural form selection.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A count to pluralize on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Count {
    /// A whole count.
    Int(i64),
    /// A fractional count.
    Float(f64),
}

impl Count {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    /// Integer part, for modulo-based rules.
    fn truncated(self) -> i64 {
        match self {
            Self::Int(n) => n,
            Self::Float(n) => n.trunc() as i64,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! count_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Count {
                fn from(n: $t) -> Self {
                    Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

count_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f32> for Count {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<f64> for Count {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl<T> From<&[T]> for Count {
    fn from(items: &[T]) -> Self {
        Self::from(items.len())
    }
}

impl<T> From<&Vec<T>> for Count {
    fn from(items: &Vec<T>) -> Self {
        Self::from(items.len())
    }
}

/// Grammatical-number rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralFamily {
    /// A single form (Japanese, Chinese, Turkish, ...).
    Invariant,
    /// `n == 1` is singular (English, German, Spanish, ...).
    Germanic,
    /// `0` and `1` are singular (French, Hindi, Brazilian Portuguese, ...).
    French,
    /// one / few / many by last digits (Russian, Ukrainian, Serbian, ...).
    EastSlavic,
    /// Czech and Slovak.
    WestSlavic,
    Irish,
    Lithuanian,
    Slovenian,
    Macedonian,
    Maltese,
    Latvian,
    Polish,
    Welsh,
    Romanian,
    Arabic,
    /// Unknown languages: `n == 1` is singular.
    Generic,
}

impl PluralFamily {
    /// Family for a locale such as `en`, `pt-BR` or `sr_Latn`.
    pub fn for_locale(locale: &str) -> Self {
        let normalized = locale.replace('-', "_");
        if normalized == "pt_BR" {
            return Self::French;
        }

        let language = normalized
            .split('_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "az" | "bo" | "dz" | "id" | "ja" | "jv" | "ka" | "km" | "kn" | "ko" | "ms" | "th"
            | "tr" | "vi" | "zh" => Self::Invariant,

            "af" | "bn" | "bg" | "ca" | "da" | "de" | "el" | "en" | "eo" | "es" | "et" | "eu"
            | "fa" | "fi" | "fo" | "fur" | "fy" | "gl" | "gu" | "ha" | "he" | "hu" | "is"
            | "it" | "ku" | "lb" | "ml" | "mn" | "mr" | "nah" | "nb" | "ne" | "nl" | "nn"
            | "no" | "oc" | "om" | "or" | "pa" | "pap" | "ps" | "pt" | "so" | "sq" | "sv"
            | "sw" | "ta" | "te" | "tk" | "ur" | "zu" => Self::Germanic,

            "am" | "bh" | "fil" | "fr" | "gun" | "hi" | "hy" | "ln" | "mg" | "nso" | "ti"
            | "wa" => Self::French,

            "be" | "bs" | "hr" | "ru" | "sh" | "sr" | "uk" => Self::EastSlavic,
            "cs" | "sk" => Self::WestSlavic,
            "ga" => Self::Irish,
            "lt" => Self::Lithuanian,
            "sl" => Self::Slovenian,
            "mk" => Self::Macedonian,
            "mt" => Self::Maltese,
            "lv" => Self::Latvian,
            "pl" => Self::Polish,
            "cy" => Self::Welsh,
            "ro" => Self::Romanian,
            "ar" => Self::Arabic,
            _ => Self::Generic,
        }
    }

    /// Index of the form to use for `count`.
    pub fn index(self, count: Count) -> usize {
        let n = count.as_f64();
        let i = count.truncated();
        let (m10, m100) = (i % 10, i % 100);

        match self {
            Self::Invariant => 0,
            Self::Germanic | Self::Generic => usize::from(n != 1.0),
            Self::French => usize::from(!(n == 0.0 || n == 1.0)),
            Self::EastSlavic => {
                if m10 == 1 && m100 != 11 {
                    0
                } else if (2..=4).contains(&m10) && !(10..20).contains(&m100) {
                    1
                } else {
                    2
                }
            }
            Self::WestSlavic => {
                if n == 1.0 {
                    0
                } else if (2.0..=4.0).contains(&n) {
                    1
                } else {
                    2
                }
            }
            Self::Irish => {
                if n == 1.0 {
                    0
                } else if n == 2.0 {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if m10 == 1 && m100 != 11 {
                    0
                } else if m10 >= 2 && !(10..20).contains(&m100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match m100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Macedonian => usize::from(m10 != 1),
            Self::Maltese => {
                if n == 1.0 {
                    0
                } else if n == 0.0 || (2..=10).contains(&m100) {
                    1
                } else if (11..=19).contains(&m100) {
                    2
                } else {
                    3
                }
            }
            Self::Latvian => {
                if n == 0.0 {
                    0
                } else if m10 == 1 && m100 != 11 {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1.0 {
                    0
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    1
                } else {
                    2
                }
            }
            Self::Welsh => {
                if n == 1.0 {
                    0
                } else if n == 2.0 {
                    1
                } else if n == 8.0 || n == 11.0 {
                    2
                } else {
                    3
                }
            }
            Self::Romanian => {
                if n == 1.0 {
                    0
                } else if n == 0.0 || (1..20).contains(&m100) {
                    1
                } else {
                    2
                }
            }
            Self::Arabic => {
                if n == 0.0 {
                    0
                } else if n == 1.0 {
                    1
                } else if n == 2.0 {
                    2
                } else if (3..=10).contains(&m100) {
                    3
                } else if (11..=99).contains(&m100) {
                    4
                } else {
                    5
                }
            }
        }
    }
}

/// Picks one segment of a `|`-delimited message.
pub trait PluralSelector: Send + Sync {
    fn choose(&self, line: &str, count: Count, locale: &str) -> String;
}

/// The default selector.
///
/// Segments may carry an explicit condition: `{0}` or `[0]` for an exact
/// value, `[1,19]` for an inclusive range (`*` leaves a side open) and
/// `{1,21,31}` for a set of values. The first segment whose condition holds
/// wins. Otherwise conditions are stripped and the position is chosen: one
/// segment is returned as-is, two split on `count == 1`, and more use the
/// locale's [`PluralFamily`], falling back to the last segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageSelector;

impl MessageSelector {
    /// The default selector.
    pub fn new() -> Self {
        Self
    }
}

fn condition_regex() -> Option<&'static Regex> {
    static CONDITION: OnceLock<Option<Regex>> = OnceLock::new();
    CONDITION
        .get_or_init(|| Regex::new(r"(?s)^[\{\[]([^\[\]\{\}]*)[\}\]](.*)").ok())
        .as_ref()
}

impl PluralSelector for MessageSelector {
    fn choose(&self, line: &str, count: Count, locale: &str) -> String {
        let segments: Vec<&str> = line.split('|').collect();

        if let Some(value) = segments.iter().find_map(|s| extract(s, count)) {
            return value.trim().to_string();
        }

        let segments: Vec<&str> = segments.into_iter().map(strip_condition).collect();

        let index = match segments.len() {
            1 => 0,
            2 => usize::from(count.as_f64() != 1.0),
            _ => PluralFamily::for_locale(locale).index(count),
        };

        segments
            .get(index)
            .or_else(|| segments.last())
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

/// The text of `segment` if its explicit condition matches `count`.
fn extract(segment: &str, count: Count) -> Option<&str> {
    let caps = condition_regex()?.captures(segment)?;
    let condition = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str();

    let n = count.as_f64();
    let parts: Vec<&str> = condition.split(',').map(str::trim).collect();

    let matched = match parts.as_slice() {
        [exact] => number(exact) == Some(n),
        [from, to] => {
            let lower = *from == "*" || number(from).is_some_and(|from| n >= from);
            let upper = *to == "*" || number(to).is_some_and(|to| n <= to);
            lower && upper
        }
        values => values.iter().any(|v| number(v) == Some(n)),
    };

    matched.then_some(value)
}

fn strip_condition(segment: &str) -> &str {
    match condition_regex()
        .and_then(|re| re.captures(segment))
        .and_then(|caps| caps.get(2))
    {
        Some(rest) => rest.as_str(),
        None => segment,
    }
}

fn number(s: &str) -> Option<f64> {
    s.parse().ok()
}
