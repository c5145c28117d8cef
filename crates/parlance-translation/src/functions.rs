//! Process-wide translator and the free functions that forward to it.

use crate::error::{I18nError, Result};
use crate::plural::Count;
use crate::replace::Replacements;
use crate::translator::Translator;
use crate::tree::MessageValue;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

fn slot() -> &'static RwLock<Option<Arc<Translator>>> {
    static TRANSLATOR: OnceLock<RwLock<Option<Arc<Translator>>>> = OnceLock::new();
    TRANSLATOR.get_or_init(|| RwLock::new(None))
}

/// Install the translator used by the free functions, returning the one it
/// replaces.
pub fn install(translator: Arc<Translator>) -> Option<Arc<Translator>> {
    slot().write().replace(translator)
}

/// Remove the installed translator.
pub fn uninstall() -> Option<Arc<Translator>> {
    slot().write().take()
}

/// The installed translator.
pub fn translator() -> Result<Arc<Translator>> {
    slot().read().clone().ok_or(I18nError::NotInstalled)
}

/// Result of [`translate`].
#[derive(Debug, Clone)]
pub enum Translated {
    /// No key was given.
    Engine(Arc<Translator>),
    /// The resolved message.
    Message(MessageValue),
}

impl Translated {
    /// The message text, if this is a leaf message.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Message(message) => message.into_text(),
            Self::Engine(_) => None,
        }
    }
}

/// Translate `key` with the installed translator. Without a key the
/// translator itself is returned.
pub fn translate(key: Option<&str>, replace: &Replacements, locale: Option<&str>) -> Result<Translated> {
    let translator = translator()?;
    match key {
        None => Ok(Translated::Engine(translator)),
        Some(key) => translator.trans(key, replace, locale).map(Translated::Message),
    }
}

/// Pluralize `key` with the installed translator.
pub fn trans_choice(
    key: &str,
    count: impl Into<Count>,
    replace: &Replacements,
    locale: Option<&str>,
) -> Result<String> {
    translator()?.choice(key, count, replace, locale)
}
