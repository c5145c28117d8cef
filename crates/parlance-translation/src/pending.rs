//! Strings that may or may not end up translated.

use crate::error::Result;
use crate::plural::Count;
use crate::replace::Replacements;
use crate::translator::Translator;
use crate::tree::MessageValue;
use std::collections::BTreeMap;
use std::fmt;

/// A raw string plus, once requested, its translation.
///
/// Displays the translation if one was made, the raw string otherwise.
#[derive(Debug)]
pub struct PotentiallyTranslatedString<'a> {
    string: String,
    translation: Option<String>,
    translator: &'a Translator,
}

impl<'a> PotentiallyTranslatedString<'a> {
    /// Wrap `string`, untranslated.
    pub fn new(string: impl Into<String>, translator: &'a Translator) -> Self {
        Self {
            string: string.into(),
            translation: None,
            translator,
        }
    }

    /// Translate the string as a key. A key resolving to a whole group
    /// leaves the raw string in place.
    pub fn translate(&mut self, replace: &Replacements, locale: Option<&str>) -> Result<&mut Self> {
        self.translation = match self.translator.get(&self.string, replace, locale, true)? {
            MessageValue::Text(text) => Some(text),
            MessageValue::Group(_) => None,
        };
        Ok(self)
    }

    /// Translate the string as a plural key.
    pub fn translate_choice(
        &mut self,
        count: impl Into<Count>,
        replace: &Replacements,
        locale: Option<&str>,
    ) -> Result<&mut Self> {
        self.translation = Some(self.translator.choice(&self.string, count, replace, locale)?);
        Ok(self)
    }

    /// The raw string.
    pub fn original(&self) -> &str {
        &self.string
    }

    /// The translation, if one was made.
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// The translation, or the raw string.
    pub fn into_string(self) -> String {
        self.translation.unwrap_or(self.string)
    }
}

impl fmt::Display for PotentiallyTranslatedString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.translation.as_deref().unwrap_or(&self.string))
    }
}

/// Messages collected while validating input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBag {
    keyed: BTreeMap<String, String>,
    unkeyed: Vec<String>,
}

impl MessageBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a message for `attribute`.
    ///
    /// With `message` the result is stored under `attribute`; without it
    /// `attribute` itself is the message and is appended unkeyed. Nothing is
    /// stored until [`PendingTranslation::finish`] runs.
    pub fn pending<'a>(
        &'a mut self,
        translator: &'a Translator,
        attribute: &str,
        message: Option<&str>,
    ) -> PendingTranslation<'a> {
        let (key, string) = match message {
            Some(message) => (Some(attribute.to_string()), message),
            None => (None, attribute),
        };

        PendingTranslation {
            bag: self,
            key,
            string: PotentiallyTranslatedString::new(string, translator),
        }
    }

    /// The message stored for `attribute`.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.keyed.get(attribute).map(String::as_str)
    }

    /// Messages stored by attribute.
    pub fn keyed(&self) -> &BTreeMap<String, String> {
        &self.keyed
    }

    /// Messages stored without an attribute, in order.
    pub fn unkeyed(&self) -> &[String] {
        &self.unkeyed
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.keyed.len() + self.unkeyed.len()
    }

    /// Whether the bag holds no message.
    pub fn is_empty(&self) -> bool {
        self.keyed.is_empty() && self.unkeyed.is_empty()
    }
}

/// A message on its way into a [`MessageBag`].
#[must_use = "nothing is written to the bag until `finish` is called"]
#[derive(Debug)]
pub struct PendingTranslation<'a> {
    bag: &'a mut MessageBag,
    key: Option<String>,
    string: PotentiallyTranslatedString<'a>,
}

impl<'a> PendingTranslation<'a> {
    /// Translate the message as a key.
    pub fn translate(mut self, replace: &Replacements, locale: Option<&str>) -> Result<Self> {
        self.string.translate(replace, locale)?;
        Ok(self)
    }

    /// Translate the message as a plural key.
    pub fn translate_choice(
        mut self,
        count: impl Into<Count>,
        replace: &Replacements,
        locale: Option<&str>,
    ) -> Result<Self> {
        self.string.translate_choice(count, replace, locale)?;
        Ok(self)
    }

    /// Write the message and return it.
    pub fn finish(self) -> String {
        let message = self.string.into_string();
        match self.key {
            Some(key) => {
                self.bag.keyed.insert(key, message.clone());
            }
            None => self.bag.unkeyed.push(message.clone()),
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ArrayLoader;
    use crate::tree::lines_from_document;
    use serde_json::json;
    use std::sync::Arc;

    fn translator() -> Translator {
        let loader = ArrayLoader::new();
        loader.add_messages(
            "en",
            "validation",
            lines_from_document(json!({
                "required": "The :attribute field is required.",
                "min": "At least one item.|At least :count items.",
                "custom": {"email": "Bad email"}
            }))
            .unwrap(),
            None,
        );
        Translator::new(Arc::new(loader), "en").unwrap()
    }

    #[test]
    fn test_untranslated_displays_original() {
        let t = translator();
        let string = PotentiallyTranslatedString::new("validation.required", &t);
        assert_eq!(string.to_string(), "validation.required");
        assert_eq!(string.translation(), None);
    }

    #[test]
    fn test_translate_and_choice() {
        let t = translator();
        let mut string = PotentiallyTranslatedString::new("validation.required", &t);
        string.translate(&Replacements::from([("attribute", "name")]), None).unwrap();
        assert_eq!(string.to_string(), "The name field is required.");
        assert_eq!(string.original(), "validation.required");

        let mut plural = PotentiallyTranslatedString::new("validation.min", &t);
        plural.translate_choice(3, &Replacements::new(), None).unwrap();
        assert_eq!(plural.into_string(), "At least 3 items.");
    }

    #[test]
    fn test_group_result_keeps_original() {
        let t = translator();
        let mut string = PotentiallyTranslatedString::new("validation.custom", &t);
        string.translate(&Replacements::new(), None).unwrap();
        assert_eq!(string.to_string(), "validation.custom");
    }

    #[test]
    fn test_pending_writes_only_on_finish() {
        let t = translator();
        let mut bag = MessageBag::new();

        let pending = bag
            .pending(&t, "email", Some("validation.required"))
            .translate(&Replacements::from([("attribute", "email")]), None)
            .unwrap();
        drop(pending);
        assert!(bag.is_empty());

        let message = bag
            .pending(&t, "email", Some("validation.required"))
            .translate(&Replacements::from([("attribute", "email")]), None)
            .unwrap()
            .finish();

        assert_eq!(message, "The email field is required.");
        assert_eq!(bag.get("email"), Some("The email field is required."));
    }

    #[test]
    fn test_pending_without_message_is_unkeyed() {
        let t = translator();
        let mut bag = MessageBag::new();

        bag.pending(&t, "Something went wrong", None).finish();
        bag.pending(&t, "validation.min", None)
            .translate_choice(1, &Replacements::new(), None)
            .unwrap()
            .finish();

        assert_eq!(bag.unkeyed(), ["Something went wrong", "At least one item."]);
        assert_eq!(bag.len(), 2);
    }
}
