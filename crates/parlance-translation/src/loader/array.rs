use super::Loader;
use crate::error::Result;
use crate::key::DEFAULT_NAMESPACE;
use crate::tree::Lines;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// In-memory loader for tests and embedded catalogs.
#[derive(Debug, Default)]
pub struct ArrayLoader {
    // (namespace, locale, group) -> lines
    messages: RwLock<HashMap<(String, String, String), Lines>>,
}

impl ArrayLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the lines of a group, replacing any earlier registration.
    pub fn add_messages(
        &self,
        locale: &str,
        group: &str,
        messages: Lines,
        namespace: Option<&str>,
    ) -> &Self {
        let namespace = namespace.filter(|ns| !ns.is_empty()).unwrap_or(DEFAULT_NAMESPACE);
        self.messages.write().insert(
            (namespace.to_string(), locale.to_string(), group.to_string()),
            messages,
        );
        self
    }
}

impl Loader for ArrayLoader {
    fn load(&self, locale: &str, group: &str, namespace: Option<&str>) -> Result<Lines> {
        let namespace = namespace.filter(|ns| !ns.is_empty()).unwrap_or(DEFAULT_NAMESPACE);
        let key = (namespace.to_string(), locale.to_string(), group.to_string());
        Ok(self.messages.read().get(&key).cloned().unwrap_or_default())
    }

    fn add_namespace(&self, _namespace: &str, _hint: &Path) {}

    fn add_path(&self, _path: &Path) {}

    fn add_json_path(&self, _path: &Path) {}

    fn namespaces(&self) -> BTreeMap<String, PathBuf> {
        BTreeMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MessageValue;

    #[test]
    fn test_add_and_load() {
        let loader = ArrayLoader::new();
        let lines = Lines::from([("failed".to_string(), MessageValue::from("Nope"))]);

        loader
            .add_messages("en", "auth", lines.clone(), None)
            .add_messages("en", "auth", Lines::new(), Some("pkg"));

        assert_eq!(loader.load("en", "auth", None).unwrap(), lines);
        assert_eq!(loader.load("en", "auth", Some("*")).unwrap(), lines);
        assert!(loader.load("en", "auth", Some("pkg")).unwrap().is_empty());
        assert!(loader.load("fr", "auth", None).unwrap().is_empty());
    }

    #[test]
    fn test_registration_is_ignored() {
        let loader = ArrayLoader::new();
        loader.add_namespace("pkg", Path::new("/pkg"));
        loader.add_path(Path::new("/lang"));
        loader.add_json_path(Path::new("/json"));
        assert!(loader.namespaces().is_empty());
    }
}
