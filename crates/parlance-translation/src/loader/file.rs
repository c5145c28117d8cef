//! Catalog files on a [`Filesystem`].

use super::Loader;
use crate::error::{I18nError, Result};
use crate::key::{DEFAULT_NAMESPACE, FLAT_GROUP};
use crate::tree::{deep_merge, lines_from_document, Lines};
use parking_lot::RwLock;
use parlance_common_config::GroupFormat;
use parlance_common_fs::Filesystem;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads grouped files (`{path}/{locale}/{group}.{ext}`), namespace overrides
/// (`{path}/vendor/{namespace}/{locale}/{group}.{ext}`) and flat catalogs
/// (`{path}/{locale}.json`).
///
/// Grouped layers are deep-merged in registration order, later paths
/// winning. Flat catalogs are shallow-merged: JSON paths first, then the
/// default paths.
pub struct FileLoader {
    files: Arc<dyn Filesystem>,
    paths: RwLock<Vec<PathBuf>>,
    json_paths: RwLock<Vec<PathBuf>>,
    hints: RwLock<BTreeMap<String, PathBuf>>,
    format: GroupFormat,
}

impl FileLoader {
    /// A loader over `files` with `paths` as the default lang paths, in
    /// ascending precedence.
    pub fn new<I, P>(files: Arc<dyn Filesystem>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files,
            paths: RwLock::new(paths.into_iter().map(Into::into).collect()),
            json_paths: RwLock::new(Vec::new()),
            hints: RwLock::new(BTreeMap::new()),
            format: GroupFormat::default(),
        }
    }

    /// Set the format of grouped files.
    pub fn with_format(mut self, format: GroupFormat) -> Self {
        self.format = format;
        self
    }

    /// The grouped file format.
    pub fn format(&self) -> GroupFormat {
        self.format
    }

    /// Registered default paths, in order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.read().clone()
    }

    /// Registered flat-catalog paths, in order.
    pub fn json_paths(&self) -> Vec<PathBuf> {
        self.json_paths.read().clone()
    }

    fn group_file(&self, base: &Path, locale: &str, group: &str) -> PathBuf {
        base.join(locale)
            .join(format!("{}.{}", group, self.format.extension()))
    }

    fn load_paths(&self, paths: &[PathBuf], locale: &str, group: &str) -> Lines {
        paths.iter().fold(Lines::new(), |mut output, path| {
            let file = self.group_file(path, locale, group);
            if let Some(lines) = self.read_group(&file) {
                deep_merge(&mut output, lines);
            }
            output
        })
    }

    fn load_namespaced(&self, locale: &str, group: &str, namespace: &str) -> Lines {
        let hint = self.hints.read().get(namespace).cloned();
        match hint {
            Some(hint) => {
                let lines = self.load_paths(std::slice::from_ref(&hint), locale, group);
                self.load_namespace_overrides(lines, locale, group, namespace)
            }
            None => {
                debug!(namespace = %namespace, "no hint registered for namespace");
                Lines::new()
            }
        }
    }

    fn load_namespace_overrides(
        &self,
        lines: Lines,
        locale: &str,
        group: &str,
        namespace: &str,
    ) -> Lines {
        self.paths().iter().fold(lines, |mut output, path| {
            let vendor = path.join("vendor").join(namespace);
            let file = self.group_file(&vendor, locale, group);
            if let Some(overrides) = self.read_group(&file) {
                deep_merge(&mut output, overrides);
            }
            output
        })
    }

    /// Read one grouped layer. Missing files are skipped silently, broken
    /// ones with a warning.
    fn read_group(&self, file: &Path) -> Option<Lines> {
        if !self.files.exists(file) {
            return None;
        }

        let document = match self.files.get_require(file) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "skipping unreadable catalog layer");
                return None;
            }
        };

        let lines = lines_from_document(document);
        if lines.is_none() {
            warn!(path = %file.display(), "skipping catalog layer that is not a mapping");
        }
        lines
    }

    fn load_json_paths(&self, locale: &str) -> Result<Lines> {
        let mut sources = self.json_paths();
        sources.extend(self.paths());

        let mut output = Lines::new();
        for path in sources {
            let full = path.join(format!("{}.json", locale));
            if !self.files.exists(&full) {
                continue;
            }

            let content = self.files.get(&full)?;
            output.extend(parse_flat_catalog(&full, &content)?);
        }

        Ok(output)
    }
}

fn parse_flat_catalog(path: &Path, content: &str) -> Result<Lines> {
    let malformed = |message: String| I18nError::MalformedCatalog {
        path: path.to_path_buf(),
        message,
    };

    let document: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

    match document {
        Value::Object(_) | Value::Array(_) => {
            lines_from_document(document).ok_or_else(|| malformed("not a mapping".to_string()))
        }
        _ => Err(malformed("top level must be an object".to_string())),
    }
}

impl Loader for FileLoader {
    fn load(&self, locale: &str, group: &str, namespace: Option<&str>) -> Result<Lines> {
        match namespace {
            Some(DEFAULT_NAMESPACE) if group == FLAT_GROUP => self.load_json_paths(locale),
            None | Some(DEFAULT_NAMESPACE) => Ok(self.load_paths(&self.paths(), locale, group)),
            Some(namespace) => Ok(self.load_namespaced(locale, group, namespace)),
        }
    }

    fn add_namespace(&self, namespace: &str, hint: &Path) {
        self.hints
            .write()
            .insert(namespace.to_string(), hint.to_path_buf());
    }

    fn add_path(&self, path: &Path) {
        self.paths.write().push(path.to_path_buf());
    }

    fn add_json_path(&self, path: &Path) {
        self.json_paths.write().push(path.to_path_buf());
    }

    fn namespaces(&self) -> BTreeMap<String, PathBuf> {
        self.hints.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{get_path, MessageValue};
    use parlance_common_fs::LocalFilesystem;
    use parlance_test_utils::LangTree;

    fn loader(paths: &[&Path]) -> FileLoader {
        FileLoader::new(Arc::new(LocalFilesystem::new()), paths.iter().map(|p| p.to_path_buf()))
    }

    fn text(lines: &Lines, path: &str) -> Option<String> {
        get_path(lines, path).and_then(|v| v.as_str()).map(str::to_string)
    }

    #[test]
    fn test_later_paths_win() {
        let first = LangTree::new().group("en", "messages", "a: first-a\nnested:\n  x: first-x\n  y: first-y\n");
        let second = LangTree::new().group("en", "messages", "b: second-b\nnested:\n  y: second-y\n");

        let lines = loader(&[first.path(), second.path()])
            .load("en", "messages", None)
            .unwrap();

        assert_eq!(text(&lines, "a").as_deref(), Some("first-a"));
        assert_eq!(text(&lines, "b").as_deref(), Some("second-b"));
        assert_eq!(text(&lines, "nested.x").as_deref(), Some("first-x"));
        assert_eq!(text(&lines, "nested.y").as_deref(), Some("second-y"));
    }

    #[test]
    fn test_missing_group_is_empty() {
        let tree = LangTree::new();
        let lines = loader(&[tree.path()]).load("en", "absent", Some("*")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_namespace_hint_and_vendor_override() {
        let package = LangTree::new().group("en", "invoices", "due: Due\npaid: Paid\n");
        let app = LangTree::new().vendor("billing", "en", "invoices", "due: Payment due\n");

        let loader = loader(&[app.path()]);
        loader.add_namespace("billing", package.path());

        let lines = loader.load("en", "invoices", Some("billing")).unwrap();
        assert_eq!(text(&lines, "due").as_deref(), Some("Payment due"));
        assert_eq!(text(&lines, "paid").as_deref(), Some("Paid"));

        assert!(loader.load("en", "invoices", Some("unknown")).unwrap().is_empty());
    }

    #[test]
    fn test_flat_catalogs_merge_shallow() {
        let extra = LangTree::new().json("fr", r#"{"Hello": "Salut", "nested": {"a": "1", "b": "2"}}"#);
        let base = LangTree::new().json("fr", r#"{"Hello": "Bonjour", "nested": {"a": "x"}}"#);

        let loader = loader(&[base.path()]);
        loader.add_json_path(extra.path());

        let lines = loader.load("fr", "*", Some("*")).unwrap();
        assert_eq!(text(&lines, "Hello").as_deref(), Some("Bonjour"));
        assert_eq!(get_path(&lines, "nested.b"), None);
        assert_eq!(get_path(&lines, "nested.a"), Some(&MessageValue::from("x")));
    }

    #[test]
    fn test_malformed_flat_catalog_names_path() {
        let tree = LangTree::new().json("en", "{ invalid");
        let err = loader(&[tree.path()]).load("en", "*", Some("*")).unwrap_err();

        match err {
            I18nError::MalformedCatalog { path, .. } => assert_eq!(path, tree.path().join("en.json")),
            other => panic!("expected MalformedCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_null_flat_catalog_is_malformed() {
        let tree = LangTree::new().json("en", "null");
        let result = loader(&[tree.path()]).load("en", "*", Some("*"));
        assert!(matches!(result, Err(I18nError::MalformedCatalog { .. })));
    }

    #[test]
    fn test_broken_group_layer_is_skipped() {
        let broken = LangTree::new().group("en", "auth", "failed: [unclosed\n");
        let good = LangTree::new().group("en", "auth", "failed: Bad credentials\n");

        let lines = loader(&[good.path(), broken.path()])
            .load("en", "auth", None)
            .unwrap();
        assert_eq!(text(&lines, "failed").as_deref(), Some("Bad credentials"));
    }

    #[test]
    fn test_json_group_format() {
        let tree = LangTree::new().file("en/auth.json", r#"{"failed": "Nope"}"#);
        let loader = loader(&[tree.path()]).with_format(GroupFormat::Json);
        let lines = loader.load("en", "auth", None).unwrap();
        assert_eq!(text(&lines, "failed").as_deref(), Some("Nope"));
    }

    #[test]
    fn test_registration_introspection() {
        let loader = loader(&[Path::new("/srv/lang")]);
        loader.add_path(Path::new("/opt/lang"));
        loader.add_json_path(Path::new("/srv/json"));
        loader.add_namespace("billing", Path::new("/pkg/billing/lang"));

        assert_eq!(loader.paths(), vec![PathBuf::from("/srv/lang"), PathBuf::from("/opt/lang")]);
        assert_eq!(loader.json_paths(), vec![PathBuf::from("/srv/json")]);
        assert_eq!(
            loader.namespaces().get("billing"),
            Some(&PathBuf::from("/pkg/billing/lang"))
        );
    }
}
