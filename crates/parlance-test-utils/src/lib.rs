//! Test utilities for Parlance crates.

use parking_lot::Mutex;
use parlance_common_fs::{Filesystem, LocalFilesystem, MessageDocument, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// A throwaway lang directory populated with catalog files.
///
/// ```ignore
/// let tree = LangTree::new()
///     .group("en", "messages", "welcome: Welcome")
///     .json("en", r#"{"Hello": "Hello"}"#);
/// ```
pub struct LangTree {
    dir: TempDir,
}

impl LangTree {
    /// Create an empty tree in a fresh temp directory.
    pub fn new() -> Self {
        Self { dir: temp_dir() }
    }

    /// Root of the tree, to register as a lang path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `{root}/{relative}`, creating parent directories.
    pub fn file(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create catalog dir");
        }
        std::fs::write(&path, content).expect("Failed to write catalog file");
        self
    }

    /// Write a flat catalog at `{root}/{locale}.json`.
    pub fn json(self, locale: &str, content: &str) -> Self {
        self.file(format!("{}.json", locale), content)
    }

    /// Write a YAML group at `{root}/{locale}/{group}.yaml`.
    pub fn group(self, locale: &str, group: &str, content: &str) -> Self {
        self.file(format!("{}/{}.yaml", locale, group), content)
    }

    /// Write a YAML vendor override at `{root}/vendor/{namespace}/{locale}/{group}.yaml`.
    pub fn vendor(self, namespace: &str, locale: &str, group: &str, content: &str) -> Self {
        self.file(
            format!("vendor/{}/{}/{}.yaml", namespace, locale, group),
            content,
        )
    }
}

impl Default for LangTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Filesystem`] that counts reads per path before delegating.
pub struct CountingFilesystem {
    inner: Arc<dyn Filesystem>,
    reads: Mutex<HashMap<PathBuf, usize>>,
}

impl CountingFilesystem {
    /// Count reads against the local disk.
    pub fn new() -> Self {
        Self::wrap(Arc::new(LocalFilesystem::new()))
    }

    /// Count reads against `inner`.
    pub fn wrap(inner: Arc<dyn Filesystem>) -> Self {
        Self {
            inner,
            reads: Mutex::new(HashMap::new()),
        }
    }

    /// Reads of `path` so far, through either `get` or `get_require`.
    pub fn reads_of(&self, path: impl AsRef<Path>) -> usize {
        self.reads.lock().get(path.as_ref()).copied().unwrap_or(0)
    }

    /// Reads of every path so far.
    pub fn total_reads(&self) -> usize {
        self.reads.lock().values().sum()
    }

    fn record(&self, path: &Path) {
        *self.reads.lock().entry(path.to_path_buf()).or_insert(0) += 1;
    }
}

impl Default for CountingFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for CountingFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn get(&self, path: &Path) -> Result<String> {
        self.record(path);
        self.inner.get(path)
    }

    fn get_require(&self, path: &Path) -> Result<MessageDocument> {
        self.record(path);
        self.inner.get_require(path)
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(_) => {}
        }
    };
    ($expr:expr, $pat:pat) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => assert!(
                matches!(e, $pat),
                "Expected {}, got {:?}",
                stringify!($pat),
                e
            ),
        }
    };
}
