//! Message sources.

mod array;
mod file;

pub use array::ArrayLoader;
pub use file::FileLoader;

use crate::error::Result;
use crate::tree::Lines;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Supplies the lines of one (locale, group, namespace).
///
/// Registration takes `&self`: loaders are shared behind an `Arc` by the
/// translator and keep their own interior locking.
pub trait Loader: Send + Sync {
    /// Load a group. `namespace` of `None` or `"*"` is the default space,
    /// and group `"*"` with namespace `"*"` is the flat catalog.
    fn load(&self, locale: &str, group: &str, namespace: Option<&str>) -> Result<Lines>;

    /// Register the base path of a namespace.
    fn add_namespace(&self, namespace: &str, hint: &Path);

    /// Append a default lang path.
    fn add_path(&self, path: &Path);

    /// Append a flat-catalog path.
    fn add_json_path(&self, path: &Path);

    /// Registered namespace hints.
    fn namespaces(&self) -> BTreeMap<String, PathBuf>;
}
