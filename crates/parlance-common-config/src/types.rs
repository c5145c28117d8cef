//! Configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Locale selection.
    pub app: AppConfig,
    /// Catalog search paths.
    pub paths: PathsConfig,
    /// Namespace hints (namespace -> base path).
    pub namespaces: BTreeMap<String, PathBuf>,
    /// Grouped-file loader settings.
    pub loader: LoaderConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            paths: PathsConfig::default(),
            namespaces: BTreeMap::new(),
            loader: LoaderConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Join every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: impl AsRef<Path>) {
        let base = base.as_ref();
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        self.paths.lang.iter_mut().for_each(&resolve);
        self.paths.json.iter_mut().for_each(&resolve);
        self.namespaces.values_mut().for_each(&resolve);
    }
}

/// Locale selection (`app.locale`, `app.fallback_locale`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default locale.
    pub locale: String,
    /// Locale consulted when the requested one has no line.
    pub fallback_locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback_locale: "en".to_string(),
        }
    }
}

/// Catalog search paths, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Default lang paths; later paths override earlier ones.
    pub lang: Vec<PathBuf>,
    /// Extra flat-catalog (`{locale}.json`) paths, merged before the lang paths.
    pub json: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lang: vec![PathBuf::from("lang")],
            json: Vec::new(),
        }
    }
}

/// Grouped-file loader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Format of `{path}/{locale}/{group}` files.
    pub format: GroupFormat,
    /// Per-file read limit in bytes.
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            format: GroupFormat::default(),
            max_file_size: 1024 * 1024,
        }
    }
}

/// Grouped catalog file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFormat {
    #[default]
    Yaml,
    Json,
}

impl GroupFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}
