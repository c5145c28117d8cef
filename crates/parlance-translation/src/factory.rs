//! Building a translator from configuration.

use crate::error::Result;
use crate::loader::{FileLoader, Loader};
use crate::translator::Translator;
use parlance_common_config::TranslationConfig;
use parlance_common_fs::{Filesystem, LocalFilesystem};
use std::sync::Arc;
use tracing::info;

/// Builds the loader and translator an application shares for its lifetime.
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// A [`FileLoader`] with the configured lang paths, JSON paths and
    /// namespace hints.
    pub fn loader_from_config(config: &TranslationConfig, files: Arc<dyn Filesystem>) -> FileLoader {
        let loader = FileLoader::new(files, config.paths.lang.iter().cloned())
            .with_format(config.loader.format);

        for path in &config.paths.json {
            loader.add_json_path(path);
        }
        for (namespace, hint) in &config.namespaces {
            loader.add_namespace(namespace, hint);
        }
        loader
    }

    /// A translator over `files` using `app.locale` and
    /// `app.fallback_locale`.
    pub fn from_config(config: &TranslationConfig, files: Arc<dyn Filesystem>) -> Result<Translator> {
        let loader = Self::loader_from_config(config, files);
        let translator = Translator::new(Arc::new(loader), config.app.locale.clone())?;
        translator.set_fallback(config.app.fallback_locale.clone());

        info!(
            locale = %config.app.locale,
            fallback = %config.app.fallback_locale,
            paths = config.paths.lang.len(),
            namespaces = config.namespaces.len(),
            "translator ready"
        );
        Ok(translator)
    }

    /// [`TranslatorFactory::from_config`] over the local disk, honouring
    /// `loader.max_file_size`.
    pub fn local(config: &TranslationConfig) -> Result<Translator> {
        let files = LocalFilesystem::new().with_max_size(config.loader.max_file_size);
        Self::from_config(config, Arc::new(files))
    }
}
