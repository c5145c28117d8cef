//! Translation errors.

use parlance_common_fs::FsError;
use std::path::PathBuf;

/// i18n errors.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A locale contained a path separator.
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    /// A flat catalog exists but is not a well-formed document.
    #[error("translation file [{}] contains an invalid JSON structure: {message}", path.display())]
    MalformedCatalog { path: PathBuf, message: String },

    /// Reading a catalog failed.
    #[error(transparent)]
    Storage(#[from] FsError),

    /// A free function ran before [`crate::install`].
    #[error("no translator installed")]
    NotInstalled,
}

/// Result alias for translation operations.
pub type Result<T> = std::result::Result<T, I18nError>;
