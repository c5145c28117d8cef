//! Storage access for Parlance message catalogs.
//!
//! The translation engine never touches `std::fs` directly. It goes through
//! the [`Filesystem`] trait so hosts can swap in embedded assets, remote
//! stores, or call-counting stubs in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default read limit for a single catalog file (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// A structured document as read from storage.
pub type MessageDocument = serde_json::Value;

/// Storage errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file too large: {size} bytes (max: {max})")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl FsError {
    /// The path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::Read { path, .. }
            | Self::TooLarge { path, .. }
            | Self::Parse { path, .. } => path,
        }
    }
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Synchronous, side-effect-free reads used by catalog loaders.
pub trait Filesystem: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as text.
    fn get(&self, path: &Path) -> Result<String>;

    /// Read a statically-loadable structured document (YAML or JSON, by extension).
    fn get_require(&self, path: &Path) -> Result<MessageDocument>;
}

/// Structured document formats understood by [`Filesystem::get_require`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parse `content` into a document.
    pub fn parse(self, path: &Path, content: &str) -> Result<MessageDocument> {
        let parsed: std::result::Result<MessageDocument, String> = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| FsError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// The local disk.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    max_size: u64,
}

impl LocalFilesystem {
    /// Create a filesystem with the default size limit.
    pub fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Override the per-file size limit.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// The per-file size limit in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn get(&self, path: &Path) -> Result<String> {
        read_to_string(path, self.max_size)
    }

    fn get_require(&self, path: &Path) -> Result<MessageDocument> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| FsError::Parse {
            path: path.to_path_buf(),
            message: "unsupported document format".to_string(),
        })?;

        let content = self.get(path)?;
        format.parse(path, &content)
    }
}

/// Read a file to string with size limit. A leading UTF-8 BOM is dropped.
pub fn read_to_string(path: impl AsRef<Path>, max_size: u64) -> Result<String> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(FsError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_size,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;

    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

fn io_error(path: &Path, source: io::Error) -> FsError {
    match source.kind() {
        io::ErrorKind::NotFound => FsError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => FsError::Read {
            path: path.to_path_buf(),
            source,
        },
    }
}
