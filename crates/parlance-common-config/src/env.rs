//! Environment variable handling.

use crate::types::TranslationConfig;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Locale selection
    /// Overrides `app.locale`.
    pub const PARLANCE_LOCALE: &str = "PARLANCE_LOCALE";
    /// Overrides `app.fallback_locale`.
    pub const PARLANCE_FALLBACK_LOCALE: &str = "PARLANCE_FALLBACK_LOCALE";

    // Catalog search paths (platform path-list syntax)
    /// Overrides `paths.lang` (platform path-list syntax).
    pub const PARLANCE_LANG_PATH: &str = "PARLANCE_LANG_PATH";

    // Deployment environment, selects `.env.{name}`
    /// Deployment environment name.
    pub const PARLANCE_ENV: &str = "PARLANCE_ENV";
}

/// Environment configuration.
pub struct Environment {
    _guard: (), // Prevent construction outside module
}

impl Environment {
    /// Initialize environment from .env files in the current directory.
    pub fn init() -> Result<Self, EnvError> {
        Self::init_from(env::current_dir().unwrap_or_default())
    }

    /// Initialize environment from .env files in `dir`.
    ///
    /// Files are read in order `.env`, `.env.local`, `.env.{PARLANCE_ENV}`.
    /// Variables already present in the process environment are kept.
    pub fn init_from(dir: impl AsRef<Path>) -> Result<Self, EnvError> {
        let dir = dir.as_ref();

        for name in [".env", ".env.local"] {
            load_optional(&dir.join(name))?;
        }

        if let Ok(name) = env::var(vars::PARLANCE_ENV) {
            load_optional(&dir.join(format!(".env.{}", name)))?;
        }

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Apply `PARLANCE_*` overrides on top of a loaded config.
    pub fn apply_overrides(config: &mut TranslationConfig) {
        if let Some(locale) = Self::get(vars::PARLANCE_LOCALE) {
            config.app.locale = locale;
        }

        if let Some(fallback) = Self::get(vars::PARLANCE_FALLBACK_LOCALE) {
            config.app.fallback_locale = fallback;
        }

        if let Some(paths) = env::var_os(vars::PARLANCE_LANG_PATH) {
            let lang: Vec<PathBuf> = env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !lang.is_empty() {
                config.paths.lang = lang;
            }
        }
    }
}

fn load_optional(path: &Path) -> Result<(), EnvError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
