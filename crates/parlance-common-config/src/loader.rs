//! Configuration file loading and parsing.

use crate::env::Environment;
use crate::types::TranslationConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the config file this loader reads.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(".parlance/config.yaml")
    }

    /// Load configuration from `.parlance/config.yaml`.
    ///
    /// Relative catalog paths and namespace hints are resolved against the
    /// project directory.
    pub fn load(&self) -> Result<TranslationConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            let mut config = TranslationConfig::default();
            config.resolve_paths(&self.base_path);
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: TranslationConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        let mut config = config;
        config.resolve_paths(&self.base_path);
        self.validate(&config)?;
        Ok(config)
    }

    /// Load the file, then apply `PARLANCE_*` environment overrides.
    pub fn load_with_env(&self) -> Result<TranslationConfig, ConfigError> {
        let mut config = self.load()?;
        Environment::apply_overrides(&mut config);
        config.resolve_paths(&self.base_path);
        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
            ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            }
        })?;

        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &TranslationConfig) -> Result<(), ConfigError> {
        validate_locale("app.locale", &config.app.locale)?;
        validate_locale("app.fallback_locale", &config.app.fallback_locale)?;

        if config.paths.lang.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "paths.lang must list at least one directory".to_string(),
            });
        }

        if config.loader.max_file_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "loader.max_file_size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &TranslationConfig) -> Result<(), ConfigError> {
        let config_dir = self.base_path.join(".parlance");
        std::fs::create_dir_all(&config_dir)?;

        let yaml = serde_yaml::to_string(config)
            .map_err(|e| ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            })?;

        std::fs::write(self.config_path(), yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

fn validate_locale(field: &str, locale: &str) -> Result<(), ConfigError> {
    if locale.is_empty() {
        return Err(ConfigError::ValidationError {
            message: format!("{} must not be empty", field),
        });
    }

    if locale.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError {
            message: format!("{} contains a path separator: {}", field, locale),
        });
    }

    Ok(())
}
