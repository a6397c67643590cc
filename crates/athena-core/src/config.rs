//! Layered runtime configuration.
//!
//! `defaults/athena.default.toml` is embedded so the documented defaults and
//! the runtime defaults cannot drift. [`Loader`] layers a TOML file and
//! `ATHENA__SECTION__KEY` environment variables on top before deserializing
//! into [`AthenaConfig`].

use crate::errors::{AthenaError, Result};
use crate::structure::CollectOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/athena.default.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthenaConfig {
    pub export: ExportConfig,
    pub tokens: TokensConfig,
    pub debug: DebugConfig,
}

/// Component export knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub version: String,
    pub chunk_size: usize,
    pub preserve_hidden_fills: bool,
}

impl ExportConfig {
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            preserve_hidden_fills: self.preserve_hidden_fills,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            chunk_size: 250,
            preserve_hidden_fills: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokensConfig {
    pub remote_source_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    pub forward_to_ui: bool,
}

impl AthenaConfig {
    /// Render as TOML, e.g. for `athena config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AthenaError::Serialization {
            message: e.to_string(),
        })
    }

    fn validate(self) -> Result<Self> {
        if self.export.chunk_size == 0 {
            return Err(AthenaError::Config {
                message: "export.chunk_size must be at least 1".to_string(),
            });
        }
        if self.export.version.trim().is_empty() {
            return Err(AthenaError::Config {
                message: "export.version must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
    with_env: bool,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self {
            builder,
            with_env: true,
        }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Skip `ATHENA__*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.with_env = false;
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> std::result::Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate.
    ///
    /// # Errors
    ///
    /// Returns [`AthenaError::Config`] for unreadable sources, unknown value
    /// shapes and out-of-range values.
    pub fn build(self) -> Result<AthenaConfig> {
        let mut builder = self.builder;
        if self.with_env {
            builder = builder.add_source(
                Environment::with_prefix("ATHENA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let config: AthenaConfig = builder.build()?.try_deserialize()?;
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AthenaConfig> {
    Loader::new().without_env().build()
}
