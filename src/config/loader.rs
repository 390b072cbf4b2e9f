// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::layered(configs, overrides)
//!   1. envgate.toml        Source::WorkingDir  (only if present)
//!   2. -c FILE...          Source::File        (must exist)
//!   3. ENVGATE_*           Source::Env         (names present at load)
//!   4. --allow-*, --log-*  Source::Flags       (keys overridden)
//!        |
//!        v
//!    build() --> Config (validated)
//! ```
//!
//! Each layer records a [`Source`], so `envgate sources` shows exactly what
//! contributed to the effective configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// File picked up from the working directory when present.
pub const WORKING_DIR_FILE: &str = "envgate.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ENVGATE";

/// One layer of the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `envgate.toml` in the working directory.
    WorkingDir(PathBuf),
    /// A file named with `--config`.
    File(PathBuf),
    /// TOML text, as given to [`Config::parse`].
    Inline,
    /// `ENVGATE_*` variables set when loading.
    Env(Vec<String>),
    /// Keys set from command-line flags.
    Flags(Vec<String>),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingDir(path) => write!(f, "[cwd] {}", path.display()),
            Self::File(path) => write!(f, "[config] {}", path.display()),
            Self::Inline => f.write_str("[inline] <toml>"),
            Self::Env(names) => write!(f, "[env] {}", names.join(", ")),
            Self::Flags(keys) => write!(f, "[flags] {}", keys.join(", ")),
        }
    }
}

/// Builds a [`Config`] from envgate's configuration layers.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<&'static str>,
    sources: Vec<Source>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// The full layering used by the binary, lowest priority first.
    ///
    /// # Errors
    ///
    /// Returns an error if an override key is malformed.
    pub fn layered<I>(configs: &[PathBuf], overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, config::Value)>,
    {
        let mut loader = Self::new().working_dir_file(Path::new(WORKING_DIR_FILE));
        for path in configs {
            loader = loader.file(path);
        }
        loader = loader.env(ENV_PREFIX);
        for (key, value) in overrides {
            loader = loader.set(&key, value)?;
        }
        Ok(loader)
    }

    /// Adds `path` if it exists; a missing file is not a layer.
    #[must_use]
    pub fn working_dir_file(mut self, path: &Path) -> Self {
        if path.is_file() {
            self.builder = self.builder.add_source(toml_file(path));
            self.sources.push(Source::WorkingDir(path.to_path_buf()));
        }
        self
    }

    /// Adds a file that must exist when building.
    #[must_use]
    pub fn file(mut self, path: &Path) -> Self {
        self.builder = self.builder.add_source(toml_file(path));
        self.sources.push(Source::File(path.to_path_buf()));
        self
    }

    /// Adds TOML text.
    #[must_use]
    pub fn inline(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(Source::Inline);
        self
    }

    /// Reads `<PREFIX>_SECTION__KEY` variables when building.
    ///
    /// The layer is recorded only if such variables are set now.
    #[must_use]
    pub fn env(mut self, prefix: &'static str) -> Self {
        self.env_prefix = Some(prefix);
        let lead = format!("{prefix}_");
        let mut names: Vec<String> = std::env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .filter(|name| name.starts_with(&lead))
            .collect();
        if !names.is_empty() {
            names.sort();
            self.sources.push(Source::Env(names));
        }
        self
    }

    /// Overrides one key, above every other layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        match self.sources.last_mut() {
            Some(Source::Flags(keys)) => keys.push(key.to_string()),
            _ => self.sources.push(Source::Flags(vec![key.to_string()])),
        }
        Ok(self)
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `--config` file is missing or is not valid TOML.
    /// - The merged values do not fit `Config` (unknown keys included).
    /// - A value is out of range (e.g. an unknown `allow_sys` facet).
    pub fn build(self) -> Result<Config> {
        let builder = match self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Numbered source lines, lowest priority first.
    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(true)
}
