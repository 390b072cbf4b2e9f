// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --allow-env[=VARS]       ← permissions.allow_env
//! --allow-sys[=FACETS]     ← permissions.allow_sys
//! --allow-read[=PATHS]     ← permissions.allow_read
//! --allow-run[=PROGRAMS]   ← permissions.allow_run
//! -A, --allow-all          ← permissions.allow_all
//! -c, --config FILE        ← Additional config files (can repeat)
//! -l, --log-level N        ← log.level (0-5)
//! --log-file FILE          ← log.file
//! --log-json               ← log.json
//!
//! Precedence: CLI flags > ENVGATE_* > --config > envgate.toml > defaults
//! ```

use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Allows environment access, optionally only to the listed variables.
    ///
    /// An empty list (`--allow-env=`) is rejected rather than read as a deny.
    #[arg(
        long = "allow-env",
        value_name = "VARS",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ',',
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub allow_env: Option<Vec<String>>,

    /// Allows host information queries, optionally only the listed facets.
    #[arg(
        long = "allow-sys",
        value_name = "FACETS",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ',',
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub allow_sys: Option<Vec<String>>,

    /// Allows reads, optionally only below the listed paths.
    #[arg(
        long = "allow-read",
        value_name = "PATHS",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ',',
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub allow_read: Option<Vec<String>>,

    /// Allows spawning programs, optionally only the listed ones.
    #[arg(
        long = "allow-run",
        value_name = "PROGRAMS",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ',',
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub allow_run: Option<Vec<String>>,

    /// Allows everything.
    #[arg(short = 'A', long = "allow-all")]
    pub allow_all: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file, written at trace level.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Writes console logs as JSON lines.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    ///
    /// A bare `--allow-*` flag grants everything; a value list grants only
    /// those scopes.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, config::Value)> {
        let mut overrides = Vec::new();

        let grants = [
            ("allow_env", &self.allow_env),
            ("allow_sys", &self.allow_sys),
            ("allow_read", &self.allow_read),
            ("allow_run", &self.allow_run),
        ];
        for (key, grant) in grants {
            let Some(scopes) = grant else { continue };
            let value = if scopes.is_empty() {
                config::Value::from(true)
            } else {
                config::Value::from(scopes.join(","))
            };
            overrides.push((format!("permissions.{key}"), value));
        }

        if self.allow_all {
            overrides.push(("permissions.allow_all".to_string(), true.into()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("log.level".to_string(), i64::from(level).into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push((
                "log.file".to_string(),
                path.display().to_string().into(),
            ));
        }

        if self.log_json {
            overrides.push(("log.json".to_string(), true.into()));
        }

        overrides
    }
}
