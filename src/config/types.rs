// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! # Config Structure
//!
//! ```text
//! [log]          level (0-5), file, json
//! [permissions]  allow_all, allow_env, allow_sys, allow_read, allow_run
//! ```
//!
//! # Grant Values
//!
//! ```text
//! allow_env = true                 → everything
//! allow_env = false                → nothing (default)
//! allow_env = ["PATH", "HOME"]     → listed scopes
//! allow_env = "PATH,HOME"          → listed scopes (env-var friendly)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Logging options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console log level (0-5).
    pub level: LogLevel,
    /// Optional log file, written at `TRACE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Emit console logs as JSON lines.
    pub json: bool,
}

/// Granted permissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionSettings {
    /// Grants every permission, overriding the other keys.
    pub allow_all: bool,
    pub allow_env: GrantSpec,
    pub allow_sys: GrantSpec,
    pub allow_read: GrantSpec,
    pub allow_run: GrantSpec,
}

/// A permission grant as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrantSpec {
    Flag(bool),
    List(Vec<String>),
    Csv(String),
}

impl Default for GrantSpec {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl GrantSpec {
    /// The granted scopes.
    ///
    /// `None` means nothing is granted; an empty list means everything is.
    /// A list or string with no usable entries grants nothing.
    #[must_use]
    pub fn scopes(&self) -> Option<Vec<String>> {
        let items: Vec<String> = match self {
            Self::Flag(granted) => return granted.then(Vec::new),
            Self::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        };
        (!items.is_empty()).then_some(items)
    }
}

impl std::fmt::Display for GrantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scopes() {
            None => write!(f, "denied"),
            Some(scopes) if scopes.is_empty() => write!(f, "all"),
            Some(scopes) => write!(f, "{}", scopes.join(",")),
        }
    }
}
