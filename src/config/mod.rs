// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envgate.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (nothing granted)
//! 2. envgate.toml (cwd, optional)
//! 3. --config FILE
//! 4. ENVGATE_* env vars
//! 5. CLI flags (--allow-*, --log-*)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVGATE_LOG__LEVEL=4                      → log.level = 4
//! ENVGATE_PERMISSIONS__ALLOW_ENV=true       → permissions.allow_env = true
//! ENVGATE_PERMISSIONS__ALLOW_SYS=uid,gid    → permissions.allow_sys = "uid,gid"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::permissions::{Grant, Permissions, SysFacet, SysFacets, resolve_program};
use crate::core::platform::Platform;
use crate::error::Result;

use loader::ConfigLoader;
use types::{GrantSpec, LogSettings, PermissionSettings};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub log: LogSettings,
    /// Granted permissions.
    pub permissions: PermissionSettings,
}

impl Config {
    /// Load configuration from a TOML string, with no other layers.
    ///
    /// # Example
    ///
    /// ```
    /// use envgate::config::Config;
    ///
    /// let config = Config::parse("[permissions]\nallow_env = \"HOME\"\n")?;
    /// assert_eq!(config.permissions.allow_env.to_string(), "HOME");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        ConfigLoader::new().inline(content).build()
    }

    /// Check values that deserialize fine but are still invalid.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown `allow_sys` facet.
    pub fn validate(&self) -> Result<()> {
        self.sys_facets()?;
        Ok(())
    }

    /// Builds the permission gate described by this configuration.
    ///
    /// Relative read paths are resolved against the current directory. Run
    /// entries are resolved the way a spawned program is: bare names through
    /// this process's `PATH`, relative paths against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown `allow_sys` facet, or if the current
    /// directory cannot be read.
    pub fn permissions(&self, platform: Platform) -> Result<Permissions> {
        let p = &self.permissions;
        if p.allow_all {
            return Ok(Permissions::builder()
                .env(Grant::All)
                .sys(SysFacets::all())
                .read(Grant::All)
                .run(Grant::All)
                .platform(platform)
                .build());
        }

        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let search_path = std::env::var_os("PATH");
        Ok(Permissions::builder()
            .env(to_grant(&p.allow_env, |s| s))
            .sys(self.sys_facets()?)
            .read(to_grant(&p.allow_read, |s| absolute(PathBuf::from(s))))
            .run(to_grant(&p.allow_run, |s| {
                resolve_program(Path::new(&s), search_path.as_deref(), &cwd)
            }))
            .platform(platform)
            .build())
    }

    fn sys_facets(&self) -> Result<SysFacets> {
        match self.permissions.allow_sys.scopes() {
            None => Ok(SysFacets::empty()),
            Some(names) if names.is_empty() => Ok(SysFacets::all()),
            Some(names) => names
                .iter()
                .map(|name| name.parse::<SysFacet>().map_err(anyhow::Error::from))
                .collect(),
        }
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("log.level", self.log.level.as_u8().to_string());
        options.insert(
            "log.file",
            self.log
                .file
                .as_ref()
                .map_or_else(|| "none".to_string(), |p| p.display().to_string()),
        );
        options.insert("log.json", self.log.json.to_string());

        let p = &self.permissions;
        let all = |grant: &GrantSpec| {
            if p.allow_all {
                "all".to_string()
            } else {
                grant.to_string()
            }
        };
        options.insert("permissions.allow_env", all(&p.allow_env));
        options.insert("permissions.allow_sys", all(&p.allow_sys));
        options.insert("permissions.allow_read", all(&p.allow_read));
        options.insert("permissions.allow_run", all(&p.allow_run));

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn to_grant<T>(configured: &GrantSpec, convert: impl Fn(String) -> T) -> Grant<T> {
    configured.scopes().map_or(Grant::None, |scopes| {
        Grant::from_values(scopes.into_iter().map(convert).collect())
    })
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
