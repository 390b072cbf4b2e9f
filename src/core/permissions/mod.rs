// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Permission gate.
//!
//! ```text
//! caller --> gate.check(&Capability)
//!               |
//!        PermissionState
//!     Granted | Prompt | Denied
//!        |       |        |
//!        |   Prompter?    |
//!        |   yes / no     |
//!        v     v    v     v
//!       Ok(())      Err(PermissionDenied)
//! ```
//!
//! Capabilities: `env[:NAME]`, `sys:<facet>`, `read:<path>`, `run:<program>`.
//! The gate only decides; it never performs the guarded operation.

pub mod grants;
mod resolve;

#[cfg(test)]
mod tests;

use bitflags::bitflags;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ConfigError;

pub use grants::{Grant, Permissions};
pub use resolve::resolve_program;

/// A guarded resource plus its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Environment access, optionally scoped to one variable.
    Env(Option<String>),
    /// One facet of host information.
    Sys(SysFacet),
    /// Read access to a path. A blind read names the resource instead of
    /// disclosing the path in messages.
    Read {
        path: PathBuf,
        blind: Option<&'static str>,
    },
    /// Permission to spawn a program.
    Run(PathBuf),
}

impl Capability {
    /// Unscoped environment access.
    #[must_use]
    pub const fn env() -> Self {
        Self::Env(None)
    }

    /// Environment access to a single variable.
    pub fn env_var(key: impl Into<String>) -> Self {
        Self::Env(Some(key.into()))
    }

    /// Read access to `path`, reported under `name` rather than the path.
    pub fn read_blind(path: impl Into<PathBuf>, name: &'static str) -> Self {
        Self::Read {
            path: path.into(),
            blind: Some(name),
        }
    }

    /// The permission kind, as used in `--allow-<kind>`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Env(_) => "env",
            Self::Sys(_) => "sys",
            Self::Read { .. } => "read",
            Self::Run(_) => "run",
        }
    }

    /// The CLI flag that grants this capability.
    #[must_use]
    pub fn flag(&self) -> String {
        format!("--allow-{}", self.kind())
    }

    /// The scope as rendered in denial messages.
    fn target(&self) -> Option<String> {
        match self {
            Self::Env(None) => None,
            Self::Env(Some(key)) => Some(format!("\"{key}\"")),
            Self::Sys(facet) => Some(format!("\"{facet}\"")),
            Self::Read {
                blind: Some(name), ..
            } => Some(format!("<{name}>")),
            Self::Read { path, blind: None } | Self::Run(path) => {
                Some(format!("\"{}\"", path.display()))
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(None) => write!(f, "env"),
            Self::Env(Some(key)) => write!(f, "env:{key}"),
            Self::Sys(facet) => write!(f, "sys:{facet}"),
            Self::Read {
                blind: Some(name), ..
            } => write!(f, "read:<{name}>"),
            Self::Read { path, blind: None } => write!(f, "read:{}", path.display()),
            Self::Run(path) => write!(f, "run:{}", path.display()),
        }
    }
}

/// Host information facets guarded by `sys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysFacet {
    Hostname,
    OsRelease,
    LoadAvg,
    SystemMemoryInfo,
    Uid,
    Gid,
}

impl SysFacet {
    pub const ALL: [Self; 6] = [
        Self::Hostname,
        Self::OsRelease,
        Self::LoadAvg,
        Self::SystemMemoryInfo,
        Self::Uid,
        Self::Gid,
    ];

    /// The name accepted by `--allow-sys`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::OsRelease => "osRelease",
            Self::LoadAvg => "loadavg",
            Self::SystemMemoryInfo => "systemMemoryInfo",
            Self::Uid => "uid",
            Self::Gid => "gid",
        }
    }

    #[must_use]
    pub const fn as_flag(self) -> SysFacets {
        match self {
            Self::Hostname => SysFacets::HOSTNAME,
            Self::OsRelease => SysFacets::OS_RELEASE,
            Self::LoadAvg => SysFacets::LOADAVG,
            Self::SystemMemoryInfo => SysFacets::SYSTEM_MEMORY_INFO,
            Self::Uid => SysFacets::UID,
            Self::Gid => SysFacets::GID,
        }
    }
}

impl fmt::Display for SysFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SysFacet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.name() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "permissions".to_string(),
                key: "allow_sys".to_string(),
                message: format!(
                    "unknown sys facet '{s}', expected one of: {}",
                    Self::ALL.map(Self::name).join(", ")
                ),
            })
    }
}

bitflags! {
    /// A set of granted [`SysFacet`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SysFacets: u8 {
        const HOSTNAME = 0x01;
        const OS_RELEASE = 0x02;
        const LOADAVG = 0x04;
        const SYSTEM_MEMORY_INFO = 0x08;
        const UID = 0x10;
        const GID = 0x20;
    }
}

impl FromIterator<SysFacet> for SysFacets {
    fn from_iter<I: IntoIterator<Item = SysFacet>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, facet| acc | facet.as_flag())
    }
}

/// Tri-state answer before prompting is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

/// Resolves [`PermissionState::Prompt`] into a yes/no answer.
///
/// The interaction model is up to the implementor; the gate only sees the bool.
pub trait Prompter: fmt::Debug + Send + Sync {
    fn prompt(&self, capability: &Capability) -> bool;
}

/// The capability was not granted.
///
/// The message names the flag that would grant it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Requires {} access{}, run again with the {} flag",
    .capability.kind(),
    .capability.target().map(|t| format!(" to {t}")).unwrap_or_default(),
    .capability.flag()
)]
pub struct PermissionDenied {
    capability: Capability,
}

impl PermissionDenied {
    #[must_use]
    pub const fn new(capability: Capability) -> Self {
        Self { capability }
    }

    /// The capability that was refused.
    #[must_use]
    pub const fn capability(&self) -> &Capability {
        &self.capability
    }

    /// The flag the caller should pass to be granted access.
    #[must_use]
    pub fn hint(&self) -> String {
        self.capability.flag()
    }
}

/// The single decision point consulted before any privileged operation.
pub trait PermissionGate: fmt::Debug + Send + Sync {
    /// Decides synchronously whether `capability` is granted.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if it is not.
    fn check(&self, capability: &Capability) -> Result<(), PermissionDenied>;
}
