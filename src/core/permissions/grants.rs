// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Grant state and the default [`PermissionGate`] implementation.
//!
//! ```text
//! Permissions
//!   env:  Grant<String>   names compared with the platform comparator
//!   sys:  SysFacets       bitflags
//!   read: Grant<PathBuf>  a granted directory covers its descendants
//!   run:  Grant<PathBuf>  resolved program paths, matched as the same file
//!   prompter: Option<Arc<dyn Prompter>>
//! ```

use bon::Builder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::{
    Capability, PermissionDenied, PermissionGate, PermissionState, Prompter, SysFacets,
};
use crate::core::platform::Platform;

/// Grant for a scoped permission kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Grant<T> {
    #[default]
    None,
    /// Granted for the listed scopes only.
    Some(Vec<T>),
    All,
}

impl<T> Grant<T> {
    /// Builds a grant from CLI-style input: no values means everything.
    pub fn from_values(values: Vec<T>) -> Self {
        if values.is_empty() {
            Self::All
        } else {
            Self::Some(values)
        }
    }

    fn allows(&self, matches: impl Fn(&T) -> bool) -> bool {
        match self {
            Self::None => false,
            Self::Some(scopes) => scopes.iter().any(matches),
            Self::All => true,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Granted capabilities for this process.
#[derive(Debug, Clone, Builder)]
pub struct Permissions {
    #[builder(default)]
    env: Grant<String>,
    #[builder(default)]
    sys: SysFacets,
    #[builder(default)]
    read: Grant<PathBuf>,
    #[builder(default)]
    run: Grant<PathBuf>,
    /// Consulted instead of denying outright, when set.
    prompter: Option<Arc<dyn Prompter>>,
    #[builder(default)]
    platform: Platform,
}

impl Default for Permissions {
    fn default() -> Self {
        Self::deny_all()
    }
}

impl Permissions {
    /// Nothing granted, no prompting.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::builder().build()
    }

    /// Everything granted.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::builder()
            .env(Grant::All)
            .sys(SysFacets::all())
            .read(Grant::All)
            .run(Grant::All)
            .build()
    }

    #[must_use]
    pub const fn env_grant(&self) -> &Grant<String> {
        &self.env
    }

    #[must_use]
    pub const fn sys_grant(&self) -> SysFacets {
        self.sys
    }

    #[must_use]
    pub const fn read_grant(&self) -> &Grant<PathBuf> {
        &self.read
    }

    #[must_use]
    pub const fn run_grant(&self) -> &Grant<PathBuf> {
        &self.run
    }

    /// Answers without prompting.
    #[must_use]
    pub fn state(&self, capability: &Capability) -> PermissionState {
        let granted = match capability {
            Capability::Env(None) => self.env.is_all(),
            Capability::Env(Some(key)) => {
                let comparator = self.platform.comparator();
                self.env.allows(|name| comparator.keys_equal(name, key))
            }
            Capability::Sys(facet) => self.sys.contains(facet.as_flag()),
            Capability::Read { path, .. } => self.read.allows(|granted| path.starts_with(granted)),
            Capability::Run(program) => self.run.allows(|granted| run_matches(granted, program)),
        };

        if granted {
            PermissionState::Granted
        } else if self.prompter.is_some() {
            PermissionState::Prompt
        } else {
            PermissionState::Denied
        }
    }
}

impl PermissionGate for Permissions {
    fn check(&self, capability: &Capability) -> Result<(), PermissionDenied> {
        let allowed = match self.state(capability) {
            PermissionState::Granted => true,
            PermissionState::Prompt => self
                .prompter
                .as_ref()
                .is_some_and(|prompter| prompter.prompt(capability)),
            PermissionState::Denied => false,
        };

        if allowed {
            Ok(())
        } else {
            debug!(capability = %capability, "permission denied");
            Err(PermissionDenied::new(capability.clone()))
        }
    }
}

/// Paths name the same program if they are equal or canonicalize to one file.
///
/// Both sides are expected to be resolved with [`super::resolve_program`].
fn run_matches(granted: &Path, program: &Path) -> bool {
    if granted == program {
        return true;
    }
    match (std::fs::canonicalize(granted), std::fs::canonicalize(program)) {
        (Ok(granted), Ok(program)) => granted == program,
        _ => false,
    }
}
