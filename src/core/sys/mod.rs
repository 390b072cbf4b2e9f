// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Permission-gated host information.
//!
//! ```text
//! accessor          capability                backend call
//! pid               -                         pid()
//! ppid              -                         ppid()
//! exec_path         read:<exec_path> (blind)  exec_path()
//! hostname          sys:hostname              hostname()
//! os_release        sys:osRelease             os_release()
//! loadavg           sys:loadavg               loadavg()
//! system_memory     sys:systemMemoryInfo      system_memory_info()
//! uid / gid         sys:uid / sys:gid         uid() / gid(), or None
//! ```
//!
//! The gate is consulted before the backend; a denial never reaches the OS.
//! The one exception is `exec_path`, whose scope is the path itself.

pub mod backend;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::permissions::{Capability, PermissionGate, SysFacet};
use crate::core::platform::Platform;
use crate::error::HostResult;
use backend::{HostBackend, SysBackend};

/// Memory figures in bytes, captured when requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMemoryInfo {
    pub total: u64,
    pub free: u64,
    pub available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// Host information accessors.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    gate: Arc<dyn PermissionGate>,
    backend: Arc<dyn SysBackend>,
    platform: Platform,
}

impl SystemInfo {
    /// Accessors for the running host.
    #[must_use]
    pub fn host(gate: Arc<dyn PermissionGate>) -> Self {
        Self::with_backend(gate, Arc::new(HostBackend), Platform::host())
    }

    #[must_use]
    pub fn with_backend(
        gate: Arc<dyn PermissionGate>,
        backend: Arc<dyn SysBackend>,
        platform: Platform,
    ) -> Self {
        Self {
            gate,
            backend,
            platform,
        }
    }

    /// This process's id. Not gated.
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.backend.pid()
    }

    /// The parent process's id. Not gated.
    ///
    /// # Errors
    ///
    /// Returns an OS error if the parent cannot be determined.
    pub fn ppid(&self) -> HostResult<u32> {
        Ok(self.backend.ppid()?)
    }

    /// Absolute path of the running executable.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without read access to the executable, or an
    /// OS error if the path cannot be resolved.
    pub fn exec_path(&self) -> HostResult<PathBuf> {
        let path = self.backend.exec_path()?;
        self.gate
            .check(&Capability::read_blind(path.clone(), "exec_path"))?;
        Ok(path)
    }

    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:hostname`, or an OS error.
    pub fn hostname(&self) -> HostResult<String> {
        self.check(SysFacet::Hostname)?;
        Ok(self.backend.hostname()?)
    }

    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:osRelease`, or an OS error.
    pub fn os_release(&self) -> HostResult<String> {
        self.check(SysFacet::OsRelease)?;
        Ok(self.backend.os_release()?)
    }

    /// 1, 5 and 15 minute load averages.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:loadavg`, or an OS error.
    pub fn loadavg(&self) -> HostResult<[f64; 3]> {
        self.check(SysFacet::LoadAvg)?;
        Ok(self.backend.loadavg()?)
    }

    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:systemMemoryInfo`, or an OS error.
    pub fn system_memory_info(&self) -> HostResult<SystemMemoryInfo> {
        self.check(SysFacet::SystemMemoryInfo)?;
        Ok(self.backend.system_memory_info()?)
    }

    /// The real user id, or `None` on platforms without one.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:uid`.
    pub fn uid(&self) -> HostResult<Option<u32>> {
        self.check(SysFacet::Uid)?;
        Ok(self
            .platform
            .has_user_ids()
            .then(|| self.backend.uid())
            .flatten())
    }

    /// The real group id, or `None` on platforms without one.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without `sys:gid`.
    pub fn gid(&self) -> HostResult<Option<u32>> {
        self.check(SysFacet::Gid)?;
        Ok(self
            .platform
            .has_user_ids()
            .then(|| self.backend.gid())
            .flatten())
    }

    fn check(&self, facet: SysFacet) -> HostResult<()> {
        Ok(self.gate.check(&Capability::Sys(facet))?)
    }
}
