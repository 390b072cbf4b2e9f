// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! OS queries behind the system info accessors.
//!
//! ```text
//! SysBackend (trait)
//!   HostBackend --> unix.rs    libc: gethostname, uname, sysinfo/getloadavg,
//!                              /proc/meminfo, getuid, getgid
//!               --> windows.rs Win32: GetComputerNameExW, RtlGetVersion,
//!                              GlobalMemoryStatusEx, Toolhelp32
//! ```
//!
//! Each method is exactly one query; nothing is cached.

use std::fmt::Debug;
use std::io;
use std::path::PathBuf;

use super::SystemMemoryInfo;

/// Raw host queries, with no permission checks.
pub trait SysBackend: Debug + Send + Sync {
    fn pid(&self) -> u32;
    fn ppid(&self) -> io::Result<u32>;
    fn exec_path(&self) -> io::Result<PathBuf>;
    fn hostname(&self) -> io::Result<String>;
    fn os_release(&self) -> io::Result<String>;
    fn loadavg(&self) -> io::Result<[f64; 3]>;
    fn system_memory_info(&self) -> io::Result<SystemMemoryInfo>;
    /// `None` where the OS has no numeric user ids.
    fn uid(&self) -> Option<u32>;
    /// `None` where the OS has no numeric group ids.
    fn gid(&self) -> Option<u32>;
}

/// Queries the machine this process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostBackend;

#[cfg(unix)]
use super::unix as host;
#[cfg(windows)]
use super::windows as host;

impl SysBackend for HostBackend {
    fn pid(&self) -> u32 {
        std::process::id()
    }

    fn ppid(&self) -> io::Result<u32> {
        host::ppid()
    }

    fn exec_path(&self) -> io::Result<PathBuf> {
        std::env::current_exe()
    }

    fn hostname(&self) -> io::Result<String> {
        host::hostname()
    }

    fn os_release(&self) -> io::Result<String> {
        host::os_release()
    }

    fn loadavg(&self) -> io::Result<[f64; 3]> {
        host::loadavg()
    }

    fn system_memory_info(&self) -> io::Result<SystemMemoryInfo> {
        host::system_memory_info()
    }

    fn uid(&self) -> Option<u32> {
        host::uid()
    }

    fn gid(&self) -> Option<u32> {
        host::gid()
    }
}
