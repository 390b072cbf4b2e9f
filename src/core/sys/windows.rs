// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows host queries.
//!
//! ```text
//! hostname    GetComputerNameExW(ComputerNamePhysicalDnsHostname)
//! os_release  RtlGetVersion -> "major.minor.build"
//! memory      GlobalMemoryStatusEx (page file minus physical = swap)
//! ppid        Toolhelp32 process snapshot
//! loadavg     not tracked by Windows, always zeros
//! uid/gid     None
//! ```

use std::io;

use windows::Wdk::System::SystemServices::RtlGetVersion;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::SystemInformation::{
    ComputerNamePhysicalDnsHostname, GetComputerNameExW, GlobalMemoryStatusEx, MEMORYSTATUSEX,
    OSVERSIONINFOW,
};
use windows::core::PWSTR;

use super::SystemMemoryInfo;

fn win_err(err: &windows::core::Error) -> io::Error {
    io::Error::other(err.message())
}

pub(super) fn ppid() -> io::Result<u32> {
    let pid = std::process::id();

    // SAFETY: a process snapshot has no preconditions
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
        .map_err(|e| win_err(&e))?;
    let result = find_parent(snapshot, pid);
    // SAFETY: the snapshot handle is owned here and closed once
    let _ = unsafe { CloseHandle(snapshot) };
    result
}

fn find_parent(snapshot: HANDLE, pid: u32) -> io::Result<u32> {
    let mut entry = PROCESSENTRY32W {
        dwSize: u32::try_from(std::mem::size_of::<PROCESSENTRY32W>()).unwrap_or(u32::MAX),
        ..Default::default()
    };

    // SAFETY: entry.dwSize is set as the API requires
    let mut next = unsafe { Process32FirstW(snapshot, &raw mut entry) };
    while next.is_ok() {
        if entry.th32ProcessID == pid {
            return Ok(entry.th32ParentProcessID);
        }
        // SAFETY: as above
        next = unsafe { Process32NextW(snapshot, &raw mut entry) };
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "current process missing from snapshot",
    ))
}

pub(super) fn hostname() -> io::Result<String> {
    let mut buf = [0u16; 256];
    let mut len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
    // SAFETY: len is the buffer capacity in UTF-16 units
    unsafe {
        GetComputerNameExW(
            ComputerNamePhysicalDnsHostname,
            Some(PWSTR(buf.as_mut_ptr())),
            &raw mut len,
        )
    }
    .map_err(|e| win_err(&e))?;
    Ok(String::from_utf16_lossy(&buf[..len as usize]))
}

pub(super) fn os_release() -> io::Result<String> {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: u32::try_from(std::mem::size_of::<OSVERSIONINFOW>())
            .unwrap_or(u32::MAX),
        ..Default::default()
    };
    // SAFETY: dwOSVersionInfoSize is set as the API requires
    let status = unsafe { RtlGetVersion(&raw mut info) };
    if status.is_err() {
        return Err(io::Error::other(format!("RtlGetVersion failed: {status:?}")));
    }
    Ok(format!(
        "{}.{}.{}",
        info.dwMajorVersion, info.dwMinorVersion, info.dwBuildNumber
    ))
}

#[allow(clippy::unnecessary_wraps)]
pub(super) fn loadavg() -> io::Result<[f64; 3]> {
    Ok([0.0; 3])
}

pub(super) fn system_memory_info() -> io::Result<SystemMemoryInfo> {
    let mut status = MEMORYSTATUSEX {
        dwLength: u32::try_from(std::mem::size_of::<MEMORYSTATUSEX>()).unwrap_or(u32::MAX),
        ..Default::default()
    };
    // SAFETY: dwLength is set as the API requires
    unsafe { GlobalMemoryStatusEx(&raw mut status) }.map_err(|e| win_err(&e))?;

    Ok(SystemMemoryInfo {
        total: status.ullTotalPhys,
        free: status.ullAvailPhys,
        available: status.ullAvailPhys,
        buffers: 0,
        cached: 0,
        swap_total: status.ullTotalPageFile.saturating_sub(status.ullTotalPhys),
        swap_free: status.ullAvailPageFile.saturating_sub(status.ullAvailPhys),
    })
}

pub(super) const fn uid() -> Option<u32> {
    None
}

pub(super) const fn gid() -> Option<u32> {
    None
}
