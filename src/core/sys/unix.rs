// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! POSIX host queries.

use std::ffi::CStr;
use std::io;
use std::mem::MaybeUninit;

use super::SystemMemoryInfo;

#[allow(clippy::unnecessary_wraps)]
pub(super) fn ppid() -> io::Result<u32> {
    Ok(std::os::unix::process::parent_id())
}

pub(super) fn hostname() -> io::Result<String> {
    let mut buf = [0u8; 256];
    // SAFETY: the buffer is writable for its full length
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
}

pub(super) fn os_release() -> io::Result<String> {
    let mut uts = MaybeUninit::<libc::utsname>::zeroed();
    // SAFETY: uname fills the struct it is given
    if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: uname succeeded, and zeroed memory is a valid utsname anyway
    let uts = unsafe { uts.assume_init() };
    // SAFETY: uname NUL-terminates every field
    let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };
    Ok(release.to_string_lossy().into_owned())
}

#[cfg(target_os = "linux")]
pub(super) fn loadavg() -> io::Result<[f64; 3]> {
    // sysinfo(2) reports loads as fixed point with SI_LOAD_SHIFT = 16.
    const SI_LOAD_SCALE: f64 = 65536.0;

    let mut info = MaybeUninit::<libc::sysinfo>::zeroed();
    // SAFETY: sysinfo fills the struct it is given
    if unsafe { libc::sysinfo(info.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: sysinfo succeeded
    let info = unsafe { info.assume_init() };
    #[allow(clippy::cast_precision_loss)]
    Ok(info.loads.map(|load| load as f64 / SI_LOAD_SCALE))
}

#[cfg(not(target_os = "linux"))]
pub(super) fn loadavg() -> io::Result<[f64; 3]> {
    let mut loads = [0f64; 3];
    // SAFETY: the buffer holds the three samples requested
    let n = unsafe { libc::getloadavg(loads.as_mut_ptr(), 3) };
    if n != 3 {
        return Err(io::Error::other("getloadavg returned fewer than 3 samples"));
    }
    Ok(loads)
}

#[cfg(target_os = "linux")]
pub(super) fn system_memory_info() -> io::Result<SystemMemoryInfo> {
    let meminfo = std::fs::read_to_string("/proc/meminfo")?;
    Ok(parse_meminfo(&meminfo))
}

/// Parses `/proc/meminfo`. Values there are in KiB; missing fields are zero.
#[cfg(target_os = "linux")]
pub(super) fn parse_meminfo(meminfo: &str) -> SystemMemoryInfo {
    let mut info = SystemMemoryInfo::default();
    for line in meminfo.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let bytes = rest
            .split_whitespace()
            .next()
            .and_then(|kib| kib.parse::<u64>().ok())
            .map_or(0, |kib| kib.saturating_mul(1024));
        let field = match name {
            "MemTotal" => &mut info.total,
            "MemFree" => &mut info.free,
            "MemAvailable" => &mut info.available,
            "Buffers" => &mut info.buffers,
            "Cached" => &mut info.cached,
            "SwapTotal" => &mut info.swap_total,
            "SwapFree" => &mut info.swap_free,
            _ => continue,
        };
        *field = bytes;
    }
    info
}

/// Only the physical total is portable across the BSDs and macOS.
#[cfg(not(target_os = "linux"))]
pub(super) fn system_memory_info() -> io::Result<SystemMemoryInfo> {
    // SAFETY: sysconf has no memory-safety preconditions
    let (pages, page_size) =
        unsafe { (libc::sysconf(libc::_SC_PHYS_PAGES), libc::sysconf(libc::_SC_PAGESIZE)) };
    if pages < 0 || page_size < 0 {
        return Err(io::Error::last_os_error());
    }
    #[allow(clippy::cast_sign_loss)]
    let total = (pages as u64).saturating_mul(page_size as u64);
    Ok(SystemMemoryInfo {
        total,
        ..SystemMemoryInfo::default()
    })
}

#[allow(clippy::unnecessary_wraps)]
pub(super) fn uid() -> Option<u32> {
    // SAFETY: getuid cannot fail
    Some(unsafe { libc::getuid() })
}

#[allow(clippy::unnecessary_wraps)]
pub(super) fn gid() -> Option<u32> {
    // SAFETY: getgid cannot fail
    Some(unsafe { libc::getgid() })
}
