// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sys <query>`.

use serde_json::{Value, json};

use crate::cli::{SysArgs, SysQuery};
use crate::core::sys::SystemInfo;
use crate::error::Result;

/// Run the sys command.
///
/// # Errors
///
/// Returns an error if the query is not permitted or the OS query fails.
pub fn run_sys_command(args: &SysArgs, info: &SystemInfo) -> Result<()> {
    super::print_json(&query(args.query, info)?)
}

/// Answers one query as JSON. `uid` and `gid` are `null` where the platform
/// has no user ids.
pub(crate) fn query(query: SysQuery, info: &SystemInfo) -> Result<Value> {
    let value = match query {
        SysQuery::Pid => json!(info.pid()),
        SysQuery::Ppid => json!(info.ppid()?),
        SysQuery::ExecPath => json!(info.exec_path()?.to_string_lossy()),
        SysQuery::Hostname => json!(info.hostname()?),
        SysQuery::OsRelease => json!(info.os_release()?),
        SysQuery::Loadavg => json!(info.loadavg()?),
        SysQuery::Memory => serde_json::to_value(info.system_memory_info()?)?,
        SysQuery::Uid => json!(info.uid()?),
        SysQuery::Gid => json!(info.gid()?),
    };
    Ok(value)
}
