// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Program resolution for `run` scopes.
//!
//! ```text
//! "sh"        --> which_in(PATH, cwd)  --> /usr/bin/sh
//! "./tool"    --> cwd.join             --> /work/tool
//! "/bin/sh"   --> unchanged
//! ```
//!
//! Grants and spawned programs go through the same resolution, so a grant
//! names one file rather than every file with that name.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolves `program` to the path a `run` capability is scoped to.
///
/// Bare names are looked up on `search_path`; a bare name that is not found
/// is returned unchanged. Other relative paths are anchored at `cwd`.
pub fn resolve_program(program: &Path, search_path: Option<&OsStr>, cwd: &Path) -> PathBuf {
    if program.is_absolute() {
        return program.to_path_buf();
    }
    if program.components().count() == 1 {
        return which::which_in(program, search_path, cwd)
            .unwrap_or_else(|_| program.to_path_buf());
    }
    let joined = cwd.join(program);
    std::path::absolute(&joined).unwrap_or(joined)
}
