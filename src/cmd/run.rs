// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `run [--env K=V]... [--unset K]... -- PROGRAM [ARGS]...`

use anyhow::Context;
use tracing::debug;

use crate::cli::RunArgs;
use crate::core::env::store::EnvStore;
use crate::core::permissions::PermissionGate;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Run the run command.
///
/// Assignments and removals are applied to `store` in order, so they stay
/// visible to anything spawned later in this process.
///
/// Returns the child's exit code.
///
/// # Errors
///
/// Returns an error if an assignment is invalid or not permitted, if `run`
/// access is denied, or if the program cannot be spawned.
pub async fn run_run_command(
    args: &RunArgs,
    gate: &dyn PermissionGate,
    store: &EnvStore,
) -> Result<i32> {
    for (key, value) in &args.set {
        store.set(key, value)?;
    }
    for key in &args.unset {
        store.delete(key)?;
    }

    let (program, rest) = args
        .command
        .split_first()
        .context("no program to run")?;

    let output = ProcessBuilder::new(program)
        .args(rest)
        .inherit_stdio()
        .run(gate, store)
        .await?;

    debug!(program = %program, exit_code = output.exit_code(), "child exited");
    Ok(output.exit_code())
}
