// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run(gate, store)
//!        |
//!        v
//!   store.child_env(overlay)   -- invalid --> Err, nothing spawned
//!        |
//!        v
//!   resolve_program(child PATH, cwd)
//!        |
//!        v
//!   gate.check(run:<resolved>) -- denied --> Err, nothing spawned
//!        |
//!        v
//!   build_command(resolved) + spawn()
//!        |
//!        v
//!   wait_with_output()
//!        |
//!        v
//!   ProcessOutput { exit_code, stdout, stderr }
//! ```

use anyhow::Context;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::core::env::store::EnvStore;
use crate::core::permissions::{Capability, PermissionGate, resolve_program};
use crate::error::Result;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it to finish.
    ///
    /// The child sees exactly `store`'s table plus this builder's overlay.
    /// A bare program name is looked up on that table's `PATH`, and the
    /// `run` check applies to the resolved file.
    /// A non-zero exit is not an error; check [`ProcessOutput::success`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An overlay key or value is malformed.
    /// - `run` access to the resolved program is denied.
    /// - Spawning or waiting on the child fails.
    pub async fn run(self, gate: &dyn PermissionGate, store: &EnvStore) -> Result<ProcessOutput> {
        let vars = store.child_env(self.overlay())?;
        let program = self.resolved_program(store, &vars)?;
        gate.check(&Capability::Run(program.clone()))?;

        let name = self.display_name();
        let cmd_line = self.command_line();
        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let child = self
            .build_command(&program, &vars)
            .spawn()
            .with_context(|| format!("Failed to spawn: {cmd_line}"))?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for: {cmd_line}"))?;

        let exit_code = exit_code(output.status);
        trace!(process = %name, exit_code, "completed");
        Ok(ProcessOutput::new(exit_code, output.stdout, output.stderr))
    }

    /// Resolves the program against the child's `PATH` and working directory.
    fn resolved_program(
        &self,
        store: &EnvStore,
        vars: &BTreeMap<String, String>,
    ) -> Result<PathBuf> {
        let cwd = match self.working_dir() {
            Some(dir) if dir.is_absolute() => dir.clone(),
            dir => {
                let current =
                    std::env::current_dir().context("Failed to read the current directory")?;
                dir.map_or(current.clone(), |dir| current.join(dir))
            }
        };
        let comparator = store.platform().comparator();
        let search_path = vars
            .iter()
            .find(|(key, _)| comparator.keys_equal(key, "PATH"))
            .map(|(_, value)| OsStr::new(value.as_str()));

        let program = resolve_program(self.program(), search_path, &cwd);
        if program.as_path() != self.program().as_path() {
            trace!(
                program = %self.program().display(),
                resolved = %program.display(),
                "resolved"
            );
        }
        Ok(program)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self, program: &Path, vars: &BTreeMap<String, String>) -> Command {
        let mut command = Command::new(program);
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        command.env_clear();
        command.envs(vars);

        command.stdin(Stdio::null());
        command.stdout(Self::stdio_from_flags(self.stream_flags()));
        command.stderr(Self::stdio_from_flags(self.stream_flags()));

        // Kill on drop for safety
        command.kill_on_drop(true);
        command
    }

    /// Converts `StreamFlags` to Stdio configuration.
    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}

/// Exit code as a shell reports it: signal deaths map to `128 + signal`.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt as _;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(-1)
}

/// Exit code as reported by the OS; Windows codes are passed through whole.
#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
