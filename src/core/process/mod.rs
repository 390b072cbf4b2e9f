// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async child process spawning.
//!
//! ```text
//! ProcessBuilder::new("envgate")
//!   .args() .cwd() .env() .inherit_stdio()
//!   .run(&gate, &store)
//!       --> gate.check(run:<program>)
//!       --> store.child_env(overlay)   (env_clear + inherited table)
//!       --> tokio::process::Command
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;
