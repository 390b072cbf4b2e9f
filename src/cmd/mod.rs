// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   env, sys, run, config (permissions, sources)
//! ```
//!
//! Results go to stdout as a single JSON document; diagnostics go to stderr.

pub mod config;
pub mod env;
pub mod run;
pub mod sys;

use serde::Serialize;
use std::io::Write;

use crate::error::Result;

/// Writes `value` to `out` as one line of compact JSON.
pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}
