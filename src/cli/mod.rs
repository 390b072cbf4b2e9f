// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envgate using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envgate [global options] <command>
//! env get KEY...
//! env list
//! sys {pid|ppid|exec-path|hostname|os-release|loadavg|memory|uid|gid}
//! run [--env K=V]... [--unset K]... -- PROGRAM [ARGS]...
//! permissions
//! sources
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Permission-gated access to the process environment and host identity.
#[derive(Debug, Parser)]
#[command(
    name = "envgate",
    author,
    version,
    about = "Permission-gated environment and host information",
    long_about = "envgate Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads and writes environment variables and queries host\n\
                  information, but only with the matching --allow-* grant.",
    after_help = "PERMISSIONS:\n\n\
                  --allow-env             all variables\n\
                  --allow-env=PATH,HOME   only the listed variables\n\
                  --allow-sys=uid,gid     only the listed host facets\n\
                  --allow-read=DIR        paths under DIR (needed for exec-path)\n\
                  --allow-run=PROGRAM     programs by name or path\n\n\
                  Grants can also come from envgate.toml, --config FILE and\n\
                  ENVGATE_PERMISSIONS__ALLOW_* variables."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Reads the environment.
    Env(EnvArgs),

    /// Queries host information.
    Sys(SysArgs),

    /// Runs a program with the gated environment.
    Run(RunArgs),

    /// Lists the effective permission grants and log options.
    Permissions,

    /// Lists the configuration sources used.
    Sources,
}

/// Arguments for the `env` command.
#[derive(Debug, Args)]
pub struct EnvArgs {
    #[command(subcommand)]
    pub command: EnvCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Prints the values of KEYS as a JSON array, `null` for unset keys.
    Get {
        /// Variable names, in output order.
        #[arg(required = true, allow_hyphen_values = true, value_name = "KEY")]
        keys: Vec<String>,
    },

    /// Prints every variable as a JSON object.
    List,
}

/// Arguments for the `sys` command.
#[derive(Debug, Args)]
pub struct SysArgs {
    /// What to query.
    #[arg(value_enum)]
    pub query: SysQuery,
}

/// Host queries, printed as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SysQuery {
    Pid,
    Ppid,
    ExecPath,
    Hostname,
    OsRelease,
    Loadavg,
    Memory,
    Uid,
    Gid,
}

/// Arguments for the `run` command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Sets a variable before spawning. Can be specified multiple times.
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value, action = clap::ArgAction::Append)]
    pub set: Vec<(String, String)>,

    /// Removes a variable before spawning. Can be specified multiple times.
    #[arg(long = "unset", value_name = "KEY", action = clap::ArgAction::Append)]
    pub unset: Vec<String>,

    /// Program and its arguments, after `--`.
    #[arg(last = true, required = true, num_args = 1.., value_name = "PROGRAM")]
    pub command: Vec<String>,
}

/// Splits `KEY=VALUE` at the first `=`.
///
/// The key is not validated here; the environment store rejects bad keys.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
