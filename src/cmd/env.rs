// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `env get` and `env list`.

use std::io::Write;

use crate::cli::{EnvArgs, EnvCommand};
use crate::core::env::store::EnvStore;
use crate::error::{HostResult, Result};

/// Run the env command.
///
/// # Errors
///
/// Returns the first validation or permission error; nothing is printed
/// in that case.
pub fn run_env_command(args: &EnvArgs, store: &EnvStore) -> Result<()> {
    write_env(&mut std::io::stdout().lock(), args, store)
}

pub(crate) fn write_env<W: Write>(out: &mut W, args: &EnvArgs, store: &EnvStore) -> Result<()> {
    match &args.command {
        EnvCommand::Get { keys } => {
            let values = keys
                .iter()
                .map(|key| store.get(key))
                .collect::<HostResult<Vec<_>>>()?;
            super::write_json(out, &values)
        }
        EnvCommand::List => super::write_json(out, &store.to_object()?),
    }
}
