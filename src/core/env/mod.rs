// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! EnvStore (Mutex<EnvTable>, one per process via init_process_env)
//! Sources: current_vars(), EnvStore::from_vars, EnvStore::new
//! Ops: get/set/delete/to_object, each gated by `env`
//! ```
//!
//! - **Case-insensitive on Windows**, using the OS folding table
//! - **Validated**: empty keys, NUL, and `=` in keys are rejected up front
//! - **UTF-8 internal**: variables that are not valid Unicode are skipped

pub mod compare;
pub mod store;
mod types;
pub mod validate;


use std::sync::{Arc, OnceLock};

use crate::core::permissions::PermissionGate;
use crate::core::platform::Platform;
use store::EnvStore;

static PROCESS_ENV: OnceLock<EnvStore> = OnceLock::new();

/// Iterates over the environment inherited by this process.
///
/// Variables whose name or value is not valid Unicode are skipped.
pub fn current_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

/// Initializes the process-wide store from the inherited environment.
///
/// Only the first call seeds the store; later calls return the existing one
/// and ignore their arguments.
pub fn init_process_env(gate: Arc<dyn PermissionGate>, platform: Platform) -> &'static EnvStore {
    PROCESS_ENV.get_or_init(|| EnvStore::from_process(gate, platform))
}

/// The process-wide store, if [`init_process_env`] has run.
#[must_use]
pub fn process_env() -> Option<&'static EnvStore> {
    PROCESS_ENV.get()
}
