// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Permission-gated environment store.
//!
//! ```text
//! get/set/delete(key)
//!   validate_key (+ validate_value)
//!     --> gate.check(env:KEY)
//!       --> Mutex<EnvTable> lookup under platform comparator
//!
//! to_object()
//!   gate.check(env) --> point-in-time BTreeMap copy
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{trace, warn};

use super::types::EnvTable;
use super::validate::{validate_key, validate_value};
use crate::core::permissions::{Capability, PermissionGate};
use crate::core::platform::Platform;
use crate::error::HostResult;

/// A process's view of its environment.
///
/// All operations lock one mutex, so `set`/`get`/`delete` are atomic with
/// respect to each other. Validation and permission failures never touch the
/// table.
#[derive(Debug)]
pub struct EnvStore {
    table: Mutex<EnvTable>,
    gate: Arc<dyn PermissionGate>,
    platform: Platform,
}

impl EnvStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(gate: Arc<dyn PermissionGate>, platform: Platform) -> Self {
        Self {
            table: Mutex::new(EnvTable::default()),
            gate,
            platform,
        }
    }

    /// Creates a store seeded with `vars`.
    ///
    /// Entries that would fail validation are dropped. Later entries win when
    /// two keys share an equivalence class.
    pub fn from_vars<I, K, V>(gate: Arc<dyn PermissionGate>, platform: Platform, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = EnvTable::default();
        for (key, value) in vars {
            let (key, value) = (key.into(), value.into());
            if validate_key(&key).is_err() || validate_value(&value).is_err() {
                trace!(key = %key.escape_debug(), "skipping unrepresentable variable");
                continue;
            }
            table.insert(platform.comparator(), key, value);
        }
        trace!(count = table.len(), "environment seeded");

        Self {
            table: Mutex::new(table),
            gate,
            platform,
        }
    }

    /// Creates a store seeded from the environment inherited by this process.
    #[must_use]
    pub fn from_process(gate: Arc<dyn PermissionGate>, platform: Platform) -> Self {
        Self::from_vars(gate, platform, super::current_vars())
    }

    /// Gets the value of `key`. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed key, or `PermissionDenied`
    /// without `env` access to `key`.
    pub fn get(&self, key: &str) -> HostResult<Option<String>> {
        validate_key(key)?;
        self.gate.check(&Capability::env_var(key))?;

        let table = self.lock();
        Ok(table
            .get(self.platform.comparator(), key)
            .map(str::to_owned))
    }

    /// Sets `key` to `value`, replacing any equivalent key and its spelling.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed key or value, or
    /// `PermissionDenied` without `env` access to `key`.
    pub fn set(&self, key: &str, value: &str) -> HostResult<()> {
        validate_key(key)?;
        validate_value(value)?;
        self.gate.check(&Capability::env_var(key))?;

        trace!(key, "env set");
        self.lock()
            .insert(self.platform.comparator(), key.to_owned(), value.to_owned());
        Ok(())
    }

    /// Removes `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed key, or `PermissionDenied`
    /// without `env` access to `key`.
    pub fn delete(&self, key: &str) -> HostResult<()> {
        validate_key(key)?;
        self.gate.check(&Capability::env_var(key))?;

        let removed = self.lock().remove(self.platform.comparator(), key);
        trace!(key, removed = removed.is_some(), "env delete");
        Ok(())
    }

    /// Copies the whole table.
    ///
    /// The copy is detached: later mutations of the store do not affect it.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without unscoped `env` access.
    pub fn to_object(&self) -> HostResult<BTreeMap<String, String>> {
        self.gate.check(&Capability::env())?;
        Ok(self.lock().to_map())
    }

    /// The environment a spawned child inherits: this table with `overlay`
    /// applied on top, overlay keys winning under the comparator.
    ///
    /// Inheritance is not a read by the caller, so no `env` check applies.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an overlay key or value is malformed.
    pub(crate) fn child_env<'a, I>(&self, overlay: I) -> HostResult<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = self.lock().clone();
        for (key, value) in overlay {
            validate_key(key)?;
            validate_value(value)?;
            table.insert(self.platform.comparator(), key.to_owned(), value.to_owned());
        }
        Ok(table.to_map())
    }

    /// The platform strategy this store compares keys with.
    #[must_use]
    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    fn lock(&self) -> MutexGuard<'_, EnvTable> {
        self.table.lock().unwrap_or_else(|poisoned| {
            warn!("environment table lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}
