// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for core tests.
//!
//! Provides a recording gate, a mock case-insensitive comparator, and
//! log-capturing infrastructure.

use std::cmp::Ordering;
use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use super::env::compare::KeyComparator;
use super::permissions::{Capability, PermissionDenied, PermissionGate, Permissions};
use super::platform::Platform;

/// Gate that delegates to [`Permissions`] and records every capability asked for.
#[derive(Debug)]
pub(crate) struct RecordingGate {
    inner: Permissions,
    checked: Mutex<Vec<Capability>>,
}

impl RecordingGate {
    pub(crate) fn new(inner: Permissions) -> Arc<Self> {
        Arc::new(Self {
            inner,
            checked: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn allow_all() -> Arc<Self> {
        Self::new(Permissions::allow_all())
    }

    pub(crate) fn deny_all() -> Arc<Self> {
        Self::new(Permissions::deny_all())
    }

    pub(crate) fn checked(&self) -> Vec<String> {
        self.checked
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl PermissionGate for RecordingGate {
    fn check(&self, capability: &Capability) -> Result<(), PermissionDenied> {
        self.checked.lock().unwrap().push(capability.clone());
        self.inner.check(capability)
    }
}

/// ASCII-only case folding, standing in for a case-insensitive host.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AsciiFold;

impl KeyComparator for AsciiFold {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.bytes()
            .map(|b| b.to_ascii_uppercase())
            .cmp(b.bytes().map(|b| b.to_ascii_uppercase()))
    }
}

pub(crate) fn case_insensitive_platform() -> Platform {
    Platform::builder()
        .comparator(Arc::new(AsciiFold))
        .user_ids(false)
        .build()
}

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs `f` while capturing tracing output at every level.
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let guard = buffer.lock().unwrap();
    String::from_utf8_lossy(&guard).to_string()
}
