// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment key comparison.
//!
//! ```text
//! KeyComparator
//!   CaseSensitive          exact scalar-value ordering (unix)
//!   NativeCaseInsensitive  CompareStringOrdinal(ignore_case) (windows)
//! ```
//!
//! The case-insensitive comparator defers to the OS folding table instead of
//! `str::to_uppercase`. The two disagree: Windows keeps `µ` (U+00B5) apart from
//! `Μ` (U+039C), and keeps titlecase `ǅ` apart from `ǆ`/`Ǆ`.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Ordering and equality for environment keys.
///
/// The ordering must be total and consistent with [`KeyComparator::keys_equal`],
/// since the store keeps its table sorted by it.
pub trait KeyComparator: Debug + Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    fn keys_equal(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Exact comparison, used on every platform except Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseSensitive;

impl KeyComparator for CaseSensitive {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Case-insensitive comparison using the Windows ordinal folding table.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCaseInsensitive;

#[cfg(windows)]
impl KeyComparator for NativeCaseInsensitive {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        use windows::Win32::Globalization::{
            CSTR_EQUAL, CSTR_GREATER_THAN, CSTR_LESS_THAN, CompareStringOrdinal,
        };

        let a: Vec<u16> = a.encode_utf16().collect();
        let b: Vec<u16> = b.encode_utf16().collect();

        // SAFETY: both buffers are live, initialized UTF-16 slices
        let result = unsafe { CompareStringOrdinal(&a, &b, true.into()) };
        match result {
            CSTR_LESS_THAN => Ordering::Less,
            CSTR_EQUAL => Ordering::Equal,
            CSTR_GREATER_THAN => Ordering::Greater,
            // Only fails on invalid arguments; fall back to code unit order.
            _ => a.cmp(&b),
        }
    }
}
