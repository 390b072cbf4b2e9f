// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            HostError (~16 bytes)
//!                   |
//!      +------------+-------------+
//!      |            |             |
//!      v            v             v
//!  Validation  PermissionDenied   Os
//!  (inline)        Box          Box<io::Error>
//!
//! ValidationError   EmptyKey, InvalidKeyChars, InvalidValueChars
//! PermissionDenied  capability + "--allow-*" remediation hint
//! ConfigError       InvalidValue (section, key, message)
//! ```
//!
//! "Not found" is never an error: absent keys are `Ok(None)`.

use thiserror::Error;

use crate::core::permissions::PermissionDenied;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HostError`].
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Error returned by the environment store and the system info accessors.
///
/// Callers can match on the variant to decide whether to ask for a permission
/// grant or to reject the input outright.
#[derive(Debug, Error)]
pub enum HostError {
    /// Malformed key or value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The required capability was not granted.
    #[error(transparent)]
    PermissionDenied(Box<PermissionDenied>),

    /// The underlying OS query failed.
    #[error("os error: {0}")]
    Os(Box<std::io::Error>),
}

impl HostError {
    /// Returns true if this is a permission failure.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Returns true if this is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<PermissionDenied> for HostError {
    fn from(err: PermissionDenied) -> Self {
        Self::PermissionDenied(Box::new(err))
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        Self::Os(Box::new(err))
    }
}

/// Key/value validation errors.
///
/// The display strings are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Key is an empty string")]
    EmptyKey,

    #[error("Key contains invalid characters: \"{}\"", escape_char(*.0))]
    InvalidKeyChars(char),

    #[error("Value contains invalid characters: \"{}\"", escape_char(*.0))]
    InvalidValueChars(char),
}

impl ValidationError {
    /// The offending character, if any.
    #[must_use]
    pub const fn offending_char(&self) -> Option<char> {
        match self {
            Self::EmptyKey => None,
            Self::InvalidKeyChars(c) | Self::InvalidValueChars(c) => Some(*c),
        }
    }
}

/// Renders NUL as the two characters `\0`; everything else literally.
fn escape_char(c: char) -> String {
    if c == '\0' {
        "\\0".to_string()
    } else {
        c.to_string()
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
