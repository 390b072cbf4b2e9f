// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key and value validation.
//!
//! ```text
//! key:   "" -> EmptyKey
//!        contains '\0' -> InvalidKeyChars('\0')
//!        contains '='  -> InvalidKeyChars('=')
//! value: contains '\0' -> InvalidValueChars('\0')
//! ```
//!
//! First failure wins. Non-ASCII, whitespace and length are unrestricted.

use crate::error::ValidationError;

/// Validates an environment variable name.
///
/// # Errors
///
/// Returns the first rule the key breaks, checked in the order above.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }
    if key.contains('\0') {
        return Err(ValidationError::InvalidKeyChars('\0'));
    }
    if key.contains('=') {
        return Err(ValidationError::InvalidKeyChars('='));
    }
    Ok(())
}

/// Validates an environment variable value. Empty values are allowed.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValueChars`] if the value contains NUL.
pub fn validate_value(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::InvalidValueChars('\0'));
    }
    Ok(())
}
