// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform strategy, selected once and injected.
//!
//! ```text
//!             Platform::host()
//!            /                \
//!     (windows)              (other)
//!  NativeCaseInsensitive   CaseSensitive
//!  user_ids = false        user_ids = true
//! ```

use bon::Builder;
use std::sync::Arc;

use super::env::compare::{CaseSensitive, KeyComparator};

/// Platform-dependent behavior shared by the store, the gate and the accessors.
#[derive(Debug, Clone, Builder)]
pub struct Platform {
    comparator: Arc<dyn KeyComparator>,
    /// Whether the OS has numeric user/group ids.
    #[builder(default = true)]
    user_ids: bool,
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

impl Platform {
    /// The strategy for the platform this binary was compiled for.
    #[must_use]
    pub fn host() -> Self {
        #[cfg(windows)]
        {
            Self::builder()
                .comparator(Arc::new(super::env::compare::NativeCaseInsensitive))
                .user_ids(false)
                .build()
        }
        #[cfg(not(windows))]
        {
            Self::builder().comparator(Arc::new(CaseSensitive)).build()
        }
    }

    /// A case-sensitive platform with user ids, regardless of the host.
    #[must_use]
    pub fn posix() -> Self {
        Self::builder().comparator(Arc::new(CaseSensitive)).build()
    }

    #[must_use]
    pub fn comparator(&self) -> &dyn KeyComparator {
        self.comparator.as_ref()
    }

    #[must_use]
    pub const fn has_user_ids(&self) -> bool {
        self.user_ids
    }
}
