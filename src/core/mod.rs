// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for gated environment and host access.
//!
//! ```text
//!                 core
//!                  |
//!     +--------+---+-------+---------+
//!     |        |           |         |
//!     v        v           v         v
//!    env   permissions    sys     process
//!     |        |           |         |
//!  validate  Capability  SysBackend  Builder
//!  compare   Grant       unix/win  Output
//!  store     Prompter
//!     |        |           |         |
//!     +--------+-----+-----+---------+
//!                    v
//!                platform
//!         comparator + user ids
//! ```

pub mod env;
pub mod permissions;
pub mod platform;
pub mod process;
pub mod sys;

#[cfg(test)]
pub(crate) mod test_utils;
