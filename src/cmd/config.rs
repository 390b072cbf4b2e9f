// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for envgate.

use crate::config::Config;

/// Display the effective permission grants and log options.
pub fn run_permissions_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display the configuration layers that were applied, lowest priority first.
pub fn run_sources_command(sources: &[String]) {
    if sources.is_empty() {
        println!("No configuration sources, using defaults");
    } else {
        for line in sources {
            println!("{line}");
        }
    }
}
