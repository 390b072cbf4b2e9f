// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Permissions --> Command Dispatch
//!   Env | Sys | Run | Permissions | Sources | Version
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use envgate::cli::{self, Command};
use envgate::cmd::config::{run_permissions_command, run_sources_command};
use envgate::cmd::env::run_env_command;
use envgate::cmd::run::run_run_command;
use envgate::cmd::sys::run_sys_command;
use envgate::config::Config;
use envgate::config::loader::ConfigLoader;
use envgate::core::env::init_process_env;
use envgate::core::permissions::PermissionGate;
use envgate::core::platform::Platform;
use envgate::core::sys::SystemInfo;
use envgate::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let overrides = cli.global.to_config_overrides();
    let loader = match ConfigLoader::layered(&cli.global.configs, overrides) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Invalid option: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let sources = loader.format_sources();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = dispatch_command(&cli, &config, &sources).await;
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        // Windows exit codes are 32-bit; `ExitCode` only carries a byte.
        Err(_) => {
            drop(log_guard);
            std::process::exit(code)
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.log.level)
        .maybe_with_log_file(config.log.file.clone())
        .with_json(config.log.json)
        .build()
}

/// Runs the command and returns the process exit code.
async fn dispatch_command(cli: &cli::Cli, config: &Config, sources: &[String]) -> i32 {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(0)
        }
        Some(Command::Permissions) => {
            run_permissions_command(config);
            Ok(0)
        }
        Some(Command::Sources) => {
            run_sources_command(sources);
            Ok(0)
        }
        Some(command) => run_gated_command(command, config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        1
    })
}

/// Commands that go through the permission gate.
async fn run_gated_command(command: &Command, config: &Config) -> envgate::error::Result<i32> {
    let platform = Platform::host();
    let gate: Arc<dyn PermissionGate> = Arc::new(config.permissions(platform.clone())?);
    let store = init_process_env(Arc::clone(&gate), platform);

    match command {
        Command::Env(args) => run_env_command(args, store).map(|()| 0),
        Command::Sys(args) => run_sys_command(args, &SystemInfo::host(Arc::clone(&gate))).map(|()| 0),
        Command::Run(args) => run_run_command(args, gate.as_ref(), store).await,
        Command::Version | Command::Permissions | Command::Sources => Ok(0),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}
